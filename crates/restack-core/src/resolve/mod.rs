//! The pure resolvers.
//!
//! Each resolver translates already-resolved drag signals into a new ordering
//! (or a rejection) without touching any shared state. The session layer in
//! [`crate::session`] owns when they run and when their results commit.

pub mod edge;
pub mod reorder;
pub mod transfer;

pub use edge::{indicator_edge, reorder_destination};
pub use reorder::{array_move, reorder_within};
pub use transfer::transfer;
