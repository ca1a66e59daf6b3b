//! Value types for committed state: items, containers, boards, and the flat
//! collection used by the edge-based variant.
//!
//! Everything here is immutable by convention: commits produce new snapshots
//! by structural replacement, never by in-place mutation.

pub mod board;
pub mod container;
pub mod flat;
pub mod id;
pub mod item;

pub use board::{Board, BoardError};
pub use container::{Capacity, Container};
pub use flat::{FlatCollection, FlatError};
pub use id::{ContainerId, ItemId};
pub use item::Item;
