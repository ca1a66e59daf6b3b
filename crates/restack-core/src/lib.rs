//! restack-core: the reorder-resolution engine.
//!
//! Pure logic for rearranging items within and across capacity-bounded lists,
//! and for reordering a flat collection with a closest-edge heuristic. The
//! engine consumes already-resolved [`event::DragEvent`] values from an
//! external input layer and produces new committed snapshots; rendering,
//! hit-testing, and persistence live elsewhere.
//!
//! # Layering
//!
//! - [`model`] — immutable-by-convention value types and snapshots.
//! - [`resolve`] — the pure resolvers (same-container, cross-container,
//!   edge-based destination).
//! - [`session`] — the drag-session state machines that gate the resolvers
//!   and own commits.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums; recoverable rejections are values,
//!   index precondition violations panic loudly.
//! - **Logging**: `tracing` macros (`warn!` for input-layer bugs and stale
//!   events, `debug!` for commits and rejections).

pub mod error;
pub mod event;
pub mod model;
pub mod resolve;
pub mod session;

pub use error::MoveError;
pub use event::{Axis, DragEvent, DropTarget, Edge};
pub use model::{
    Board, BoardError, Capacity, Container, ContainerId, FlatCollection, FlatError, Item, ItemId,
};
pub use session::{BoardPreview, BoardSession, DropOutcome, FlatPreview, FlatSession, SessionState};
