//! Error taxonomy for move resolution.
//!
//! Rejections are local and recoverable: a failed move never touches
//! containers outside the two involved and never leaves a session outside
//! `Idle` or `Dragging`. Index precondition violations are a different class
//! entirely — those are caller bugs and the resolvers panic loudly rather
//! than clamp (see [`crate::resolve`]).

#![allow(clippy::module_name_repetitions)]

use crate::model::{ContainerId, ItemId};

/// Why a resolved move was not committed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The target container is at its configured bound.
    ///
    /// Surfaced to callers as an explicit rejection, distinct from a
    /// successful no-op move, so a deny indicator can be shown.
    #[error("container '{container}' is full ({occupancy}/{capacity}); move rejected")]
    CapacityExceeded {
        /// The container that refused the item.
        container: ContainerId,
        /// Its configured bound.
        capacity: usize,
        /// Its occupancy at the time of the attempt.
        occupancy: usize,
    },

    /// A source or target item id resolved to nothing at commit time.
    ///
    /// Stale events racing an external state change land here; the session
    /// layer maps this to a cancel, never a crash.
    #[error("unknown item id '{0}'")]
    UnknownItem(ItemId),

    /// A target container id resolved to nothing at commit time.
    #[error("unknown container id '{0}'")]
    UnknownContainer(ContainerId),
}
