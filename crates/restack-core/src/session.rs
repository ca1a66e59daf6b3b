//! Drag-session state machines.
//!
//! A session owns the committed snapshot and tracks one in-progress gesture:
//!
//! ```text
//! Idle --start--> Dragging --drop/cancel--> Idle
//!                    |  ^
//!                    +--+ hover (preview recompute, no commit)
//! ```
//!
//! The hover preview is transient, speculative state for display only; it is
//! never treated as committed. Commits happen exactly once, on a drop that
//! resolves successfully, by structural snapshot replacement — so an observer
//! holding the previous snapshot keeps a fully consistent value with no
//! locking. A drop whose target is gone is a cancel, never a crash, and a
//! rejected drop is reported distinctly from a legitimately unchanged one.

#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};

use crate::error::MoveError;
use crate::event::{Axis, DragEvent, DropTarget, Edge};
use crate::model::{Board, ContainerId, FlatCollection, ItemId};
use crate::resolve::{array_move, indicator_edge, reorder_destination, reorder_within, transfer};

// ---------------------------------------------------------------------------
// Shared session types
// ---------------------------------------------------------------------------

/// Lifecycle of one gesture, parameterized over the preview shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState<P> {
    /// No gesture in progress.
    Idle,
    /// A gesture is in progress.
    Dragging {
        /// The item being dragged.
        active: ItemId,
        /// Last computed hover destination, for display only.
        preview: Option<P>,
    },
}

impl<P> SessionState<P> {
    /// Whether a gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Result of a terminal drop transition.
///
/// `Committed` may carry a snapshot identical to the previous one (a
/// legitimate no-op move); `Rejected` means the move was refused and nothing
/// changed. Callers that want to deny-flash a rejection but not an unchanged
/// reorder branch on this distinction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome<S> {
    /// The move resolved; this is the new authoritative snapshot.
    Committed(S),
    /// The move was refused; the previous snapshot stands.
    Rejected(MoveError),
    /// The gesture ended without a usable target; the previous snapshot stands.
    Canceled,
}

impl<S> DropOutcome<S> {
    /// The committed snapshot, if any.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&S> {
        match self {
            Self::Committed(snapshot) => Some(snapshot),
            Self::Rejected(_) | Self::Canceled => None,
        }
    }

    /// Whether the drop committed.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

// ---------------------------------------------------------------------------
// Multi-container sessions
// ---------------------------------------------------------------------------

/// Hover destination within a board: which container, at what index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPreview {
    /// Container the drop would land in.
    pub container: ContainerId,
    /// Index within that container's ordering.
    pub index: usize,
}

/// A drag session over a multi-container [`Board`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSession {
    board: Board,
    state: SessionState<BoardPreview>,
}

impl BoardSession {
    /// Open a session over an initial committed snapshot.
    #[must_use]
    pub const fn new(board: Board) -> Self {
        Self {
            board,
            state: SessionState::Idle,
        }
    }

    /// The current committed snapshot.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The current gesture state.
    #[must_use]
    pub const fn state(&self) -> &SessionState<BoardPreview> {
        &self.state
    }

    /// Begin a gesture. Returns whether the session entered `Dragging`.
    ///
    /// A start while already dragging is ignored (re-entrant drags are not
    /// supported), as is a start for an item the board does not hold.
    pub fn start(&mut self, source: &ItemId) -> bool {
        if self.state.is_dragging() {
            tracing::warn!(%source, "ignoring drag start while a drag is in progress");
            return false;
        }
        if self.board.owner_of(source).is_none() {
            tracing::warn!(%source, "ignoring drag start for unknown item");
            return false;
        }
        self.state = SessionState::Dragging {
            active: source.clone(),
            preview: None,
        };
        true
    }

    /// Recompute the hover preview. No commit.
    ///
    /// Returns `None` (and clears the stored preview) when there is no legal
    /// destination to indicate: no gesture in progress, a stale source or
    /// target, or a cross-container hover over a full target.
    pub fn hover(&mut self, event: &DragEvent) -> Option<BoardPreview> {
        let preview = self.resolve_preview(event);
        if let SessionState::Dragging {
            preview: stored, ..
        } = &mut self.state
        {
            stored.clone_from(&preview);
        }
        preview
    }

    fn resolve_preview(&self, event: &DragEvent) -> Option<BoardPreview> {
        let SessionState::Dragging { active, .. } = &self.state else {
            return None;
        };
        if active != &event.source {
            return None;
        }
        let (source_container, _) = self.board.locate(&event.source)?;
        let (target_container, index) = self.target_slot(event.target.as_ref()?)?;

        if target_container != source_container.id {
            let container = self.board.container(&target_container)?;
            if !container.capacity.can_accept(container.len(), 1) {
                return None;
            }
        }
        Some(BoardPreview {
            container: target_container,
            index,
        })
    }

    /// Resolve a drop target to `(container, index)`; a container target
    /// means its trailing empty space.
    fn target_slot(&self, target: &DropTarget) -> Option<(ContainerId, usize)> {
        match target {
            DropTarget::Item(id) => {
                let (container, index) = self.board.locate(id)?;
                Some((container.id.clone(), index))
            }
            DropTarget::Container(id) => {
                let container = self.board.container(id)?;
                Some((container.id.clone(), container.len()))
            }
        }
    }

    /// Terminal transition: resolve against the final target and commit.
    ///
    /// Always returns to `Idle`. An absent or stale target cancels; a full
    /// target rejects; otherwise the resolver's result becomes the new
    /// committed snapshot.
    pub fn drop(&mut self, event: &DragEvent) -> DropOutcome<Board> {
        let SessionState::Dragging { active, .. } = &self.state else {
            tracing::warn!(source = %event.source, "ignoring drop without an active drag");
            return DropOutcome::Canceled;
        };
        if active != &event.source {
            tracing::warn!(
                source = %event.source,
                %active,
                "drop source does not match the active drag; canceling"
            );
            self.state = SessionState::Idle;
            return DropOutcome::Canceled;
        }
        self.state = SessionState::Idle;

        let Some(target) = event.target.as_ref() else {
            tracing::debug!(source = %event.source, "drop outside any target; canceling");
            return DropOutcome::Canceled;
        };
        let Some((source_container, active_index)) = self.board.locate(&event.source) else {
            tracing::warn!(source = %event.source, "drop for unknown item; canceling");
            return DropOutcome::Canceled;
        };
        let Some((target_id, over_index)) = self.target_slot(target) else {
            tracing::warn!(source = %event.source, "drop on unknown target; canceling");
            return DropOutcome::Canceled;
        };

        // Disambiguation is by container identity, not variable identity:
        // an item target sitting in the source container is a reorder.
        if source_container.id == target_id {
            let to = over_index.min(source_container.len() - 1);
            let items = reorder_within(source_container, active_index, to);
            let next = self.board.with_reordered(&target_id, items);
            tracing::debug!(
                source = %event.source,
                container = %target_id,
                from = active_index,
                to = over_index,
                "committed same-container reorder"
            );
            self.board = next.clone();
            return DropOutcome::Committed(next);
        }

        let source_id = source_container.id.clone();
        let Some(target_container) = self.board.container(&target_id) else {
            return DropOutcome::Canceled;
        };
        match transfer(source_container, target_container, active_index, over_index) {
            Ok((new_source, new_target)) => {
                let next = self.board.with_transferred(
                    &source_id,
                    new_source,
                    &target_id,
                    new_target,
                    &event.source,
                );
                tracing::debug!(
                    source = %event.source,
                    from = %source_id,
                    to = %target_id,
                    index = over_index,
                    "committed cross-container move"
                );
                self.board = next.clone();
                DropOutcome::Committed(next)
            }
            Err(err) => {
                tracing::debug!(source = %event.source, %err, "drop rejected");
                DropOutcome::Rejected(err)
            }
        }
    }

    /// Discard the transient preview and return to `Idle`. No commit; the
    /// pre-drag snapshot is already the committed state.
    pub fn cancel(&mut self) {
        if self.state.is_dragging() {
            tracing::debug!("drag canceled");
        }
        self.state = SessionState::Idle;
    }
}

// ---------------------------------------------------------------------------
// Flat-collection sessions
// ---------------------------------------------------------------------------

/// Hover state within a flat collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatPreview {
    /// Index of the hovered item.
    pub target_index: usize,
    /// Edge indicator to surface, if not suppressed.
    pub indicator: Option<Edge>,
    /// Index the dragged item would finish at on drop.
    pub destination: usize,
}

/// A drag session over a [`FlatCollection`] using closest-edge placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSession {
    collection: FlatCollection,
    axis: Axis,
    state: SessionState<FlatPreview>,
}

impl FlatSession {
    /// Open a session over an initial collection, reordering along `axis`.
    #[must_use]
    pub const fn new(collection: FlatCollection, axis: Axis) -> Self {
        Self {
            collection,
            axis,
            state: SessionState::Idle,
        }
    }

    /// The current committed snapshot.
    #[must_use]
    pub const fn collection(&self) -> &FlatCollection {
        &self.collection
    }

    /// The current gesture state.
    #[must_use]
    pub const fn state(&self) -> &SessionState<FlatPreview> {
        &self.state
    }

    /// Begin a gesture. Same rules as [`BoardSession::start`].
    pub fn start(&mut self, source: &ItemId) -> bool {
        if self.state.is_dragging() {
            tracing::warn!(%source, "ignoring drag start while a drag is in progress");
            return false;
        }
        if self.collection.index_of(source).is_none() {
            tracing::warn!(%source, "ignoring drag start for unknown item");
            return false;
        }
        self.state = SessionState::Dragging {
            active: source.clone(),
            preview: None,
        };
        true
    }

    /// Recompute the hover preview. No commit.
    ///
    /// The preview's `indicator` is `None` when hovering the dragged item
    /// itself or when the closest edge is directionally redundant (the
    /// suppression rule); the hover itself is still valid.
    pub fn hover(&mut self, event: &DragEvent) -> Option<FlatPreview> {
        let preview = self.resolve_preview(event);
        if let SessionState::Dragging {
            preview: stored, ..
        } = &mut self.state
        {
            stored.clone_from(&preview);
        }
        preview
    }

    fn resolve_preview(&self, event: &DragEvent) -> Option<FlatPreview> {
        let SessionState::Dragging { active, .. } = &self.state else {
            return None;
        };
        if active != &event.source {
            return None;
        }
        let source_index = self.collection.index_of(&event.source)?;
        let Some(DropTarget::Item(target)) = event.target.as_ref() else {
            return None;
        };
        let target_index = self.collection.index_of(target)?;
        let axis = event.axis.unwrap_or(self.axis);

        Some(FlatPreview {
            target_index,
            indicator: indicator_edge(source_index, target_index, event.edge, axis),
            destination: reorder_destination(source_index, target_index, event.edge, axis),
        })
    }

    /// Terminal transition: resolve the final destination and commit.
    ///
    /// Always returns to `Idle`. The flat variant has no capacity bound, so
    /// the outcome is either `Committed` or `Canceled`.
    pub fn drop(&mut self, event: &DragEvent) -> DropOutcome<FlatCollection> {
        let SessionState::Dragging { active, .. } = &self.state else {
            tracing::warn!(source = %event.source, "ignoring drop without an active drag");
            return DropOutcome::Canceled;
        };
        if active != &event.source {
            tracing::warn!(
                source = %event.source,
                %active,
                "drop source does not match the active drag; canceling"
            );
            self.state = SessionState::Idle;
            return DropOutcome::Canceled;
        }
        self.state = SessionState::Idle;

        let Some(DropTarget::Item(target)) = event.target.as_ref() else {
            tracing::debug!(source = %event.source, "drop outside any target; canceling");
            return DropOutcome::Canceled;
        };
        let (Some(start_index), Some(target_index)) = (
            self.collection.index_of(&event.source),
            self.collection.index_of(target),
        ) else {
            tracing::warn!(source = %event.source, "drop with stale ids; canceling");
            return DropOutcome::Canceled;
        };

        let axis = event.axis.unwrap_or(self.axis);
        let finish_index = reorder_destination(start_index, target_index, event.edge, axis);
        let order = array_move(self.collection.order(), start_index, finish_index);
        let next = self.collection.with_order(order);
        tracing::debug!(
            source = %event.source,
            from = start_index,
            to = finish_index,
            "committed flat reorder"
        );
        self.collection = next.clone();
        DropOutcome::Committed(next)
    }

    /// Discard the transient preview and return to `Idle`. No commit.
    pub fn cancel(&mut self) {
        if self.state.is_dragging() {
            tracing::debug!("drag canceled");
        }
        self.state = SessionState::Idle;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
