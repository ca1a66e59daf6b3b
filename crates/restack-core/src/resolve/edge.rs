//! Edge-based destination resolution for flat collections.
//!
//! Drop targets in the flat variant are item hit-regions split into two
//! halves along an axis. The nearer half (the "closest edge") decides whether
//! the dragged item lands before or after the target, and the raw target
//! index is adjusted for the removal shift when the drag moves forward.

use crate::event::{Axis, Edge};

/// Convert a hover into the index a single-element move should finish at.
///
/// The leading edge (Left/Top) places before the target, the trailing edge
/// (Right/Bottom) after it. When `start_index < index_of_target` the removal
/// of the source shifts every later index down by one, so the raw destination
/// is decremented before insertion. A `None` edge — the pointer was over the
/// target without a resolved half — places at the target's own index, with
/// the same shift adjustment.
///
/// `start_index == index_of_target` is a no-op and returns `start_index`.
#[must_use]
pub fn reorder_destination(
    start_index: usize,
    index_of_target: usize,
    closest_edge: Option<Edge>,
    axis: Axis,
) -> usize {
    if start_index == index_of_target {
        return start_index;
    }

    let lands_after = closest_edge.is_some_and(|edge| edge.is_trailing(axis));
    if start_index < index_of_target {
        // Moving forward: removal shifts the target down by one.
        if lands_after {
            index_of_target
        } else {
            index_of_target - 1
        }
    } else if lands_after {
        index_of_target + 1
    } else {
        index_of_target
    }
}

/// Which edge indicator to surface while hovering, if any.
///
/// Suppresses the directionally redundant edges adjacent to the source:
/// hovering the item immediately *before* the source with a trailing edge, or
/// immediately *after* it with a leading edge, would commit to the current
/// order, so no indicator is shown. Hovering the dragged item itself never
/// shows an indicator. The suppression is deliberately narrow — exactly
/// adjacent neighbors only.
///
/// This is a behavioral contract, not presentation polish: a drop in a
/// suppressed configuration leaves the collection unchanged.
#[must_use]
pub fn indicator_edge(
    source_index: usize,
    target_index: usize,
    closest_edge: Option<Edge>,
    axis: Axis,
) -> Option<Edge> {
    if source_index == target_index {
        return None;
    }
    let edge = closest_edge?;

    let target_is_before_source = target_index + 1 == source_index;
    let target_is_after_source = target_index == source_index + 1;

    let hidden = (target_is_before_source && edge.is_trailing(axis))
        || (target_is_after_source && edge.is_leading(axis));
    if hidden {
        None
    } else {
        Some(edge)
    }
}
