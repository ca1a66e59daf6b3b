//! Cross-container move resolution.
//!
//! # Order of operations
//!
//! 1. Capacity check on the target using the post-insertion count. Rejection
//!    happens before anything is produced, so it is atomic: both containers
//!    stay exactly as they were.
//! 2. Remove the dragged id from the source ordering.
//! 3. Insert it into the target ordering, clamping a past-the-end index to an
//!    append ("drop past the end" is a legitimate gesture, not a bug).
//!
//! Containers other than the two involved are never touched.

use crate::error::MoveError;
use crate::model::{Capacity, Container, ItemId};

/// Resolve a move of `source.items[active_index]` into `target` at
/// `over_index`, returning the `(new_source, new_target)` ordering pair.
///
/// `over_index` may equal the target's length (drop into empty space at the
/// end); larger values clamp to an append.
///
/// # Errors
///
/// [`MoveError::CapacityExceeded`] when the target cannot take one more item.
/// No state is produced on rejection.
///
/// # Panics
///
/// Panics if `active_index` is out of range, or if source and target share an
/// identifier — callers must disambiguate by container identity and route
/// same-container drags to [`super::reorder_within`] instead.
pub fn transfer(
    source: &Container,
    target: &Container,
    active_index: usize,
    over_index: usize,
) -> Result<(Vec<ItemId>, Vec<ItemId>), MoveError> {
    assert!(
        source.id != target.id,
        "transfer: source and target are both '{}'; same-container drags take the reorder path",
        source.id
    );
    assert!(
        active_index < source.items.len(),
        "transfer: active index {active_index} out of range for source '{}' of length {}",
        source.id,
        source.items.len()
    );

    if !target.capacity.can_accept(target.items.len(), 1) {
        let bound = match target.capacity {
            Capacity::Bounded(bound) => bound,
            Capacity::Unlimited => unreachable!("unlimited capacity accepts everything"),
        };
        tracing::debug!(
            target_container = %target.id,
            occupancy = target.items.len(),
            bound,
            "cross-container move rejected at capacity"
        );
        return Err(MoveError::CapacityExceeded {
            container: target.id.clone(),
            capacity: bound,
            occupancy: target.items.len(),
        });
    }

    let mut new_source = source.items.clone();
    let moved = new_source.remove(active_index);

    let mut new_target = target.items.clone();
    let at = over_index.min(new_target.len());
    new_target.insert(at, moved);

    Ok((new_source, new_target))
}
