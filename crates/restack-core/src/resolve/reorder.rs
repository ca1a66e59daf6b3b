//! Same-container reorder resolution.
//!
//! A reorder is a single-element array move: remove the dragged element and
//! reinsert it at the hovered position, shifting the elements in between by
//! one toward the vacated slot. It is not a general permutation.

use crate::model::{Container, ItemId};

/// Move the element at `from` to position `to`, returning a new ordering.
///
/// `from == to` returns the input unchanged (idempotent no-op). All other
/// elements keep their relative order.
///
/// # Panics
///
/// Panics if either index is out of range. Invalid indices are a contract
/// violation by the input layer, not a runtime fault this resolver recovers
/// from, so it fails loudly instead of clamping.
#[must_use]
pub fn array_move<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    assert!(
        from < list.len(),
        "array_move: from index {from} out of range for length {}",
        list.len()
    );
    assert!(
        to < list.len(),
        "array_move: to index {to} out of range for length {}",
        list.len()
    );
    let mut out = list.to_vec();
    let moved = out.remove(from);
    out.insert(to, moved);
    out
}

/// Resolve a drag within one container to a new ordering.
///
/// `active_index` is the dragged item's position; `over_index` is the position
/// of the item under the pointer. Capacity is never consulted: an item may
/// always reorder within its own container, even at the bound.
///
/// # Panics
///
/// Panics if either index is not a valid position in the container.
#[must_use]
pub fn reorder_within(container: &Container, active_index: usize, over_index: usize) -> Vec<ItemId> {
    array_move(&container.items, active_index, over_index)
}

#[cfg(test)]
mod tests {
    use super::{array_move, reorder_within};
    use crate::model::{Capacity, Container, ItemId};
    use proptest::prelude::*;

    fn ids(raw: &[&str]) -> Vec<ItemId> {
        raw.iter().map(|s| ItemId::from(*s)).collect()
    }

    #[test]
    fn moves_forward_and_backward() {
        let list = ids(&["a", "b", "c", "d"]);
        assert_eq!(array_move(&list, 0, 2), ids(&["b", "c", "a", "d"]));
        assert_eq!(array_move(&list, 3, 1), ids(&["a", "d", "b", "c"]));
    }

    #[test]
    fn same_index_is_a_no_op() {
        let list = ids(&["a", "b", "c"]);
        assert_eq!(array_move(&list, 1, 1), list);
    }

    #[test]
    fn reorder_within_at_capacity_is_allowed() {
        let container = Container::with_items("B", Capacity::Bounded(5), ["3", "4", "5", "6", "7"]);
        let reordered = reorder_within(&container, 4, 0);
        assert_eq!(reordered, ids(&["7", "3", "4", "5", "6"]));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn invalid_from_index_panics() {
        let list = ids(&["a", "b"]);
        let _ = array_move(&list, 2, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn invalid_to_index_panics() {
        let list = ids(&["a", "b"]);
        let _ = array_move(&list, 0, 2);
    }

    proptest! {
        #[test]
        fn preserves_length_and_membership(
            list in proptest::collection::vec(0u32..100, 1..20),
            from_seed in 0usize..20,
            to_seed in 0usize..20,
        ) {
            let from = from_seed % list.len();
            let to = to_seed % list.len();
            let moved = array_move(&list, from, to);
            prop_assert_eq!(moved.len(), list.len());
            let mut a = moved.clone();
            let mut b = list.clone();
            a.sort_unstable();
            b.sort_unstable();
            prop_assert_eq!(a, b);
            prop_assert_eq!(moved[to], list[from]);
        }

        #[test]
        fn others_keep_relative_order(
            list in proptest::collection::vec(0u32..1000, 2..20),
            from_seed in 0usize..20,
            to_seed in 0usize..20,
        ) {
            let from = from_seed % list.len();
            let to = to_seed % list.len();
            let moved = array_move(&list, from, to);

            let rest_before: Vec<u32> = list
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != from)
                .map(|(_, v)| *v)
                .collect();
            let rest_after: Vec<u32> = moved
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != to)
                .map(|(_, v)| *v)
                .collect();
            prop_assert_eq!(rest_before, rest_after);
        }
    }
}
