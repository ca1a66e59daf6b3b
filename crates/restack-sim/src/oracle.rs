//! Invariant oracle for simulated drag campaigns.
//!
//! After every committed step the oracle re-derives the properties the engine
//! promises: the partition invariant (every item in exactly one place, owner
//! index agreeing), capacity bounds, rejection atomicity, and determinism of
//! the committed snapshot sequence across identically-seeded runs.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeSet;

use restack_core::{Board, Capacity, ContainerId, FlatCollection, ItemId};

// ── Core result types ─────────────────────────────────────────────────────────

/// Oracle result for an invariant check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleResult {
    /// `true` iff no violations were found.
    pub passed: bool,
    /// Detailed description of every invariant that was violated.
    pub violations: Vec<InvariantViolation>,
}

impl OracleResult {
    /// Construct a passing result.
    #[must_use]
    pub(crate) const fn pass() -> Self {
        Self {
            passed: true,
            violations: Vec::new(),
        }
    }

    /// Construct a failing result from one or more violations.
    #[must_use]
    pub(crate) const fn fail(violations: Vec<InvariantViolation>) -> Self {
        Self {
            passed: false,
            violations,
        }
    }

    /// Merge another result into this one (failures accumulate).
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        if !other.passed {
            self.passed = false;
            self.violations.extend(other.violations);
        }
        self
    }
}

// ── Invariant violation diagnostics ──────────────────────────────────────────

/// Diagnostic information for a single failed invariant check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// An item present at session start is missing from the committed state.
    MissingItem {
        /// The vanished item.
        item: ItemId,
    },

    /// An item appears in two containers (or twice in one ordering).
    DuplicateItem {
        /// The duplicated item.
        item: ItemId,
    },

    /// An item appeared that was not part of the initial state.
    InventedItem {
        /// The unexpected item.
        item: ItemId,
    },

    /// The owner index disagrees with the container orderings.
    StaleOwnerIndex {
        /// The item whose index entry is wrong.
        item: ItemId,
        /// The container that actually holds it.
        holder: ContainerId,
    },

    /// A container exceeds its configured bound after a commit.
    OverCapacity {
        /// The overfull container.
        container: ContainerId,
        /// Configured bound.
        bound: usize,
        /// Observed occupancy.
        occupancy: usize,
    },

    /// A rejected drop mutated the committed snapshot.
    RejectionMutated {
        /// Zero-based step at which the rejection occurred.
        step: usize,
    },

    /// Two identically-seeded runs diverged.
    Divergence {
        /// Zero-based index of the first differing committed snapshot.
        step: usize,
    },
}

// ── Oracle ────────────────────────────────────────────────────────────────────

/// Oracle bound to the item population a session started with.
#[derive(Debug, Clone)]
pub struct EngineOracle {
    initial: BTreeSet<ItemId>,
}

impl EngineOracle {
    /// Capture the initial item population of a board.
    #[must_use]
    pub fn for_board(board: &Board) -> Self {
        Self {
            initial: board.item_ids().cloned().collect(),
        }
    }

    /// Capture the initial item population of a flat collection.
    #[must_use]
    pub fn for_flat(flat: &FlatCollection) -> Self {
        Self {
            initial: flat.order().iter().cloned().collect(),
        }
    }

    /// Check the partition invariant: every initial item in exactly one
    /// container, no invented items, owner index in agreement.
    #[must_use]
    pub fn check_partition(&self, board: &Board) -> OracleResult {
        let mut violations = Vec::new();
        let mut seen: BTreeSet<ItemId> = BTreeSet::new();

        for container in board.containers() {
            for item in &container.items {
                if !seen.insert(item.clone()) {
                    violations.push(InvariantViolation::DuplicateItem { item: item.clone() });
                }
                if !self.initial.contains(item) {
                    violations.push(InvariantViolation::InventedItem { item: item.clone() });
                }
                if board.owner_of(item) != Some(&container.id) {
                    violations.push(InvariantViolation::StaleOwnerIndex {
                        item: item.clone(),
                        holder: container.id.clone(),
                    });
                }
            }
        }
        for item in &self.initial {
            if !seen.contains(item) {
                violations.push(InvariantViolation::MissingItem { item: item.clone() });
            }
        }

        if violations.is_empty() {
            OracleResult::pass()
        } else {
            OracleResult::fail(violations)
        }
    }

    /// Check every container against its capacity bound.
    #[must_use]
    pub fn check_capacity(&self, board: &Board) -> OracleResult {
        let violations: Vec<InvariantViolation> = board
            .containers()
            .iter()
            .filter_map(|container| match container.capacity {
                Capacity::Bounded(bound) if container.len() > bound => {
                    Some(InvariantViolation::OverCapacity {
                        container: container.id.clone(),
                        bound,
                        occupancy: container.len(),
                    })
                }
                Capacity::Bounded(_) | Capacity::Unlimited => None,
            })
            .collect();

        if violations.is_empty() {
            OracleResult::pass()
        } else {
            OracleResult::fail(violations)
        }
    }

    /// Check that a flat ordering is still a permutation of the initial
    /// population.
    #[must_use]
    pub fn check_flat_membership(&self, flat: &FlatCollection) -> OracleResult {
        let mut violations = Vec::new();
        let mut seen: BTreeSet<ItemId> = BTreeSet::new();
        for item in flat.order() {
            if !seen.insert(item.clone()) {
                violations.push(InvariantViolation::DuplicateItem { item: item.clone() });
            }
            if !self.initial.contains(item) {
                violations.push(InvariantViolation::InventedItem { item: item.clone() });
            }
        }
        for item in &self.initial {
            if !seen.contains(item) {
                violations.push(InvariantViolation::MissingItem { item: item.clone() });
            }
        }

        if violations.is_empty() {
            OracleResult::pass()
        } else {
            OracleResult::fail(violations)
        }
    }

    /// Run every board check in one shot.
    #[must_use]
    pub fn check_board(&self, board: &Board) -> OracleResult {
        self.check_partition(board).merge(self.check_capacity(board))
    }
}

/// Compare the committed-snapshot sequences of two identically-seeded runs.
///
/// Snapshots are compared as canonical JSON; the first differing index is
/// reported as a [`InvariantViolation::Divergence`].
#[must_use]
pub fn check_determinism(first: &[String], second: &[String]) -> OracleResult {
    if first.len() != second.len() {
        return OracleResult::fail(vec![InvariantViolation::Divergence {
            step: first.len().min(second.len()),
        }]);
    }
    for (step, (a, b)) in first.iter().zip(second.iter()).enumerate() {
        if a != b {
            return OracleResult::fail(vec![InvariantViolation::Divergence { step }]);
        }
    }
    OracleResult::pass()
}

#[cfg(test)]
mod tests {
    use super::{EngineOracle, InvariantViolation, check_determinism};
    use restack_core::{Board, Capacity, Container, FlatCollection, Item};

    fn board_xy() -> Board {
        let containers = vec![
            Container::with_items("X", Capacity::Bounded(5), ["1", "2"]),
            Container::with_items("Y", Capacity::Bounded(5), ["3"]),
        ];
        let items = (1..=3)
            .map(|n| Item::new(n.to_string().as_str(), format!("Item {n}")))
            .collect();
        Board::new(containers, items).expect("fixture is valid")
    }

    #[test]
    fn clean_board_passes_all_checks() {
        let board = board_xy();
        let oracle = EngineOracle::for_board(&board);
        let result = oracle.check_board(&board);
        assert!(result.passed, "violations: {:?}", result.violations);
    }

    #[test]
    fn missing_item_is_reported() {
        let board = board_xy();
        let oracle = EngineOracle::for_board(&board);

        let smaller = {
            let containers = vec![
                Container::with_items("X", Capacity::Bounded(5), ["1"]),
                Container::with_items("Y", Capacity::Bounded(5), ["3"]),
            ];
            let items = vec![Item::new("1", "Item 1"), Item::new("3", "Item 3")];
            Board::new(containers, items).expect("fixture is valid")
        };
        let result = oracle.check_partition(&smaller);
        assert!(!result.passed);
        assert!(result
            .violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::MissingItem { item } if item.as_str() == "2")));
    }

    #[test]
    fn flat_membership_detects_invented_items() {
        let flat = FlatCollection::sample();
        let oracle = EngineOracle::for_flat(&flat);

        let other = FlatCollection::new(
            vec!["8".into()],
            vec![Item::new("8", "Item 8")],
        )
        .expect("fixture is valid");
        let result = oracle.check_flat_membership(&other);
        assert!(!result.passed);
        assert!(result
            .violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::InventedItem { .. })));
    }

    #[test]
    fn determinism_flags_the_first_divergent_step() {
        let a = vec!["s0".to_string(), "s1".to_string()];
        let b = vec!["s0".to_string(), "s2".to_string()];
        let result = check_determinism(&a, &b);
        assert_eq!(
            result.violations,
            vec![InvariantViolation::Divergence { step: 1 }]
        );
        assert!(check_determinism(&a, &a).passed);
    }
}
