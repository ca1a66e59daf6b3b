//! The committed multi-container snapshot.
//!
//! A [`Board`] is the authoritative arrangement of items across containers at
//! one instant. Commits replace the whole snapshot structurally; the previous
//! value stays valid for rollback or comparison, so a renderer holding the old
//! snapshot never observes a half-applied move.
//!
//! Alongside the containers the board maintains an item-to-owner index so
//! "which container holds this item" is a map lookup, not a content scan.
//! The index is rebuilt or patched atomically with every commit and is not
//! serialized; deserialization reconstructs it and re-validates the partition
//! and capacity invariants.

#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use super::container::{Capacity, Container};
use super::id::{ContainerId, ItemId};
use super::item::Item;

/// Errors detected while constructing a board from caller-supplied state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The same item id appears in two containers (or twice in one).
    #[error("item '{item}' appears in container '{first}' and again in '{second}'")]
    DuplicateMembership {
        /// The duplicated item id.
        item: ItemId,
        /// Container that first claimed the item.
        first: ContainerId,
        /// Container where the item appeared again.
        second: ContainerId,
    },

    /// A container references an item id with no payload in the catalog.
    #[error("container '{container}' references unknown item '{item}'")]
    MissingPayload {
        /// Container holding the dangling reference.
        container: ContainerId,
        /// The unresolved item id.
        item: ItemId,
    },

    /// The catalog carries an item that no container holds.
    #[error("item '{item}' has a payload but belongs to no container")]
    UnplacedItem {
        /// The orphaned item id.
        item: ItemId,
    },

    /// Two containers share an identifier.
    #[error("duplicate container id '{container}'")]
    DuplicateContainer {
        /// The repeated container id.
        container: ContainerId,
    },

    /// A container's initial ordering already exceeds its capacity bound.
    #[error("container '{container}' starts with {occupancy} items, over its bound of {bound}")]
    OverCapacity {
        /// The overfull container.
        container: ContainerId,
        /// Configured bound.
        bound: usize,
        /// Supplied occupancy.
        occupancy: usize,
    },
}

/// Authoritative multi-container state: containers, item payloads, and the
/// item-to-owner index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    containers: Vec<Container>,
    /// Item payloads keyed by id. `BTreeMap` keeps serialization order stable.
    catalog: BTreeMap<ItemId, Item>,
    #[serde(skip)]
    owners: HashMap<ItemId, ContainerId>,
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BoardRaw {
            containers: Vec<Container>,
            catalog: BTreeMap<ItemId, Item>,
        }

        let raw = BoardRaw::deserialize(deserializer)?;
        Self::new(raw.containers, raw.catalog.into_values().collect())
            .map_err(serde::de::Error::custom)
    }
}

impl Board {
    /// Build a board from caller-supplied containers and item payloads.
    ///
    /// Validates the committed-state invariants up front: container ids are
    /// unique, every item id lives in exactly one container, every contained
    /// id has a payload, every payload is contained, and no container starts
    /// over its capacity bound.
    ///
    /// # Errors
    ///
    /// Returns the first [`BoardError`] violation found.
    pub fn new(containers: Vec<Container>, items: Vec<Item>) -> Result<Self, BoardError> {
        let catalog: BTreeMap<ItemId, Item> =
            items.into_iter().map(|item| (item.id.clone(), item)).collect();

        let mut owners: HashMap<ItemId, ContainerId> = HashMap::new();
        let mut seen_containers: HashSet<ContainerId> = HashSet::new();

        for container in &containers {
            if !seen_containers.insert(container.id.clone()) {
                return Err(BoardError::DuplicateContainer {
                    container: container.id.clone(),
                });
            }
            if let Capacity::Bounded(bound) = container.capacity {
                if container.items.len() > bound {
                    return Err(BoardError::OverCapacity {
                        container: container.id.clone(),
                        bound,
                        occupancy: container.items.len(),
                    });
                }
            }
            for item in &container.items {
                if !catalog.contains_key(item) {
                    return Err(BoardError::MissingPayload {
                        container: container.id.clone(),
                        item: item.clone(),
                    });
                }
                if let Some(first) = owners.insert(item.clone(), container.id.clone()) {
                    return Err(BoardError::DuplicateMembership {
                        item: item.clone(),
                        first,
                        second: container.id.clone(),
                    });
                }
            }
        }

        if let Some(orphan) = catalog.keys().find(|id| !owners.contains_key(*id)) {
            return Err(BoardError::UnplacedItem {
                item: orphan.clone(),
            });
        }

        Ok(Self {
            containers,
            catalog,
            owners,
        })
    }

    /// The reference two-list fixture: `A = [1, 2]`, `B = [3, 4, 5, 6]`,
    /// both bounded at 5, with `Item N` payloads.
    ///
    /// # Panics
    ///
    /// Never panics; the fixture satisfies every construction invariant.
    #[must_use]
    pub fn sample() -> Self {
        let containers = vec![
            Container::with_items("A", Capacity::Bounded(5), ["1", "2"]),
            Container::with_items("B", Capacity::Bounded(5), ["3", "4", "5", "6"]),
        ];
        let items = (1..=6)
            .map(|n| Item::new(n.to_string().as_str(), format!("Item {n}")))
            .collect();
        Self::new(containers, items).expect("sample fixture is valid")
    }

    /// All containers, in their configured order.
    #[must_use]
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Look up a container by id.
    #[must_use]
    pub fn container(&self, id: &ContainerId) -> Option<&Container> {
        self.containers.iter().find(|c| &c.id == id)
    }

    /// Which container currently owns `item`, via the owner index.
    #[must_use]
    pub fn owner_of(&self, item: &ItemId) -> Option<&ContainerId> {
        self.owners.get(item)
    }

    /// Resolve an item to its owning container and position within it.
    #[must_use]
    pub fn locate(&self, item: &ItemId) -> Option<(&Container, usize)> {
        let owner = self.owners.get(item)?;
        let container = self.container(owner)?;
        let index = container.index_of(item)?;
        Some((container, index))
    }

    /// Payload lookup by id.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.catalog.get(id)
    }

    /// Every item id on the board, in catalog (sorted) order.
    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.catalog.keys()
    }

    /// Produce the successor snapshot for a same-container reorder.
    ///
    /// Ownership does not change, so the owner index carries over untouched.
    pub(crate) fn with_reordered(&self, container: &ContainerId, items: Vec<ItemId>) -> Self {
        let mut containers = self.containers.clone();
        if let Some(c) = containers.iter_mut().find(|c| &c.id == container) {
            c.items = items;
        }
        Self {
            containers,
            catalog: self.catalog.clone(),
            owners: self.owners.clone(),
        }
    }

    /// Produce the successor snapshot for a cross-container move.
    ///
    /// Replaces exactly the two involved containers and repoints the moved
    /// item's owner entry in the same step, so the index never disagrees with
    /// the orderings. All other containers are carried over structurally
    /// identical.
    pub(crate) fn with_transferred(
        &self,
        source: &ContainerId,
        new_source: Vec<ItemId>,
        target: &ContainerId,
        new_target: Vec<ItemId>,
        moved: &ItemId,
    ) -> Self {
        let mut containers = self.containers.clone();
        if let Some(c) = containers.iter_mut().find(|c| &c.id == source) {
            c.items = new_source;
        }
        if let Some(c) = containers.iter_mut().find(|c| &c.id == target) {
            c.items = new_target;
        }
        let mut owners = self.owners.clone();
        owners.insert(moved.clone(), target.clone());
        Self {
            containers,
            catalog: self.catalog.clone(),
            owners,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, BoardError};
    use crate::model::container::{Capacity, Container};
    use crate::model::id::{ContainerId, ItemId};
    use crate::model::item::Item;

    #[test]
    fn sample_matches_the_reference_fixture() {
        let board = Board::sample();
        let a = board.container(&ContainerId::from("A")).expect("A exists");
        let b = board.container(&ContainerId::from("B")).expect("B exists");
        assert_eq!(a.items, vec![ItemId::from("1"), ItemId::from("2")]);
        assert_eq!(b.len(), 4);
        assert_eq!(a.capacity, Capacity::Bounded(5));
        assert_eq!(
            board.item(&ItemId::from("3")).map(|i| i.content.as_str()),
            Some("Item 3")
        );
    }

    #[test]
    fn owner_index_resolves_without_scanning() {
        let board = Board::sample();
        assert_eq!(
            board.owner_of(&ItemId::from("4")),
            Some(&ContainerId::from("B"))
        );
        let (container, index) = board.locate(&ItemId::from("4")).expect("locatable");
        assert_eq!(container.id, ContainerId::from("B"));
        assert_eq!(index, 1);
        assert_eq!(board.owner_of(&ItemId::from("9")), None);
    }

    #[test]
    fn duplicate_membership_is_rejected() {
        let containers = vec![
            Container::with_items("A", Capacity::Unlimited, ["1"]),
            Container::with_items("B", Capacity::Unlimited, ["1"]),
        ];
        let items = vec![Item::new("1", "Item 1")];
        let err = Board::new(containers, items).expect_err("duplicate must fail");
        assert!(matches!(err, BoardError::DuplicateMembership { .. }));
    }

    #[test]
    fn dangling_and_orphaned_items_are_rejected() {
        let containers = vec![Container::with_items("A", Capacity::Unlimited, ["1", "2"])];
        let err = Board::new(containers, vec![Item::new("1", "Item 1")])
            .expect_err("missing payload must fail");
        assert!(matches!(err, BoardError::MissingPayload { .. }));

        let containers = vec![Container::with_items("A", Capacity::Unlimited, ["1"])];
        let items = vec![Item::new("1", "Item 1"), Item::new("2", "Item 2")];
        let err = Board::new(containers, items).expect_err("orphan must fail");
        assert!(matches!(
            err,
            BoardError::UnplacedItem {
                item
            } if item == ItemId::from("2")
        ));
    }

    #[test]
    fn initial_over_capacity_is_rejected() {
        let containers = vec![Container::with_items("A", Capacity::Bounded(1), ["1", "2"])];
        let items = vec![Item::new("1", "a"), Item::new("2", "b")];
        let err = Board::new(containers, items).expect_err("overfull must fail");
        assert!(matches!(
            err,
            BoardError::OverCapacity {
                bound: 1,
                occupancy: 2,
                ..
            }
        ));
    }

    #[test]
    fn board_json_roundtrip_rebuilds_the_index() {
        let board = Board::sample();
        let json = serde_json::to_string(&board).expect("serialize");
        let back: Board = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, board);
        assert_eq!(
            back.owner_of(&ItemId::from("6")),
            Some(&ContainerId::from("B"))
        );
    }

    #[test]
    fn deserialize_rejects_invalid_snapshots() {
        let json = r#"{
            "containers": [
                {"id": "A", "items": ["1"], "capacity": "unlimited"},
                {"id": "B", "items": ["1"], "capacity": "unlimited"}
            ],
            "catalog": {"1": {"id": "1", "content": "Item 1"}}
        }"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }
}
