//! The flat, order-only collection used by the edge-based variant.

#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::id::ItemId;
use super::item::Item;

/// Errors detected while constructing a flat collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlatError {
    /// The ordering references an item id with no payload.
    #[error("ordering references unknown item '{item}'")]
    MissingPayload {
        /// The unresolved item id.
        item: ItemId,
    },

    /// The same item id appears twice in the ordering.
    #[error("item '{item}' appears twice in the ordering")]
    DuplicatePosition {
        /// The duplicated item id.
        item: ItemId,
    },

    /// The catalog carries an item with no position in the ordering.
    #[error("item '{item}' has a payload but no position")]
    UnplacedItem {
        /// The orphaned item id.
        item: ItemId,
    },
}

/// A single ordered sequence of items with no container partitioning and no
/// capacity bound; only positional reordering applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatCollection {
    order: Vec<ItemId>,
    /// Item payloads keyed by id. `BTreeMap` keeps serialization order stable.
    catalog: BTreeMap<ItemId, Item>,
}

impl<'de> Deserialize<'de> for FlatCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct FlatRaw {
            order: Vec<ItemId>,
            catalog: BTreeMap<ItemId, Item>,
        }

        let raw = FlatRaw::deserialize(deserializer)?;
        Self::new(raw.order, raw.catalog.into_values().collect())
            .map_err(serde::de::Error::custom)
    }
}

impl FlatCollection {
    /// Build a collection from an ordering and the matching payloads.
    ///
    /// # Errors
    ///
    /// Returns the first [`FlatError`] violation found: an id in the ordering
    /// without a payload, a repeated position, or a payload with no position.
    pub fn new(order: Vec<ItemId>, items: Vec<Item>) -> Result<Self, FlatError> {
        let catalog: BTreeMap<ItemId, Item> =
            items.into_iter().map(|item| (item.id.clone(), item)).collect();
        let mut seen = std::collections::HashSet::new();
        for id in &order {
            if !catalog.contains_key(id) {
                return Err(FlatError::MissingPayload { item: id.clone() });
            }
            if !seen.insert(id.clone()) {
                return Err(FlatError::DuplicatePosition { item: id.clone() });
            }
        }
        if let Some(orphan) = catalog.keys().find(|id| !seen.contains(*id)) {
            return Err(FlatError::UnplacedItem {
                item: orphan.clone(),
            });
        }
        Ok(Self { order, catalog })
    }

    /// The reference seven-item fixture from the edge-based demo.
    ///
    /// # Panics
    ///
    /// Never panics; the fixture satisfies every construction invariant.
    #[must_use]
    pub fn sample() -> Self {
        let order: Vec<ItemId> = (1..=7).map(|n| ItemId::new(n.to_string())).collect();
        let items = (1..=7)
            .map(|n| Item::new(n.to_string().as_str(), format!("Item {n}")))
            .collect();
        Self::new(order, items).expect("sample fixture is valid")
    }

    /// The current ordering.
    #[must_use]
    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    /// Number of items held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the collection holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Position of `item` in the ordering, if present.
    #[must_use]
    pub fn index_of(&self, item: &ItemId) -> Option<usize> {
        self.order.iter().position(|id| id == item)
    }

    /// Payload lookup by id.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.catalog.get(id)
    }

    /// Produce the successor snapshot with a replacement ordering.
    ///
    /// The new ordering must be a permutation of the old one; resolvers only
    /// ever produce single-element moves, which preserve membership.
    pub(crate) fn with_order(&self, order: Vec<ItemId>) -> Self {
        debug_assert_eq!(order.len(), self.order.len());
        Self {
            order,
            catalog: self.catalog.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FlatCollection;
    use crate::model::id::ItemId;

    #[test]
    fn sample_has_seven_items_in_order() {
        let flat = FlatCollection::sample();
        assert_eq!(flat.len(), 7);
        assert_eq!(flat.index_of(&ItemId::from("1")), Some(0));
        assert_eq!(flat.index_of(&ItemId::from("7")), Some(6));
        assert_eq!(
            flat.item(&ItemId::from("2")).map(|i| i.content.as_str()),
            Some("Item 2")
        );
    }

    #[test]
    fn construction_rejects_inconsistent_state() {
        use crate::model::item::Item;

        let bad = FlatCollection::new(
            vec![ItemId::from("1"), ItemId::from("1")],
            vec![Item::new("1", "Item 1")],
        );
        assert!(bad.is_err());

        let dangling =
            FlatCollection::new(vec![ItemId::from("1"), ItemId::from("2")], vec![Item::new("1", "Item 1")]);
        assert!(dangling.is_err());
    }

    #[test]
    fn flat_json_roundtrip() {
        let flat = FlatCollection::sample();
        let json = serde_json::to_string(&flat).expect("serialize");
        let back: FlatCollection = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, flat);
    }
}
