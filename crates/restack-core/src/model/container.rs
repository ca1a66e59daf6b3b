//! Containers: named, capacity-bounded ordered sequences of item ids.

use serde::{Deserialize, Serialize};

use super::id::{ContainerId, ItemId};

/// Per-container occupancy bound.
///
/// The default is unlimited; the reference behavior bounds lists at 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capacity {
    /// No bound; the container accepts any number of items.
    Unlimited,
    /// At most this many items after any committed move.
    Bounded(usize),
}

impl Default for Capacity {
    fn default() -> Self {
        Self::Unlimited
    }
}

impl Capacity {
    /// Whether a container at `occupancy` may take `incoming` more items.
    ///
    /// Pure function of occupancy and the configured bound. Same-container
    /// reorders never consult this: an item already inside is always allowed
    /// to stay or move within its own container, even at capacity.
    #[must_use]
    pub const fn can_accept(self, occupancy: usize, incoming: usize) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Bounded(bound) => occupancy + incoming <= bound,
        }
    }
}

/// An ordered sequence of item ids under one identity, with a capacity bound.
///
/// Insertion order is the displayed order and is semantically significant.
/// Committed invariants (maintained by [`crate::model::Board`]): an item id
/// appears in at most one container, and `items.len()` never exceeds the
/// capacity bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Unique identity of this container.
    pub id: ContainerId,
    /// Member item ids, in display order.
    pub items: Vec<ItemId>,
    /// Configured occupancy bound.
    #[serde(default)]
    pub capacity: Capacity,
}

impl Container {
    /// Construct an empty container.
    #[must_use]
    pub fn new(id: impl Into<ContainerId>, capacity: Capacity) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
            capacity,
        }
    }

    /// Construct a container with an initial ordering.
    #[must_use]
    pub fn with_items<I, T>(id: impl Into<ContainerId>, capacity: Capacity, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        Self {
            id: id.into(),
            items: items.into_iter().map(Into::into).collect(),
            capacity,
        }
    }

    /// Number of items currently held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the container holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of `item` in this container's ordering, if present.
    #[must_use]
    pub fn index_of(&self, item: &ItemId) -> Option<usize> {
        self.items.iter().position(|id| id == item)
    }

    /// Whether one more incoming item would exceed the capacity bound.
    ///
    /// Callers can drive a "list full" affordance from this.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        !self.capacity.can_accept(self.items.len(), 1)
    }
}
