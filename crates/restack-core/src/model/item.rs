//! The item value type.

use serde::{Deserialize, Serialize};

use super::id::ItemId;

/// An opaque payload with a stable, caller-assigned identifier.
///
/// Items are immutable once created. Membership changes replace container
/// orderings; they never rewrite item values. Content is carried for the
/// caller's benefit and is never used for lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identity of this item.
    pub id: ItemId,
    /// Caller-owned payload. Opaque to the engine.
    pub content: String,
}

impl Item {
    /// Construct an item from an identifier and payload.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}
