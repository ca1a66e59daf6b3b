//! The drag-event input contract.
//!
//! Events arrive from the (external) input and hit-testing layer with the
//! source, target, and closest-edge signals already resolved. The engine
//! consumes them; it never produces them.

#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{ContainerId, ItemId};

/// The side of a target's hit-region nearest the pointer when an event fired.
///
/// Present only for the edge-based flat-collection variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// All edges, leading before trailing per axis.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Return the lowercase name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Whether this edge is the trailing side of `axis` (Right or Bottom).
    ///
    /// A drop on the trailing side lands *after* the target. Any other edge,
    /// including one that does not belong to the axis, places *before* the
    /// target, matching the reference destination arithmetic.
    #[must_use]
    pub const fn is_trailing(self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (Self::Right, Axis::Horizontal) | (Self::Bottom, Axis::Vertical)
        )
    }

    /// Whether this edge is the leading side of `axis` (Left or Top).
    #[must_use]
    pub const fn is_leading(self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (Self::Left, Axis::Horizontal) | (Self::Top, Axis::Vertical)
        )
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The layout direction a flat collection reorders along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Return the lowercase name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the pointer is over: another item (positional hint) or a container
/// (drop into empty space).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropTarget {
    /// Over an item's hit-region.
    Item(ItemId),
    /// Over a container's empty space; lands at the end of its ordering.
    Container(ContainerId),
}

/// One unit of drag input: the item being moved, what the pointer is over,
/// and (for the edge-based variant) the closest edge and axis.
///
/// `target: None` models a pointer outside any valid target; a drop in that
/// state is treated as a cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEvent {
    /// The item being dragged.
    pub source: ItemId,
    /// What the pointer is over, if anything.
    pub target: Option<DropTarget>,
    /// Closest edge of the target's hit-region (edge-based variant only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<Edge>,
    /// Axis the edge signal was measured along (edge-based variant only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
}

impl DragEvent {
    /// An event with only a source and an item target.
    #[must_use]
    pub fn over_item(source: impl Into<ItemId>, target: impl Into<ItemId>) -> Self {
        Self {
            source: source.into(),
            target: Some(DropTarget::Item(target.into())),
            edge: None,
            axis: None,
        }
    }

    /// An event targeting a container's empty space.
    #[must_use]
    pub fn over_container(source: impl Into<ItemId>, target: impl Into<ContainerId>) -> Self {
        Self {
            source: source.into(),
            target: Some(DropTarget::Container(target.into())),
            edge: None,
            axis: None,
        }
    }

    /// An event with a resolved closest edge, for the flat variant.
    #[must_use]
    pub fn with_edge(
        source: impl Into<ItemId>,
        target: impl Into<ItemId>,
        edge: Edge,
        axis: Axis,
    ) -> Self {
        Self {
            source: source.into(),
            target: Some(DropTarget::Item(target.into())),
            edge: Some(edge),
            axis: Some(axis),
        }
    }

    /// An event whose pointer is outside every valid target.
    #[must_use]
    pub fn without_target(source: impl Into<ItemId>) -> Self {
        Self {
            source: source.into(),
            target: None,
            edge: None,
            axis: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, DragEvent, DropTarget, Edge};
    use crate::model::ItemId;

    #[test]
    fn edge_sides_per_axis() {
        assert!(Edge::Right.is_trailing(Axis::Horizontal));
        assert!(Edge::Bottom.is_trailing(Axis::Vertical));
        assert!(!Edge::Left.is_trailing(Axis::Horizontal));
        assert!(!Edge::Right.is_trailing(Axis::Vertical));

        assert!(Edge::Left.is_leading(Axis::Horizontal));
        assert!(Edge::Top.is_leading(Axis::Vertical));
        assert!(!Edge::Top.is_leading(Axis::Horizontal));
    }

    #[test]
    fn edge_and_axis_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Edge::Left).expect("serialize"), "\"left\"");
        assert_eq!(
            serde_json::to_string(&Axis::Horizontal).expect("serialize"),
            "\"horizontal\""
        );
        assert_eq!(
            serde_json::from_str::<Edge>("\"bottom\"").expect("deserialize"),
            Edge::Bottom
        );
    }

    #[test]
    fn event_json_shape() {
        let event = DragEvent::with_edge("1", "2", Edge::Right, Axis::Horizontal);
        let json = serde_json::to_string(&event).expect("serialize");
        assert_eq!(
            json,
            r#"{"source":"1","target":{"item":"2"},"edge":"right","axis":"horizontal"}"#
        );

        let bare = DragEvent::without_target("1");
        assert_eq!(
            serde_json::to_string(&bare).expect("serialize"),
            r#"{"source":"1","target":null}"#
        );
    }

    #[test]
    fn constructors_fill_the_contract() {
        let event = DragEvent::over_container("1", "B");
        assert_eq!(event.source, ItemId::from("1"));
        assert!(matches!(event.target, Some(DropTarget::Container(_))));
        assert!(event.edge.is_none());
    }
}
