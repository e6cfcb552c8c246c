//! Decides which layout path a view should take.

use crate::graph::{LayoutMode, Point, Positions};
use serde::{Deserialize, Serialize};

/// Half the distance between the two nodes of the fixed two-node preset.
pub const TINY_PRESET_OFFSET: f64 = 210.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    /// Fixed vertical two-node preset, no iterative layout.
    Tiny,
    /// External force layout tuned for path views.
    PathFcose,
    /// Whatever the current layout mode normally runs.
    ModeLayout,
}

impl LayoutStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::PathFcose => "path-fcose",
            Self::ModeLayout => "mode-layout",
        }
    }
}

impl std::fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the view state a strategy decision is made from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewContext {
    pub path_view_active: bool,
    pub node_count: usize,
    pub path_node_order_length: usize,
    pub path_count: usize,
    pub layout_mode: LayoutMode,
}

impl ViewContext {
    pub fn strategy(&self) -> LayoutStrategy {
        select(
            self.path_view_active,
            self.node_count,
            self.path_node_order_length,
            self.path_count,
            &self.layout_mode,
        )
    }
}

/// Picks the layout path for the current view.
///
/// A single-hop path between two nodes gets the fixed preset. Combined path views never do,
/// even when they collapse to two nodes, so overlapping paths compose through the real layout.
pub fn select(
    path_view_active: bool,
    node_count: usize,
    path_node_order_length: usize,
    path_count: usize,
    layout_mode: &LayoutMode,
) -> LayoutStrategy {
    if !path_view_active {
        return LayoutStrategy::ModeLayout;
    }
    if path_count <= 1 && node_count == 2 && path_node_order_length >= 2 {
        return LayoutStrategy::Tiny;
    }
    if *layout_mode == LayoutMode::Fcose {
        return LayoutStrategy::PathFcose;
    }
    LayoutStrategy::ModeLayout
}

/// First-render shortcut: a lone edge between two nodes outside path view.
pub fn use_two_node_preset(path_view_active: bool, node_count: usize, edge_count: usize) -> bool {
    !path_view_active && node_count == 2 && edge_count == 1
}

/// `first` above `second` on the y axis.
pub fn tiny_preset(first: &str, second: &str) -> Positions {
    let mut positions = Positions::with_capacity(2);
    positions.insert(first.to_string(), Point::new(0.0, -TINY_PRESET_OFFSET));
    positions.insert(second.to_string(), Point::new(0.0, TINY_PRESET_OFFSET));
    positions
}
