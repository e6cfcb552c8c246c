pub mod biflow;
pub mod collision;
pub mod timeline;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BiFlowOptions {
    /// Distance between consecutive tiers along the flow axis.
    pub tier_spacing: f64,
    /// Distance between neighbours inside one tier.
    pub node_spacing: f64,
    /// Target minimum distance enforced by the collision passes.
    pub min_node_distance: f64,
    pub collision_passes: usize,
    /// `y` of the row that holds nodes unreachable from the focus, in both orientations.
    pub parking_offset: f64,
}

impl Default for BiFlowOptions {
    fn default() -> Self {
        Self {
            tier_spacing: 360.0,
            node_spacing: 120.0,
            min_node_distance: 95.0,
            collision_passes: 4,
            parking_offset: 1200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineOptions {
    pub column_width: f64,
    pub row_height: f64,
    /// Vertical offset of each lane from its row centre; incoming sits above, outgoing below.
    pub lane_offset: f64,
    pub min_per_row: usize,
    pub max_per_row: usize,
    /// Row width grows as `sqrt(n) * row_width_factor` before clamping.
    pub row_width_factor: f64,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            column_width: 220.0,
            row_height: 340.0,
            lane_offset: 120.0,
            min_per_row: 8,
            max_per_row: 24,
            row_width_factor: 1.6,
        }
    }
}
