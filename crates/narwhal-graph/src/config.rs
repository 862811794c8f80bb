//! Layout constants.
//!
//! Every distance the engine produces is derived from these values. The defaults reproduce the
//! classic IR viewer look: 50 unit input pins, 150 unit row gaps and 20 unit edge lanes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between two input pins. Also the slot quantum used when packing nodes.
    pub pin_width: f64,
    /// Margin around packed nodes, output approach stagger and back-edge lane spacing.
    pub min_edge_separation: f64,
    /// Vertical gap between two ranks.
    pub row_separation: f64,
    pub bubble_radius: f64,
    pub min_output_approach: f64,
    pub min_input_approach: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let bubble_radius = 12.0;
        Self {
            pin_width: 50.0,
            min_edge_separation: 20.0,
            row_separation: 150.0,
            bubble_radius,
            min_output_approach: 15.0,
            min_input_approach: 15.0 + 2.0 * bubble_radius,
        }
    }
}

impl LayoutConfig {
    /// Height of one rank row for a node of the given height.
    pub fn row_height(&self, node_height: f64) -> f64 {
        self.row_separation + node_height + 2.0 * self.bubble_radius
    }
}
