//! Pin and approach geometry.
//!
//! Inputs are spread right-aligned along the top of a node, one pin width apart, the last input
//! sitting under the single output pin. Edges leave a node at its output approach line and enter
//! at a per-operand input approach line so parallel edges do not overlap.

use super::Graph;

impl Graph {
    /// Horizontal offset of input pin `index`, relative to the node's left edge.
    pub fn input_x(&self, ix: usize, index: usize) -> f64 {
        let pin = self.config.pin_width;
        let node = &self.nodes[ix];
        let inputs = node.inputs.len() as f64;
        node.total_width(pin) - pin / 2.0 + (index as f64 - inputs + 1.0) * pin
    }

    pub fn output_x(&self, ix: usize) -> f64 {
        let pin = self.config.pin_width;
        self.nodes[ix].total_width(pin) - pin / 2.0
    }

    pub fn input_approach(&self, ix: usize, index: usize) -> f64 {
        let c = &self.config;
        self.nodes[ix].y
            - c.min_input_approach
            - (index % 4) as f64 * c.min_edge_separation
            - c.bubble_radius
    }

    pub fn output_approach_y(&self, ix: usize, show_types: bool) -> f64 {
        let node = &self.nodes[ix];
        node.y + node.output_approach + node.height_for(show_types) + self.config.bubble_radius
    }

    /// X coordinate of the vertical segment an edge uses to reach its input pin.
    ///
    /// When the source leaves below the point where the target's input approach starts, the edge
    /// runs beside the target, one separation per operand away from it.
    pub fn input_horizontal_position(&self, edge_ix: usize, show_types: bool) -> f64 {
        let c = &self.config;
        let edge = &self.edges[edge_ix];
        if self.rendered && edge.back_edge_number > 0 {
            return self.bounds.max_node_x + f64::from(edge.back_edge_number) * c.min_edge_separation;
        }
        let source = &self.nodes[edge.source];
        let target = &self.nodes[edge.target];
        let input_x = target.x + self.input_x(edge.target, edge.index);
        let input_approach = self.input_approach(edge.target, edge.index);
        let output_approach = self.output_approach_y(edge.source, show_types);
        if input_approach > output_approach {
            return input_x;
        }
        let offset = c.min_edge_separation * (edge.index + 1) as f64;
        if target.x < source.x {
            target.x + target.total_width(c.pin_width) + offset
        } else {
            target.x - offset
        }
    }
}
