//! Node placement.
//!
//! Rows are placed bottom-up. When a row is placed, every row below it already has its x
//! coordinates, so a node can aim for the input pins it feeds. The occupation grid carries the
//! vertical segments of edges from rows further up that still pass through the current row.

use crate::occupation::{Direction, Occupation};
use narwhal_graph::Graph;

/// Visible nodes bucketed by rank, each bucket sorted by visit order. Also sets every node's y;
/// hidden nodes are parked at the origin.
pub fn rank_sets(g: &mut Graph, show_types: bool) -> Vec<Vec<usize>> {
    let mut sets: Vec<Vec<usize>> = Vec::new();
    for ix in g.node_ixs() {
        let row_height = g.config().row_height(g.node(ix).height_for(show_types));
        let node = g.node_mut(ix);
        if !node.is_visible() {
            node.x = 0.0;
            node.y = 0.0;
            continue;
        }
        node.y = f64::from(node.rank) * row_height;
        let rank = node.rank as usize;
        if sets.len() <= rank {
            sets.resize_with(rank + 1, Vec::new);
        }
        sets[rank].push(ix);
    }
    for set in &mut sets {
        set.sort_by_key(|&ix| g.node(ix).visit_order);
    }
    sets
}

/// Where a node would like to go, derived from the input pins it feeds in lower rows.
///
/// The position is the average x of those pins. A node with a single consumer pin that is one of
/// several inputs leans towards the pin's side of the consumer; anything else is centered. A node
/// without consumers below it asks for `(Left, 0)`.
pub fn placement_hint(g: &Graph, ix: usize) -> (Direction, f64) {
    let half_pin = g.config().pin_width / 2.0;
    let node = g.node(ix);
    let mut direction = Direction::Left;
    let mut position = 0.0;
    let mut pins = 0usize;
    let mut consumer_inputs = 0usize;

    for &e in node.outputs() {
        if !g.is_edge_visible(e) {
            continue;
        }
        let edge = g.edge(e);
        let target = g.node(edge.target);
        if target.rank <= node.rank {
            continue;
        }
        consumer_inputs += target
            .inputs()
            .iter()
            .filter(|&&input| g.is_edge_visible(input))
            .count();
        position += target.x + g.input_x(edge.target, edge.index) + half_pin;
        pins += 1;
        if 2 * edge.index >= target.inputs().len() {
            direction = Direction::Right;
        }
    }

    if pins > 0 {
        position /= pins as f64;
    }
    if pins > 1 || consumer_inputs == 1 {
        direction = Direction::Center;
    }
    (direction, position)
}

/// Assigns x to every node of `sets`, last rank first.
///
/// Returns the occupation grid as the top rank left it. Pins fed from a node on the consumer's own
/// rank (a phi and its merge, say) are reserved but never released, so they are still marked.
pub fn place_nodes(g: &mut Graph, sets: &[Vec<usize>], show_types: bool) -> Occupation {
    let config = *g.config();
    let half_pin = config.pin_width / 2.0;
    let mut occupation = Occupation::new(config.pin_width);

    for (rank, set) in sets.iter().enumerate().rev() {
        if set.is_empty() {
            continue;
        }

        // Segments ending in this row's consumers stop here. Same-rank outputs stay reserved.
        for &ix in set {
            for &e in g.node(ix).outputs() {
                if !g.is_edge_visible(e) || g.node(g.edge(e).target).rank <= g.node(ix).rank {
                    continue;
                }
                let x = g.input_horizontal_position(e, show_types);
                occupation.clear_position_range_with_margin(x, x, half_pin);
            }
        }
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!(rank, slots = %occupation.render(), "outputs released");
        }

        for (placed, &ix) in set.iter().enumerate() {
            let (direction, position) = placement_hint(g, ix);
            let width = g.node(ix).total_width(config.pin_width);
            let x = occupation.occupy_node(width, config.min_edge_separation, direction, position);
            let node = g.node_mut(ix);
            node.x = x;
            node.output_approach += config.min_edge_separation * (placed % 3) as f64;
            tracing::trace!(node = %node.id, ?direction, position, x, "placed");
        }
        occupation.clear_occupied_nodes();

        // Segments feeding this row run up through every row above it.
        for &ix in set {
            for &e in g.node(ix).inputs() {
                if !g.is_edge_visible(e) || g.is_back_edge(e) {
                    continue;
                }
                let x = g.input_horizontal_position(e, show_types);
                occupation.occupy_position_range_with_margin(x, x, half_pin);
            }
        }
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!(rank, slots = %occupation.render(), "inputs reserved");
        }
    }
    occupation
}
