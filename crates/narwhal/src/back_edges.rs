//! Back-edge lanes.
//!
//! A visible back edge is routed up the right side of the graph in a lane of its own. Lanes are
//! numbered `1..=n` in edge order; every other edge gets `0`.

use narwhal_graph::Graph;

/// Renumbers the back edges from the current ranks and records the highest number on the graph.
pub fn number_back_edges(g: &mut Graph) -> u32 {
    let mut max = 0;
    for ix in g.node_ixs() {
        for k in 0..g.node(ix).inputs().len() {
            let e = g.node(ix).inputs()[k];
            let number = if g.is_edge_visible(e) && g.is_back_edge(e) {
                max += 1;
                max
            } else {
                0
            };
            g.edge_mut(e).back_edge_number = number;
        }
    }
    g.set_max_back_edge_number(max);
    tracing::debug!(back_edges = max, "numbered back edges");
    max
}
