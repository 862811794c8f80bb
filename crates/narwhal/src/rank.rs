//! Rank assignment.
//!
//! Ranks start at `1`; `0` means "not ranked yet". The early pass gives every node the smallest
//! rank that puts it below all of its producers. The late pass then pulls plain nodes down until
//! they sit right above their first consumer, and finally every sink is pinned to the row right
//! below the deepest node that still has consumers.
//!
//! Loop headers only look at their entry input and phis share the rank of their merge, so loop
//! back edges never feed into a rank and the passes stay finite on loops.

pub mod early;
pub mod late;

pub use early::assign_early_ranks;
pub use late::compact_late_ranks;

use crate::error::{Error, Result};
use narwhal_graph::Graph;

/// Visible nodes without visible inputs, and visible nodes without visible outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Terminals {
    pub sources: Vec<usize>,
    pub sinks: Vec<usize>,
}

/// Clears the per-layout state of every node and edge and collects the visible terminals.
pub fn init_nodes(g: &mut Graph) -> Terminals {
    let min_output_approach = g.config().min_output_approach;
    for ix in g.node_ixs() {
        let node = g.node_mut(ix);
        node.rank = 0;
        node.visit_order = 0;
        node.x = 0.0;
        node.output_approach = min_output_approach;
    }
    for e in 0..g.edge_count() {
        g.edge_mut(e).back_edge_number = 0;
    }
    g.set_max_back_edge_number(0);

    let mut terminals = Terminals::default();
    for ix in g.visible_node_ixs() {
        let node = g.node(ix);
        if !node.inputs().iter().any(|&e| g.is_edge_visible(e)) {
            terminals.sources.push(ix);
        }
        if !node.outputs().iter().any(|&e| g.is_edge_visible(e)) {
            terminals.sinks.push(ix);
        }
    }
    tracing::debug!(
        sources = terminals.sources.len(),
        sinks = terminals.sinks.len(),
        "collected terminals"
    );
    terminals
}

/// Fails on the first visible node the early pass never reached.
pub fn ensure_ranked(g: &Graph) -> Result<()> {
    match g.visible_nodes().find(|n| !n.is_ranked()) {
        Some(node) => Err(Error::UnrankedNode { id: node.id }),
        None => Ok(()),
    }
}

/// Moves every sink to the row below the deepest non-sink node. Returns that row.
pub fn pin_sinks(g: &mut Graph, sinks: &[usize]) -> u32 {
    let mut is_sink = vec![false; g.node_count()];
    for &ix in sinks {
        is_sink[ix] = true;
    }
    let deepest = g
        .visible_node_ixs()
        .filter(|&ix| !is_sink[ix])
        .map(|ix| g.node(ix).rank)
        .max()
        .unwrap_or(0);
    for &ix in sinks {
        g.node_mut(ix).rank = deepest + 1;
    }
    deepest + 1
}
