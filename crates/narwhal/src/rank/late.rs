use crate::order::post_order;
use narwhal_graph::Graph;

/// Pulls every plain node down to one row above its nearest later consumer.
///
/// Nodes are visited in post-order, so consumers have settled before their producers look at
/// them. Sources, control nodes, merges, loop headers and phis keep their early rank, so the
/// control skeleton does not shift.
pub fn compact_late_ranks(g: &mut Graph, sources: &[usize]) {
    let mut pinned = vec![false; g.node_count()];
    for &ix in sources {
        pinned[ix] = true;
    }

    let mut moved = 0usize;
    for ix in post_order(g, sources) {
        let node = g.node(ix);
        if pinned[ix] || node.class.is_control() || node.class.is_merge() || node.class.is_phi() {
            continue;
        }
        let own = node.rank;
        let nearest = node
            .outputs()
            .iter()
            .filter(|&&e| g.is_edge_visible(e))
            .map(|&e| g.node(g.edge(e).target).rank)
            .filter(|&r| r > own)
            .min();
        if let Some(r) = nearest {
            if r - 1 != own {
                moved += 1;
            }
            g.node_mut(ix).rank = r - 1;
        }
    }
    tracing::debug!(moved, "late ranks");
}
