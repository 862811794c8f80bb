use crate::error::{Error, Result};
use narwhal_graph::{Graph, NodeClass};
use std::collections::VecDeque;

/// Longest-path ranking driven by a worklist seeded with the sources.
///
/// A node is re-examined whenever one of its producers changes rank. Returns the highest rank
/// handed out.
pub fn assign_early_ranks(g: &mut Graph, sources: &[usize]) -> Result<u32> {
    let limit = g.visible_node_ixs().count() as u32;
    let mut work: VecDeque<usize> = sources.iter().copied().collect();
    let mut max_rank = 0;

    while let Some(ix) = work.pop_back() {
        let (rank, changed) = relax(g, ix);
        if rank > limit {
            return Err(Error::RankOverflow {
                id: g.node(ix).id,
                rank,
                limit,
            });
        }
        max_rank = max_rank.max(rank);
        if !changed {
            continue;
        }
        g.node_mut(ix).rank = rank;

        // Loop exits are scheduled after the loop body so the body claims its ranks first.
        let holds_back_edges = g.has_back_edges(ix);
        let outputs = g.node(ix).outputs();
        for (k, &e) in outputs.iter().enumerate().rev() {
            if !g.is_edge_visible(e) {
                continue;
            }
            let target = g.edge(e).target;
            if holds_back_edges && k != 0 {
                work.push_front(target);
            } else {
                work.push_back(target);
            }
        }
    }

    tracing::debug!(max_rank, "early ranks");
    Ok(max_rank)
}

/// New rank of `ix` from the ranks its producers hold right now, and whether it moved.
fn relax(g: &Graph, ix: usize) -> (u32, bool) {
    let node = g.node(ix);
    let mut rank = node.rank;
    let mut changed = false;
    if rank == 0 {
        rank = 1;
        changed = true;
    }

    let inputs = node.inputs();
    let considered = match node.class {
        NodeClass::Phi => &inputs[inputs.len().saturating_sub(1)..],
        NodeClass::LoopHeader => &inputs[..inputs.len().min(1)],
        _ => inputs,
    };

    for &e in considered {
        if !g.is_edge_visible(e) {
            continue;
        }
        let input_rank = g.node(g.edge(e).source).rank;
        if node.class.is_phi() {
            if input_rank > rank {
                rank = input_rank;
                changed = true;
            }
        } else if input_rank >= rank {
            rank = input_rank + 1;
            changed = true;
        }
    }
    (rank, changed)
}
