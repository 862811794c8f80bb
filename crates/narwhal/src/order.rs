//! Within-rank visitation order.
//!
//! Nodes of a rank are placed in the order a depth-first walk from the sources finishes them.
//! Consumers finish before their producers, so a producer is placed after the nodes it feeds and
//! can line up above them.

use narwhal_graph::Graph;

/// Post-order of the nodes reachable from `roots` along visible output edges.
///
/// Outputs are followed in declaration order and every node is reported once. The walk keeps an
/// explicit stack, so deep chains do not grow the call stack.
pub fn post_order(g: &Graph, roots: &[usize]) -> Vec<usize> {
    let mut visited = vec![false; g.node_count()];
    let mut out = Vec::with_capacity(g.node_count());
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for &root in roots {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let (v, next) = *top;
            let outputs = g.node(v).outputs();
            if next == outputs.len() {
                stack.pop();
                out.push(v);
                continue;
            }
            top.1 += 1;

            let e = outputs[next];
            if !g.is_edge_visible(e) {
                continue;
            }
            let w = g.edge(e).target;
            if !visited[w] {
                visited[w] = true;
                stack.push((w, 0));
            }
        }
    }
    out
}

/// Numbers the reachable nodes `1, 2, ...` in post-order. Returns the last number handed out.
pub fn assign_visit_order(g: &mut Graph, sources: &[usize]) -> u32 {
    let mut counter = 0;
    for ix in post_order(g, sources) {
        let node = g.node_mut(ix);
        if node.visit_order == 0 {
            counter += 1;
            node.visit_order = counter;
        }
    }
    tracing::trace!(visited = counter, "visit order");
    counter
}
