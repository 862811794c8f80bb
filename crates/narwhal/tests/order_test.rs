use narwhal::graph::{EdgeKind, Graph, GraphBuilder, Node, NodeId};
use narwhal::order::{assign_visit_order, post_order};
use narwhal::{LayoutRequest, layout, rank};

fn diamond() -> Graph {
    let mut b = GraphBuilder::default();
    for (id, op) in [(0, "Start"), (1, "Int32Add"), (2, "Int32Sub"), (3, "Int32Mul")] {
        b.add_node(Node::new(NodeId(id), op, 100.0, 40.0)).unwrap();
    }
    b.add_edge(NodeId(0), NodeId(1), 0, EdgeKind::Value)
        .add_edge(NodeId(0), NodeId(2), 0, EdgeKind::Value)
        .add_edge(NodeId(1), NodeId(3), 0, EdgeKind::Value)
        .add_edge(NodeId(2), NodeId(3), 1, EdgeKind::Value);
    b.build().unwrap()
}

fn ixs(g: &Graph, ids: &[u32]) -> Vec<usize> {
    ids.iter().map(|&id| g.node_ix(NodeId(id)).unwrap()).collect()
}

#[test]
fn post_order_finishes_consumers_first() {
    let g = diamond();
    let order = post_order(&g, &ixs(&g, &[0]));
    assert_eq!(order, ixs(&g, &[3, 1, 2, 0]));
}

#[test]
fn visit_order_counts_from_one_in_post_order() {
    let mut g = diamond();
    let terminals = rank::init_nodes(&mut g);
    let last = assign_visit_order(&mut g, &terminals.sources);

    assert_eq!(last, 4);
    let orders: Vec<u32> = (0..4)
        .map(|id| g.node_by_id(NodeId(id)).unwrap().visit_order)
        .collect();
    assert_eq!(orders, vec![4, 2, 3, 1]);
}

#[test]
fn post_order_skips_hidden_edges() {
    let mut g = diamond();
    let c = g.node_ix(NodeId(2)).unwrap();
    g.set_input_visibility(c, 0, false);

    let order = post_order(&g, &ixs(&g, &[0]));
    assert_eq!(order, ixs(&g, &[3, 1, 0]));
}

#[test]
fn visit_order_sorts_each_rank() {
    let mut g = diamond();
    layout(&mut g, &LayoutRequest::full()).unwrap();

    let b = g.node_by_id(NodeId(1)).unwrap();
    let c = g.node_by_id(NodeId(2)).unwrap();
    assert_eq!(b.rank, c.rank);
    assert!(b.visit_order < c.visit_order);
    assert!(b.x < c.x);
}

#[test]
fn post_order_handles_long_chains() {
    const N: u32 = 50_000;
    let mut b = GraphBuilder::default();
    for id in 0..N {
        b.add_node(Node::new(NodeId(id), "Int32Add", 100.0, 40.0))
            .unwrap();
    }
    for id in 1..N {
        b.add_edge(NodeId(id - 1), NodeId(id), 0, EdgeKind::Value);
    }
    let g = b.build().unwrap();

    let order = post_order(&g, &[0]);
    assert_eq!(order.len(), N as usize);
    assert_eq!(order[0], N as usize - 1);
    assert_eq!(order[N as usize - 1], 0);
}
