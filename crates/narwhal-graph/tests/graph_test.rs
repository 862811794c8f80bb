use narwhal_graph::{
    EdgeKind, Error, Graph, GraphBuilder, GraphState, LayoutConfig, Node, NodeClass, NodeId,
    OutputVisibility, VisibilityPreset,
};

fn node(id: u32, opcode: &str) -> Node {
    Node::new(NodeId(id), opcode, 100.0, 40.0)
}

fn ix(g: &Graph, id: u32) -> usize {
    g.node_ix(NodeId(id)).unwrap()
}

fn input_sources(g: &Graph, id: u32) -> Vec<u32> {
    g.node(ix(g, id))
        .inputs()
        .iter()
        .map(|&e| g.node(g.edge(e).source).id.0)
        .collect()
}

fn loop_graph() -> Graph {
    // 0 Start -> 1 Loop <- 3 body ; 1 -> 2 Phi(4 Param, 3 body, 1 Loop) ; 1 -> 3 body
    let mut b = GraphBuilder::new(LayoutConfig::default());
    b.add_node(node(0, "Start").with_control(true)).unwrap();
    b.add_node(node(1, "Loop").with_control(true)).unwrap();
    b.add_node(node(2, "Phi")).unwrap();
    b.add_node(node(3, "IfTrue").with_control(true)).unwrap();
    b.add_node(node(4, "Parameter")).unwrap();
    b.add_edge(NodeId(0), NodeId(1), 0, EdgeKind::Control)
        .add_edge(NodeId(3), NodeId(1), 1, EdgeKind::Control)
        .add_edge(NodeId(1), NodeId(3), 0, EdgeKind::Control)
        .add_edge(NodeId(4), NodeId(2), 0, EdgeKind::Value)
        .add_edge(NodeId(3), NodeId(2), 1, EdgeKind::Value)
        .add_edge(NodeId(1), NodeId(2), 2, EdgeKind::Control);
    b.build().unwrap()
}

#[test]
fn builder_orders_inputs_by_operand_index() {
    let mut b = GraphBuilder::default();
    for (id, op) in [(0, "A"), (1, "B"), (2, "Add")] {
        b.add_node(node(id, op)).unwrap();
    }
    b.add_edge(NodeId(1), NodeId(2), 1, EdgeKind::Value);
    b.add_edge(NodeId(0), NodeId(2), 0, EdgeKind::Value);
    let g = b.build().unwrap();

    assert_eq!(input_sources(&g, 2), vec![0, 1]);
    let indices: Vec<usize> = g
        .node(ix(&g, 2))
        .inputs()
        .iter()
        .map(|&e| g.edge(e).index)
        .collect();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn builder_keeps_outputs_in_declaration_order() {
    let mut b = GraphBuilder::default();
    for id in 0..3 {
        b.add_node(node(id, "X")).unwrap();
    }
    b.add_edge(NodeId(0), NodeId(2), 0, EdgeKind::Value);
    b.add_edge(NodeId(0), NodeId(1), 0, EdgeKind::Value);
    let g = b.build().unwrap();

    let targets: Vec<u32> = g
        .node(ix(&g, 0))
        .outputs()
        .iter()
        .map(|&e| g.node(g.edge(e).target).id.0)
        .collect();
    assert_eq!(targets, vec![2, 1]);
}

#[test]
fn builder_rejects_duplicates_missing_endpoints_and_operand_gaps() {
    let mut b = GraphBuilder::default();
    b.add_node(node(0, "X")).unwrap();
    assert!(matches!(
        b.add_node(node(0, "Y")),
        Err(Error::DuplicateNode { id: NodeId(0) })
    ));

    let mut b = GraphBuilder::default();
    b.add_node(node(0, "X")).unwrap();
    b.add_edge(NodeId(0), NodeId(7), 0, EdgeKind::Value);
    assert!(matches!(
        b.build(),
        Err(Error::MissingEndpoint {
            from: NodeId(0),
            to: NodeId(7)
        })
    ));

    let mut b = GraphBuilder::default();
    b.add_node(node(0, "X")).unwrap();
    b.add_node(node(1, "Y")).unwrap();
    b.add_edge(NodeId(0), NodeId(1), 1, EdgeKind::Value);
    assert!(matches!(
        b.build(),
        Err(Error::InputIndexOutOfOrder {
            target: NodeId(1),
            index: 1
        })
    ));
}

#[test]
fn edge_slots_follow_node_then_operand_order() {
    let g = loop_graph();
    let order: Vec<(u32, usize)> = g
        .edges()
        .map(|(_, e)| (g.node(e.target).id.0, e.index))
        .collect();
    assert_eq!(order, vec![(1, 0), (1, 1), (2, 0), (2, 1), (2, 2), (3, 0)]);
}

#[test]
fn classification_comes_from_opcode_and_control_flag() {
    assert_eq!(NodeClass::classify("Loop", true), NodeClass::LoopHeader);
    assert_eq!(NodeClass::classify("Merge", true), NodeClass::Merge);
    assert_eq!(NodeClass::classify("EffectPhi", false), NodeClass::Phi);
    assert_eq!(NodeClass::classify("Start", false), NodeClass::Control);
    assert_eq!(NodeClass::classify("Branch", true), NodeClass::Control);
    assert_eq!(NodeClass::classify("Int32Add", false), NodeClass::Other);

    let n = node(0, "Whatever").with_control(true).with_class(NodeClass::Merge);
    assert_eq!(n.class, NodeClass::Merge);
}

#[test]
fn back_edge_eligibility_covers_loops_and_their_phis() {
    let g = loop_graph();
    assert!(g.has_back_edges(ix(&g, 1)));
    assert!(g.has_back_edges(ix(&g, 2)));
    assert!(!g.has_back_edges(ix(&g, 3)));

    let mut b = GraphBuilder::default();
    b.add_node(node(0, "Merge").with_control(true)).unwrap();
    b.add_node(node(1, "Phi")).unwrap();
    b.add_edge(NodeId(0), NodeId(1), 0, EdgeKind::Control);
    let g = b.build().unwrap();
    assert!(!g.has_back_edges(ix(&g, 1)));
}

#[test]
fn back_edges_depend_on_rank() {
    let mut g = loop_graph();
    let (l, phi, body) = (ix(&g, 1), ix(&g, 2), ix(&g, 3));
    g.node_mut(l).rank = 2;
    g.node_mut(phi).rank = 2;
    g.node_mut(body).rank = 3;

    let back: Vec<(usize, usize, usize)> = g
        .filtered_edges(|g, e| g.is_back_edge(e))
        .map(|e| (g.edge(e).source, g.edge(e).target, g.edge(e).index))
        .collect();
    assert_eq!(back, vec![(body, l, 1), (body, phi, 1)]);

    g.node_mut(body).rank = 1;
    assert_eq!(g.filtered_edges(|g, e| g.is_back_edge(e)).count(), 0);
}

#[test]
fn edge_visibility_needs_flag_and_both_endpoints() {
    let mut g = loop_graph();
    let e = g.node(ix(&g, 2)).inputs()[0];
    assert!(g.is_edge_visible(e));

    g.set_node_visible(ix(&g, 4), false);
    assert!(g.edge(e).visible_flag());
    assert!(!g.is_edge_visible(e));

    g.make_edges_visible();
    assert!(!g.edge(e).visible_flag());
}

#[test]
fn cached_visibility_only_turns_on_control_edges_of_rendered_graphs() {
    let mut g = loop_graph();
    let value = g.node(ix(&g, 2)).inputs()[1];
    let control = g.node(ix(&g, 2)).inputs()[2];
    g.set_edge_visible(value, false);
    g.set_edge_visible(control, false);

    g.set_state(GraphState::Cached);
    g.make_edges_visible();
    assert!(!g.edge(control).visible_flag());

    g.mark_rendered();
    g.make_edges_visible();
    assert!(g.edge(control).visible_flag());
    assert!(!g.edge(value).visible_flag());
}

#[test]
fn visibility_helpers_reveal_neighbours_and_invalidate_layout() {
    let mut g = loop_graph();
    g.set_visibility_preset(VisibilityPreset::ControlOnly);
    assert!(!g.is_node_visible(ix(&g, 2)));
    assert!(!g.is_node_visible(ix(&g, 4)));
    assert_eq!(g.output_visibility(ix(&g, 1)), OutputVisibility::SomeVisible);

    g.set_state(GraphState::Cached);
    assert!(g.set_output_visibility(ix(&g, 1), true));
    assert_eq!(g.state(), GraphState::NeedsFullRebuild);
    assert!(g.is_node_visible(ix(&g, 2)));
    assert_eq!(g.output_visibility(ix(&g, 1)), OutputVisibility::AllVisible);

    assert_eq!(g.set_input_visibility(ix(&g, 2), 0, true), Some(true));
    assert!(g.is_node_visible(ix(&g, 4)));
    assert_eq!(g.set_input_visibility(ix(&g, 2), 0, true), Some(false));

    g.set_output_visibility(ix(&g, 4), false);
    assert_eq!(g.output_visibility(ix(&g, 4)), OutputVisibility::NoneVisible);
}

#[test]
fn set_input_visibility_rejects_missing_inputs() {
    let mut g = loop_graph();
    g.set_state(GraphState::Cached);
    let phi = ix(&g, 2);
    let inputs = g.node(phi).inputs().len();

    assert_eq!(g.set_input_visibility(phi, inputs, false), None);
    assert_eq!(g.set_input_visibility(g.node_count(), 0, false), None);
    assert_eq!(g.state(), GraphState::Cached);
    assert!(g.node(phi).inputs().iter().all(|&e| g.is_edge_visible(e)));
}

#[test]
fn deepest_input_rank_ignores_back_edges() {
    let mut g = loop_graph();
    for (id, rank) in [(0, 1), (1, 2), (2, 2), (3, 3), (4, 1)] {
        let n = ix(&g, id);
        g.node_mut(n).rank = rank;
    }
    assert_eq!(g.deepest_input_rank(ix(&g, 1)), 1);
    assert_eq!(g.deepest_input_rank(ix(&g, 3)), 2);
    assert_eq!(g.deepest_input_rank(ix(&g, 0)), 0);
}

#[test]
fn pins_are_right_aligned_under_the_output() {
    let mut b = GraphBuilder::default();
    for id in 0..3 {
        b.add_node(node(id, "X")).unwrap();
    }
    b.add_node(Node::new(NodeId(3), "Call", 100.0, 40.0)).unwrap();
    for k in 0..3 {
        b.add_edge(NodeId(k as u32), NodeId(3), k, EdgeKind::Value);
    }
    let g = b.build().unwrap();
    let call = ix(&g, 3);

    assert_eq!(g.node(call).total_width(50.0), 150.0);
    assert_eq!(g.input_x(call, 0), 25.0);
    assert_eq!(g.input_x(call, 2), 125.0);
    assert_eq!(g.output_x(call), 125.0);
}

#[test]
fn input_horizontal_position_uses_the_pin_when_the_source_is_above() {
    let mut g = loop_graph();
    let (l, body) = (ix(&g, 1), ix(&g, 3));
    g.node_mut(l).y = 0.0;
    g.node_mut(body).x = 300.0;
    g.node_mut(body).y = 400.0;

    let e = g.node(body).inputs()[0];
    assert_eq!(g.input_horizontal_position(e, false), 300.0 + g.input_x(body, 0));

    // Entering the loop header from below goes around its side.
    let back = g.node(l).inputs()[1];
    g.node_mut(l).y = 400.0;
    g.node_mut(body).y = 800.0;
    g.node_mut(l).x = 0.0;
    let width = g.node(l).total_width(50.0);
    assert_eq!(g.input_horizontal_position(back, false), width + 40.0);
}

#[test]
fn rendered_back_edges_use_lanes_right_of_the_graph() {
    let mut g = loop_graph();
    let back = g.node(ix(&g, 1)).inputs()[1];
    g.edge_mut(back).back_edge_number = 2;
    g.node_mut(ix(&g, 3)).x = 200.0;
    g.redetermine_bounding_box(false);
    let lane = g.bounds().max_node_x + 2.0 * 20.0;

    assert_ne!(g.input_horizontal_position(back, false), lane);
    g.mark_rendered();
    assert_eq!(g.input_horizontal_position(back, false), lane);
}

#[test]
fn bounding_box_covers_visible_nodes_and_back_edge_lanes() {
    let mut g = loop_graph();
    for (id, x, y) in [(0, -60.0, 0.0), (1, 0.0, 200.0), (2, 140.0, 200.0), (3, 0.0, 400.0)] {
        let n = ix(&g, id);
        g.node_mut(n).x = x;
        g.node_mut(n).y = y;
    }
    g.node_mut(ix(&g, 4)).x = 5000.0;
    g.set_node_visible(ix(&g, 4), false);
    g.set_max_back_edge_number(1);

    let extent = g.redetermine_bounding_box(false);
    let b = g.bounds();
    assert_eq!(b.min_x, -60.0);
    // The phi has three inputs: 150 wide.
    assert_eq!(b.max_node_x, 290.0);
    assert_eq!(b.max_x, 310.0);
    assert_eq!(b.min_y, -50.0);
    assert_eq!(b.max_y, 490.0);
    assert_eq!(extent[0], [-60.0 - 185.0, -50.0 - 270.0]);
    assert_eq!(extent[1], [310.0 + 185.0, 490.0 + 270.0]);
}

#[test]
fn measured_nodes_round_up_to_whole_pins() {
    let n = Node::measured(NodeId(9), "JSAdd", 37.0, 15.0, &LayoutConfig::default());
    assert_eq!(n.width, 150.0);
    assert_eq!(n.height, 35.0);
    assert_eq!(n.with_type_height(25.0).height_for(true), 60.0);
}
