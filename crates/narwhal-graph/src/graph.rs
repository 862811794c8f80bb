//! The graph container.
//!
//! Nodes and edges live in two flat arenas. Node slots follow insertion order, edge slots follow
//! the input order of their targets, so iterating edges slot by slot visits every node's inputs in
//! operand order, node after node.

mod bounds;
mod builder;
mod edge;
mod geometry;
mod node;

pub use bounds::{BoundingBox, Extent};
pub use builder::GraphBuilder;
pub use edge::{Edge, EdgeKind};
pub use node::{Node, NodeClass, NodeId};

use crate::config::LayoutConfig;
use rustc_hash::FxBuildHasher;
use std::ops::Range;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Whether the positions stored on the nodes can be reused as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphState {
    #[default]
    NeedsFullRebuild,
    Cached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityPreset {
    All,
    ControlOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputVisibility {
    AllVisible,
    SomeVisible,
    NoneVisible,
}

#[derive(Debug, Clone)]
pub struct Graph {
    config: LayoutConfig,
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    state: GraphState,
    rendered: bool,
    bounds: BoundingBox,
    max_back_edge_number: u32,
}

impl Graph {
    pub(crate) fn from_parts(
        config: LayoutConfig,
        nodes: Vec<Node>,
        node_index: HashMap<NodeId, usize>,
        edges: Vec<Edge>,
    ) -> Self {
        Self {
            config,
            nodes,
            node_index,
            edges,
            state: GraphState::NeedsFullRebuild,
            rendered: false,
            bounds: BoundingBox::default(),
            max_back_edge_number: 0,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        self.state = GraphState::NeedsFullRebuild;
    }

    pub fn state(&self) -> GraphState {
        self.state
    }

    pub fn set_state(&mut self, state: GraphState) {
        self.state = state;
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Called by the renderer once the graph has been drawn. From then on back edges are routed
    /// through their own lanes right of the widest node.
    pub fn mark_rendered(&mut self) {
        self.rendered = true;
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_ix(&self, id: NodeId) -> Option<usize> {
        self.node_index.get(&id).copied()
    }

    pub fn node(&self, ix: usize) -> &Node {
        &self.nodes[ix]
    }

    /// Mutable access to layout fields. Visibility and topology are not reachable from here.
    pub fn node_mut(&mut self, ix: usize) -> &mut Node {
        &mut self.nodes[ix]
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.node_ix(id).map(|ix| &self.nodes[ix])
    }

    pub fn edge(&self, ix: usize) -> &Edge {
        &self.edges[ix]
    }

    pub fn edge_mut(&mut self, ix: usize) -> &mut Edge {
        &mut self.edges[ix]
    }

    pub fn node_ixs(&self) -> Range<usize> {
        0..self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn visible_node_ixs(&self) -> impl Iterator<Item = usize> + '_ {
        self.node_ixs().filter(|&ix| self.nodes[ix].visible)
    }

    pub fn visible_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.visible)
    }

    /// Edge slots, node by node, each node's inputs in operand order.
    pub fn edge_ixs(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().flat_map(|n| n.inputs.iter().copied())
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, &Edge)> {
        self.edge_ixs().map(|ix| (ix, &self.edges[ix]))
    }

    pub fn filtered_edges<'a, F>(&'a self, mut pred: F) -> impl Iterator<Item = usize> + 'a
    where
        F: FnMut(&Graph, usize) -> bool + 'a,
    {
        self.edge_ixs().filter(move |&ix| pred(self, ix))
    }

    pub fn is_node_visible(&self, ix: usize) -> bool {
        self.nodes[ix].visible
    }

    pub fn set_node_visible(&mut self, ix: usize, visible: bool) {
        if self.nodes[ix].visible != visible {
            self.nodes[ix].visible = visible;
            self.state = GraphState::NeedsFullRebuild;
        }
    }

    /// An edge is drawn only when its own flag is set and both endpoints are shown.
    pub fn is_edge_visible(&self, ix: usize) -> bool {
        let e = &self.edges[ix];
        e.visible && self.nodes[e.source].visible && self.nodes[e.target].visible
    }

    pub fn set_edge_visible(&mut self, ix: usize, visible: bool) {
        if self.edges[ix].visible != visible {
            self.edges[ix].visible = visible;
            self.state = GraphState::NeedsFullRebuild;
        }
    }

    /// Whether some input of the node may be a loop-carried edge: the node is a loop header, or a
    /// phi hanging off one.
    pub fn has_back_edges(&self, ix: usize) -> bool {
        let node = &self.nodes[ix];
        match node.class {
            NodeClass::LoopHeader => true,
            NodeClass::Phi => node
                .inputs
                .last()
                .is_some_and(|&e| self.nodes[self.edges[e].source].class.is_loop_header()),
            _ => false,
        }
    }

    pub fn is_back_edge(&self, ix: usize) -> bool {
        let e = &self.edges[ix];
        self.has_back_edges(e.target) && self.nodes[e.target].rank < self.nodes[e.source].rank
    }

    /// Recomputes the edge flags from node visibility.
    ///
    /// Before a full rebuild every edge between two shown nodes is shown. On a cached graph the
    /// existing flags are kept and only control edges between shown nodes of a rendered graph are
    /// switched on.
    pub fn make_edges_visible(&mut self) {
        let full = self.state == GraphState::NeedsFullRebuild;
        let rendered = self.rendered;
        for edge in &mut self.edges {
            let ends = self.nodes[edge.source].visible && self.nodes[edge.target].visible;
            edge.visible = if full {
                ends
            } else {
                edge.visible || (rendered && edge.kind == EdgeKind::Control && ends)
            };
        }
    }

    pub fn set_visibility_preset(&mut self, preset: VisibilityPreset) {
        for node in &mut self.nodes {
            node.visible = match preset {
                VisibilityPreset::All => true,
                VisibilityPreset::ControlOnly => node.is_control,
            };
        }
        self.state = GraphState::NeedsFullRebuild;
    }

    pub fn output_visibility(&self, ix: usize) -> OutputVisibility {
        let outputs = &self.nodes[ix].outputs;
        let shown = outputs.iter().filter(|&&e| self.is_edge_visible(e)).count();
        if shown == outputs.len() {
            OutputVisibility::AllVisible
        } else if shown != 0 {
            OutputVisibility::SomeVisible
        } else {
            OutputVisibility::NoneVisible
        }
    }

    /// Shows or hides every output edge of a node. Showing an edge also reveals its target.
    /// Returns whether some hidden node became visible.
    pub fn set_output_visibility(&mut self, ix: usize, visible: bool) -> bool {
        let mut revealed = false;
        for k in 0..self.nodes[ix].outputs.len() {
            let e = self.nodes[ix].outputs[k];
            self.edges[e].visible = visible;
            let target = self.edges[e].target;
            if visible && !self.nodes[target].visible {
                self.nodes[target].visible = true;
                revealed = true;
            }
        }
        self.state = GraphState::NeedsFullRebuild;
        revealed
    }

    /// Shows or hides one input edge. Showing it also reveals its source.
    /// Returns whether the source became visible, or `None` when the node has no such input.
    pub fn set_input_visibility(
        &mut self,
        ix: usize,
        input: usize,
        visible: bool,
    ) -> Option<bool> {
        let e = *self.nodes.get(ix)?.inputs.get(input)?;
        self.edges[e].visible = visible;
        self.state = GraphState::NeedsFullRebuild;
        let source = self.edges[e].source;
        if visible && !self.nodes[source].visible {
            self.nodes[source].visible = true;
            return Some(true);
        }
        Some(false)
    }

    /// Highest rank among the sources of visible forward inputs, `0` for none.
    pub fn deepest_input_rank(&self, ix: usize) -> u32 {
        self.nodes[ix]
            .inputs
            .iter()
            .filter(|&&e| self.is_edge_visible(e) && !self.is_back_edge(e))
            .map(|&e| self.nodes[self.edges[e].source].rank)
            .max()
            .unwrap_or(0)
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn max_back_edge_number(&self) -> u32 {
        self.max_back_edge_number
    }

    pub fn set_max_back_edge_number(&mut self, n: u32) {
        self.max_back_edge_number = n;
    }
}
