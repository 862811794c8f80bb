use super::{Edge, EdgeKind, Graph, HashMap, Node, NodeId};
use crate::config::LayoutConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
struct PendingEdge {
    from: NodeId,
    to: NodeId,
    index: usize,
    kind: EdgeKind,
}

/// Collects nodes and operand edges, then checks and freezes them into a [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: LayoutConfig,
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,
    edges: Vec<PendingEdge>,
}

impl GraphBuilder {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn add_node(&mut self, node: Node) -> Result<&mut Self> {
        if self.node_index.contains_key(&node.id) {
            return Err(Error::DuplicateNode { id: node.id });
        }
        self.node_index.insert(node.id, self.nodes.len());
        self.nodes.push(node);
        Ok(self)
    }

    /// Adds operand `index` of `to`. Operands of a node may be added in any order.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        index: usize,
        kind: EdgeKind,
    ) -> &mut Self {
        self.edges.push(PendingEdge {
            from,
            to,
            index,
            kind,
        });
        self
    }

    pub fn build(self) -> Result<Graph> {
        let Self {
            config,
            mut nodes,
            node_index,
            edges: pending,
        } = self;

        let mut resolved: Vec<(usize, usize)> = Vec::with_capacity(pending.len());
        for e in &pending {
            let (Some(&from), Some(&to)) = (node_index.get(&e.from), node_index.get(&e.to)) else {
                return Err(Error::MissingEndpoint {
                    from: e.from,
                    to: e.to,
                });
            };
            resolved.push((from, to));
        }

        // Operands grouped by target, then sorted by operand index.
        let mut operands: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for (k, &(_, to)) in resolved.iter().enumerate() {
            operands[to].push(k);
        }
        for (to, list) in operands.iter_mut().enumerate() {
            list.sort_by_key(|&k| pending[k].index);
            for (expected, &k) in list.iter().enumerate() {
                if pending[k].index != expected {
                    return Err(Error::InputIndexOutOfOrder {
                        target: nodes[to].id,
                        index: pending[k].index,
                    });
                }
            }
        }

        // Edge slots follow target order, so slot order is input order.
        let mut slot_of: Vec<usize> = vec![0; pending.len()];
        let mut edges: Vec<Edge> = Vec::with_capacity(pending.len());
        for (to, list) in operands.iter().enumerate() {
            for &k in list {
                slot_of[k] = edges.len();
                nodes[to].inputs.push(edges.len());
                edges.push(Edge {
                    source: resolved[k].0,
                    target: to,
                    index: pending[k].index,
                    kind: pending[k].kind,
                    back_edge_number: 0,
                    visible: true,
                });
            }
        }

        // Outputs keep declaration order; the first output of a loop header matters.
        for (k, &(from, _)) in resolved.iter().enumerate() {
            nodes[from].outputs.push(slot_of[k]);
        }

        for node in &mut nodes {
            node.output_approach = config.min_output_approach;
        }

        let mut graph = Graph::from_parts(config, nodes, node_index, edges);
        graph.make_edges_visible();
        Ok(graph)
    }
}
