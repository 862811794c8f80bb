//! Serializable snapshot of a finished layout.
//!
//! This is what a renderer reads back: node boxes, edge visibility and lanes, and the pannable
//! extent.

use crate::pipeline::{LayoutSummary, RebuildMode};
use narwhal_graph::{BoundingBox, Extent, Graph, NodeId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDump {
    pub mode: RebuildMode,
    pub max_rank: u32,
    pub max_back_edge_number: u32,
    pub bounds: BoundingBox,
    pub extent: Extent,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDump {
    pub id: NodeId,
    pub opcode: String,
    pub rank: u32,
    pub x: f64,
    pub y: f64,
    /// Width including the input pin fan.
    pub width: f64,
    pub height: f64,
    pub visible: bool,
    pub visit_order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeDump {
    pub source: NodeId,
    pub target: NodeId,
    pub index: usize,
    pub visible: bool,
    pub back_edge_number: u32,
}

impl LayoutDump {
    pub fn new(g: &Graph, summary: &LayoutSummary, show_types: bool) -> Self {
        let pin = g.config().pin_width;
        let nodes = g
            .nodes()
            .map(|n| NodeDump {
                id: n.id,
                opcode: n.opcode.clone(),
                rank: n.rank,
                x: n.x,
                y: n.y,
                width: n.total_width(pin),
                height: n.height_for(show_types),
                visible: n.is_visible(),
                visit_order: n.visit_order,
            })
            .collect();
        let edges = g
            .edges()
            .map(|(ix, e)| EdgeDump {
                source: g.node(e.source).id,
                target: g.node(e.target).id,
                index: e.index,
                visible: g.is_edge_visible(ix),
                back_edge_number: e.back_edge_number,
            })
            .collect();
        Self {
            mode: summary.mode,
            max_rank: summary.max_rank,
            max_back_edge_number: summary.max_back_edge_number,
            bounds: g.bounds(),
            extent: summary.extent,
            nodes,
            edges,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeDump> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
