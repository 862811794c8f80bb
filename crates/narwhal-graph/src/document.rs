//! JSON graph input.
//!
//! The document is the hand-off format between whatever extracts a phase graph from the compiler
//! and the layout engine. Node sizes come pre-measured, either as a full box or as a label box
//! that gets padded with [`Node::measured`].

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::graph::{EdgeKind, Graph, GraphBuilder, Node, NodeClass, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub config: LayoutConfig,
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: NodeId,
    #[serde(default)]
    pub opcode: String,
    #[serde(default)]
    pub control: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<NodeClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_height: Option<f64>,
    #[serde(default)]
    pub type_height: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: NodeId,
    pub target: NodeId,
    pub index: usize,
    #[serde(default, rename = "type")]
    pub kind: EdgeKind,
}

fn default_visible() -> bool {
    true
}

impl GraphDocument {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_graph(self) -> Result<Graph> {
        let mut builder = GraphBuilder::new(self.config);
        for spec in self.nodes {
            let node = spec.into_node(builder.config())?;
            builder.add_node(node)?;
        }
        for e in self.edges {
            builder.add_edge(e.source, e.target, e.index, e.kind);
        }
        builder.build()
    }
}

impl NodeSpec {
    fn into_node(self, config: &LayoutConfig) -> Result<Node> {
        let node = match (self.width, self.height, self.label_width, self.label_height) {
            (Some(w), Some(h), _, _) => Node::new(self.id, self.opcode, w, h),
            (_, _, Some(lw), Some(lh)) => Node::measured(self.id, self.opcode, lw, lh, config),
            _ => return Err(Error::MissingSize { id: self.id }),
        };
        let mut node = node
            .with_control(self.control)
            .with_type_height(self.type_height)
            .with_visible(self.visible);
        if let Some(class) = self.class {
            node = node.with_class(class);
        }
        Ok(node)
    }
}
