use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    #[default]
    Value,
    Control,
    Effect,
    FrameState,
    Context,
}

/// An operand edge. `source` and `target` are node slots of the owning graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    /// Operand position among the target's inputs.
    pub index: usize,
    pub kind: EdgeKind,
    /// Lane number for loop-carried edges, `0` for everything else.
    pub back_edge_number: u32,
    pub(crate) visible: bool,
}

impl Edge {
    /// The raw flag. Use [`Graph::is_edge_visible`](super::Graph::is_edge_visible) to also take
    /// the endpoints into account.
    pub fn visible_flag(&self) -> bool {
        self.visible
    }
}
