//! Node payload and classification.

use crate::config::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Structural role of a node, decided once when the graph is built.
///
/// The layout engine never looks at opcodes; everything it needs to know about loops and merges
/// is carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeClass {
    /// Any other control-flow node (`Start`, `Branch`, `IfTrue`, ...).
    Control,
    /// A control merge that is not a loop.
    Merge,
    /// A value or effect merge; its last input is the merge or loop it belongs to.
    Phi,
    /// A loop header; every input but the first is a back edge.
    LoopHeader,
    #[default]
    Other,
}

impl NodeClass {
    pub fn classify(opcode: &str, control: bool) -> Self {
        match opcode {
            "Loop" => Self::LoopHeader,
            "Merge" => Self::Merge,
            "Phi" | "EffectPhi" | "InductionVariablePhi" => Self::Phi,
            "Start" => Self::Control,
            _ if control => Self::Control,
            _ => Self::Other,
        }
    }

    /// Plain control flow; merges and loop headers are not included.
    pub fn is_control(self) -> bool {
        self == Self::Control
    }

    pub fn is_phi(self) -> bool {
        self == Self::Phi
    }

    pub fn is_loop_header(self) -> bool {
        self == Self::LoopHeader
    }

    /// Control merges, loop headers included.
    pub fn is_merge(self) -> bool {
        matches!(self, Self::Merge | Self::LoopHeader)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub opcode: String,
    pub class: NodeClass,
    pub is_control: bool,

    pub width: f64,
    pub height: f64,
    /// Extra height taken by the type annotation when types are shown.
    pub type_height: f64,

    /// Layer index, `0` while unranked.
    pub rank: u32,
    pub x: f64,
    pub y: f64,
    /// Post-order position used to sort nodes within a rank, `0` while unvisited.
    pub visit_order: u32,
    pub output_approach: f64,

    pub(crate) visible: bool,
    pub(crate) inputs: Vec<usize>,
    pub(crate) outputs: Vec<usize>,
}

impl Node {
    pub fn new(id: NodeId, opcode: impl Into<String>, width: f64, height: f64) -> Self {
        let opcode = opcode.into();
        let class = NodeClass::classify(&opcode, false);
        Self {
            id,
            opcode,
            class,
            is_control: false,
            width,
            height,
            type_height: 0.0,
            rank: 0,
            x: 0.0,
            y: 0.0,
            visit_order: 0,
            output_approach: LayoutConfig::default().min_output_approach,
            visible: true,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Sizes a node around a measured label box: room for one pin on each side, rounded up to a
    /// whole number of pins, and 20 units of vertical padding.
    pub fn measured(
        id: NodeId,
        opcode: impl Into<String>,
        label_width: f64,
        label_height: f64,
        config: &LayoutConfig,
    ) -> Self {
        let pin = config.pin_width;
        let width = align_up(label_width + 2.0 * pin, pin);
        Self::new(id, opcode, width, label_height + 20.0)
    }

    pub fn with_control(mut self, control: bool) -> Self {
        self.is_control = control;
        self.class = NodeClass::classify(&self.opcode, control);
        self
    }

    pub fn with_class(mut self, class: NodeClass) -> Self {
        self.class = class;
        self
    }

    pub fn with_type_height(mut self, type_height: f64) -> Self {
        self.type_height = type_height;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Input edges, in operand order.
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[usize] {
        &self.outputs
    }

    pub fn is_ranked(&self) -> bool {
        self.rank != 0
    }

    pub fn height_for(&self, show_types: bool) -> f64 {
        if show_types {
            self.height + self.type_height
        } else {
            self.height
        }
    }

    /// Width including the room needed to fan out every input pin.
    pub fn total_width(&self, pin_width: f64) -> f64 {
        (self.inputs.len() as f64 * pin_width).max(self.width)
    }
}

fn align_up(value: f64, alignment: f64) -> f64 {
    if alignment <= 0.0 {
        return value;
    }
    (value / alignment).ceil() * alignment
}
