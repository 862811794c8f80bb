use crate::graph::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node {id} is declared more than once")]
    DuplicateNode { id: NodeId },

    #[error("edge {from} -> {to} references a node that does not exist")]
    MissingEndpoint { from: NodeId, to: NodeId },

    #[error("inputs of node {target} are not numbered 0..n (unexpected operand index {index})")]
    InputIndexOutOfOrder { target: NodeId, index: usize },

    #[error("node {id} has no size (expected `width`/`height` or `label_width`/`label_height`)")]
    MissingSize { id: NodeId },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
