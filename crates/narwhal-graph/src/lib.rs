#![forbid(unsafe_code)]

//! Node/edge model for compiler IR graphs.
//!
//! A [`Graph`] is the sole owner of its nodes and edges. Edges refer to their endpoints by arena
//! slot, never by reference, so the layout engine can take one exclusive borrow of the whole graph
//! while renderers only ever read it.

pub mod config;
pub mod document;
pub mod error;
pub mod graph;

pub use config::LayoutConfig;
pub use document::{EdgeSpec, GraphDocument, NodeSpec};
pub use error::{Error, Result};
pub use graph::{
    BoundingBox, Edge, EdgeKind, Extent, Graph, GraphBuilder, GraphState, Node, NodeClass, NodeId,
    OutputVisibility, VisibilityPreset,
};
