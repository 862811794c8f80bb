#![forbid(unsafe_code)]

//! Layered layout for compiler IR graphs.
//!
//! Nodes are assigned to horizontal rows (ranks) so that every edge points downwards except loop
//! back edges, then packed left to right inside each row with a slot occupation grid that keeps
//! node bodies clear of the vertical edge segments running through the row. Back edges are routed
//! through numbered lanes right of the widest node.
//!
//! The entry point is [`layout`]; the graph model lives in [`graph`].

pub use narwhal_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod back_edges;
pub mod dump;
pub mod error;
pub mod occupation;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod rank;

pub use dump::{EdgeDump, LayoutDump, NodeDump};
pub use error::{Error, Result};
pub use occupation::{Direction, Occupation};
pub use pipeline::{LayoutRequest, LayoutSummary, PhaseTimings, RebuildMode, layout};
