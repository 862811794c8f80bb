//! Full and cached rebuilds.
//!
//! A full rebuild runs every pass from scratch. A cached rebuild keeps the ranks and coordinates
//! from the last full rebuild and only refreshes what depends on edge visibility: the back-edge
//! lanes and the bounding box. A full rebuild marks the graph [`GraphState::Cached`].

use crate::error::Result;
use crate::{back_edges, order, position, rank};
use narwhal_graph::{Extent, Graph, GraphState};
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RebuildMode {
    /// Full when the graph needs it, cached otherwise.
    #[default]
    Auto,
    Full,
    Cached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutRequest {
    pub mode: RebuildMode,
    /// Reserve room for type annotations under node labels.
    pub show_types: bool,
}

impl LayoutRequest {
    pub fn full() -> Self {
        Self {
            mode: RebuildMode::Full,
            ..Default::default()
        }
    }

    pub fn cached() -> Self {
        Self {
            mode: RebuildMode::Cached,
            ..Default::default()
        }
    }

    pub fn with_show_types(mut self, show_types: bool) -> Self {
        self.show_types = show_types;
        self
    }
}

/// Time spent in each pass. Passes that did not run stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseTimings {
    pub total: Duration,
    pub rank: Duration,
    pub order: Duration,
    pub place: Duration,
    pub back_edges: Duration,
    pub bounds: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSummary {
    /// The rebuild that actually ran, never [`RebuildMode::Auto`].
    pub mode: RebuildMode,
    /// Highest rank among visible nodes.
    pub max_rank: u32,
    pub max_back_edge_number: u32,
    pub extent: Extent,
    pub timings: PhaseTimings,
}

/// Lays out `g` in place.
///
/// On success every visible node has a rank, a visit order and coordinates, back edges carry
/// their lane numbers, and the graph's bounding box is current.
pub fn layout(g: &mut Graph, request: &LayoutRequest) -> Result<LayoutSummary> {
    let mode = match (request.mode, g.state()) {
        (RebuildMode::Auto, GraphState::NeedsFullRebuild) => RebuildMode::Full,
        (RebuildMode::Auto, GraphState::Cached) => RebuildMode::Cached,
        (mode, _) => mode,
    };
    let _span = tracing::debug_span!("layout", ?mode, nodes = g.node_count()).entered();

    let total_start = Instant::now();
    let mut timings = match mode {
        RebuildMode::Cached => cached_rebuild(g),
        _ => full_rebuild(g, request.show_types)?,
    };

    let bounds_start = Instant::now();
    let extent = g.redetermine_bounding_box(request.show_types);
    timings.bounds = bounds_start.elapsed();
    timings.total = total_start.elapsed();

    let max_rank = g.visible_nodes().map(|n| n.rank).max().unwrap_or(0);
    tracing::debug!(
        max_rank,
        back_edges = g.max_back_edge_number(),
        elapsed_us = timings.total.as_micros() as u64,
        "layout done"
    );
    Ok(LayoutSummary {
        mode,
        max_rank,
        max_back_edge_number: g.max_back_edge_number(),
        extent,
        timings,
    })
}

/// Ranks, orders and places every visible node from scratch.
///
/// Edge flags are taken as they are; callers that changed node visibility run
/// [`Graph::make_edges_visible`] first, as [`narwhal_graph::GraphBuilder::build`] does.
pub fn full_rebuild(g: &mut Graph, show_types: bool) -> Result<PhaseTimings> {
    let mut timings = PhaseTimings::default();

    let start = Instant::now();
    let terminals = rank::init_nodes(g);
    rank::assign_early_ranks(g, &terminals.sources)?;
    rank::ensure_ranked(g)?;
    rank::compact_late_ranks(g, &terminals.sources);
    timings.rank = start.elapsed();

    let start = Instant::now();
    order::assign_visit_order(g, &terminals.sources);
    rank::pin_sinks(g, &terminals.sinks);
    timings.order = start.elapsed();

    let start = Instant::now();
    let sets = position::rank_sets(g, show_types);
    position::place_nodes(g, &sets, show_types);
    timings.place = start.elapsed();

    let start = Instant::now();
    back_edges::number_back_edges(g);
    timings.back_edges = start.elapsed();

    g.set_state(GraphState::Cached);
    Ok(timings)
}

/// Refreshes the edge flags and back-edge lanes, keeping every node where it is.
pub fn cached_rebuild(g: &mut Graph) -> PhaseTimings {
    let start = Instant::now();
    back_edges::number_back_edges(g);
    g.make_edges_visible();
    PhaseTimings {
        back_edges: start.elapsed(),
        ..Default::default()
    }
}
