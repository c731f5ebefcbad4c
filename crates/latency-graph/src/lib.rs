//! Latency-weighted dependency graph and bounded walk traversal.
//!
//! This crate models dependencies between named nodes as a directed graph
//! whose edges carry a latency, and answers questions about walks through it.
//! Cycles are allowed, so walk enumeration is bounded by hop counts, latency
//! caps and a stopping heuristic rather than by exhausting the graph.
//!
//! # Key Types
//!
//! - [`LatencyGraph`]: The assembled graph, immutable once built
//! - [`EdgeReader`]: Source of `(parent, child, latency)` tuples for assembly
//! - [`TraversalEngine`]: Loads a graph once and runs queries against it
//! - [`TraversalSettings`]: Tuning values for the enumeration heuristic
//!
//! # Example
//!
//! ```
//! use latency_graph::{EdgeTuple, StaticEdgeReader, TraversalEngine};
//!
//! let reader = StaticEdgeReader::new(vec![
//!     EdgeTuple::new("A", "B", 5),
//!     EdgeTuple::new("B", "C", 4),
//! ]);
//! let mut engine = TraversalEngine::new(reader);
//! engine.init_graph("inline")?;
//!
//! assert_eq!(engine.average_latency_of_path(&["A", "B", "C"])?, 9);
//! assert_eq!(engine.count_traces("A", "C", 2, true)?, 1);
//! assert_eq!(engine.find_shortest_latency_for_path("A", "C")?, Some(9));
//! # Ok::<(), latency_graph::Error>(())
//! ```

mod error;
mod graph;
mod reader;
mod settings;
mod traversal;

pub use error::{Error, Result};
pub use graph::{Dependent, LatencyGraph, LatencyNode};
pub use reader::{
    EdgeReader, EdgeTuple, FileEdgeReader, RECORD_SEPARATOR, StaticEdgeReader, parse_edge_list,
};
pub use settings::{
    DEFAULT_IDLE_ITERATION_MARGIN, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_PATHS_TO_INVESTIGATE,
    TraversalSettings,
};
pub use traversal::{DiscoveredPath, TraversalEngine};

/// Latency of a single dependency edge, and of walks as sums of edges.
pub type Latency = u64;
