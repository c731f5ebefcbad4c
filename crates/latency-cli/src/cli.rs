//! Command-line argument definitions

use crate::logging::{LogLevel, TracingFormat};
use clap::{Parser, Subcommand};
use latency_graph::Latency;
use std::path::PathBuf;

/// Graph file used when neither `--graph` nor `LATENCY_GRAPH_FILE` is given
pub const DEFAULT_GRAPH_FILE: &str = "data/dependency-graph.txt";

/// Answer latency and walk questions about a dependency graph
#[derive(Parser, Debug)]
#[command(name = "latency", version, about)]
pub struct Cli {
    /// File with the graph definition, e.g. `AB5, BC4, CD8`
    #[arg(long, global = true, env = "LATENCY_GRAPH_FILE", default_value = DEFAULT_GRAPH_FILE)]
    pub graph: PathBuf,

    /// TOML file with traversal settings
    #[arg(long, global = true, env = "LATENCY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level written to stderr
    #[arg(long, short = 'L', global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub level: LogLevel,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = TracingFormat::Compact)]
    pub format: TracingFormat,

    /// Query to answer
    #[command(subcommand)]
    pub command: Commands,
}

/// Available queries
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Total latency along a literal path of node names
    Latency {
        /// Node names in path order
        #[arg(required = true, num_args = 1..)]
        nodes: Vec<String>,
    },
    /// Count walks between two nodes with a bounded number of hops
    Traces {
        /// Start node
        start: String,
        /// End node
        end: String,
        /// Maximum number of hops
        #[arg(long)]
        max_hops: usize,
        /// Only count walks with exactly `--max-hops` hops
        #[arg(long)]
        exact: bool,
    },
    /// List discovered walks between two nodes with their latency
    Paths {
        /// Start node
        start: String,
        /// End node
        end: String,
        /// Walks to record before the search may stop
        #[arg(long)]
        min_paths: Option<usize>,
        /// Inclusive latency cap
        #[arg(long)]
        max_latency: Option<Latency>,
    },
    /// Smallest latency among discovered walks between two nodes
    Shortest {
        /// Start node
        start: String,
        /// End node
        end: String,
    },
    /// Count discovered walks between two nodes within a latency budget
    Within {
        /// Start node
        start: String,
        /// End node
        end: String,
        /// Inclusive latency cap
        max_latency: Latency,
    },
    /// Answer the standard question set for the loaded graph
    Demo,
}
