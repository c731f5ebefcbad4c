//! Error types for latency graph operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for latency graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying a latency graph.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Query arguments violate a precondition.
    ///
    /// Always detected before any traversal begins.
    #[error("Invalid input: {message}")]
    #[diagnostic(code(latency_graph::input::invalid))]
    InvalidInput {
        /// Description of the violated precondition.
        message: String,
    },

    /// A literal path references an edge that does not exist.
    #[error("No trace found: there is no edge from '{from}' to '{to}'")]
    #[diagnostic(
        code(latency_graph::trace::not_found),
        help("every consecutive pair of names in the path must be a dependency edge")
    )]
    NoTraceFound {
        /// Name of the node the missing edge starts at.
        from: String,
        /// Name of the node the missing edge should lead to.
        to: String,
    },

    /// The edge source is empty or contains a record of the wrong shape.
    #[error("Malformed input: {message}")]
    #[diagnostic(
        code(latency_graph::input::malformed),
        help("records look like `AB5` and are separated by `, `")
    )]
    MalformedInput {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// A query was issued before the graph was initialized.
    #[error("Graph has not been initialized")]
    #[diagnostic(
        code(latency_graph::engine::uninitialized),
        help("call `init_graph` with an edge source before running queries")
    )]
    Uninitialized,

    /// Reading an edge source from disk failed.
    #[error("Failed to read graph source {}: {source}", .path.display())]
    #[diagnostic(code(latency_graph::io))]
    Io {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid input error with a message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a malformed input error with a message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a missing-edge error for the pair `from -> to`.
    pub fn no_trace(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::NoTraceFound {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create an I/O error with the path that failed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
