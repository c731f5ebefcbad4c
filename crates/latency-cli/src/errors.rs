//! Error types for the latency CLI

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the CLI layer on top of graph errors
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// The settings file could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    #[diagnostic(code(latency_cli::config::io))]
    ConfigIo {
        /// Path of the config file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for the expected schema
    #[error("Invalid config file {}: {message}", .path.display())]
    #[diagnostic(
        code(latency_cli::config::invalid),
        help("settings live under a `[traversal]` table, e.g. `idle-iteration-margin = 20`")
    )]
    ConfigInvalid {
        /// Path of the config file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A graph operation failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] latency_graph::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
