//! Command-line front-end for latency graph queries.
//!
//! The binary loads a graph definition file once, then answers a single
//! query (or the demo question set) and prints the answers to stdout.

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod logging;

pub use errors::{CliError, Result};
