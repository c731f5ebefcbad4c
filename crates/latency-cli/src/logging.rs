//! Log output for the latency CLI
//!
//! Logs go to stderr so that query answers on stdout stay machine readable.
//! `RUST_LOG` takes precedence over `--level` when it is set.

use crate::cli::Cli;
use std::io;
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};
use uuid::Uuid;

/// Crates whose events the CLI shows by default
const LOGGED_CRATES: [&str; 2] = ["latency_cli", "latency_graph"];

/// How log lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TracingFormat {
    /// Multi-line, human-readable
    Pretty,
    /// One line per event
    Compact,
    /// One JSON object per event
    Json,
}

/// Most verbose level shown for the CLI's own crates
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Every frontier step of a search
    Trace,
    /// Graph loading and query summaries
    Debug,
    /// Informational events
    Info,
    /// Warnings such as an enumeration hitting its iteration cap
    Warn,
    /// Errors only
    Error,
}

impl LogLevel {
    /// Directive spelling of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Logging choices taken from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    /// Output format of log lines
    pub format: TracingFormat,
    /// Level used when `RUST_LOG` is not set
    pub level: LogLevel,
}

impl From<&Cli> for LogSettings {
    fn from(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            level: cli.level,
        }
    }
}

impl LogSettings {
    /// Filter directive applied when `RUST_LOG` is unset.
    #[must_use]
    pub fn directive(&self) -> String {
        LOGGED_CRATES
            .iter()
            .map(|name| format!("{name}={}", self.level.as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn env_filter(&self) -> miette::Result<EnvFilter> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(self.directive()))
            .map_err(|e| miette::miette!("Invalid log filter: {e}"))
    }
}

fn output_layer<S>(format: TracingFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer().with_writer(io::stderr);
    match format {
        TracingFormat::Pretty => layer.pretty().boxed(),
        TracingFormat::Compact => layer.compact().with_target(false).boxed(),
        TracingFormat::Json => layer.json().with_current_span(true).boxed(),
    }
}

/// Install the global subscriber and return the id identifying this run.
///
/// # Errors
///
/// Fails if the filter cannot be parsed or a subscriber is already installed.
pub fn init_tracing(settings: LogSettings) -> miette::Result<Uuid> {
    tracing_subscriber::registry()
        .with(settings.env_filter()?)
        .with(output_layer(settings.format))
        .try_init()
        .map_err(|e| miette::miette!("Failed to install log subscriber: {e}"))?;

    let run_id = Uuid::new_v4();
    tracing::debug!(
        %run_id,
        version = env!("CARGO_PKG_VERSION"),
        format = ?settings.format,
        "Logging initialized"
    );
    Ok(run_id)
}
