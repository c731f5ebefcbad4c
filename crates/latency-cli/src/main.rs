//! latency CLI entry point

// Answers go to stdout
#![allow(clippy::print_stdout)]

use clap::Parser;
use latency_cli::cli::Cli;
use latency_cli::logging::{self, LogSettings};
use latency_cli::{commands, config};
use latency_graph::TraversalEngine;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let run_id = logging::init_tracing(LogSettings::from(&cli))?;
    let _run = tracing::debug_span!("run", %run_id).entered();

    let settings = config::load_settings(cli.config.as_deref())?;
    let mut engine = TraversalEngine::from_files().with_settings(settings);
    engine.init_graph(&cli.graph.to_string_lossy())?;

    for line in commands::execute(&cli.command, &engine)? {
        println!("{line}");
    }

    Ok(())
}
