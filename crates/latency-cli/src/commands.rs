//! Command execution against a loaded engine
//!
//! Every command renders its answer as output lines; printing is left to the
//! binary so the rendering can be tested without a terminal.

use crate::cli::Commands;
use crate::errors::Result;
use latency_graph::{EdgeReader, Error, Latency, TraversalEngine};
use tracing::instrument;

/// Answer printed when a literal path or walk does not exist
pub const NO_SUCH_TRACE: &str = "NO SUCH TRACE";

/// Literal paths asked by the demo, in order
const DEMO_PATHS: [&[&str]; 5] = [
    &["A", "B", "C"],
    &["A", "D"],
    &["A", "D", "C"],
    &["A", "E", "B", "C", "D"],
    &["A", "E", "D"],
];

/// Run `command` and return the lines to print.
///
/// # Errors
///
/// Returns graph errors other than a missing trace, which is rendered as
/// [`NO_SUCH_TRACE`].
#[instrument(level = "debug", skip(engine))]
pub fn execute<R: EdgeReader>(
    command: &Commands,
    engine: &TraversalEngine<R>,
) -> Result<Vec<String>> {
    let lines = match command {
        Commands::Latency { nodes } => {
            let path: Vec<&str> = nodes.iter().map(String::as_str).collect();
            vec![path_latency(engine, &path)?]
        }
        Commands::Traces {
            start,
            end,
            max_hops,
            exact,
        } => vec![engine.count_traces(start, end, *max_hops, *exact)?.to_string()],
        Commands::Paths {
            start,
            end,
            min_paths,
            max_latency,
        } => {
            let min_paths = min_paths.unwrap_or(engine.settings().min_paths_to_investigate);
            engine
                .find_paths_within_latency(start, end, min_paths, *max_latency)?
                .into_iter()
                .map(|(signature, path)| format!("{signature} {}", path.latency))
                .collect()
        }
        Commands::Shortest { start, end } => {
            vec![render_latency(engine.find_shortest_latency_for_path(start, end)?)]
        }
        Commands::Within {
            start,
            end,
            max_latency,
        } => vec![
            engine
                .count_paths_within_latency(start, end, *max_latency)?
                .to_string(),
        ],
        Commands::Demo => demo(engine)?,
    };
    Ok(lines)
}

/// Answer the standard question set, numbering each answer.
fn demo<R: EdgeReader>(engine: &TraversalEngine<R>) -> Result<Vec<String>> {
    let mut answers = Vec::new();
    for path in DEMO_PATHS {
        answers.push(path_latency(engine, path)?);
    }
    answers.push(engine.count_traces("C", "C", 3, false)?.to_string());
    answers.push(engine.count_traces("A", "C", 4, true)?.to_string());
    answers.push(render_latency(
        engine.find_shortest_latency_for_path("A", "C")?,
    ));
    answers.push(render_latency(
        engine.find_shortest_latency_for_path("B", "B")?,
    ));
    answers.push(engine.count_paths_within_latency("C", "C", 30)?.to_string());

    Ok(answers
        .into_iter()
        .enumerate()
        .map(|(i, answer)| format!("{}. {answer}", i + 1))
        .collect())
}

fn path_latency<R: EdgeReader>(engine: &TraversalEngine<R>, path: &[&str]) -> Result<String> {
    match engine.average_latency_of_path(path) {
        Ok(latency) => Ok(latency.to_string()),
        Err(Error::NoTraceFound { .. }) => Ok(NO_SUCH_TRACE.to_string()),
        Err(e) => Err(e.into()),
    }
}

fn render_latency(latency: Option<Latency>) -> String {
    latency.map_or_else(|| NO_SUCH_TRACE.to_string(), |l| l.to_string())
}
