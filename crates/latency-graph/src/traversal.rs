//! Query engine over a latency graph.
//!
//! The engine answers three kinds of questions:
//!
//! - the total latency of a literal path ([`TraversalEngine::average_latency_of_path`])
//! - the number of walks between two nodes under a hop bound
//!   ([`TraversalEngine::count_traces`])
//! - the distinct walks between two nodes under a latency bound
//!   ([`TraversalEngine::find_paths_within_latency`] and the queries derived from it)
//!
//! Walks may revisit nodes, so the breadth-first searches keep per-walk state in
//! frontier entries that are created fresh for every enqueue. The shared graph
//! is only ever read.

use crate::{
    EdgeReader, Error, FileEdgeReader, LatencyGraph, Latency, Result, StaticEdgeReader,
    TraversalSettings,
};
use petgraph::graph::NodeIndex;
use std::collections::{BTreeMap, HashSet, VecDeque};
use tracing::{debug, instrument, trace, warn};

/// A walk found by [`TraversalEngine::find_paths_within_latency`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPath {
    /// Sum of the edge latencies along the walk.
    pub latency: Latency,
    /// Names of the visited nodes, start and end included.
    pub nodes: Vec<String>,
}

impl DiscoveredPath {
    /// Signature identifying the walk: every node name followed by `-`, e.g. `A-D-E-C-`.
    #[must_use]
    pub fn signature(&self) -> String {
        signature_of(self.nodes.iter().map(String::as_str))
    }

    /// Number of edges in the walk.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

fn signature_of<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().fold(String::new(), |mut signature, name| {
        signature.push_str(name);
        signature.push('-');
        signature
    })
}

/// Frontier entry for hop counting.
#[derive(Debug, Clone, Copy)]
struct HopEntry {
    node: NodeIndex,
    hops: usize,
}

impl HopEntry {
    const fn advance(self, next: NodeIndex) -> Self {
        Self {
            node: next,
            hops: self.hops + 1,
        }
    }
}

/// Frontier entry for latency-bounded enumeration.
///
/// Each entry owns its path, so one node can sit in the queue several times
/// for different walks.
#[derive(Debug, Clone)]
struct PathEntry {
    node: NodeIndex,
    latency: Latency,
    path: Vec<NodeIndex>,
}

impl PathEntry {
    fn start(node: NodeIndex) -> Self {
        Self {
            node,
            latency: 0,
            path: vec![node],
        }
    }

    fn advance(&self, next: NodeIndex, latency: Latency) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(next);
        Self {
            node: next,
            latency: self.latency.saturating_add(latency),
            path,
        }
    }

    fn hops(&self) -> usize {
        self.path.len() - 1
    }
}

/// Lifecycle of the engine's graph.
#[derive(Debug)]
enum EngineState {
    Uninitialized,
    Ready(LatencyGraph),
}

/// Answers path and walk queries over a lazily loaded [`LatencyGraph`].
///
/// The graph is loaded through `R` on the first successful
/// [`init_graph`](Self::init_graph) call and never changes afterwards.
/// Initialization is a plain check-then-set; hosts that share an engine across
/// threads must initialize it before handing it out.
#[derive(Debug)]
pub struct TraversalEngine<R = FileEdgeReader> {
    reader: R,
    settings: TraversalSettings,
    state: EngineState,
}

impl TraversalEngine<FileEdgeReader> {
    /// Create an engine that loads graphs from files.
    #[must_use]
    pub fn from_files() -> Self {
        Self::new(FileEdgeReader::new())
    }
}

impl TraversalEngine<StaticEdgeReader> {
    /// Create an engine that is already initialized with `graph`.
    #[must_use]
    pub fn with_graph(graph: LatencyGraph) -> Self {
        Self {
            reader: StaticEdgeReader::default(),
            settings: TraversalSettings::default(),
            state: EngineState::Ready(graph),
        }
    }
}

impl<R: EdgeReader> TraversalEngine<R> {
    /// Create an uninitialized engine reading edges through `reader`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            settings: TraversalSettings::default(),
            state: EngineState::Uninitialized,
        }
    }

    /// Replace the enumeration settings (builder pattern).
    #[must_use]
    pub fn with_settings(mut self, settings: TraversalSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The enumeration settings in use.
    #[must_use]
    pub const fn settings(&self) -> &TraversalSettings {
        &self.settings
    }

    /// Whether a graph has been loaded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    /// The loaded graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Uninitialized`] before [`init_graph`](Self::init_graph) succeeded.
    pub fn graph(&self) -> Result<&LatencyGraph> {
        match &self.state {
            EngineState::Ready(graph) => Ok(graph),
            EngineState::Uninitialized => Err(Error::Uninitialized),
        }
    }

    /// Load the graph from `source` unless one is already loaded.
    ///
    /// Calls after the first successful one are ignored, whatever their source.
    ///
    /// # Errors
    ///
    /// Propagates reader failures. The engine stays uninitialized in that case.
    pub fn init_graph(&mut self, source: &str) -> Result<()> {
        if self.is_initialized() {
            debug!(source, "Graph already initialized, ignoring source");
            return Ok(());
        }

        let graph = LatencyGraph::load(&self.reader, source)?;
        debug!(
            source,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Graph initialized"
        );
        self.state = EngineState::Ready(graph);
        Ok(())
    }

    /// Sum of the edge latencies along the literal path `path`.
    ///
    /// Despite the historical name this is a total, not an average. A single
    /// name yields `0`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `path` is empty or its first name is unknown
    /// - [`Error::NoTraceFound`] at the first consecutive pair without an edge
    #[instrument(level = "debug", skip(self))]
    pub fn average_latency_of_path(&self, path: &[&str]) -> Result<Latency> {
        let graph = self.graph()?;
        let (first, rest) = path
            .split_first()
            .ok_or_else(|| Error::invalid_input("a path needs at least one node"))?;

        let mut current = graph
            .node_index(first)
            .ok_or_else(|| Error::invalid_input(format!("unknown node '{first}'")))?;
        let mut current_name = *first;
        let mut total: Latency = 0;

        for &next_name in rest {
            let latency = graph
                .node_index(next_name)
                .and_then(|next| graph.edge_latency(current, next).map(|l| (next, l)));
            let Some((next, latency)) = latency else {
                return Err(Error::no_trace(current_name, next_name));
            };
            total = total.saturating_add(latency);
            current = next;
            current_name = next_name;
        }

        Ok(total)
    }

    /// Count the walks from `start` to `end` with a bounded number of hops.
    ///
    /// With `exact_only` a walk must take exactly `max_hops` edges, otherwise
    /// any count from 1 to `max_hops` is accepted. Walks may repeat nodes and
    /// edges; the empty walk never counts, even when `start == end`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a name is empty or unknown, or if
    /// `max_hops` is zero.
    #[instrument(level = "debug", skip(self))]
    pub fn count_traces(
        &self,
        start: &str,
        end: &str,
        max_hops: usize,
        exact_only: bool,
    ) -> Result<usize> {
        let graph = self.graph()?;
        require_names(start, end)?;
        if max_hops < 1 {
            return Err(Error::invalid_input(
                "there can't be a trace if no hops are allowed",
            ));
        }
        let (start_index, end_index) = resolve_endpoints(graph, start, end)?;

        let mut traces = 0;
        let mut queue = VecDeque::from([HopEntry {
            node: start_index,
            hops: 0,
        }]);

        while let Some(entry) = queue.pop_front() {
            let hop_condition = if exact_only {
                entry.hops == max_hops
            } else {
                entry.hops <= max_hops
            };
            if entry.node == end_index && entry.hops > 0 && hop_condition {
                traces += 1;
            }

            if entry.hops < max_hops {
                for dependent in graph.dependents(entry.node) {
                    queue.push_back(entry.advance(dependent.index));
                }
            }
        }

        debug!(traces, "Counted traces");
        Ok(traces)
    }

    /// Enumerate distinct walks from `start` to `end`, keyed by signature.
    ///
    /// An entry is only expanded while `max_latency` is unset or greater than
    /// the latency accumulated so far, and a walk is only recorded when its
    /// latency does not exceed `max_latency`.
    ///
    /// Cyclic graphs have infinitely many walks, so the search stops once at
    /// least `min_paths` walks were recorded and the idle margin from
    /// [`TraversalSettings`] has elapsed since a previously unseen node was
    /// dequeued. The result is best effort: a walk that would only be reached
    /// after stopping is missing from it.
    ///
    /// Nodes that cannot reach `end` are never enqueued, so the search also
    /// ends when `end` is unreachable or only finitely many walks lead to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a name is empty or unknown.
    #[instrument(level = "debug", skip(self))]
    pub fn find_paths_within_latency(
        &self,
        start: &str,
        end: &str,
        min_paths: usize,
        max_latency: Option<Latency>,
    ) -> Result<BTreeMap<String, DiscoveredPath>> {
        let graph = self.graph()?;
        require_names(start, end)?;
        let (start_index, end_index) = resolve_endpoints(graph, start, end)?;
        let margin = self.settings.idle_iteration_margin;
        let reaching_end = graph.nodes_reaching(end_index);
        if !reaching_end.contains(&start_index) {
            debug!("End is unreachable from start");
            return Ok(BTreeMap::new());
        }

        let mut found = BTreeMap::new();
        let mut seen = HashSet::new();
        let mut iteration = 0_usize;
        let mut last_new_visit = 0_usize;
        let mut queue = VecDeque::from([PathEntry::start(start_index)]);

        loop {
            if found.len() >= min_paths && iteration - last_new_visit >= margin {
                debug!(iteration, last_new_visit, "Stopping enumeration");
                break;
            }
            if iteration >= self.settings.max_iterations {
                warn!(
                    iteration,
                    found = found.len(),
                    "Enumeration hit the iteration cap"
                );
                break;
            }
            let Some(entry) = queue.pop_front() else {
                break;
            };
            iteration += 1;

            if seen.insert(entry.node) {
                last_new_visit = iteration;
            }

            let within_cap = max_latency.is_none_or(|max| entry.latency <= max);
            if entry.node == end_index && entry.hops() > 0 && within_cap {
                let path = discovered_path(graph, &entry);
                let signature = path.signature();
                trace!(%signature, latency = path.latency, "Found path");
                found.insert(signature, path);
            }

            if max_latency.is_none_or(|max| max > entry.latency) {
                for dependent in graph.dependents(entry.node) {
                    if reaching_end.contains(&dependent.index) {
                        queue.push_back(entry.advance(dependent.index, dependent.latency));
                    }
                }
            }
        }

        debug!(paths = found.len(), iterations = iteration, "Enumerated paths");
        Ok(found)
    }

    /// Smallest latency among the walks discovered from `start` to `end`.
    ///
    /// Returns `None` if no walk was found. On cyclic graphs this is the
    /// cheapest walk the heuristic discovered, not a proven shortest path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a name is empty or unknown.
    pub fn find_shortest_latency_for_path(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Option<Latency>> {
        let paths = self.find_paths_within_latency(
            start,
            end,
            self.settings.min_paths_to_investigate,
            None,
        )?;
        Ok(paths.values().map(|path| path.latency).min())
    }

    /// Number of walks discovered from `start` to `end` with latency at most
    /// `max_latency_inclusive`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a name is empty or unknown.
    pub fn count_paths_within_latency(
        &self,
        start: &str,
        end: &str,
        max_latency_inclusive: Latency,
    ) -> Result<usize> {
        let paths = self.find_paths_within_latency(
            start,
            end,
            self.settings.min_paths_to_investigate,
            Some(max_latency_inclusive),
        )?;
        Ok(paths.len())
    }
}

fn require_names(start: &str, end: &str) -> Result<()> {
    if start.is_empty() || end.is_empty() {
        return Err(Error::invalid_input("the start and end node can't be empty"));
    }
    Ok(())
}

fn resolve_endpoints(
    graph: &LatencyGraph,
    start: &str,
    end: &str,
) -> Result<(NodeIndex, NodeIndex)> {
    let resolve = |name: &str| {
        graph
            .node_index(name)
            .ok_or_else(|| Error::invalid_input(format!("unknown node '{name}'")))
    };
    Ok((resolve(start)?, resolve(end)?))
}

fn discovered_path(graph: &LatencyGraph, entry: &PathEntry) -> DiscoveredPath {
    DiscoveredPath {
        latency: entry.latency,
        nodes: entry
            .path
            .iter()
            .filter_map(|&index| graph.node_name(index))
            .map(String::from)
            .collect(),
    }
}
