//! Latency graph model and assembly using petgraph.
//!
//! This module holds the directed, weighted dependency graph the traversal
//! engine queries. Node identities and adjacency are fixed once assembly
//! finishes; nothing in this crate mutates a graph after it is built.

use crate::{EdgeReader, EdgeTuple, Latency, Result};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A node in the latency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyNode {
    /// Name of the node, unique within a graph.
    pub name: String,
}

/// An outgoing dependency edge of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependent<'a> {
    /// Index of the dependent node.
    pub index: NodeIndex,
    /// Name of the dependent node.
    pub name: &'a str,
    /// Latency of the edge leading to the dependent node.
    pub latency: Latency,
}

/// Directed dependency graph whose edges carry a latency.
///
/// Cycles (including self-loops) are allowed. At most one edge exists per
/// ordered pair of names: adding the same pair twice keeps the latest latency.
#[derive(Debug, Clone, Default)]
pub struct LatencyGraph {
    /// The directed graph of nodes.
    graph: DiGraph<LatencyNode, Latency>,
    /// Map from node names to node indices.
    name_to_node: HashMap<String, NodeIndex>,
}

impl LatencyGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph from an ordered list of edge tuples.
    ///
    /// Every name mentioned as a parent or a child is registered before any
    /// edge is wired, so tuple order never matters for node creation.
    #[must_use]
    pub fn from_edges(edges: &[EdgeTuple]) -> Self {
        let mut graph = Self::new();

        // First pass: register every endpoint
        for edge in edges {
            graph.add_node(&edge.parent);
            graph.add_node(&edge.child);
        }

        // Second pass: wire the edges
        for edge in edges {
            if let (Some(parent), Some(child)) =
                (graph.node_index(&edge.parent), graph.node_index(&edge.child))
            {
                graph.set_edge(parent, child, edge.latency);
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Assembled latency graph"
        );
        graph
    }

    /// Read edges for `source` through `reader` and assemble them.
    ///
    /// # Errors
    ///
    /// Propagates any reader failure; no partially built graph is returned.
    pub fn load<R: EdgeReader + ?Sized>(reader: &R, source: &str) -> Result<Self> {
        let edges = reader.read_edges(source)?;
        Ok(Self::from_edges(&edges))
    }

    /// Register `name`, returning the existing index if it is already known.
    fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&node) = self.name_to_node.get(name) {
            return node;
        }

        let node_index = self.graph.add_node(LatencyNode {
            name: name.to_string(),
        });
        self.name_to_node.insert(name.to_string(), node_index);
        node_index
    }

    // Last write wins for a repeated pair
    fn set_edge(&mut self, parent: NodeIndex, child: NodeIndex, latency: Latency) {
        self.graph.update_edge(parent, child, latency);
    }

    /// Get the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if a node exists in the graph.
    #[must_use]
    pub fn contains_node(&self, name: &str) -> bool {
        self.name_to_node.contains_key(name)
    }

    /// Get the node index for a node by name.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.name_to_node.get(name).copied()
    }

    /// Get the name of the node at `index`.
    #[must_use]
    pub fn node_name(&self, index: NodeIndex) -> Option<&str> {
        self.graph.node_weight(index).map(|node| node.name.as_str())
    }

    /// Get the latency of the edge `parent -> child`, if it exists.
    #[must_use]
    pub fn edge_latency(&self, parent: NodeIndex, child: NodeIndex) -> Option<Latency> {
        self.graph
            .find_edge(parent, child)
            .and_then(|edge| self.graph.edge_weight(edge))
            .copied()
    }

    /// Outgoing edges of `node`, ordered by dependent name.
    ///
    /// The fixed order makes every traversal deterministic.
    #[must_use]
    pub fn dependents(&self, node: NodeIndex) -> Vec<Dependent<'_>> {
        let mut dependents: Vec<Dependent<'_>> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| Dependent {
                index: edge.target(),
                name: self.graph[edge.target()].name.as_str(),
                latency: *edge.weight(),
            })
            .collect();
        dependents.sort_by(|a, b| a.name.cmp(b.name));
        dependents
    }

    /// All nodes from which `target` can be reached, `target` included.
    #[must_use]
    pub fn nodes_reaching(&self, target: NodeIndex) -> HashSet<NodeIndex> {
        let mut reaching = HashSet::from([target]);
        let mut frontier = vec![target];

        // Walk edges backwards from the target
        while let Some(node) = frontier.pop() {
            for parent in self.graph.neighbors_directed(node, Direction::Incoming) {
                if reaching.insert(parent) {
                    frontier.push(parent);
                }
            }
        }

        reaching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticEdgeReader;

    fn edges(list: &[(&str, &str, Latency)]) -> Vec<EdgeTuple> {
        list.iter()
            .map(|(p, c, l)| EdgeTuple::new(*p, *c, *l))
            .collect()
    }

    fn latency_between(graph: &LatencyGraph, parent: &str, child: &str) -> Option<Latency> {
        graph.edge_latency(graph.node_index(parent)?, graph.node_index(child)?)
    }

    #[test]
    fn test_new_graph_is_empty() {
        let graph = LatencyGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_from_edges_registers_parents_and_children() {
        let graph = LatencyGraph::from_edges(&edges(&[("A", "B", 5), ("B", "C", 4)]));

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        for name in ["A", "B", "C"] {
            assert!(graph.contains_node(name));
        }
        assert!(!graph.contains_node("D"));
    }

    #[test]
    fn test_from_edges_child_seen_before_parent() {
        // C only appears as a parent after it was already used as a child
        let graph = LatencyGraph::from_edges(&edges(&[("A", "C", 1), ("C", "B", 2)]));
        assert_eq!(latency_between(&graph, "A", "C"), Some(1));
        assert_eq!(latency_between(&graph, "C", "B"), Some(2));
    }

    #[test]
    fn test_duplicate_edge_last_write_wins() {
        let graph = LatencyGraph::from_edges(&edges(&[("A", "B", 5), ("A", "B", 9)]));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(latency_between(&graph, "A", "B"), Some(9));
    }

    #[test]
    fn test_self_loop() {
        let graph = LatencyGraph::from_edges(&edges(&[("C", "C", 1)]));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(latency_between(&graph, "C", "C"), Some(1));
    }

    #[test]
    fn test_edges_are_directed() {
        let graph = LatencyGraph::from_edges(&edges(&[("A", "B", 5)]));
        assert_eq!(latency_between(&graph, "B", "A"), None);
    }

    #[test]
    fn test_dependents_sorted_by_name() {
        let graph = LatencyGraph::from_edges(&edges(&[
            ("A", "E", 7),
            ("A", "B", 5),
            ("A", "D", 5),
        ]));
        let a = graph.node_index("A").unwrap();
        let names: Vec<&str> = graph.dependents(a).iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["B", "D", "E"]);

        let e = graph.node_index("E").unwrap();
        assert!(graph.dependents(e).is_empty());
    }

    #[test]
    fn test_nodes_reaching() {
        let graph = LatencyGraph::from_edges(&edges(&[
            ("A", "B", 1),
            ("B", "C", 1),
            ("A", "D", 1),
            ("D", "D", 1),
        ]));
        let c = graph.node_index("C").unwrap();
        let reaching: HashSet<&str> = graph
            .nodes_reaching(c)
            .into_iter()
            .filter_map(|index| graph.node_name(index))
            .collect();
        assert_eq!(reaching, HashSet::from(["A", "B", "C"]));
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut graph = LatencyGraph::new();
        let first = graph.add_node("A");
        let second = graph.add_node("A");
        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node_name(first), Some("A"));
    }

    #[test]
    fn test_set_edge_overwrites_latency() {
        let mut graph = LatencyGraph::new();
        let x = graph.add_node("X");
        let y = graph.add_node("Y");
        graph.set_edge(x, y, 3);
        graph.set_edge(x, y, 8);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_latency(x, y), Some(8));
    }

    #[test]
    fn test_load_propagates_reader_failure() {
        let result = LatencyGraph::load(&StaticEdgeReader::default(), "anything");
        assert!(matches!(result, Err(crate::Error::MalformedInput { .. })));
    }

    #[test]
    fn test_load_assembles_reader_output() {
        let reader = StaticEdgeReader::new(edges(&[("A", "B", 4)]));
        let graph = LatencyGraph::load(&reader, "anything").unwrap();
        assert_eq!(latency_between(&graph, "A", "B"), Some(4));
    }
}
