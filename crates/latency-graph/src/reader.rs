//! Edge sources for graph assembly.
//!
//! Assembly only depends on the [`EdgeReader`] contract: given a source
//! identifier, produce an ordered list of [`EdgeTuple`]s or fail with
//! [`Error::MalformedInput`]. The reference text encoding is a list of
//! records separated by `", "`, each record being a parent character, a
//! child character and the latency digits, e.g. `AB5, BC4, CD8`.

use crate::{Error, Latency, Result};
use std::path::Path;
use tracing::debug;

/// Separator between records in the text encoding.
pub const RECORD_SEPARATOR: &str = ", ";

/// A single `(parent, child, latency)` dependency edge as read from a source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeTuple {
    /// Name of the node the edge starts at.
    pub parent: String,
    /// Name of the dependent node the edge points to.
    pub child: String,
    /// Latency of the dependency.
    pub latency: Latency,
}

impl EdgeTuple {
    /// Create a new edge tuple.
    pub fn new(parent: impl Into<String>, child: impl Into<String>, latency: Latency) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
            latency,
        }
    }
}

/// Trait for anything that can produce edge tuples for a source identifier.
pub trait EdgeReader {
    /// Read the edges described by `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the source is empty or any record
    /// has the wrong shape. Implementations backed by storage may also return
    /// [`Error::Io`].
    fn read_edges(&self, source: &str) -> Result<Vec<EdgeTuple>>;
}

impl<R: EdgeReader + ?Sized> EdgeReader for &R {
    fn read_edges(&self, source: &str) -> Result<Vec<EdgeTuple>> {
        (**self).read_edges(source)
    }
}

/// Parse the text encoding into edge tuples.
///
/// Surrounding whitespace (such as a trailing newline) is ignored.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if the text is empty or a record is not
/// exactly two alphabetic name characters followed by a non-negative integer.
pub fn parse_edge_list(text: &str) -> Result<Vec<EdgeTuple>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::malformed("edge list is empty"));
    }

    text.split(RECORD_SEPARATOR)
        .enumerate()
        .map(|(position, record)| parse_record(record, position))
        .collect()
}

fn parse_record(record: &str, position: usize) -> Result<EdgeTuple> {
    let malformed =
        || Error::malformed(format!("record {position} (`{record}`) is not of the form `AB5`"));

    let mut chars = record.chars();
    let parent = chars.next().filter(|c| c.is_alphabetic()).ok_or_else(malformed)?;
    let child = chars.next().filter(|c| c.is_alphabetic()).ok_or_else(malformed)?;
    let digits = chars.as_str();

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let latency = digits.parse::<Latency>().map_err(|e| {
        Error::malformed(format!("record {position} (`{record}`) has an invalid latency: {e}"))
    })?;

    Ok(EdgeTuple::new(parent.to_string(), child.to_string(), latency))
}

/// Reads the text encoding from a file whose path is the source identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileEdgeReader;

impl FileEdgeReader {
    /// Create a new file reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EdgeReader for FileEdgeReader {
    fn read_edges(&self, source: &str) -> Result<Vec<EdgeTuple>> {
        let path = Path::new(source);
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let edges = parse_edge_list(&content)?;
        debug!(path = %path.display(), edges = edges.len(), "Read edge list");
        Ok(edges)
    }
}

/// Serves an in-memory list of already-parsed tuples, ignoring the source identifier.
#[derive(Debug, Clone, Default)]
pub struct StaticEdgeReader {
    edges: Vec<EdgeTuple>,
}

impl StaticEdgeReader {
    /// Create a reader that always returns `edges`.
    #[must_use]
    pub fn new(edges: Vec<EdgeTuple>) -> Self {
        Self { edges }
    }
}

impl EdgeReader for StaticEdgeReader {
    fn read_edges(&self, _source: &str) -> Result<Vec<EdgeTuple>> {
        if self.edges.is_empty() {
            return Err(Error::malformed("edge list is empty"));
        }
        Ok(self.edges.clone())
    }
}
