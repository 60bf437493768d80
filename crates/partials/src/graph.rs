//! Partial dependency graph and its incremental builder.

use crate::extract::extract_partials;
use promptkit_core::AppResult;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};

/// Directed graph mapping each node to its direct dependencies.
///
/// Iteration follows insertion order, so anything derived from a graph is
/// deterministic as long as the graph was built deterministically.
#[derive(Debug, Clone)]
pub struct DependencyGraph<N, D> {
    order: Vec<N>,
    edges: HashMap<N, Vec<D>>,
}

/// Partial file → logical names it references.
pub type PartialGraph = DependencyGraph<PathBuf, String>;

/// Partial file → partial files it references.
pub type FileGraph = DependencyGraph<PathBuf, PathBuf>;

impl<N, D> DependencyGraph<N, D>
where
    N: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            edges: HashMap::new(),
        }
    }

    /// Record `node` with its dependencies.
    ///
    /// Returns `false` and leaves the existing entry untouched if `node` is
    /// already present.
    pub fn insert(&mut self, node: N, deps: Vec<D>) -> bool {
        if self.edges.contains_key(&node) {
            return false;
        }
        self.order.push(node.clone());
        self.edges.insert(node, deps);
        true
    }

    pub fn contains(&self, node: &N) -> bool {
        self.edges.contains_key(node)
    }

    /// Direct dependencies of `node`, or `None` if it is not a key.
    pub fn get(&self, node: &N) -> Option<&[D]> {
        self.edges.get(node).map(Vec::as_slice)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.order.iter()
    }

    /// `(node, dependencies)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &[D])> {
        self.order
            .iter()
            .map(move |node| (node, self.edges[node].as_slice()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<N, D> Default for DependencyGraph<N, D>
where
    N: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Add `partial_file` and the partial names it references to `graph`.
///
/// The file is read only if it is not already a node; an existing entry is
/// never overwritten. Dependencies are recorded by name and are neither
/// resolved nor followed here.
pub fn build_partial_graph(partial_file: &Path, graph: &mut PartialGraph) -> AppResult<()> {
    if graph.contains(&partial_file.to_path_buf()) {
        return Ok(());
    }

    // Invalid UTF-8 is replaced, not rejected; references are plain ASCII
    let bytes = std::fs::read(partial_file)?;
    let content = String::from_utf8_lossy(&bytes);
    let dependencies = extract_partials(&content);

    tracing::debug!(
        "Partial {:?} references {} partial(s)",
        partial_file,
        dependencies.len()
    );

    graph.insert(partial_file.to_path_buf(), dependencies);
    Ok(())
}
