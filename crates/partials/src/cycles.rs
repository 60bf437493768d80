//! Cycle detection over a dependency graph.

use crate::graph::DependencyGraph;
use std::collections::HashSet;
use std::hash::Hash;

/// Find every cycle reachable by depth-first search from each node.
///
/// Each cycle is the DFS path that led to a back-edge followed by the node
/// the back-edge points at, so it always ends with a repeated node. A
/// self-loop comes back as `[a, a]`. Successors that are not keys of the
/// graph are treated as leaves. Cycles are not deduplicated.
pub fn detect_cycles<N>(graph: &DependencyGraph<N, N>) -> Vec<Vec<N>>
where
    N: Eq + Hash + Clone,
{
    let mut search = CycleSearch {
        graph,
        visited: HashSet::new(),
        on_stack: HashSet::new(),
        path: Vec::new(),
        cycles: Vec::new(),
    };

    for node in graph.nodes() {
        search.visit(node);
    }

    search.cycles
}

struct CycleSearch<'g, N> {
    graph: &'g DependencyGraph<N, N>,
    /// Fully explored nodes
    visited: HashSet<&'g N>,
    /// Ancestors on the active DFS path
    on_stack: HashSet<&'g N>,
    path: Vec<&'g N>,
    cycles: Vec<Vec<N>>,
}

impl<'g, N> CycleSearch<'g, N>
where
    N: Eq + Hash + Clone,
{
    fn visit(&mut self, node: &'g N) {
        if self.on_stack.contains(node) {
            let mut cycle: Vec<N> = self.path.iter().map(|n| (*n).clone()).collect();
            cycle.push(node.clone());
            self.cycles.push(cycle);
            return;
        }

        if !self.visited.insert(node) {
            return;
        }

        self.on_stack.insert(node);
        self.path.push(node);

        let graph = self.graph;
        for dep in graph.get(node).unwrap_or(&[]) {
            self.visit(dep);
        }

        self.path.pop();
        self.on_stack.remove(node);
    }
}
