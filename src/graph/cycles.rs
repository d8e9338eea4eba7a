use std::collections::HashSet;
use std::hash::Hash;

use tracing::debug;

use crate::errors::{Result, TrackLinkError};
use crate::graph::path::reconstruct_path;
use crate::graph::store::Graph;
use crate::graph::traversal::GraphTraverser;
use crate::types::ParentMap;

/// Finds a simple cycle of exactly `n` edges that starts and ends at `origin`.
///
/// The returned sequence has `n + 1` elements with `origin` at both ends and
/// no other vertex repeated. `Ok(None)` means no such cycle exists (or
/// `origin` is not in the graph); `n == 0` is rejected before searching.
///
/// This is exhaustive backtracking: worst case O(V^n), exponential in the
/// cycle length. Each branch works on its own copy of the visited set and
/// parent map, so abandoning a branch needs no rollback.
pub fn cycle_of_length<V, W>(
    graph: &Graph<V, W>,
    origin: &V,
    n: usize,
) -> Result<Option<Vec<V>>>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    if n < 1 {
        return Err(TrackLinkError::invalid(format!(
            "cycle length must be at least 1, got {n}"
        )));
    }

    let mut visited = HashSet::new();
    visited.insert(origin.clone());
    let cycle = extend(graph, origin, origin, n, 1, &visited, &ParentMap::new());

    debug!(length = n, found = cycle.is_some(), "cycle search finished");
    Ok(cycle)
}

/// Tries every neighbor of `current` as the `hops`-th edge of the cycle.
fn extend<V, W>(
    graph: &Graph<V, W>,
    origin: &V,
    current: &V,
    n: usize,
    hops: usize,
    visited: &HashSet<V>,
    parents: &ParentMap<V>,
) -> Option<Vec<V>>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    if hops > n {
        return None;
    }
    for next in graph.neighbors(current) {
        if next == origin {
            if hops == n {
                let mut closed = parents.clone();
                closed.insert(origin.clone(), current.clone());
                return reconstruct_path(&closed, origin, None);
            }
            continue;
        }
        if visited.contains(next) {
            continue;
        }

        let mut branch_visited = visited.clone();
        branch_visited.insert(next.clone());
        let mut branch_parents = parents.clone();
        branch_parents.insert(next.clone(), current.clone());

        if let Some(cycle) = extend(
            graph,
            origin,
            next,
            n,
            hops + 1,
            &branch_visited,
            &branch_parents,
        ) {
            return Some(cycle);
        }
    }
    None
}

impl<V, W> GraphTraverser<'_, V, W>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    /// See [`cycle_of_length`].
    pub fn cycle_of_length(&self, origin: &V, n: usize) -> Result<Option<Vec<V>>> {
        cycle_of_length(self.graph(), origin, n)
    }
}
