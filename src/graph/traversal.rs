use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

use tracing::debug;

use crate::graph::path::reconstruct_path;
use crate::graph::store::Graph;
use crate::types::{EdgeDistance, ParentMap};

/// Whether a breadth-first search should keep going after a discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    Stop,
}

/// Hooks called by [`GraphTraverser::breadth_first`].
///
/// The search itself owns the queue and the visited set; a visitor only
/// decides which dequeued vertices get expanded and records what it needs
/// each time an edge reaches a vertex for the first time.
pub trait BfsVisitor<V, W> {
    /// Called when `vertex` is dequeued. Returning `false` skips its edges.
    fn expand(&mut self, _vertex: &V) -> bool {
        true
    }

    /// Called once per vertex, when it is first reached from `from`.
    fn discover(&mut self, from: &V, to: &V, weight: &W) -> Visit;
}

/// Records the parent of every discovered vertex and stops at the target.
struct ParentRecorder<'t, V> {
    target: &'t V,
    parents: ParentMap<V>,
    found: bool,
}

impl<V, W> BfsVisitor<V, W> for ParentRecorder<'_, V>
where
    V: Eq + Hash + Clone,
{
    fn discover(&mut self, from: &V, to: &V, _weight: &W) -> Visit {
        self.parents.insert(to.clone(), from.clone());
        if to == self.target {
            self.found = true;
            return Visit::Stop;
        }
        Visit::Continue
    }
}

/// Accumulates edge distance along discovery and prunes past `limit`.
struct DistanceRecorder<V> {
    limit: u64,
    distances: HashMap<V, u64>,
}

impl<V, W> BfsVisitor<V, W> for DistanceRecorder<V>
where
    V: Eq + Hash + Clone,
    W: EdgeDistance,
{
    fn expand(&mut self, vertex: &V) -> bool {
        self.distances
            .get(vertex)
            .map(|d| *d <= self.limit)
            .unwrap_or(false)
    }

    fn discover(&mut self, from: &V, to: &V, weight: &W) -> Visit {
        let base = self.distances.get(from).copied().unwrap_or(0);
        self.distances
            .insert(to.clone(), base.saturating_add(weight.distance()));
        Visit::Continue
    }
}

/// Breadth-first queries over a borrowed [`Graph`].
pub struct GraphTraverser<'a, V, W> {
    graph: &'a Graph<V, W>,
}

impl<'a, V, W> GraphTraverser<'a, V, W>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    /// Creates a new `GraphTraverser` over the given graph.
    pub fn new(graph: &'a Graph<V, W>) -> Self {
        Self { graph }
    }

    /// The graph being traversed.
    pub fn graph(&self) -> &'a Graph<V, W> {
        self.graph
    }

    /// Layered breadth-first search from `source`, driven by `visitor`.
    ///
    /// Every vertex is discovered at most once; the source counts as
    /// already visited. Runs in O(V + E).
    pub fn breadth_first<B>(&self, source: &V, visitor: &mut B)
    where
        B: BfsVisitor<V, W>,
    {
        let mut visited: HashSet<V> = HashSet::new();
        let mut queue: VecDeque<V> = VecDeque::new();
        visited.insert(source.clone());
        queue.push_back(source.clone());

        while let Some(current) = queue.pop_front() {
            if !visitor.expand(&current) {
                continue;
            }
            for (next, weight) in self.graph.edges(&current) {
                if !visited.insert(next.clone()) {
                    continue;
                }
                if visitor.discover(&current, next, weight) == Visit::Stop {
                    return;
                }
                queue.push_back(next.clone());
            }
        }
    }

    /// BFS parent map from `source`, stopping as soon as `target` is reached.
    ///
    /// Returns `None` if `target` is unreachable.
    pub fn parents_toward(&self, source: &V, target: &V) -> Option<ParentMap<V>> {
        let mut recorder = ParentRecorder {
            target,
            parents: ParentMap::new(),
            found: false,
        };
        self.breadth_first(source, &mut recorder);
        recorder.found.then_some(recorder.parents)
    }

    /// One of the shortest (fewest edges) routes from `source` to `target`,
    /// both included.
    ///
    /// Returns `[source]` when both are the same vertex, and `None` when
    /// either vertex is missing or `target` is unreachable.
    pub fn shortest_path(&self, source: &V, target: &V) -> Option<Vec<V>> {
        if !self.graph.contains(source) || !self.graph.contains(target) {
            return None;
        }
        if source == target {
            return Some(vec![source.clone()]);
        }
        let parents = self.parents_toward(source, target)?;
        let path = reconstruct_path(&parents, source, Some(target));
        debug!(
            explored = parents.len(),
            hops = path.as_ref().map(|p| p.len() - 1),
            "shortest path search finished"
        );
        path
    }
}

impl<V, W> GraphTraverser<'_, V, W>
where
    V: Eq + Hash + Clone,
    W: Clone + EdgeDistance,
{
    /// Counts the vertices whose accumulated distance from `source` is
    /// exactly `n`.
    ///
    /// Distance is assigned when a vertex is first discovered and equals the
    /// parent's distance plus the edge's [`EdgeDistance`]. Vertices beyond
    /// `n` are not expanded. A missing `source` yields 0.
    pub fn count_at_distance(&self, source: &V, n: u64) -> usize {
        if !self.graph.contains(source) {
            return 0;
        }
        let mut recorder = DistanceRecorder {
            limit: n,
            distances: HashMap::new(),
        };
        recorder.distances.insert(source.clone(), 0);
        self.breadth_first(source, &mut recorder);

        let count = recorder.distances.values().filter(|d| **d == n).count();
        debug!(
            reached = recorder.distances.len(),
            radius = n,
            count,
            "fixed-radius count finished"
        );
        count
    }
}
