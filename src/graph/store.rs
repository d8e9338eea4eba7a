use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hash};

use rand::Rng;

/// Hasher with fixed keys. Iteration order then depends only on the
/// sequence of mutations, which keeps seeded random walks reproducible.
type FixedState = BuildHasherDefault<DefaultHasher>;

/// Adjacent vertex -> edge weight.
pub type Adjacency<V, W> = HashMap<V, W, FixedState>;

/// Mutable adjacency-map graph with weighted edges.
///
/// Undirected graphs store every edge in both directions, and every
/// mutation keeps the two entries in sync. Self-loops are rejected and a
/// second edge between the same ordered pair overwrites the first weight.
///
/// Queries on a vertex that is not in the graph behave as if the vertex had
/// no neighbors; callers check membership with [`Graph::contains`] when the
/// distinction matters.
#[derive(Debug, Clone)]
pub struct Graph<V, W> {
    directed: bool,
    adjacency: HashMap<V, Adjacency<V, W>, FixedState>,
    // Dense vertex list so that uniform sampling is O(1).
    order: Vec<V>,
    positions: HashMap<V, usize, FixedState>,
}

impl<V, W> Default for Graph<V, W>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    fn default() -> Self {
        Self::undirected()
    }
}

impl<V, W> Graph<V, W>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    /// Creates an empty graph; directedness is fixed for its lifetime.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            adjacency: HashMap::default(),
            order: Vec::new(),
            positions: HashMap::default(),
        }
    }

    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Adds `v` if it is not already present. Returns `true` if it was added.
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.adjacency.contains_key(&v) {
            return false;
        }
        self.positions.insert(v.clone(), self.order.len());
        self.order.push(v.clone());
        self.adjacency.insert(v, Adjacency::default());
        true
    }

    /// Returns `true` if `v` is a vertex of the graph.
    pub fn contains(&self, v: &V) -> bool {
        self.adjacency.contains_key(v)
    }

    /// Adds an edge from `v` to `w` (and back, if undirected).
    ///
    /// Returns `false` without touching the graph if either endpoint is
    /// missing or if `v == w`.
    pub fn add_edge(&mut self, v: &V, w: &V, weight: W) -> bool {
        if v == w || !self.contains(v) || !self.contains(w) {
            return false;
        }
        if !self.directed {
            if let Some(adj) = self.adjacency.get_mut(w) {
                adj.insert(v.clone(), weight.clone());
            }
        }
        if let Some(adj) = self.adjacency.get_mut(v) {
            adj.insert(w.clone(), weight);
        }
        true
    }

    /// Returns `true` if there is an edge from `v` to `w`.
    pub fn is_adjacent(&self, v: &V, w: &V) -> bool {
        self.adjacency
            .get(v)
            .map(|adj| adj.contains_key(w))
            .unwrap_or(false)
    }

    /// Removes `v` and every edge touching it. Returns `false` if `v` was absent.
    ///
    /// Costs O(V): every other adjacency map is checked for `v`.
    pub fn remove_vertex(&mut self, v: &V) -> bool {
        if self.adjacency.remove(v).is_none() {
            return false;
        }
        if let Some(pos) = self.positions.remove(v) {
            self.order.swap_remove(pos);
            if let Some(moved) = self.order.get(pos) {
                self.positions.insert(moved.clone(), pos);
            }
        }
        for adj in self.adjacency.values_mut() {
            adj.remove(v);
        }
        true
    }

    /// Removes the edge from `v` to `w` (both directions if undirected).
    /// Returns `false` if there was no such edge.
    pub fn remove_edge(&mut self, v: &V, w: &V) -> bool {
        let removed = self
            .adjacency
            .get_mut(v)
            .and_then(|adj| adj.remove(w))
            .is_some();
        if removed && !self.directed {
            if let Some(adj) = self.adjacency.get_mut(w) {
                adj.remove(v);
            }
        }
        removed
    }

    /// Weight of the edge from `v` to `w`, or `None` if there is no such edge.
    pub fn weight(&self, v: &V, w: &V) -> Option<&W> {
        self.adjacency.get(v).and_then(|adj| adj.get(w))
    }

    /// All vertices. Order is insertion order, except that removing a
    /// vertex moves the last vertex into its slot.
    pub fn vertices(&self) -> &[V] {
        &self.order
    }

    /// Vertices adjacent to `v` (its out-neighbors in a directed graph).
    pub fn neighbors<'a>(&'a self, v: &V) -> impl Iterator<Item = &'a V> + 'a {
        self.adjacency
            .get(v)
            .into_iter()
            .flat_map(|adj| adj.keys())
    }

    /// Outgoing edges of `v` with their weights.
    pub fn edges<'a>(&'a self, v: &V) -> impl Iterator<Item = (&'a V, &'a W)> + 'a {
        self.adjacency.get(v).into_iter().flat_map(|adj| adj.iter())
    }

    /// Number of vertices adjacent to `v`; 0 if `v` is absent.
    pub fn degree(&self, v: &V) -> usize {
        self.adjacency.get(v).map(|adj| adj.len()).unwrap_or(0)
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Picks a vertex uniformly at random, or `None` if the graph is empty.
    pub fn random_vertex<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&V> {
        if self.order.is_empty() {
            return None;
        }
        self.order.get(rng.gen_range(0..self.order.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn triangle() -> Graph<&'static str, u32> {
        let mut g = Graph::undirected();
        for v in ["a", "b", "c"] {
            g.add_vertex(v);
        }
        g.add_edge(&"a", &"b", 1);
        g.add_edge(&"b", &"c", 2);
        g.add_edge(&"c", &"a", 3);
        g
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut g = triangle();
        assert!(!g.add_vertex("a"));
        assert_eq!(g.len(), 3);
        assert_eq!(g.degree(&"a"), 2);
    }

    #[test]
    fn test_add_edge_requires_both_endpoints() {
        let mut g = triangle();
        assert!(!g.add_edge(&"a", &"z", 1));
        assert!(!g.add_edge(&"z", &"a", 1));
        assert!(!g.contains(&"z"));
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut g = triangle();
        assert!(!g.add_edge(&"a", &"a", 1));
        assert!(!g.is_adjacent(&"a", &"a"));
    }

    #[test]
    fn test_undirected_edges_are_mirrored() {
        let g = triangle();
        assert_eq!(g.weight(&"b", &"c"), Some(&2));
        assert_eq!(g.weight(&"c", &"b"), Some(&2));
    }

    #[test]
    fn test_edge_overwrite_keeps_symmetry() {
        let mut g = triangle();
        g.add_edge(&"b", &"a", 9);
        assert_eq!(g.weight(&"a", &"b"), Some(&9));
        assert_eq!(g.weight(&"b", &"a"), Some(&9));
    }

    #[test]
    fn test_directed_edge_is_one_way() {
        let mut g: Graph<&str, u32> = Graph::directed();
        g.add_vertex("a");
        g.add_vertex("b");
        g.add_edge(&"a", &"b", 1);
        assert!(g.is_adjacent(&"a", &"b"));
        assert!(!g.is_adjacent(&"b", &"a"));
        assert_eq!(g.weight(&"b", &"a"), None);
    }

    #[test]
    fn test_remove_vertex_cascades() {
        let mut g = triangle();
        assert!(g.remove_vertex(&"a"));
        assert!(!g.remove_vertex(&"a"));
        assert_eq!(g.len(), 2);
        assert!(!g.is_adjacent(&"b", &"a"));
        assert!(!g.is_adjacent(&"c", &"a"));
        assert!(g.vertices().iter().all(|v| *v != "a"));
    }

    #[test]
    fn test_remove_vertex_keeps_sampling_index() {
        let mut g = triangle();
        g.remove_vertex(&"a");
        g.add_vertex("d");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let v = g.random_vertex(&mut rng).copied();
            assert!(matches!(v, Some("b") | Some("c") | Some("d")));
        }
        g.remove_vertex(&"d");
        assert_eq!(g.vertices().len(), 2);
    }

    #[test]
    fn test_remove_edge_both_directions() {
        let mut g = triangle();
        assert!(g.remove_edge(&"a", &"b"));
        assert!(!g.is_adjacent(&"a", &"b"));
        assert!(!g.is_adjacent(&"b", &"a"));
        assert!(!g.remove_edge(&"a", &"b"));
    }

    #[test]
    fn test_random_vertex_on_empty_graph() {
        let g: Graph<&str, u32> = Graph::undirected();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(g.random_vertex(&mut rng).is_none());
    }

    #[test]
    fn test_queries_on_missing_vertex() {
        let g = triangle();
        assert_eq!(g.neighbors(&"z").count(), 0);
        assert_eq!(g.degree(&"z"), 0);
        assert!(!g.is_adjacent(&"z", &"a"));
    }
}
