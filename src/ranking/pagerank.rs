use std::cmp::Ordering;
use std::hash::Hash;

use tracing::debug;

use crate::errors::{Result, TrackLinkError};
use crate::graph::Graph;
use crate::types::{DanglingPolicy, PageRankOptions, RankTable, UpdateOrder};

/// Rank assumed for a neighbor that has not been assigned one yet.
pub const UNRANKED_PRIOR: f64 = 0.1;

/// Global PageRank over every vertex of `graph`.
///
/// Each round recomputes, for every vertex `v`,
/// `(1 - d) / |V| + d * sum(rank(w) / degree(w))` over the neighbors `w` of
/// `v`, where a neighbor without a rank yet counts as [`UNRANKED_PRIOR`].
/// [`UpdateOrder`] selects whether a round reads a snapshot taken at its
/// start or the live table. Neighbors with no adjacent vertices of their
/// own (possible only in directed graphs) are handled by [`DanglingPolicy`].
///
/// Fails if `damping` is outside `[0, 1]` or `iterations` is zero. An empty
/// graph yields an empty table.
pub fn page_rank<V, W>(graph: &Graph<V, W>, options: &PageRankOptions) -> Result<RankTable<V>>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    let damping = options.damping;
    if !(0.0..=1.0).contains(&damping) {
        return Err(TrackLinkError::invalid(format!(
            "damping must be within [0, 1], got {damping}"
        )));
    }
    if options.iterations == 0 {
        return Err(TrackLinkError::invalid("page rank needs at least one iteration"));
    }

    let mut ranks = RankTable::new();
    if graph.is_empty() {
        return Ok(ranks);
    }

    let vertex_count = graph.len() as f64;
    let teleport = (1.0 - damping) / vertex_count;
    let dangling: Vec<&V> = graph
        .vertices()
        .iter()
        .filter(|v| graph.degree(v) == 0)
        .collect();

    for _ in 0..options.iterations {
        let spread = match options.dangling {
            DanglingPolicy::Ignore => 0.0,
            DanglingPolicy::Redistribute => {
                dangling
                    .iter()
                    .map(|v| ranks.get(*v).copied().unwrap_or(UNRANKED_PRIOR))
                    .sum::<f64>()
                    / vertex_count
            }
        };

        match options.update {
            UpdateOrder::Snapshot => {
                let previous = ranks.clone();
                for v in graph.vertices() {
                    let rank = teleport + damping * (inflow(graph, v, &previous) + spread);
                    ranks.insert(v.clone(), rank);
                }
            }
            UpdateOrder::InPlace => {
                for v in graph.vertices() {
                    let rank = teleport + damping * (inflow(graph, v, &ranks) + spread);
                    ranks.insert(v.clone(), rank);
                }
            }
        }
    }

    debug!(
        vertices = graph.len(),
        dangling = dangling.len(),
        iterations = options.iterations,
        "page rank finished"
    );
    Ok(ranks)
}

/// Rank flowing into `v` from its neighbors; dangling neighbors add nothing.
fn inflow<V, W>(graph: &Graph<V, W>, v: &V, ranks: &RankTable<V>) -> f64
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    graph
        .neighbors(v)
        .filter_map(|w| {
            let degree = graph.degree(w);
            if degree == 0 {
                return None;
            }
            let rank = ranks.get(w).copied().unwrap_or(UNRANKED_PRIOR);
            Some(rank / degree as f64)
        })
        .sum()
}

/// The `n` highest-scored vertices, best first.
///
/// `n` is clamped to the table size. Equal scores are ordered by vertex so
/// the result is deterministic.
pub fn top_n_by_rank<V>(ranks: &RankTable<V>, n: usize) -> Vec<V>
where
    V: Eq + Hash + Ord + Clone,
{
    let mut entries: Vec<(&V, f64)> = ranks.iter().map(|(v, r)| (v, *r)).collect();
    entries.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });
    entries
        .into_iter()
        .take(n.min(ranks.len()))
        .map(|(v, _)| v.clone())
        .collect()
}
