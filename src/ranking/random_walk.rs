//! Personalized random-walk scoring used for similarity and recommendations.
//!
//! Every seed starts with a value of 1. Each step of a walk moves the value
//! held at the current vertex, divided by its degree, to a uniformly chosen
//! neighbor. Vertices that short walks from the seeds reach often and
//! directly end up holding more value.

use std::hash::Hash;

use rand::Rng;
use tracing::debug;

use crate::graph::Graph;
use crate::types::{RankTable, WalkOptions};

/// Runs `options.iterations` rounds of walks, one walk per seed per round,
/// and returns the value held by every vertex any walk touched.
///
/// Seeds stay in the table even when their value drains towards 0. An
/// empty seed list yields an empty table. Randomness comes only from `rng`,
/// so a seeded generator reproduces the same table.
pub fn similarity_walk<V, W, R>(
    graph: &Graph<V, W>,
    seeds: &[V],
    options: &WalkOptions,
    rng: &mut R,
) -> RankTable<V>
where
    V: Eq + Hash + Clone,
    W: Clone,
    R: Rng + ?Sized,
{
    let mut values = RankTable::new();
    for seed in seeds {
        values.insert(seed.clone(), 1.0);
    }

    let mut steps = 0usize;
    for _ in 0..options.iterations {
        for seed in seeds {
            steps += walk(graph, seed, options.length, &mut values, rng);
        }
    }

    debug!(
        seeds = seeds.len(),
        steps,
        touched = values.len(),
        "similarity walk finished"
    );
    values
}

/// One walk of at most `length` steps from `start`, transferring value into
/// `values`. Returns the number of steps taken.
fn walk<V, W, R>(
    graph: &Graph<V, W>,
    start: &V,
    length: usize,
    values: &mut RankTable<V>,
    rng: &mut R,
) -> usize
where
    V: Eq + Hash + Clone,
    W: Clone,
    R: Rng + ?Sized,
{
    let mut current = start.clone();
    for step in 0..length {
        let degree = graph.degree(&current);
        if degree == 0 {
            return step;
        }
        let Some(next) = graph.neighbors(&current).nth(rng.gen_range(0..degree)) else {
            return step;
        };
        let next = next.clone();

        let held = values.entry(current).or_insert(0.0);
        let transfer = *held / degree as f64;
        *held -= transfer;
        *values.entry(next.clone()).or_insert(0.0) += transfer;

        current = next;
    }
    length
}
