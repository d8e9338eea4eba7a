/// Global PageRank and top-n extraction.
pub mod pagerank;

/// Seeded random-walk affinity scoring.
pub mod random_walk;

pub use pagerank::{page_rank, top_n_by_rank, UNRANKED_PRIOR};
pub use random_walk::similarity_walk;
