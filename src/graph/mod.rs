/// Adjacency-map graph storage.
pub mod store;

/// Breadth-first traversal: shortest paths and fixed-radius counts.
pub mod traversal;

/// Fixed-length cycle search.
pub mod cycles;

/// Rebuilding ordered routes from parent maps.
pub mod path;

pub use cycles::cycle_of_length;
pub use path::reconstruct_path;
pub use store::Graph;
pub use traversal::{BfsVisitor, GraphTraverser, Visit};
