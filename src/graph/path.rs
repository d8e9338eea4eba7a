use std::hash::Hash;

use crate::types::ParentMap;

/// Turns a parent map into the ordered route `origin -> ... -> destination`.
///
/// `destination` defaults to `origin`, which is how a cycle is read back:
/// the origin's parent is the last vertex before closing the loop. Returns
/// `None` if the map is empty or if the chain of parents breaks before
/// reaching `origin`. Runs in O(path length).
pub fn reconstruct_path<V>(
    parents: &ParentMap<V>,
    origin: &V,
    destination: Option<&V>,
) -> Option<Vec<V>>
where
    V: Eq + Hash + Clone,
{
    if parents.is_empty() {
        return None;
    }
    let destination = destination.unwrap_or(origin);

    let mut path = vec![destination.clone()];
    let mut current = parents.get(destination)?;
    // A consistent parent chain never has more links than entries.
    let mut remaining = parents.len();
    while current != origin {
        if remaining == 0 {
            return None;
        }
        remaining -= 1;
        path.push(current.clone());
        current = parents.get(current)?;
    }
    path.push(origin.clone());
    path.reverse();
    Some(path)
}
