use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps each vertex to the vertex it was reached from during one traversal.
pub type ParentMap<V> = HashMap<V, V>;

/// Maps each vertex to a floating-point score (PageRank or walk value).
pub type RankTable<V> = HashMap<V, f64>;

/// Numeric distance contributed by traversing one edge.
///
/// The fixed-radius count accumulates this value along BFS discovery, so a
/// graph only supports that query when its weight type implements this
/// trait. Integer weights advance the running distance by their value.
/// String weights are opaque labels (playlist names) and count as one hop.
pub trait EdgeDistance {
    fn distance(&self) -> u64;
}

macro_rules! integer_distance {
    ($($t:ty),*) => {
        $(impl EdgeDistance for $t {
            fn distance(&self) -> u64 {
                *self as u64
            }
        })*
    };
}

integer_distance!(u8, u16, u32, u64, usize);

impl EdgeDistance for String {
    fn distance(&self) -> u64 {
        1
    }
}

impl EdgeDistance for &str {
    fn distance(&self) -> u64 {
        1
    }
}

/// Category of a vertex in the user/track graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexKind {
    Track,
    User,
}

#[allow(clippy::should_implement_trait)]
impl VertexKind {
    /// Returns the string representation of this vertex kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            VertexKind::Track => "track",
            VertexKind::User => "user",
        }
    }

    /// Parses the plural form used by the `recommend` command.
    pub fn from_str(s: &str) -> Option<VertexKind> {
        match s {
            "tracks" | "track" => Some(VertexKind::Track),
            "users" | "user" => Some(VertexKind::User),
            _ => None,
        }
    }
}

/// How a PageRank round reads the ranks of neighbors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    /// Every vertex reads the table as it stood at the start of the round.
    #[default]
    Snapshot,
    /// Vertices read the live table, so later vertices in a round see ranks
    /// already updated earlier in that same round.
    InPlace,
}

/// What PageRank does with neighbors that have no adjacent vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingPolicy {
    /// A dangling neighbor contributes nothing.
    #[default]
    Ignore,
    /// The rank held by dangling vertices at the start of a round is spread
    /// uniformly over every vertex.
    Redistribute,
}

/// Parameters for a global PageRank run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankOptions {
    pub damping: f64,
    pub iterations: usize,
    pub update: UpdateOrder,
    pub dangling: DanglingPolicy,
}

impl Default for PageRankOptions {
    fn default() -> Self {
        PageRankOptions {
            damping: 0.5,
            iterations: 15,
            update: UpdateOrder::Snapshot,
            dangling: DanglingPolicy::Ignore,
        }
    }
}

/// Parameters for a personalized random-walk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Maximum number of steps per walk.
    pub length: usize,
    /// Number of rounds; each round walks once from every seed.
    pub iterations: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        WalkOptions {
            length: 500,
            iterations: 150,
        }
    }
}

/// One vertex along a rendered path in the user/track graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub vertex: String,
    pub kind: VertexKind,
    /// Playlist labelling the edge to the next step; `None` on the last step.
    pub playlist: Option<String>,
}
