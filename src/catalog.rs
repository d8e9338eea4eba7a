use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::TrackLinkConfig;
use crate::dataset::PlaylistEntry;
use crate::errors::{Result, TrackLinkError};
use crate::graph::{Graph, GraphTraverser};
use crate::ranking::{page_rank, similarity_walk, top_n_by_rank};
use crate::types::{PathStep, RankTable, VertexKind};

/// Central orchestrator over the playlist data.
///
/// Owns the bipartite user/track graph (edges labelled with the playlist
/// that links them) and the structures derived from it on first use: the
/// track co-listening graph and the track importance table.
pub struct Catalog {
    library: Graph<String, String>,
    users: HashSet<String>,
    co_listening: Option<Graph<String, u32>>,
    importance: Option<RankTable<String>>,
    config: TrackLinkConfig,
    rng: StdRng,
}

/// Sizes of the user/track graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub users: usize,
    pub tracks: usize,
    /// Distinct user/track pairs.
    pub memberships: usize,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Catalog {
    /// Creates an empty catalog. Fails if the configuration is out of range.
    pub fn new(config: TrackLinkConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            library: Graph::undirected(),
            users: HashSet::new(),
            co_listening: None,
            importance: None,
            config,
            rng,
        })
    }

    /// Creates a catalog holding every entry of a parsed dump.
    pub fn from_entries(entries: &[PlaylistEntry], config: TrackLinkConfig) -> Result<Self> {
        let mut catalog = Self::new(config)?;
        for entry in entries {
            catalog.add_entry(entry);
        }
        let stats = catalog.stats();
        info!(
            users = stats.users,
            tracks = stats.tracks,
            memberships = stats.memberships,
            "catalog built"
        );
        Ok(catalog)
    }

    /// Links the entry's track to its user, labelled with the playlist name.
    ///
    /// A later entry for the same user and track overwrites the label.
    pub fn add_entry(&mut self, entry: &PlaylistEntry) {
        let track = entry.track_key();
        let user = entry.user_id.clone();
        self.library.add_vertex(track.clone());
        self.library.add_vertex(user.clone());
        self.library.add_edge(&track, &user, entry.playlist_name.clone());
        self.users.insert(user);

        self.co_listening = None;
        self.importance = None;
    }

    /// The user/track graph.
    pub fn library(&self) -> &Graph<String, String> {
        &self.library
    }

    pub fn config(&self) -> &TrackLinkConfig {
        &self.config
    }

    /// Category of `vertex`, or `None` if it is not in the catalog.
    pub fn kind_of(&self, vertex: &str) -> Option<VertexKind> {
        let key = vertex.to_string();
        if !self.library.contains(&key) {
            return None;
        }
        if self.users.contains(vertex) {
            Some(VertexKind::User)
        } else {
            Some(VertexKind::Track)
        }
    }

    pub fn stats(&self) -> CatalogStats {
        let memberships = self
            .users
            .iter()
            .map(|u| self.library.degree(u))
            .sum();
        CatalogStats {
            users: self.users.len(),
            tracks: self.library.len() - self.users.len(),
            memberships,
        }
    }

    /// Graph connecting tracks that appear in playlists of the same user.
    /// Built on first use.
    pub fn co_listening(&mut self) -> &Graph<String, u32> {
        let (library, users) = (&self.library, &self.users);
        self.co_listening.get_or_insert_with(|| {
            let graph = build_co_listening(library, users);
            info!(tracks = graph.len(), "co-listening graph built");
            graph
        })
    }
}

/// Connects, for every user, each of their tracks to all of that user's
/// tracks visited before it.
fn build_co_listening(
    library: &Graph<String, String>,
    users: &HashSet<String>,
) -> Graph<String, u32> {
    let mut graph = Graph::undirected();
    for vertex in library.vertices() {
        if !users.contains(vertex) {
            continue;
        }
        let mut earlier: Vec<&String> = Vec::new();
        for track in library.neighbors(vertex) {
            graph.add_vertex(track.clone());
            for other in &earlier {
                graph.add_edge(track, other, 1);
            }
            earlier.push(track);
        }
    }
    graph
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl Catalog {
    /// Shortest route between two tracks through the users that share them.
    ///
    /// Both endpoints must be tracks of the catalog. `Ok(None)` means the
    /// tracks are not connected.
    pub fn path(&self, from: &str, to: &str) -> Result<Option<Vec<PathStep>>> {
        for endpoint in [from, to] {
            if self.kind_of(endpoint) != Some(VertexKind::Track) {
                return Err(TrackLinkError::NotATrack {
                    name: endpoint.to_string(),
                });
            }
        }

        let traverser = GraphTraverser::new(&self.library);
        let Some(route) = traverser.shortest_path(&from.to_string(), &to.to_string()) else {
            return Ok(None);
        };

        let steps = route
            .iter()
            .enumerate()
            .map(|(i, vertex)| PathStep {
                vertex: vertex.clone(),
                kind: self.kind_of(vertex).unwrap_or(VertexKind::Track),
                playlist: route
                    .get(i + 1)
                    .and_then(|next| self.library.weight(vertex, next))
                    .cloned(),
            })
            .collect();
        Ok(Some(steps))
    }

    /// The `n` most important tracks by PageRank over the user/track graph.
    ///
    /// The ranking is computed once and reused until the catalog changes.
    pub fn most_important(&mut self, n: usize) -> Result<Vec<String>> {
        require_positive(n)?;
        if self.importance.is_none() {
            let mut ranks = page_rank(&self.library, &self.config.page_rank)?;
            ranks.retain(|vertex, _| !self.users.contains(vertex));
            debug!(tracks = ranks.len(), "track importance computed");
            self.importance = Some(ranks);
        }
        Ok(self
            .importance
            .as_ref()
            .map(|ranks| top_n_by_rank(ranks, n))
            .unwrap_or_default())
    }

    /// Up to `n` vertices of category `target` with the most affinity to
    /// `seeds`, excluding the seeds themselves.
    pub fn recommend(
        &mut self,
        target: VertexKind,
        n: usize,
        seeds: &[String],
    ) -> Result<Vec<String>> {
        require_positive(n)?;
        for seed in seeds {
            if !self.library.contains(seed) {
                warn!(seed = seed.as_str(), "recommendation seed is not in the catalog");
            }
        }

        let mut values = similarity_walk(&self.library, seeds, &self.config.walk, &mut self.rng);
        for seed in seeds {
            values.remove(seed);
        }
        let users = &self.users;
        values.retain(|vertex, _| match target {
            VertexKind::Track => !users.contains(vertex),
            VertexKind::User => users.contains(vertex),
        });
        Ok(top_n_by_rank(&values, n))
    }

    /// A cycle of `n` tracks starting and ending at `track`, following the
    /// co-listening graph.
    pub fn cycle(&mut self, n: usize, track: &str) -> Result<Option<Vec<String>>> {
        let track = track.to_string();
        let graph = self.co_listening();
        if !graph.contains(&track) {
            return Err(TrackLinkError::UnknownTrack { name: track });
        }
        require_positive(n)?;
        GraphTraverser::new(graph).cycle_of_length(&track, n)
    }

    /// Number of tracks exactly `n` co-listening hops away from `track`.
    pub fn range(&mut self, n: usize, track: &str) -> Result<usize> {
        let track = track.to_string();
        let graph = self.co_listening();
        if !graph.contains(&track) {
            return Err(TrackLinkError::UnknownTrack { name: track });
        }
        require_positive(n)?;
        Ok(GraphTraverser::new(graph).count_at_distance(&track, n as u64))
    }
}

fn require_positive(n: usize) -> Result<()> {
    if n < 1 {
        return Err(TrackLinkError::invalid(format!("expected a number >= 1, got {n}")));
    }
    Ok(())
}
