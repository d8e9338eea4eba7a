use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackLinkError};
use crate::types::{PageRankOptions, WalkOptions};

/// Tuning for the ranking queries.
///
/// Missing fields in a config file fall back to the defaults, which are
/// damping 0.5 over 15 PageRank rounds and 150 rounds of 500-step walks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackLinkConfig {
    /// Parameters of the global importance ranking.
    pub page_rank: PageRankOptions,
    /// Parameters of the recommendation walks.
    pub walk: WalkOptions,
    /// Seed for the random walks; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl TrackLinkConfig {
    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let damping = self.page_rank.damping;
        if !(0.0..=1.0).contains(&damping) {
            return Err(TrackLinkError::Config {
                message: format!("page_rank.damping must be within [0, 1], got {damping}"),
            });
        }
        if self.page_rank.iterations == 0 {
            return Err(TrackLinkError::Config {
                message: "page_rank.iterations must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Loads the configuration from `path`.
///
/// With no path, or a path that does not exist, returns the defaults. Files
/// ending in `.toml` are parsed as TOML, anything else as JSON.
pub fn load_config(path: Option<&Path>) -> Result<TrackLinkConfig> {
    let Some(path) = path else {
        return Ok(TrackLinkConfig::default());
    };
    if !path.exists() {
        return Ok(TrackLinkConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| TrackLinkError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    let config: TrackLinkConfig = if is_toml {
        toml::from_str(&contents).map_err(|e| TrackLinkError::Config {
            message: format!("failed to parse config file '{}': {}", path.display(), e),
        })?
    } else {
        serde_json::from_str(&contents).map_err(|e| TrackLinkError::Config {
            message: format!("failed to parse config file '{}': {}", path.display(), e),
        })?
    };

    config.validate()?;
    Ok(config)
}
