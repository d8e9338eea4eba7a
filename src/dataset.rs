use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{Result, TrackLinkError};

/// Field separator of the playlist dump.
pub const FIELD_SEPARATOR: char = '\t';

/// Joins track name and artist into the track's vertex identifier.
pub const TRACK_ARTIST_SEPARATOR: &str = " - ";

/// Columns every row must carry; `GENRES` after them is optional.
const REQUIRED_FIELDS: usize = 6;

/// One row of the playlist dump: a track placed in a user's playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub id: String,
    pub user_id: String,
    pub track_name: String,
    pub artist: String,
    pub playlist_id: String,
    pub playlist_name: String,
    pub genres: Vec<String>,
}

impl PlaylistEntry {
    /// Vertex identifier of the track, `"<track> - <artist>"`.
    pub fn track_key(&self) -> String {
        format!("{}{}{}", self.track_name, TRACK_ARTIST_SEPARATOR, self.artist)
    }
}

/// Splits one data row. Returns `None` if it has too few columns.
pub fn parse_row(line: &str) -> Option<PlaylistEntry> {
    let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    // Only the last column carries trailing junk; empty columns before it stay.
    if let Some(last) = fields.last_mut() {
        *last = last.trim_end_matches(|c: char| c == '\r' || c == '\n' || c == ' ');
    }
    if fields.len() < REQUIRED_FIELDS {
        return None;
    }
    let genres = fields
        .get(REQUIRED_FIELDS)
        .map(|g| {
            g.split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(PlaylistEntry {
        id: fields[0].to_string(),
        user_id: fields[1].to_string(),
        track_name: fields[2].to_string(),
        artist: fields[3].to_string(),
        playlist_id: fields[4].to_string(),
        playlist_name: fields[5].to_string(),
        genres,
    })
}

/// Reads a whole dump: a header line followed by one row per line.
///
/// `source` names the input in error messages. Blank lines are skipped;
/// a short row fails with its 1-based line number.
pub fn read_entries<R: BufRead>(reader: R, source: &str) -> Result<Vec<PlaylistEntry>> {
    let mut lines = reader.lines();
    if lines.next().transpose()?.is_none() {
        return Err(TrackLinkError::Dataset {
            message: "missing header line".to_string(),
            path: source.to_string(),
            line: None,
        });
    }

    let mut entries = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = parse_row(&line).ok_or_else(|| TrackLinkError::Dataset {
            message: format!("expected at least {REQUIRED_FIELDS} tab-separated fields"),
            path: source.to_string(),
            // +1 for the header, +1 for 1-based numbering.
            line: Some(index + 2),
        })?;
        entries.push(entry);
    }

    info!(source, rows = entries.len(), "playlist dump loaded");
    Ok(entries)
}

/// Opens and reads the dump at `path`.
pub fn load_dataset(path: &Path) -> Result<Vec<PlaylistEntry>> {
    let file = File::open(path).map_err(|e| TrackLinkError::Dataset {
        message: format!("cannot open dataset: {e}"),
        path: path.display().to_string(),
        line: None,
    })?;
    read_entries(BufReader::new(file), &path.display().to_string())
}
