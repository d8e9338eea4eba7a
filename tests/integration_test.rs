use std::fs;
use std::io::Cursor;

use tempfile::TempDir;
use tracklink::catalog::Catalog;
use tracklink::commands::run_session;
use tracklink::config::TrackLinkConfig;
use tracklink::dataset::{load_dataset, read_entries};
use tracklink::errors::TrackLinkError;
use tracklink::types::{VertexKind, WalkOptions};

const DUMP: &str = "ID\tUSER_ID\tTRACK_NAME\tARTIST\tPLAYLIST_ID\tPLAYLIST_NAME\tGENRES\n\
1\tana\tSong A\tArt1\t10\tmix\tpop,rock\n\
2\tana\tSong B\tArt2\t10\tmix\tpop\n\
3\tben\tSong B\tArt2\t20\tchill\trock\n\
4\tben\tSong C\tArt3\t20\tchill\t\n\
\n\
5\tcarl\tSong D\tArt4\t30\tsolo\tjazz\n";

const A: &str = "Song A - Art1";
const B: &str = "Song B - Art2";
const C: &str = "Song C - Art3";
const D: &str = "Song D - Art4";

/// Helper: a seeded catalog with short walks, built from `DUMP`.
fn setup_catalog() -> Catalog {
    let entries = read_entries(Cursor::new(DUMP), "dump.tsv").expect("dump parses");
    let config = TrackLinkConfig {
        walk: WalkOptions {
            length: 10,
            iterations: 50,
        },
        seed: Some(17),
        ..TrackLinkConfig::default()
    };
    Catalog::from_entries(&entries, config).expect("catalog builds")
}

/// Runs `script` through a session and returns the printed lines.
fn run_script(catalog: &mut Catalog, script: &str) -> Vec<String> {
    let mut out = Vec::new();
    run_session(catalog, Cursor::new(script), &mut out).expect("session runs");
    String::from_utf8(out)
        .expect("utf-8 output")
        .lines()
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

#[test]
fn test_read_entries() {
    let entries = read_entries(Cursor::new(DUMP), "dump.tsv").unwrap();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0].track_key(), A);
    assert_eq!(entries[0].genres, vec!["pop", "rock"]);
    assert!(entries[3].genres.is_empty());
    assert_eq!(entries[2].playlist_name, "chill");
}

#[test]
fn test_short_row_reports_line() {
    let dump = "header\n1\tana\tSong A\tArt1\t10\tmix\n2\tana\tbroken\n";
    match read_entries(Cursor::new(dump), "bad.tsv") {
        Err(TrackLinkError::Dataset { line, path, .. }) => {
            assert_eq!(line, Some(3));
            assert_eq!(path, "bad.tsv");
        }
        other => panic!("expected dataset error, got {other:?}"),
    }
}

#[test]
fn test_empty_trailing_columns_are_kept() {
    let dump = "ID\tUSER_ID\tTRACK_NAME\tARTIST\tPLAYLIST_ID\tPLAYLIST_NAME\tGENRES\n\
                1\tana\tSong A\tArt1\t10\t\t\n\
                2\tben\tSong B\tArt2\t20\tchill \r\n";
    let entries = read_entries(Cursor::new(dump), "d.tsv").unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].track_key(), A);
    assert_eq!(entries[0].playlist_name, "");
    assert!(entries[0].genres.is_empty());
    assert_eq!(entries[1].playlist_name, "chill");

    let catalog = Catalog::from_entries(&entries, TrackLinkConfig::default()).unwrap();
    assert_eq!(catalog.kind_of(A), Some(VertexKind::Track));
    assert_eq!(catalog.kind_of("ana"), Some(VertexKind::User));
}

#[test]
fn test_empty_dump_is_rejected() {
    assert!(matches!(
        read_entries(Cursor::new(""), "empty.tsv"),
        Err(TrackLinkError::Dataset { .. })
    ));
}

#[test]
fn test_load_dataset_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dump.tsv");
    fs::write(&path, DUMP).unwrap();
    assert_eq!(load_dataset(&path).unwrap().len(), 5);
    assert!(load_dataset(&dir.path().join("missing.tsv")).is_err());
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[test]
fn test_catalog_stats_and_kinds() {
    let catalog = setup_catalog();
    let stats = catalog.stats();
    assert_eq!(stats.users, 3);
    assert_eq!(stats.tracks, 4);
    assert_eq!(stats.memberships, 5);
    assert_eq!(catalog.kind_of("ana"), Some(VertexKind::User));
    assert_eq!(catalog.kind_of(A), Some(VertexKind::Track));
    assert_eq!(catalog.kind_of("nobody"), None);
}

#[test]
fn test_path_names_playlists() {
    let catalog = setup_catalog();
    let steps = catalog.path(A, C).unwrap().expect("A and C are connected");
    let vertices: Vec<&str> = steps.iter().map(|s| s.vertex.as_str()).collect();
    assert_eq!(vertices, vec![A, "ana", B, "ben", C]);
    assert_eq!(steps[0].playlist.as_deref(), Some("mix"));
    assert_eq!(steps[2].playlist.as_deref(), Some("chill"));
    assert_eq!(steps[4].playlist, None);
}

#[test]
fn test_path_rejects_users_and_unknowns() {
    let catalog = setup_catalog();
    assert!(matches!(
        catalog.path(A, "ana"),
        Err(TrackLinkError::NotATrack { .. })
    ));
    assert!(matches!(
        catalog.path("Nope - Nobody", A),
        Err(TrackLinkError::NotATrack { .. })
    ));
    assert_eq!(catalog.path(A, D).unwrap(), None);
}

#[test]
fn test_co_listening_graph() {
    let mut catalog = setup_catalog();
    let graph = catalog.co_listening();
    assert_eq!(graph.len(), 4);
    assert!(graph.is_adjacent(&A.to_string(), &B.to_string()));
    assert!(graph.is_adjacent(&B.to_string(), &C.to_string()));
    assert!(!graph.is_adjacent(&A.to_string(), &C.to_string()));
    assert_eq!(graph.degree(&D.to_string()), 0);
}

#[test]
fn test_range_and_cycle() {
    let mut catalog = setup_catalog();
    assert_eq!(catalog.range(1, A).unwrap(), 1);
    assert_eq!(catalog.range(2, A).unwrap(), 1);
    assert_eq!(catalog.range(3, A).unwrap(), 0);

    let cycle = catalog.cycle(2, B).unwrap().expect("B has neighbors");
    assert_eq!(cycle.len(), 3);
    assert_eq!(cycle[0], B);
    assert_eq!(cycle[2], B);
    assert_eq!(catalog.cycle(3, A).unwrap(), None);

    assert!(matches!(
        catalog.range(1, "ana"),
        Err(TrackLinkError::UnknownTrack { .. })
    ));
    assert!(matches!(
        catalog.cycle(0, A),
        Err(TrackLinkError::InvalidArgument { .. })
    ));
}

#[test]
fn test_most_important_tracks() {
    let mut catalog = setup_catalog();
    assert_eq!(catalog.most_important(2).unwrap(), vec![B, D]);
    let all = catalog.most_important(100).unwrap();
    assert_eq!(all.len(), 4);
    assert!(!all.iter().any(|v| v == "ana"));
    assert!(catalog.most_important(0).is_err());
}

#[test]
fn test_recommendations_filter_by_kind() {
    let mut catalog = setup_catalog();
    let seeds = vec![A.to_string()];

    let tracks = catalog.recommend(VertexKind::Track, 5, &seeds).unwrap();
    assert!(tracks.contains(&B.to_string()));
    assert!(tracks.iter().all(|t| t == B || t == C));

    let users = catalog.recommend(VertexKind::User, 5, &seeds).unwrap();
    assert!(!users.is_empty());
    assert!(users.iter().all(|u| u == "ana" || u == "ben"));
}

#[test]
fn test_seeded_recommendations_repeat() {
    let seeds = vec![A.to_string(), C.to_string()];
    let first = setup_catalog()
        .recommend(VertexKind::Track, 3, &seeds)
        .unwrap();
    let second = setup_catalog()
        .recommend(VertexKind::Track, 3, &seeds)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first, vec![B.to_string()]);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[test]
fn test_session_renders_each_command() {
    let mut catalog = setup_catalog();
    let script = format!(
        "path {A} >>>> {C}\n\
         \n\
         top 2\n\
         range 2 {A}\n\
         cycle 3 {A}\n\
         path {A} >>>> {D}\n\
         path {A} >>>> ana\n\
         range 0 {A}\n\
         dance 1\n"
    );
    let lines = run_script(&mut catalog, &script);
    assert_eq!(
        lines,
        vec![
            format!(
                "{A} --> appears in playlist --> mix --> by --> ana --> has playlist --> mix \
                 --> where it appears --> {B} --> appears in playlist --> chill --> by --> ben \
                 --> has playlist --> chill --> where it appears --> {C}"
            ),
            format!("{B}; {D}"),
            "1".to_string(),
            "No path found".to_string(),
            "No path found".to_string(),
            "both endpoints must be tracks: ana".to_string(),
            "invalid argument: expected a number >= 1, got 0".to_string(),
            "unknown command: dance".to_string(),
        ]
    );
}

#[test]
fn test_session_recommend_line() {
    let mut catalog = setup_catalog();
    let lines = run_script(&mut catalog, &format!("recommend tracks 1 {A} >>>> {C}\n"));
    assert_eq!(lines, vec![B.to_string()]);
}
