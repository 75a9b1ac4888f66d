use std::path::PathBuf;

use chrono::NaiveDate;
use soundcheck::report::{ReportWriter, generated_header};
use soundcheck::store::{
    SNAPSHOT_PLAYLIST_TRACKS, SNAPSHOT_SAVED_TRACKS, SNAPSHOT_TOP_TRACKS, SnapshotStore,
    playlist_track_records, saved_track_records, top_track_records,
};
use soundcheck::types::{
    Artist, PlaylistItem, PlaylistTrackRecord, SavedTrackItem, SavedTrackRecord, TopTrackRecord,
    Track,
};

// Helper function to create a fresh temp directory for one test
fn create_temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("soundcheck-{}-{}", name, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// Helper function to create a test track
fn create_test_track(id: Option<&str>, name: &str, artist: &str) -> Track {
    Track {
        id: id.map(|s| s.to_string()),
        name: name.to_string(),
        artists: vec![Artist {
            id: Some(format!("{}-id", artist)),
            name: artist.to_string(),
        }],
        album: None,
        popularity: 0,
        duration_ms: Some(200_000),
    }
}

// Helper function to create a saved track record
fn create_saved(id: &str, name: &str, artist: &str) -> SavedTrackRecord {
    SavedTrackRecord {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
        added_at: "2023-01-01T00:00:00Z".to_string(),
    }
}

#[tokio::test]
async fn test_snapshot_round_trip() {
    let dir = create_temp_dir("round-trip");
    let store = SnapshotStore::new(&dir);

    let records = vec![
        create_saved("t1", "Song One", "Alpha"),
        create_saved("t2", "Song Two", "Beta"),
    ];
    store.persist(SNAPSHOT_SAVED_TRACKS, &records).await.unwrap();

    let loaded: Vec<SavedTrackRecord> = store.load(SNAPSHOT_SAVED_TRACKS).await.unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, "t1");
    assert_eq!(loaded[0].name, "Song One");
    assert_eq!(loaded[0].added_at, "2023-01-01T00:00:00Z");
    assert_eq!(loaded[1].id, "t2");
}

#[tokio::test]
async fn test_snapshot_file_layout() {
    let dir = create_temp_dir("layout");
    let store = SnapshotStore::new(&dir);

    let records = vec![create_saved("t1", "Song One", "Alpha")];
    store.persist(SNAPSHOT_SAVED_TRACKS, &records).await.unwrap();

    // Snapshots land under their own subdirectory, one file per kind
    let path = store.path(SNAPSHOT_SAVED_TRACKS);
    assert!(path.ends_with("snapshots/saved-tracks.jsonl"));
    assert!(path.exists());

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    // The header line pins the schema version and the snapshot kind
    assert!(lines[0].starts_with("{\"schema_version\":1,\"snapshot\":\"saved-tracks\""));
    assert!(lines[1].contains("\"id\":\"t1\""));
}

#[tokio::test]
async fn test_snapshot_kinds_are_separate_files() {
    let dir = create_temp_dir("kinds");
    let store = SnapshotStore::new(&dir);

    let saved = vec![create_saved("t1", "Song One", "Alpha")];
    let top = vec![TopTrackRecord {
        id: "t2".to_string(),
        name: "Song Two".to_string(),
        artist: "Beta".to_string(),
    }];
    let playlist = vec![PlaylistTrackRecord {
        playlist: "Mix".to_string(),
        id: "t3".to_string(),
        name: "Song Three".to_string(),
        artist: "Gamma".to_string(),
    }];

    store.persist(SNAPSHOT_SAVED_TRACKS, &saved).await.unwrap();
    store.persist(SNAPSHOT_TOP_TRACKS, &top).await.unwrap();
    store
        .persist(SNAPSHOT_PLAYLIST_TRACKS, &playlist)
        .await
        .unwrap();

    let saved_back: Vec<SavedTrackRecord> = store.load(SNAPSHOT_SAVED_TRACKS).await.unwrap();
    let top_back: Vec<TopTrackRecord> = store.load(SNAPSHOT_TOP_TRACKS).await.unwrap();
    let playlist_back: Vec<PlaylistTrackRecord> =
        store.load(SNAPSHOT_PLAYLIST_TRACKS).await.unwrap();

    assert_eq!(saved_back[0].id, "t1");
    assert_eq!(top_back[0].id, "t2");
    assert_eq!(playlist_back[0].id, "t3");
    assert_eq!(playlist_back[0].playlist, "Mix");
}

#[tokio::test]
async fn test_snapshot_missing_file() {
    let dir = create_temp_dir("missing");
    let store = SnapshotStore::new(&dir);

    let err = store
        .load::<SavedTrackRecord>(SNAPSHOT_SAVED_TRACKS)
        .await
        .unwrap_err();

    // The message tells the user which command produces the snapshot
    let message = err.to_string();
    assert!(message.contains("No 'saved-tracks' snapshot"));
    assert!(message.contains("Run soundcheck intersections first"));
}

#[tokio::test]
async fn test_snapshot_version_mismatch() {
    let dir = create_temp_dir("version");
    let store = SnapshotStore::new(&dir);

    let path = store.path(SNAPSHOT_SAVED_TRACKS);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        "{\"schema_version\":999,\"snapshot\":\"saved-tracks\",\"generated_at\":\"x\"}\n",
    )
    .unwrap();

    let err = store
        .load::<SavedTrackRecord>(SNAPSHOT_SAVED_TRACKS)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("schema version 999"));
}

#[tokio::test]
async fn test_snapshot_kind_mismatch() {
    let dir = create_temp_dir("kind-mismatch");
    let store = SnapshotStore::new(&dir);

    // A top-tracks header sitting in the saved-tracks file is rejected
    let path = store.path(SNAPSHOT_SAVED_TRACKS);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        "{\"schema_version\":1,\"snapshot\":\"top-tracks\",\"generated_at\":\"x\"}\n",
    )
    .unwrap();

    let err = store
        .load::<SavedTrackRecord>(SNAPSHOT_SAVED_TRACKS)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("expected 'saved-tracks'"));
}

#[tokio::test]
async fn test_snapshot_empty_file() {
    let dir = create_temp_dir("empty");
    let store = SnapshotStore::new(&dir);

    let path = store.path(SNAPSHOT_SAVED_TRACKS);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "").unwrap();

    let err = store
        .load::<SavedTrackRecord>(SNAPSHOT_SAVED_TRACKS)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("is empty"));
}

#[tokio::test]
async fn test_snapshot_skips_malformed_lines() {
    let dir = create_temp_dir("malformed");
    let store = SnapshotStore::new(&dir);

    let good = vec![
        create_saved("t1", "Song One", "Alpha"),
        create_saved("t2", "Song Two", "Beta"),
    ];
    let mut content = String::new();
    content.push_str("{\"schema_version\":1,\"snapshot\":\"saved-tracks\",\"generated_at\":\"x\"}\n");
    content.push_str(&serde_json::to_string(&good[0]).unwrap());
    content.push_str("\nnot json at all\n");
    content.push_str(&serde_json::to_string(&good[1]).unwrap());
    content.push('\n');

    let path = store.path(SNAPSHOT_SAVED_TRACKS);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();

    // The unparseable line is dropped, the rest load normally
    let loaded: Vec<SavedTrackRecord> = store.load(SNAPSHOT_SAVED_TRACKS).await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, "t1");
    assert_eq!(loaded[1].id, "t2");
}

#[test]
fn test_saved_track_records() {
    let items = vec![
        SavedTrackItem {
            added_at: Some("2023-05-01T00:00:00Z".to_string()),
            track: Some(create_test_track(Some("t1"), "Song One", "Alpha")),
        },
        // no track object
        SavedTrackItem {
            added_at: Some("2023-05-02T00:00:00Z".to_string()),
            track: None,
        },
        // local file without an id
        SavedTrackItem {
            added_at: None,
            track: Some(create_test_track(None, "Local File", "Beta")),
        },
        // no added-at date defaults to an empty string
        SavedTrackItem {
            added_at: None,
            track: Some(create_test_track(Some("t2"), "Song Two", "Beta")),
        },
    ];

    let records = saved_track_records(&items);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "t1");
    assert_eq!(records[0].artist, "Alpha");
    assert_eq!(records[0].added_at, "2023-05-01T00:00:00Z");
    assert_eq!(records[1].id, "t2");
    assert_eq!(records[1].added_at, "");
}

#[test]
fn test_top_track_records() {
    let tracks = vec![
        create_test_track(Some("t1"), "Song One", "Alpha"),
        create_test_track(None, "Local File", "Beta"),
    ];

    let records = top_track_records(&tracks);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "t1");
    assert_eq!(records[0].name, "Song One");
    assert_eq!(records[0].artist, "Alpha");
}

#[test]
fn test_playlist_track_records() {
    let playlists = vec![
        (
            "Mix One".to_string(),
            vec![
                PlaylistItem {
                    added_at: None,
                    track: Some(create_test_track(Some("t1"), "Song One", "Alpha")),
                },
                PlaylistItem {
                    added_at: None,
                    track: None,
                },
            ],
        ),
        (
            "Mix Two".to_string(),
            vec![PlaylistItem {
                added_at: None,
                track: Some(create_test_track(Some("t2"), "Song Two", "Beta")),
            }],
        ),
    ];

    let records = playlist_track_records(&playlists);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].playlist, "Mix One");
    assert_eq!(records[0].id, "t1");
    assert_eq!(records[1].playlist, "Mix Two");
    assert_eq!(records[1].id, "t2");
}

#[tokio::test]
async fn test_report_writer_plain() {
    let dir = create_temp_dir("report-plain");
    let writer = ReportWriter::new(&dir);

    let lines = vec!["alpha".to_string(), "beta".to_string()];
    writer.write("plain.txt", &lines).await.unwrap();

    let content = std::fs::read_to_string(writer.path("plain.txt")).unwrap();
    assert_eq!(content, "alpha\nbeta\n");
}

#[tokio::test]
async fn test_report_writer_dated() {
    let dir = create_temp_dir("report-dated");
    let writer = ReportWriter::new(&dir);

    let lines = vec!["alpha".to_string()];
    writer.write_dated("dated.txt", &lines).await.unwrap();

    let content = std::fs::read_to_string(writer.path("dated.txt")).unwrap();
    let file_lines: Vec<&str> = content.lines().collect();

    assert_eq!(file_lines.len(), 2);
    assert_eq!(file_lines[0], generated_header());
    assert_eq!(file_lines[1], "alpha");
}

#[tokio::test]
async fn test_report_writer_creates_parent_dirs() {
    let dir = create_temp_dir("report-nested");
    let writer = ReportWriter::new(&dir);

    writer
        .write("nested/dir/report.txt", &["line".to_string()])
        .await
        .unwrap();

    assert!(writer.path("nested/dir/report.txt").exists());
}

#[test]
fn test_generated_header_format() {
    let header = generated_header();
    let date_part = header.strip_prefix("Generated on ").unwrap();

    // MM/DD/YYYY, zero-padded
    assert_eq!(date_part.len(), 10);
    assert!(NaiveDate::parse_from_str(date_part, "%m/%d/%Y").is_ok());
}
