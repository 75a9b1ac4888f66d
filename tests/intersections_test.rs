use std::collections::BTreeMap;

use soundcheck::stats::frequency::TrackFrequency;
use soundcheck::stats::intersect::{
    MIN_PLAYLISTS_FOR_ADD, intersections, orphans, orphans_not_in_top, playlist_membership,
    render_track_records, track_line,
};
use soundcheck::stats::score::{
    CuratedList, FavoriteSong, favorite_scores, playlist_score, render_favorites,
};
use soundcheck::types::{
    Artist, PlaylistItem, PlaylistTrackRecord, SavedTrackRecord, TopTrackRecord, Track,
};

// Helper function to create a saved track record
fn create_saved(id: &str, name: &str, artist: &str) -> SavedTrackRecord {
    SavedTrackRecord {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
        added_at: "2023-01-01T00:00:00Z".to_string(),
    }
}

// Helper function to create a top track record
fn create_top(id: &str, name: &str, artist: &str) -> TopTrackRecord {
    TopTrackRecord {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
    }
}

// Helper function to create a track frequency spread over the given playlists
fn create_frequency(id: &str, name: &str, artist: &str, playlists: &[&str]) -> TrackFrequency {
    let mut counts = BTreeMap::new();
    for playlist in playlists {
        *counts.entry(playlist.to_string()).or_insert(0u32) += 1;
    }
    TrackFrequency {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
        count: playlists.len() as u32,
        playlists: counts,
    }
}

// Helper function to create a playlist item holding a full track
fn create_item(id: &str, name: &str, artist: &str) -> PlaylistItem {
    PlaylistItem {
        added_at: Some("2023-01-01T00:00:00Z".to_string()),
        track: Some(Track {
            id: Some(id.to_string()),
            name: name.to_string(),
            artists: vec![Artist {
                id: Some(format!("{}-id", artist)),
                name: artist.to_string(),
            }],
            album: None,
            popularity: 0,
            duration_ms: Some(200_000),
        }),
    }
}

// Helper function to create a playlist track record
fn create_record(playlist: &str, id: &str, name: &str, artist: &str) -> PlaylistTrackRecord {
    PlaylistTrackRecord {
        playlist: playlist.to_string(),
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
    }
}

#[test]
fn test_track_line() {
    assert_eq!(track_line("Echoes", "Alpha", "t1"), "Echoes | Alpha | t1");
}

#[test]
fn test_intersections_reports() {
    let saved = vec![
        create_saved("t1", "Song One", "Alpha"),
        create_saved("t2", "Song Two", "Beta"),
        create_saved("t3", "Song Three", "Gamma"),
        create_saved("t4", "Song Four", "Delta"),
        create_saved("t8", "Song Eight", "Eta"),
    ];
    let top = vec![
        create_top("t1", "Song One", "Alpha"),
        create_top("t5", "Song Five", "Epsilon"),
        // unsaved id, but name and artist match the saved t2
        create_top("t6", "Song Two", "Beta"),
        create_top("t8", "Song Eight", "Eta"),
    ];
    let frequencies = vec![
        create_frequency("t1", "Song One", "Alpha", &["Chill", "Mix"]),
        create_frequency("t3", "Song Three", "Gamma", &["Mix"]),
        create_frequency("t5", "Song Five", "Epsilon", &["Chill", "Mix"]),
        create_frequency("t7", "Song Seven", "Zeta", &["Mix"]),
    ];

    let reports = intersections(&saved, &top, &frequencies);

    // Library order
    assert_eq!(
        reports.saved,
        vec![
            "Song One | Alpha | t1",
            "Song Two | Beta | t2",
            "Song Three | Gamma | t3",
            "Song Four | Delta | t4",
            "Song Eight | Eta | t8",
        ]
    );

    // Ranking order
    assert_eq!(
        reports.top,
        vec![
            "Song One | Alpha | t1",
            "Song Five | Epsilon | t5",
            "Song Two | Beta | t6",
            "Song Eight | Eta | t8",
        ]
    );

    // Both sides together partition the library exactly
    assert_eq!(
        reports.saved_in_top,
        vec!["Song One | Alpha | t1", "Song Eight | Eta | t8"]
    );
    assert_eq!(
        reports.saved_not_in_top,
        vec![
            "Song Two | Beta | t2",
            "Song Three | Gamma | t3",
            "Song Four | Delta | t4",
        ]
    );
    assert_eq!(
        reports.saved_in_top.len() + reports.saved_not_in_top.len(),
        saved.len()
    );

    // The relinked t6 is flagged instead of listed plainly
    assert_eq!(
        reports.top_not_in_saved,
        vec!["Song Five | Epsilon | t5", "(R) Song Two | Beta | t6"]
    );

    // Counted reports sort by appearance count descending
    assert_eq!(
        reports.saved_in_playlists,
        vec![
            "2: Song One | Alpha | t1 | Playlists: Chill, Mix",
            "1: Song Three | Gamma | t3 | Playlists: Mix",
        ]
    );
    assert_eq!(
        reports.saved_not_in_playlists,
        vec![
            "Song Two | Beta | t2",
            "Song Four | Delta | t4",
            "Song Eight | Eta | t8",
        ]
    );
    assert_eq!(
        reports.playlist_not_in_saved,
        vec![
            "2: Song Five | Epsilon | t5 | Playlists: Chill, Mix",
            "1: Song Seven | Zeta | t7 | Playlists: Mix",
        ]
    );

    // Saved but neither ranked nor playlisted: candidates for removal
    assert_eq!(
        reports.remove_candidates,
        vec!["Song Two | Beta | t2", "Song Four | Delta | t4"]
    );

    assert_eq!(
        reports.saved_not_in_top_but_in_playlists,
        vec!["1: Song Three | Gamma | t3 | Playlists: Mix"]
    );
    assert_eq!(
        reports.saved_in_top_not_in_playlists,
        vec!["Song Eight | Eta | t8"]
    );

    // Ranked, unsaved, and spread over two playlists: candidate for saving
    assert_eq!(
        reports.add_candidates,
        vec!["2: Song Five | Epsilon | t5 | Playlists: Chill, Mix"]
    );
}

#[test]
fn test_relinked_track_is_never_an_add_candidate() {
    let saved = vec![create_saved("t2", "Song Two", "Beta")];
    let top = vec![create_top("t6", "Song Two", "Beta")];
    let frequencies = vec![create_frequency("t6", "Song Two", "Beta", &["Chill", "Mix"])];

    let reports = intersections(&saved, &top, &frequencies);

    // Flagged as a relink in the top report
    assert_eq!(reports.top_not_in_saved, vec!["(R) Song Two | Beta | t6"]);

    // Two playlists would normally qualify it, the name match blocks it
    assert_eq!(
        reports.playlist_not_in_saved,
        vec!["2: Song Two | Beta | t6 | Playlists: Chill, Mix"]
    );
    assert!(reports.add_candidates.is_empty());
}

#[test]
fn test_add_candidates_require_rank_and_spread() {
    assert_eq!(MIN_PLAYLISTS_FOR_ADD, 2);

    let saved: Vec<SavedTrackRecord> = Vec::new();
    let top = vec![create_top("t5", "Song Five", "Epsilon")];

    // In the ranking but only one playlist: not suggested
    let frequencies = vec![
        create_frequency("t5", "Song Five", "Epsilon", &["Mix"]),
        // spread wide but absent from the ranking: not suggested either
        create_frequency("t7", "Song Seven", "Zeta", &["Chill", "Mix"]),
    ];
    let reports = intersections(&saved, &top, &frequencies);
    assert!(reports.add_candidates.is_empty());

    // The same ranked track over two playlists is suggested
    let frequencies = vec![create_frequency("t5", "Song Five", "Epsilon", &["Chill", "Mix"])];
    let reports = intersections(&saved, &top, &frequencies);
    assert_eq!(
        reports.add_candidates,
        vec!["2: Song Five | Epsilon | t5 | Playlists: Chill, Mix"]
    );
}

#[test]
fn test_playlist_membership() {
    let playlists = vec![(
        "Mix".to_string(),
        vec![
            create_item("t1", "Song A", "Alpha"),
            // local file without an id still contributes its name pair
            PlaylistItem {
                added_at: None,
                track: Some(Track {
                    id: None,
                    name: "Song B".to_string(),
                    artists: vec![Artist {
                        id: None,
                        name: "Beta".to_string(),
                    }],
                    album: None,
                    popularity: 0,
                    duration_ms: None,
                }),
            },
            PlaylistItem {
                added_at: None,
                track: None,
            },
        ],
    )];

    let membership = playlist_membership(&playlists);

    assert!(membership.ids.contains("t1"));
    assert_eq!(membership.ids.len(), 1);
    assert!(
        membership
            .pairs
            .contains(&("Song A".to_string(), "Alpha".to_string()))
    );
    assert!(
        membership
            .pairs
            .contains(&("Song B".to_string(), "Beta".to_string()))
    );
}

#[test]
fn test_orphans() {
    let playlists = vec![(
        "Mix".to_string(),
        vec![
            create_item("t1", "Song A", "Alpha"),
            create_item("t2", "Song B", "Beta"),
        ],
    )];
    let membership = playlist_membership(&playlists);

    let saved = vec![
        // present by id
        create_saved("t1", "Song A", "Alpha"),
        // different id, caught by the name and artist pair
        create_saved("t9", "Song B", "Beta"),
        // in no playlist at all
        create_saved("t5", "Song C", "Gamma"),
    ];

    let orphaned = orphans(&saved, &membership);
    assert_eq!(render_track_records(&orphaned), vec!["Song C | Gamma | t5"]);

    // Dropping the ones that still chart in the top ranking
    let top = vec![create_top("t5", "Song C", "Gamma")];
    assert!(orphans_not_in_top(&orphaned, &top).is_empty());

    let unrelated_top = vec![create_top("t8", "Song D", "Delta")];
    let remaining = orphans_not_in_top(&orphaned, &unrelated_top);
    assert_eq!(render_track_records(&remaining), vec!["Song C | Gamma | t5"]);
}

#[test]
fn test_curated_list_parse() {
    let content = "Top 100 Favorite Songs:\n\
        \n\
        1) My Jam | ARTIST\n\
        51) Deep Cut | Someone\n\
        not a ranked line\n\
        x) Bad | Y\n\
        3) NoSeparatorHere\n";

    let curated = CuratedList::parse(content);

    // Heading, blank, and malformed lines are all skipped
    assert_eq!(curated.len(), 2);
    assert!(!curated.is_empty());

    // Lookups are case-insensitive
    assert_eq!(curated.score("My Jam", "Artist"), 100);
    assert_eq!(curated.score("my jam", "artist"), 100);
    assert_eq!(curated.score("Deep Cut", "SOMEONE"), 50);
    assert_eq!(curated.score("Missing", "Nobody"), 0);

    // An empty file parses to an empty list
    assert!(CuratedList::parse("").is_empty());
}

#[test]
fn test_curated_list_positions() {
    let content = "50) Edge Song | A\n51) Past Edge | B\n";
    let curated = CuratedList::parse(content);

    // Top 50 is worth double the rest of the list
    assert_eq!(curated.score("Edge Song", "A"), 100);
    assert_eq!(curated.score("Past Edge", "B"), 50);

    // A later duplicate entry replaces the earlier position
    let curated = CuratedList::parse("1) My Jam | A\n60) My Jam | A\n");
    assert_eq!(curated.len(), 1);
    assert_eq!(curated.score("My Jam", "A"), 50);
}

#[test]
fn test_playlist_score() {
    assert_eq!(playlist_score(0), 0);
    assert_eq!(playlist_score(1), 20);
    assert_eq!(playlist_score(2), 40);
    assert_eq!(playlist_score(3), 60);
    assert_eq!(playlist_score(4), 80);
    assert_eq!(playlist_score(5), 100);

    // The cap holds for any larger count
    assert_eq!(playlist_score(17), 100);
}

#[test]
fn test_favorite_scores_components() {
    let saved = vec![
        create_saved("ta", "Alpha Song", "A"),
        create_saved("tb", "Beta Song", "B"),
        create_saved("tc", "Gamma Song", "C"),
    ];
    // tb ranks first among saved tracks, ta second; tx is unsaved filler
    let top = vec![
        create_top("tb", "Beta Song", "B"),
        create_top("tx", "Unsaved", "X"),
        create_top("ta", "Alpha Song", "A"),
    ];
    let playlist_tracks = vec![create_record("Mix", "ta", "Alpha Song", "A")];
    let curated = CuratedList::parse("10) Beta Song | B\n");

    let songs = favorite_scores(&saved, &top, &playlist_tracks, &curated);

    // tb: full rank score plus the curated bonus
    assert_eq!(songs[0].id, "tb");
    assert_eq!(songs[0].rank_score, 100.0);
    assert_eq!(songs[0].playlist_score, 0);
    assert_eq!(songs[0].curated_score, 100);
    assert_eq!(songs[0].score, 70.0);

    // ta: half the rank range plus one playlist
    assert_eq!(songs[1].id, "ta");
    assert_eq!(songs[1].rank_score, 50.0);
    assert_eq!(songs[1].playlist_score, 20);
    assert_eq!(songs[1].curated_score, 0);
    assert_eq!(songs[1].score, 31.0);

    // tc: nothing anywhere
    assert_eq!(songs[2].id, "tc");
    assert_eq!(songs[2].score, 0.0);
}

#[test]
fn test_favorite_scores_rank_scaling() {
    // Seven saved tracks, all ranked in order
    let saved: Vec<SavedTrackRecord> = (1..=7)
        .map(|i| create_saved(&format!("t{}", i), &format!("Song {}", i), "A"))
        .collect();
    let top: Vec<TopTrackRecord> = (1..=7)
        .map(|i| create_top(&format!("t{}", i), &format!("Song {}", i), "A"))
        .collect();

    let songs = favorite_scores(&saved, &top, &[], &CuratedList::parse(""));

    // The first ranked track gets the full 100
    assert_eq!(songs[0].id, "t1");
    assert_eq!(songs[0].rank_score, 100.0);
    assert_eq!(songs[0].score, 50.0);

    // Rank three of seven scales to 5/7 of the range; the composite is
    // computed before the stored component is rounded
    assert_eq!(songs[2].id, "t3");
    assert_eq!(songs[2].rank_score, 71.43);
    assert_eq!(songs[2].score, 35.71);
}

#[test]
fn test_favorite_scores_ties_keep_library_order() {
    let saved = vec![
        create_saved("t1", "First In", "A"),
        create_saved("t2", "Second In", "B"),
    ];

    let songs = favorite_scores(&saved, &[], &[], &CuratedList::parse(""));

    assert_eq!(songs[0].score, 0.0);
    assert_eq!(songs[1].score, 0.0);
    assert_eq!(songs[0].id, "t1");
    assert_eq!(songs[1].id, "t2");
}

#[test]
fn test_render_favorites() {
    let songs = vec![
        FavoriteSong {
            id: "t1".to_string(),
            name: "Hit".to_string(),
            artist: "Alpha".to_string(),
            score: 70.0,
            rank_score: 100.0,
            playlist_score: 0,
            curated_score: 100,
        },
        FavoriteSong {
            id: "t2".to_string(),
            name: "Sleeper".to_string(),
            artist: "Beta".to_string(),
            score: 12.25,
            rank_score: 0.0,
            playlist_score: 40,
            curated_score: 0,
        },
    ];

    let lines = render_favorites(&songs);

    assert_eq!(lines[0], "70.0: Hit | Alpha | t1 | 100.0 | 0 | MT100");

    // An unranked song shows a bare zero for the rank component
    assert_eq!(lines[1], "12.25: Sleeper | Beta | t2 | 0 | 40 | MT0");
}
