use std::collections::{BTreeMap, HashMap};

use crate::types::PlaylistItem;

/// How often one track appears across all playlists, with the appearance
/// count per playlist.
#[derive(Debug, Clone)]
pub struct TrackFrequency {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub count: u32,
    pub playlists: BTreeMap<String, u32>,
}

/// How often one artist or album appears across all playlists. Keyed by
/// id and name together so entries without an id do not collapse into one.
#[derive(Debug, Clone)]
pub struct GroupFrequency {
    pub id: String,
    pub name: String,
    pub count: u32,
    pub playlists: BTreeMap<String, u32>,
}

pub struct PlaylistFrequencies {
    pub tracks: Vec<TrackFrequency>,
    pub artists: Vec<GroupFrequency>,
    pub albums: Vec<GroupFrequency>,
}

/// Counts track, artist, and album appearances over every playlist. Items
/// without a track object or without a track id are skipped.
///
/// All three result lists come back sorted by count descending, name
/// ascending. The sort is stable over first-seen order, so full ties keep
/// the order in which they were encountered.
pub fn playlist_frequencies(playlists: &[(String, Vec<PlaylistItem>)]) -> PlaylistFrequencies {
    let mut tracks: Vec<TrackFrequency> = Vec::new();
    let mut track_index: HashMap<String, usize> = HashMap::new();
    let mut artists: Vec<GroupFrequency> = Vec::new();
    let mut artist_index: HashMap<(String, String), usize> = HashMap::new();
    let mut albums: Vec<GroupFrequency> = Vec::new();
    let mut album_index: HashMap<(String, String), usize> = HashMap::new();

    for (playlist_name, items) in playlists {
        for item in items {
            let Some(track) = item.track.as_ref() else {
                continue;
            };
            let Some(track_id) = track.id.as_deref() else {
                continue;
            };

            let artist_name = track.primary_artist().to_string();
            let artist_id = track
                .artists
                .first()
                .and_then(|a| a.id.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            let (album_id, album_name) = match track.album.as_ref() {
                Some(album) => (
                    album.id.clone().unwrap_or_else(|| "Unknown".to_string()),
                    album.name.clone(),
                ),
                None => ("Unknown".to_string(), "Unknown".to_string()),
            };

            let idx = *track_index
                .entry(track_id.to_string())
                .or_insert_with(|| {
                    tracks.push(TrackFrequency {
                        id: track_id.to_string(),
                        name: track.name.clone(),
                        artist: artist_name.clone(),
                        count: 0,
                        playlists: BTreeMap::new(),
                    });
                    tracks.len() - 1
                });
            tracks[idx].count += 1;
            *tracks[idx].playlists.entry(playlist_name.clone()).or_insert(0) += 1;

            let idx = *artist_index
                .entry((artist_id.clone(), artist_name.clone()))
                .or_insert_with(|| {
                    artists.push(GroupFrequency {
                        id: artist_id.clone(),
                        name: artist_name.clone(),
                        count: 0,
                        playlists: BTreeMap::new(),
                    });
                    artists.len() - 1
                });
            artists[idx].count += 1;
            *artists[idx].playlists.entry(playlist_name.clone()).or_insert(0) += 1;

            let idx = *album_index
                .entry((album_id.clone(), album_name.clone()))
                .or_insert_with(|| {
                    albums.push(GroupFrequency {
                        id: album_id.clone(),
                        name: album_name.clone(),
                        count: 0,
                        playlists: BTreeMap::new(),
                    });
                    albums.len() - 1
                });
            albums[idx].count += 1;
            *albums[idx].playlists.entry(playlist_name.clone()).or_insert(0) += 1;
        }
    }

    tracks.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    artists.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    albums.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    PlaylistFrequencies {
        tracks,
        artists,
        albums,
    }
}

/// One line per track: count, name, artist, id, then the containing
/// playlists alphabetically.
pub fn render_track_frequencies(tracks: &[TrackFrequency]) -> Vec<String> {
    tracks
        .iter()
        .map(|t| {
            let playlists = t.playlists.keys().cloned().collect::<Vec<_>>().join(", ");
            format!(
                "{}: {} | {} | {} | Playlists: {}",
                t.count, t.name, t.artist, t.id, playlists
            )
        })
        .collect()
}

/// One line per artist or album with the per-playlist appearance counts,
/// busiest playlist first.
pub fn render_group_frequencies(groups: &[GroupFrequency]) -> Vec<String> {
    groups
        .iter()
        .map(|g| {
            let mut entries: Vec<(&String, &u32)> = g.playlists.iter().collect();
            entries.sort_by(|a, b| b.1.cmp(a.1));
            let playlists = entries
                .iter()
                .map(|(name, count)| format!("{} ({})", name, count))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {} | {} | Playlists: {}", g.count, g.name, g.id, playlists)
        })
        .collect()
}
