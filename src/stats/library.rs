use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::{types::Track, utils};

pub struct ArtistCount {
    pub name: String,
    pub count: u32,
}

pub struct AlbumCount {
    pub name: String,
    pub artist: String,
    pub count: u32,
}

/// Counts saved tracks per artist, keyed by artist id. Tracks whose first
/// artist has no id are skipped. Sorted by count descending, name
/// ascending; the sort is stable over first-seen order.
pub fn artist_counts(tracks: &[&Track]) -> Vec<ArtistCount> {
    let mut counts: Vec<ArtistCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for track in tracks {
        let Some(artist) = track.artists.first() else {
            continue;
        };
        let Some(artist_id) = artist.id.as_deref() else {
            continue;
        };

        let idx = *index.entry(artist_id.to_string()).or_insert_with(|| {
            counts.push(ArtistCount {
                name: artist.name.clone(),
                count: 0,
            });
            counts.len() - 1
        });
        counts[idx].count += 1;
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    counts
}

/// Counts saved tracks per album, keyed by album id. The display artist is
/// the first artist of the first saved track seen for that album.
pub fn album_counts(tracks: &[&Track]) -> Vec<AlbumCount> {
    let mut counts: Vec<AlbumCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for track in tracks {
        let Some(album) = track.album.as_ref() else {
            continue;
        };
        let Some(album_id) = album.id.as_deref() else {
            continue;
        };

        let idx = *index.entry(album_id.to_string()).or_insert_with(|| {
            counts.push(AlbumCount {
                name: album.name.clone(),
                artist: credited_artist(track).to_string(),
                count: 0,
            });
            counts.len() - 1
        });
        counts[idx].count += 1;
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    counts
}

pub fn render_artist_counts(counts: &[ArtistCount]) -> Vec<String> {
    counts
        .iter()
        .map(|c| format!("{}: {}", c.count, c.name))
        .collect()
}

pub fn render_album_counts(counts: &[AlbumCount]) -> Vec<String> {
    counts
        .iter()
        .map(|c| {
            if c.artist.is_empty() {
                format!("{}: {}", c.count, c.name)
            } else {
                format!("{}: {} — {}", c.count, c.name, c.artist)
            }
        })
        .collect()
}

/// Saved tracks ordered by popularity descending.
pub fn render_by_popularity(tracks: &[&Track]) -> Vec<String> {
    let mut sorted = tracks.to_vec();
    sorted.sort_by(|a, b| {
        b.popularity
            .cmp(&a.popularity)
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
        .iter()
        .map(|t| format!("{}: {} - {}", t.popularity, t.name, credited_artist(t)))
        .collect()
}

/// Saved tracks ordered by duration, longest first.
pub fn render_by_duration(tracks: &[&Track]) -> Vec<String> {
    let mut sorted = tracks.to_vec();
    sorted.sort_by(|a, b| {
        b.duration_ms
            .unwrap_or(0)
            .cmp(&a.duration_ms.unwrap_or(0))
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
        .iter()
        .map(|t| {
            format!(
                "{}: {} - {}",
                utils::format_duration_long(t.duration_ms.unwrap_or(0)),
                t.name,
                credited_artist(t)
            )
        })
        .collect()
}

/// Saved tracks ordered by album release date, oldest first. Tracks without
/// an album sort under the `Unknown` placeholder, after every real date.
pub fn render_by_release_date(tracks: &[&Track]) -> Vec<String> {
    let mut sorted = tracks.to_vec();
    sorted.sort_by(|a, b| {
        release_date_of(a)
            .cmp(release_date_of(b))
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
        .iter()
        .map(|t| {
            format!(
                "{}: {} - {}",
                release_date_of(t),
                t.name,
                credited_artist(t)
            )
        })
        .collect()
}

// Saved-library reports attribute a track to its first artist, and only
// when that artist carries an id.
fn credited_artist(track: &Track) -> &str {
    track
        .artists
        .first()
        .filter(|a| a.id.is_some())
        .map(|a| a.name.as_str())
        .unwrap_or("Unknown")
}

fn release_date_of(track: &Track) -> &str {
    track
        .album
        .as_ref()
        .filter(|a| a.id.is_some())
        .and_then(|a| a.release_date.as_deref())
        .unwrap_or("Unknown")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKind {
    Id,
    NameArtist,
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateKind::Id => write!(f, "ID"),
            DuplicateKind::NameArtist => write!(f, "Artist+Name"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Duplicate {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub kind: DuplicateKind,
}

/// Finds saved tracks that appear more than once, in encounter order. An
/// exact id repeat reports as an `ID` duplicate; a different id with the
/// same artist and name reports as `Artist+Name`, which catches relinked
/// re-releases of the same song.
pub fn find_duplicates(tracks: &[&Track]) -> Vec<Duplicate> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_pairs: HashSet<(String, String)> = HashSet::new();
    let mut duplicates = Vec::new();

    for track in tracks {
        let Some(id) = track.id.as_deref() else {
            continue;
        };
        let artist = credited_artist(track).to_string();
        let pair = (artist.clone(), track.name.clone());

        if !seen_ids.insert(id.to_string()) {
            duplicates.push(Duplicate {
                id: id.to_string(),
                name: track.name.clone(),
                artist,
                kind: DuplicateKind::Id,
            });
        } else if !seen_pairs.insert(pair) {
            duplicates.push(Duplicate {
                id: id.to_string(),
                name: track.name.clone(),
                artist,
                kind: DuplicateKind::NameArtist,
            });
        }
    }

    duplicates
}

pub fn render_duplicates(duplicates: &[Duplicate]) -> Vec<String> {
    if duplicates.is_empty() {
        return vec!["No duplicates found.".to_string()];
    }

    duplicates
        .iter()
        .map(|d| format!("{} — {} | ID: {} | Type: {}", d.name, d.artist, d.id, d.kind))
        .collect()
}
