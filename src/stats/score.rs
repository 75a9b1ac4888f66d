use std::collections::{HashMap, HashSet};

use crate::{
    types::{PlaylistTrackRecord, SavedTrackRecord, TopTrackRecord},
    utils,
};

/// A saved track with its composite favorite score and the three component
/// scores it was computed from.
#[derive(Debug, Clone)]
pub struct FavoriteSong {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub score: f64,
    pub rank_score: f64,
    pub playlist_score: u32,
    pub curated_score: u32,
}

/// The hand-curated top-100 list, parsed into case-insensitive
/// `(name, artist)` positions.
///
/// Expected line format is `N) Song Name | ARTIST` under an optional
/// `Top 100 Favorite Songs:` heading. Lines that do not parse are skipped.
pub struct CuratedList {
    positions: HashMap<(String, String), u32>,
}

impl CuratedList {
    pub fn parse(content: &str) -> Self {
        let mut positions = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("Top 100 Favorite Songs:") {
                continue;
            }
            let Some((rank_part, song_info)) = line.split_once(") ") else {
                continue;
            };
            let Ok(position) = rank_part.parse::<u32>() else {
                continue;
            };
            let Some((name, artist)) = song_info.rsplit_once(" | ") else {
                continue;
            };
            positions.insert((name.to_lowercase(), artist.to_lowercase()), position);
        }

        CuratedList { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// 100 points inside the curated top 50, 50 points for the rest of the
    /// list, 0 when absent.
    pub fn score(&self, name: &str, artist: &str) -> u32 {
        match self
            .positions
            .get(&(name.to_lowercase(), artist.to_lowercase()))
        {
            Some(&position) if position <= 50 => 100,
            Some(_) => 50,
            None => 0,
        }
    }
}

/// 20 points per containing playlist, capped at 100.
pub fn playlist_score(count: u32) -> u32 {
    match count {
        0 => 0,
        1 => 20,
        2 => 40,
        3 => 60,
        4 => 80,
        _ => 100,
    }
}

/// Scores every saved track and returns the list sorted by score
/// descending. The sort is stable, so score ties keep library order.
///
/// The composite is `rank * 0.5 + playlists * 0.3 + curated * 0.2`:
///
/// - rank score: the track's 1-based position among saved tracks in the
///   top-track ranking, scaled linearly so the first ranked track gets 100
///   and an unranked track gets 0
/// - playlist score: [`playlist_score`] over the track's total appearance
///   count across playlists
/// - curated score: [`CuratedList::score`]
pub fn favorite_scores(
    saved: &[SavedTrackRecord],
    top: &[TopTrackRecord],
    playlist_tracks: &[PlaylistTrackRecord],
    curated: &CuratedList,
) -> Vec<FavoriteSong> {
    let saved_ids: HashSet<&str> = saved.iter().map(|r| r.id.as_str()).collect();

    let mut ranks: HashMap<&str, u32> = HashMap::new();
    let mut rank_counter: u32 = 1;
    for track in top {
        if saved_ids.contains(track.id.as_str()) && !ranks.contains_key(track.id.as_str()) {
            ranks.insert(track.id.as_str(), rank_counter);
            rank_counter += 1;
        }
    }
    let default_rank = rank_counter;

    let mut playlist_counts: HashMap<&str, u32> = HashMap::new();
    for record in playlist_tracks {
        *playlist_counts.entry(record.id.as_str()).or_insert(0) += 1;
    }

    let mut scored: Vec<FavoriteSong> = saved
        .iter()
        .map(|r| {
            let rank_score = match ranks.get(r.id.as_str()) {
                None => 0.0,
                Some(&rank) => {
                    if default_rank > 1 {
                        ((default_rank - rank) as f64 / (default_rank - 1) as f64) * 100.0
                    } else {
                        100.0
                    }
                }
            };

            let count = playlist_counts.get(r.id.as_str()).copied().unwrap_or(0);
            let playlist_score = playlist_score(count);
            let curated_score = curated.score(&r.name, &r.artist);

            // the composite uses the unrounded rank score
            let score =
                rank_score * 0.5 + f64::from(playlist_score) * 0.3 + f64::from(curated_score) * 0.2;

            FavoriteSong {
                id: r.id.clone(),
                name: r.name.clone(),
                artist: r.artist.clone(),
                score: round2(score),
                rank_score: round2(rank_score),
                playlist_score,
                curated_score,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored
}

/// One line per track: composite score, identity, then the component
/// scores. An unranked track shows a plain `0` rank component; everything
/// else renders with a decimal point.
pub fn render_favorites(songs: &[FavoriteSong]) -> Vec<String> {
    songs
        .iter()
        .map(|s| {
            let rank_display = if s.rank_score == 0.0 {
                "0".to_string()
            } else {
                utils::format_score(s.rank_score)
            };
            format!(
                "{}: {} | {} | {} | {} | {} | MT{}",
                utils::format_score(s.score),
                s.name,
                s.artist,
                s.id,
                rank_display,
                s.playlist_score,
                s.curated_score
            )
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
