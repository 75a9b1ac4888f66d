use std::collections::{BTreeMap, BTreeSet};

use crate::types::PlaylistTrackRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistOverlap {
    pub first: String,
    pub second: String,
    pub count: u32,
}

/// Counts, for every unordered pair of playlists, how many distinct tracks
/// the two have in common.
///
/// Each track contributes once per pair no matter how often it repeats
/// inside a playlist. The result is sorted by count descending; the sort is
/// stable over pair-alphabetical order, so ties come out deterministic.
pub fn count_overlaps(records: &[PlaylistTrackRecord]) -> Vec<PlaylistOverlap> {
    let mut by_track: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        by_track
            .entry(record.id.as_str())
            .or_default()
            .insert(record.playlist.as_str());
    }

    let mut pairs: BTreeMap<(&str, &str), u32> = BTreeMap::new();
    for playlists in by_track.values() {
        // set iteration is sorted, so (i, j) with i < j is already the
        // canonical order for an unordered pair
        let names: Vec<&str> = playlists.iter().copied().collect();
        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                *pairs.entry((names[i], names[j])).or_insert(0) += 1;
            }
        }
    }

    let mut overlaps: Vec<PlaylistOverlap> = pairs
        .into_iter()
        .map(|((first, second), count)| PlaylistOverlap {
            first: first.to_string(),
            second: second.to_string(),
            count,
        })
        .collect();
    overlaps.sort_by(|a, b| b.count.cmp(&a.count));
    overlaps
}

/// Keeps overlaps with at least `min_shared` common tracks.
pub fn with_min_shared(overlaps: &[PlaylistOverlap], min_shared: u32) -> Vec<PlaylistOverlap> {
    overlaps
        .iter()
        .filter(|o| o.count >= min_shared)
        .cloned()
        .collect()
}

/// Keeps the `n` strongest overlaps.
pub fn top_overlaps(overlaps: &[PlaylistOverlap], n: usize) -> Vec<PlaylistOverlap> {
    overlaps.iter().take(n).cloned().collect()
}

pub fn render_overlaps(overlaps: &[PlaylistOverlap]) -> Vec<String> {
    overlaps
        .iter()
        .map(|o| format!("{}: {} + {}", o.count, o.first, o.second))
        .collect()
}
