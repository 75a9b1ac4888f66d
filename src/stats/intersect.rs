use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    stats::frequency::TrackFrequency,
    types::{PlaylistItem, SavedTrackRecord, TopTrackRecord},
};

/// An unsaved track must appear in at least this many playlists before it is
/// suggested for saving.
pub const MIN_PLAYLISTS_FOR_ADD: u32 = 2;

/// Ready-to-write lines for every comparison between the saved library, the
/// top-track ranking, and playlist contents. One pass computes all of them
/// because the intermediate sets feed each other.
///
/// Ordering conventions, per report:
///
/// - `saved`-ordered reports list tracks in library order
/// - `top`-ordered reports list tracks in ranking order
/// - counted reports sort by playlist-appearance count descending with ties
///   broken by name ascending
pub struct IntersectionReports {
    pub saved: Vec<String>,
    pub top: Vec<String>,
    pub saved_in_top: Vec<String>,
    pub saved_not_in_top: Vec<String>,
    pub top_not_in_saved: Vec<String>,
    pub saved_in_playlists: Vec<String>,
    pub saved_not_in_playlists: Vec<String>,
    pub playlist_not_in_saved: Vec<String>,
    pub remove_candidates: Vec<String>,
    pub saved_not_in_top_but_in_playlists: Vec<String>,
    pub saved_in_top_not_in_playlists: Vec<String>,
    pub add_candidates: Vec<String>,
}

pub fn track_line(name: &str, artist: &str, id: &str) -> String {
    format!("{} | {} | {}", name, artist, id)
}

fn counted_line(
    count: u32,
    name: &str,
    artist: &str,
    id: &str,
    playlists: &BTreeMap<String, u32>,
) -> String {
    let names = playlists.keys().cloned().collect::<Vec<_>>().join(", ");
    format!(
        "{}: {} | {} | {} | Playlists: {}",
        count, name, artist, id, names
    )
}

/// Computes all twelve intersection reports.
///
/// Display fields for tracks present on both sides come from the saved
/// record, so a track relinked between fetches reads consistently across
/// reports. Top tracks that are unsaved under their own id but whose name
/// and artist match a saved track are marked with an `(R) ` prefix instead
/// of being suggested for saving.
pub fn intersections(
    saved: &[SavedTrackRecord],
    top: &[TopTrackRecord],
    playlist_tracks: &[TrackFrequency],
) -> IntersectionReports {
    let saved_by_id: HashMap<&str, &SavedTrackRecord> =
        saved.iter().map(|r| (r.id.as_str(), r)).collect();
    let saved_pairs: HashSet<(&str, &str)> = saved
        .iter()
        .map(|r| (r.name.as_str(), r.artist.as_str()))
        .collect();
    let top_ids: HashSet<&str> = top.iter().map(|r| r.id.as_str()).collect();
    let playlist_by_id: HashMap<&str, &TrackFrequency> =
        playlist_tracks.iter().map(|f| (f.id.as_str(), f)).collect();

    let saved_lines: Vec<String> = saved
        .iter()
        .map(|r| track_line(&r.name, &r.artist, &r.id))
        .collect();

    let top_lines: Vec<String> = top
        .iter()
        .map(|t| track_line(&t.name, &t.artist, &t.id))
        .collect();

    // ranking order, saved display fields
    let saved_in_top: Vec<String> = top
        .iter()
        .filter_map(|t| saved_by_id.get(t.id.as_str()))
        .map(|r| track_line(&r.name, &r.artist, &r.id))
        .collect();

    let saved_not_in_top: Vec<String> = saved
        .iter()
        .filter(|r| !top_ids.contains(r.id.as_str()))
        .map(|r| track_line(&r.name, &r.artist, &r.id))
        .collect();

    let top_not_in_saved: Vec<String> = top
        .iter()
        .filter(|t| !saved_by_id.contains_key(t.id.as_str()))
        .map(|t| {
            let line = track_line(&t.name, &t.artist, &t.id);
            if saved_pairs.contains(&(t.name.as_str(), t.artist.as_str())) {
                format!("(R) {}", line)
            } else {
                line
            }
        })
        .collect();

    let mut in_playlists: Vec<(&SavedTrackRecord, &TrackFrequency)> = saved
        .iter()
        .filter_map(|r| playlist_by_id.get(r.id.as_str()).map(|f| (r, *f)))
        .collect();
    in_playlists.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.name.cmp(&b.0.name)));
    let saved_in_playlists: Vec<String> = in_playlists
        .iter()
        .map(|(r, f)| counted_line(f.count, &r.name, &r.artist, &r.id, &f.playlists))
        .collect();

    let saved_not_in_playlists: Vec<String> = saved
        .iter()
        .filter(|r| !playlist_by_id.contains_key(r.id.as_str()))
        .map(|r| track_line(&r.name, &r.artist, &r.id))
        .collect();

    let mut not_in_saved: Vec<&TrackFrequency> = playlist_tracks
        .iter()
        .filter(|f| !saved_by_id.contains_key(f.id.as_str()))
        .collect();
    not_in_saved.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    let playlist_not_in_saved: Vec<String> = not_in_saved
        .iter()
        .map(|f| counted_line(f.count, &f.name, &f.artist, &f.id, &f.playlists))
        .collect();

    let remove_candidates: Vec<String> = saved
        .iter()
        .filter(|r| {
            !top_ids.contains(r.id.as_str()) && !playlist_by_id.contains_key(r.id.as_str())
        })
        .map(|r| track_line(&r.name, &r.artist, &r.id))
        .collect();

    let mut not_in_top_but_in_playlists: Vec<(&SavedTrackRecord, &TrackFrequency)> = saved
        .iter()
        .filter(|r| !top_ids.contains(r.id.as_str()))
        .filter_map(|r| playlist_by_id.get(r.id.as_str()).map(|f| (r, *f)))
        .collect();
    not_in_top_but_in_playlists
        .sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.name.cmp(&b.0.name)));
    let saved_not_in_top_but_in_playlists: Vec<String> = not_in_top_but_in_playlists
        .iter()
        .map(|(r, f)| counted_line(f.count, &r.name, &r.artist, &r.id, &f.playlists))
        .collect();

    let saved_in_top_not_in_playlists: Vec<String> = top
        .iter()
        .filter(|t| !playlist_by_id.contains_key(t.id.as_str()))
        .filter_map(|t| saved_by_id.get(t.id.as_str()))
        .map(|r| track_line(&r.name, &r.artist, &r.id))
        .collect();

    // suggested saves: unsaved, not a relink, ranked in top, and spread
    // across multiple playlists
    let addable_ids: HashSet<&str> = top
        .iter()
        .filter(|t| !saved_by_id.contains_key(t.id.as_str()))
        .filter(|t| !saved_pairs.contains(&(t.name.as_str(), t.artist.as_str())))
        .map(|t| t.id.as_str())
        .collect();
    let add_candidates: Vec<String> = not_in_saved
        .iter()
        .filter(|f| f.count >= MIN_PLAYLISTS_FOR_ADD && addable_ids.contains(f.id.as_str()))
        .map(|f| counted_line(f.count, &f.name, &f.artist, &f.id, &f.playlists))
        .collect();

    IntersectionReports {
        saved: saved_lines,
        top: top_lines,
        saved_in_top,
        saved_not_in_top,
        top_not_in_saved,
        saved_in_playlists,
        saved_not_in_playlists,
        playlist_not_in_saved,
        remove_candidates,
        saved_not_in_top_but_in_playlists,
        saved_in_top_not_in_playlists,
        add_candidates,
    }
}

/// Everything playlists contain, for membership checks: the set of track
/// ids plus the set of `(name, artist)` pairs. Pairs are collected even for
/// items without a track id, so local files still count as membership.
pub struct PlaylistMembership {
    pub ids: HashSet<String>,
    pub pairs: HashSet<(String, String)>,
}

pub fn playlist_membership(playlists: &[(String, Vec<PlaylistItem>)]) -> PlaylistMembership {
    let mut ids: HashSet<String> = HashSet::new();
    let mut pairs: HashSet<(String, String)> = HashSet::new();

    for (_, items) in playlists {
        for item in items {
            let Some(track) = item.track.as_ref() else {
                continue;
            };
            if let Some(id) = track.id.as_deref() {
                ids.insert(id.to_string());
            }
            if !track.name.is_empty() {
                pairs.insert((track.name.clone(), track.primary_artist().to_string()));
            }
        }
    }

    PlaylistMembership { ids, pairs }
}

/// Saved tracks that appear in no playlist, by id or by `(name, artist)`
/// pair, in library order. The pair check catches saved tracks whose
/// playlist copy carries a different id.
pub fn orphans<'a>(
    saved: &'a [SavedTrackRecord],
    membership: &PlaylistMembership,
) -> Vec<&'a SavedTrackRecord> {
    saved
        .iter()
        .filter(|r| {
            !membership.ids.contains(&r.id)
                && !membership.pairs.contains(&(r.name.clone(), r.artist.clone()))
        })
        .collect()
}

/// Filters orphans down to the ones that also never show up in the
/// top-track ranking.
pub fn orphans_not_in_top<'a>(
    orphans: &[&'a SavedTrackRecord],
    top: &[TopTrackRecord],
) -> Vec<&'a SavedTrackRecord> {
    let top_ids: HashSet<&str> = top.iter().map(|t| t.id.as_str()).collect();
    orphans
        .iter()
        .filter(|r| !top_ids.contains(r.id.as_str()))
        .copied()
        .collect()
}

pub fn render_track_records(records: &[&SavedTrackRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| track_line(&r.name, &r.artist, &r.id))
        .collect()
}
