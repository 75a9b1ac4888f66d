use crate::{types::PlaylistItem, utils};

// column cells are cut so one long title cannot blow up the whole table
const CELL_LIMIT: usize = 60;

/// One playlist position with pre-formatted `HH:MM:SS` cells: track length,
/// the time the track starts, and the start time with crossfade applied.
#[derive(Debug, Clone)]
pub struct TimelineRow {
    pub name: String,
    pub artist: String,
    pub length: String,
    pub start: String,
    pub crossfade_start: String,
}

/// Walks the playlist in order accumulating play time. Items without a
/// track object or without a duration (local files) produce no row but
/// still count as a crossfade transition, matching what the player does.
pub fn timeline_rows(items: &[PlaylistItem], crossfade_seconds: u64) -> Vec<TimelineRow> {
    let mut rows = Vec::new();
    let mut cumulative_seconds: u64 = 0;

    for (index, item) in items.iter().enumerate() {
        let Some(track) = item.track.as_ref() else {
            continue;
        };
        let Some(duration_ms) = track.duration_ms else {
            continue;
        };

        let song_seconds = duration_ms / 1000;
        let start = cumulative_seconds;
        // one crossfade transition per preceding item, floored at zero
        let crossfade_start = start.saturating_sub(crossfade_seconds * index as u64);

        rows.push(TimelineRow {
            name: truncate_cell(&track.name),
            artist: truncate_cell(track.primary_artist()),
            length: utils::format_seconds_hms(song_seconds),
            start: utils::format_seconds_hms(start),
            crossfade_start: utils::format_seconds_hms(crossfade_start),
        });

        cumulative_seconds += song_seconds;
    }

    rows
}

/// Renders the rows as a padded five-column table: name and artist
/// left-aligned, the three time columns right-aligned, every column sized
/// to its widest cell.
pub fn render_timeline(rows: &[TimelineRow]) -> Vec<String> {
    let name_width = column_width(rows, |r| &r.name);
    let artist_width = column_width(rows, |r| &r.artist);
    let length_width = column_width(rows, |r| &r.length);
    let start_width = column_width(rows, |r| &r.start);
    let crossfade_width = column_width(rows, |r| &r.crossfade_start);

    rows.iter()
        .map(|r| {
            format!(
                "{:<nw$} | {:<aw$} | {:>lw$} | {:>sw$} | {:>cw$}",
                r.name,
                r.artist,
                r.length,
                r.start,
                r.crossfade_start,
                nw = name_width,
                aw = artist_width,
                lw = length_width,
                sw = start_width,
                cw = crossfade_width
            )
        })
        .collect()
}

fn column_width<F>(rows: &[TimelineRow], cell: F) -> usize
where
    F: Fn(&TimelineRow) -> &str,
{
    rows.iter()
        .map(|r| cell(r).chars().count())
        .max()
        .unwrap_or(0)
}

fn truncate_cell(value: &str) -> String {
    value.chars().take(CELL_LIMIT).collect()
}
