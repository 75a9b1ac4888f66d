use chrono::{Months, NaiveDate};

use crate::{types::PlaylistItem, utils};

/// Date windows the recency buckets are measured against.
///
/// All windows are half-open on the lower bound: a track counts for a
/// window when `lower < added <= upper`. The floor cuts off anything with a
/// garbage added-at date from before streaming libraries existed.
#[derive(Debug, Clone, Copy)]
pub struct RecencyWindows {
    pub today: NaiveDate,
    pub six_months_ago: NaiveDate,
    pub two_years_ago: NaiveDate,
    pub floor: NaiveDate,
}

impl RecencyWindows {
    pub fn current() -> Self {
        Self::relative_to(chrono::Local::now().date_naive())
    }

    pub fn relative_to(today: NaiveDate) -> Self {
        RecencyWindows {
            today,
            six_months_ago: today.checked_sub_months(Months::new(6)).unwrap_or(today),
            two_years_ago: today.checked_sub_months(Months::new(24)).unwrap_or(today),
            floor: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(today),
        }
    }
}

/// Recency percentages for one playlist.
#[derive(Debug, Clone)]
pub struct PlaylistRecency {
    pub name: String,
    pub total_tracks: u64,
    pub outdated: f64,
    pub recent: f64,
    pub in_between: f64,
}

pub fn playlist_recency(
    name: &str,
    total_tracks: u64,
    items: &[PlaylistItem],
    windows: &RecencyWindows,
) -> PlaylistRecency {
    PlaylistRecency {
        name: name.to_string(),
        total_tracks,
        outdated: window_percentage(items, windows.floor, windows.two_years_ago),
        recent: window_percentage(items, windows.six_months_ago, windows.today),
        in_between: window_percentage(items, windows.two_years_ago, windows.six_months_ago),
    }
}

pub fn count_in_window(items: &[PlaylistItem], lower: NaiveDate, upper: NaiveDate) -> usize {
    items
        .iter()
        .filter_map(|item| item.added_at.as_deref())
        .filter_map(|added| NaiveDate::parse_from_str(utils::date_prefix(added), "%Y-%m-%d").ok())
        .filter(|added| lower < *added && *added <= upper)
        .count()
}

pub fn window_percentage(items: &[PlaylistItem], lower: NaiveDate, upper: NaiveDate) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    percentage(count_in_window(items, lower, upper), items.len())
}

/// Rounds the fraction to four decimal places before scaling to percent, so
/// the rendered three-decimal percentages come out stable.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let fraction = count as f64 / total as f64;
    (fraction * 10_000.0).round() / 10_000.0 * 100.0
}

/// Renders the four sections of the basic playlist stats report: playlists
/// by track count, then by each recency percentage, every section sorted
/// descending.
pub fn render_basic_stats(stats: &[PlaylistRecency]) -> Vec<String> {
    let mut lines = Vec::new();

    let mut by_tracks: Vec<&PlaylistRecency> = stats.iter().collect();
    by_tracks.sort_by(|a, b| b.total_tracks.cmp(&a.total_tracks));
    lines.push("Playlists Ordered by # of Tracks:".to_string());
    lines.extend(by_tracks.iter().map(|p| format!("{}: {}", p.name, p.total_tracks)));

    percent_section(
        &mut lines,
        stats,
        "Playlists Ordered by Percentage of >2 Years old:",
        |p| p.outdated,
    );
    percent_section(
        &mut lines,
        stats,
        "Playlists Ordered by Percentage of <6 months old:",
        |p| p.recent,
    );
    percent_section(
        &mut lines,
        stats,
        "Playlists Ordered by Percentage of In Between:",
        |p| p.in_between,
    );

    lines
}

fn percent_section<F>(lines: &mut Vec<String>, stats: &[PlaylistRecency], heading: &str, value: F)
where
    F: Fn(&PlaylistRecency) -> f64,
{
    let mut sorted: Vec<&PlaylistRecency> = stats.iter().collect();
    sorted.sort_by(|a, b| {
        value(b)
            .partial_cmp(&value(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    lines.push(String::new());
    lines.push(heading.to_string());
    lines.extend(sorted.iter().map(|p| format!("{}: {:.3}%", p.name, value(p))));
}
