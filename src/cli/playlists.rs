use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::Config,
    error, info,
    report::ReportWriter,
    spotify::{
        auth,
        client::{Paging, SpotifyClient},
    },
    stats::{frequency, overlap, recency, timeline},
    store::{self, SnapshotStore},
    success,
    types::{PlaylistItem, PlaylistSummary, PlaylistTrackRecord},
};

const PLAYLIST_SCOPE: &str = "playlist-read-private playlist-read-collaborative";

pub async fn playlist_stats(config: &Config) {
    let started = Instant::now();

    let token = match auth::authorize(config, PLAYLIST_SCOPE).await {
        Ok(token) => token,
        Err(e) => {
            error!("{}", e);
        }
    };
    let client = SpotifyClient::new(&token);

    let playlists = fetch_playlist_tracks(&client).await;

    let windows = recency::RecencyWindows::current();
    let recency_stats: Vec<recency::PlaylistRecency> = playlists
        .iter()
        .map(|(summary, items)| {
            recency::playlist_recency(&summary.name, summary.tracks.total, items, &windows)
        })
        .collect();

    let playlists: Vec<(String, Vec<PlaylistItem>)> = playlists
        .into_iter()
        .map(|(summary, items)| (summary.name, items))
        .collect();
    let frequencies = frequency::playlist_frequencies(&playlists);

    let writer = ReportWriter::new(&config.output_dir);

    info!("Writing basic playlist stats...");
    if let Err(e) = writer
        .write(
            "playlist-songs/basicPlaylistStats.txt",
            &recency::render_basic_stats(&recency_stats),
        )
        .await
    {
        error!("Failed to write basicPlaylistStats.txt: {}", e);
    }

    info!("Writing most frequent songs...");
    if let Err(e) = writer
        .write(
            "playlist-songs/mostFrequentPlaylistSongs.txt",
            &frequency::render_track_frequencies(&frequencies.tracks),
        )
        .await
    {
        error!("Failed to write mostFrequentPlaylistSongs.txt: {}", e);
    }

    info!("Writing most frequent artists...");
    if let Err(e) = writer
        .write(
            "playlist-songs/mostFrequentPlaylistSongArtists.txt",
            &frequency::render_group_frequencies(&frequencies.artists),
        )
        .await
    {
        error!("Failed to write mostFrequentPlaylistSongArtists.txt: {}", e);
    }

    info!("Writing most frequent albums...");
    if let Err(e) = writer
        .write(
            "playlist-songs/mostFrequentPlaylistSongAlbums.txt",
            &frequency::render_group_frequencies(&frequencies.albums),
        )
        .await
    {
        error!("Failed to write mostFrequentPlaylistSongAlbums.txt: {}", e);
    }

    let snapshots = SnapshotStore::new(&config.output_dir);
    let records = store::playlist_track_records(&playlists);
    if let Err(e) = snapshots
        .persist(store::SNAPSHOT_PLAYLIST_TRACKS, &records)
        .await
    {
        error!("Failed to write playlist-tracks snapshot: {}", e);
    }

    println!();
    success!("Complete!");
    info!(
        "Wrote {} unique songs to mostFrequentPlaylistSongs.txt",
        frequencies.tracks.len()
    );
    info!(
        "Wrote {} unique artists to mostFrequentPlaylistSongArtists.txt",
        frequencies.artists.len()
    );
    info!(
        "Wrote {} unique albums to mostFrequentPlaylistSongAlbums.txt",
        frequencies.albums.len()
    );
    info!(
        "Total time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
}

pub async fn playlist_overlaps(config: &Config, min_shared: u32, top: Option<usize>) {
    let snapshots = SnapshotStore::new(&config.output_dir);
    let records: Vec<PlaylistTrackRecord> =
        match snapshots.load(store::SNAPSHOT_PLAYLIST_TRACKS).await {
            Ok(records) => records,
            Err(e) => {
                error!("{}", e);
            }
        };

    let overlaps = overlap::count_overlaps(&records);
    let writer = ReportWriter::new(&config.output_dir);

    match top {
        Some(n) => {
            let top_pairs = overlap::top_overlaps(&overlaps, n);
            let lines = overlap::render_overlaps(&top_pairs);
            if let Err(e) = writer.write("top100PlaylistOverlaps.txt", &lines).await {
                error!("Failed to write top100PlaylistOverlaps.txt: {}", e);
            }
            success!(
                "Wrote top {} playlist overlaps to {}",
                n,
                writer.path("top100PlaylistOverlaps.txt").display()
            );
        }
        None => {
            let filtered = overlap::with_min_shared(&overlaps, min_shared);
            let lines = overlap::render_overlaps(&filtered);
            if let Err(e) = writer.write_dated("playlistOverlaps.txt", &lines).await {
                error!("Failed to write playlistOverlaps.txt: {}", e);
            }
            success!(
                "Wrote {} playlist overlaps (with at least {} common songs) to {}",
                lines.len(),
                min_shared,
                writer.path("playlistOverlaps.txt").display()
            );
        }
    }
}

pub async fn playlist_timeline(config: &Config, playlist_id: &str, crossfade: u64) {
    let started = Instant::now();

    let token = match auth::authorize(config, PLAYLIST_SCOPE).await {
        Ok(token) => token,
        Err(e) => {
            error!("{}", e);
        }
    };
    let client = SpotifyClient::new(&token);

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching playlist {}...", playlist_id));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let detail = match client.playlist(playlist_id, Paging::default()).await {
        Ok(detail) => detail,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    pb.finish_and_clear();
    info!("Found {} track items in playlist.", detail.tracks.items.len());

    let rows = timeline::timeline_rows(&detail.tracks.items, crossfade);
    let lines = timeline::render_timeline(&rows);

    let writer = ReportWriter::new(&config.output_dir);
    if let Err(e) = writer
        .write_dated("playlistSongsWithTimestamps.txt", &lines)
        .await
    {
        error!("Failed to write playlistSongsWithTimestamps.txt: {}", e);
    }

    success!(
        "Wrote {} lines to {}",
        lines.len(),
        writer.path("playlistSongsWithTimestamps.txt").display()
    );
    info!("Completed in {:.2}s", started.elapsed().as_secs_f64());
}

/// Fetches every playlist summary and then the full track listing of each,
/// with spinner feedback per playlist.
pub(crate) async fn fetch_playlist_tracks(
    client: &SpotifyClient,
) -> Vec<(PlaylistSummary, Vec<PlaylistItem>)> {
    let summaries = fetch_playlists(client).await;
    let total = summaries.len();

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut playlists = Vec::with_capacity(total);
    for (index, summary) in summaries.into_iter().enumerate() {
        pb.set_message(format!(
            "Processing: {}, Tracks: {} ({}/{})",
            summary.name,
            summary.tracks.total,
            index + 1,
            total
        ));

        let detail = match client.playlist(&summary.id, Paging::default()).await {
            Ok(detail) => detail,
            Err(e) => {
                pb.finish_and_clear();
                error!("{}", e);
            }
        };
        playlists.push((summary, detail.tracks.items));
    }
    pb.finish_and_clear();

    playlists
}

async fn fetch_playlists(client: &SpotifyClient) -> Vec<PlaylistSummary> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let summaries = match client.current_user_playlists(Paging::default()).await {
        Ok(summaries) => summaries,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    pb.finish_and_clear();
    info!("Found {} playlists.", summaries.len());

    summaries
}
