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
    stats::{frequency, intersect},
    store::{self, SnapshotStore},
    success,
    types::{PlaylistItem, Track},
    utils::TimeRange,
};

const INTERSECTIONS_SCOPE: &str =
    "playlist-read-private playlist-read-collaborative user-library-read user-top-read";

pub async fn intersections(config: &Config, time_range: TimeRange) {
    let started = Instant::now();

    let token = match auth::authorize(config, INTERSECTIONS_SCOPE).await {
        Ok(token) => token,
        Err(e) => {
            error!("{}", e);
        }
    };
    let client = SpotifyClient::new(&token);

    let playlists: Vec<(String, Vec<PlaylistItem>)> =
        super::playlists::fetch_playlist_tracks(&client)
            .await
            .into_iter()
            .map(|(summary, items)| (summary.name, items))
            .collect();
    let saved = super::saved::fetch_saved_tracks(&client).await;
    let top = fetch_top_tracks(&client, time_range).await;

    info!("Processing song intersections...");
    let frequencies = frequency::playlist_frequencies(&playlists);
    let saved_records = store::saved_track_records(&saved);
    let top_records = store::top_track_records(&top);
    let reports = intersect::intersections(&saved_records, &top_records, &frequencies.tracks);

    let writer = ReportWriter::new(&config.output_dir);
    let files: [(&str, &Vec<String>); 12] = [
        ("savedSongs.txt", &reports.saved),
        ("topSongs.txt", &reports.top),
        ("savedSongsInTopSongs.txt", &reports.saved_in_top),
        ("savedSongsNotInTopSongs.txt", &reports.saved_not_in_top),
        ("topSongsNotInSavedSongs.txt", &reports.top_not_in_saved),
        ("savedSongsInPlaylists.txt", &reports.saved_in_playlists),
        ("savedSongsNotInPlaylists.txt", &reports.saved_not_in_playlists),
        (
            "playlistSongsNotInSavedSongs.txt",
            &reports.playlist_not_in_saved,
        ),
        (
            "remove-savedSongsNotInTopSongsOrPlaylists.txt",
            &reports.remove_candidates,
        ),
        (
            "savedSongsNotInTopSongsButInPlaylists.txt",
            &reports.saved_not_in_top_but_in_playlists,
        ),
        (
            "savedSongsInTopSongsButNotInPlaylists.txt",
            &reports.saved_in_top_not_in_playlists,
        ),
        (
            "add-unsavedSongsInTopSongsAndInMultiplePlaylists.txt",
            &reports.add_candidates,
        ),
    ];

    for (name, lines) in files {
        info!("Writing {}...", name);
        if let Err(e) = writer
            .write_dated(&format!("intersections/{}", name), lines)
            .await
        {
            error!("Failed to write {}: {}", name, e);
        }
    }

    let snapshots = SnapshotStore::new(&config.output_dir);
    let playlist_records = store::playlist_track_records(&playlists);
    if let Err(e) = snapshots
        .persist(store::SNAPSHOT_SAVED_TRACKS, &saved_records)
        .await
    {
        error!("Failed to write saved-tracks snapshot: {}", e);
    }
    if let Err(e) = snapshots
        .persist(store::SNAPSHOT_TOP_TRACKS, &top_records)
        .await
    {
        error!("Failed to write top-tracks snapshot: {}", e);
    }
    if let Err(e) = snapshots
        .persist(store::SNAPSHOT_PLAYLIST_TRACKS, &playlist_records)
        .await
    {
        error!("Failed to write playlist-tracks snapshot: {}", e);
    }

    println!();
    success!("Complete!");
    info!("Wrote {} saved songs to savedSongs.txt", reports.saved.len());
    info!("Wrote {} top songs to topSongs.txt", reports.top.len());
    info!(
        "Wrote {} songs to savedSongsInTopSongs.txt",
        reports.saved_in_top.len()
    );
    info!(
        "Wrote {} songs to savedSongsNotInTopSongs.txt",
        reports.saved_not_in_top.len()
    );
    info!(
        "Wrote {} songs to topSongsNotInSavedSongs.txt",
        reports.top_not_in_saved.len()
    );
    info!(
        "Wrote {} songs to savedSongsInPlaylists.txt",
        reports.saved_in_playlists.len()
    );
    info!(
        "Wrote {} songs to savedSongsNotInPlaylists.txt",
        reports.saved_not_in_playlists.len()
    );
    info!(
        "Wrote {} songs to playlistSongsNotInSavedSongs.txt",
        reports.playlist_not_in_saved.len()
    );
    info!(
        "Wrote {} songs to savedSongsNotInTopSongsButInPlaylists.txt",
        reports.saved_not_in_top_but_in_playlists.len()
    );
    info!(
        "Wrote {} songs to savedSongsInTopSongsButNotInPlaylists.txt",
        reports.saved_in_top_not_in_playlists.len()
    );
    info!(
        "Wrote {} songs to add-unsavedSongsInTopSongsAndInMultiplePlaylists.txt",
        reports.add_candidates.len()
    );
    info!(
        "Wrote {} songs to remove-savedSongsNotInTopSongsOrPlaylists.txt",
        reports.remove_candidates.len()
    );
    info!(
        "Total time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
}

async fn fetch_top_tracks(client: &SpotifyClient, time_range: TimeRange) -> Vec<Track> {
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching top songs ({})...", time_range));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let top = match client.top_tracks(time_range, Paging::default()).await {
        Ok(tracks) => tracks,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    pb.finish_and_clear();
    info!("Found {} top songs.", top.len());

    top
}
