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
    stats::{intersect, library},
    store::{self, SnapshotStore},
    success,
    types::{PlaylistItem, SavedTrackItem, TopTrackRecord, Track},
};

const LIBRARY_SCOPE: &str = "user-library-read";
const ORPHANS_SCOPE: &str =
    "playlist-read-private playlist-read-collaborative user-library-read";

pub async fn saved_stats(config: &Config) {
    let started = Instant::now();

    let token = match auth::authorize(config, LIBRARY_SCOPE).await {
        Ok(token) => token,
        Err(e) => {
            error!("{}", e);
        }
    };
    let client = SpotifyClient::new(&token);

    let saved = fetch_saved_tracks(&client).await;

    info!("Processing saved songs...");
    let tracks: Vec<&Track> = saved.iter().filter_map(|item| item.track.as_ref()).collect();
    let artists = library::artist_counts(&tracks);
    let albums = library::album_counts(&tracks);
    let duplicates = library::find_duplicates(&tracks);
    let by_popularity = library::render_by_popularity(&tracks);
    let by_duration = library::render_by_duration(&tracks);
    let by_release_date = library::render_by_release_date(&tracks);

    let writer = ReportWriter::new(&config.output_dir);

    info!("Writing most frequent artists...");
    write_dated_report(
        &writer,
        "saved-songs/mostFrequentArtistsInSavedSongs.txt",
        &library::render_artist_counts(&artists),
    )
    .await;

    info!("Writing most frequent albums...");
    write_dated_report(
        &writer,
        "saved-songs/mostFrequentAlbumsInSavedSongs.txt",
        &library::render_album_counts(&albums),
    )
    .await;

    info!("Writing songs ordered by popularity...");
    write_dated_report(&writer, "saved-songs/songsOrderedByPopularity.txt", &by_popularity).await;

    info!("Writing songs ordered by duration...");
    write_dated_report(&writer, "saved-songs/songsOrderedByDuration.txt", &by_duration).await;

    info!("Writing songs ordered by release date...");
    write_dated_report(
        &writer,
        "saved-songs/songsOrderedByReleaseDate.txt",
        &by_release_date,
    )
    .await;

    info!("Writing duplicates...");
    write_dated_report(
        &writer,
        "saved-songs/repeats.txt",
        &library::render_duplicates(&duplicates),
    )
    .await;

    let snapshots = SnapshotStore::new(&config.output_dir);
    let records = store::saved_track_records(&saved);
    if let Err(e) = snapshots.persist(store::SNAPSHOT_SAVED_TRACKS, &records).await {
        error!("Failed to write saved-tracks snapshot: {}", e);
    }

    println!();
    success!("Complete!");
    info!(
        "Wrote {} unique artists to mostFrequentArtistsInSavedSongs.txt",
        artists.len()
    );
    info!(
        "Wrote {} unique albums to mostFrequentAlbumsInSavedSongs.txt",
        albums.len()
    );
    info!(
        "Wrote {} songs to songsOrderedByPopularity.txt",
        by_popularity.len()
    );
    info!(
        "Wrote {} songs to songsOrderedByDuration.txt",
        by_duration.len()
    );
    info!(
        "Wrote {} songs to songsOrderedByReleaseDate.txt",
        by_release_date.len()
    );
    info!("Wrote {} duplicates to repeats.txt", duplicates.len());
    info!(
        "Total time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
}

pub async fn saved_orphans(config: &Config, exclude_top: bool) {
    let started = Instant::now();

    let token = match auth::authorize(config, ORPHANS_SCOPE).await {
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
    let saved = fetch_saved_tracks(&client).await;

    let membership = intersect::playlist_membership(&playlists);
    let records = store::saved_track_records(&saved);
    let orphans = intersect::orphans(&records, &membership);

    let writer = ReportWriter::new(&config.output_dir);
    let lines = intersect::render_track_records(&orphans);
    if let Err(e) = writer.write("savedSongsInNoPlaylists.txt", &lines).await {
        error!("Failed to write savedSongsInNoPlaylists.txt: {}", e);
    }
    success!(
        "Wrote {} saved songs not in any playlist to savedSongsInNoPlaylists.txt",
        orphans.len()
    );

    if exclude_top {
        let snapshots = SnapshotStore::new(&config.output_dir);
        let top: Vec<TopTrackRecord> = match snapshots.load(store::SNAPSHOT_TOP_TRACKS).await {
            Ok(records) => records,
            Err(e) => {
                error!("{}", e);
            }
        };

        let pruned = intersect::orphans_not_in_top(&orphans, &top);
        let lines = intersect::render_track_records(&pruned);
        if let Err(e) = writer
            .write("savedSongsInNoPlaylistsAndNotTopPlayed.txt", &lines)
            .await
        {
            error!("Failed to write savedSongsInNoPlaylistsAndNotTopPlayed.txt: {}", e);
        }
        success!(
            "Wrote {} lines to savedSongsInNoPlaylistsAndNotTopPlayed.txt",
            pruned.len()
        );
    }

    info!(
        "Total time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
}

/// Fetches the complete saved-track library with spinner feedback.
pub(crate) async fn fetch_saved_tracks(client: &SpotifyClient) -> Vec<SavedTrackItem> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching saved songs...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let saved = match client.saved_tracks(Paging::default()).await {
        Ok(items) => items,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    pb.finish_and_clear();
    info!("Found {} saved songs.", saved.len());

    saved
}

async fn write_dated_report(writer: &ReportWriter, relative: &str, lines: &[String]) {
    if let Err(e) = writer.write_dated(relative, lines).await {
        error!("Failed to write {}: {}", relative, e);
    }
}
