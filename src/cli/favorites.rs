use tabled::Table;

use crate::{
    config::Config,
    error, info,
    report::ReportWriter,
    stats::score::{self, CuratedList},
    store::{self, SnapshotStore},
    success,
    types::{FavoriteTableRow, PlaylistTrackRecord, SavedTrackRecord, TopTrackRecord},
    utils,
};

const CURATED_FILE: &str = "favorite-songs/my-top-100.txt";
const GENERATED_FILE: &str = "favorite-songs/generated-favorite-songs.txt";

pub async fn favorites(config: &Config) {
    let snapshots = SnapshotStore::new(&config.output_dir);
    let saved: Vec<SavedTrackRecord> = match snapshots.load(store::SNAPSHOT_SAVED_TRACKS).await {
        Ok(records) => records,
        Err(e) => {
            error!("{}", e);
        }
    };
    let top: Vec<TopTrackRecord> = match snapshots.load(store::SNAPSHOT_TOP_TRACKS).await {
        Ok(records) => records,
        Err(e) => {
            error!("{}", e);
        }
    };
    let playlist_tracks: Vec<PlaylistTrackRecord> =
        match snapshots.load(store::SNAPSHOT_PLAYLIST_TRACKS).await {
            Ok(records) => records,
            Err(e) => {
                error!("{}", e);
            }
        };

    let writer = ReportWriter::new(&config.output_dir);
    let curated_path = writer.path(CURATED_FILE);
    let content = match async_fs::read_to_string(&curated_path).await {
        Ok(content) => content,
        Err(e) => {
            error!(
                "Cannot read the curated list at {}: {}. Add your ranked favorites there, one per line as 'N) Song Name | ARTIST'.",
                curated_path.display(),
                e
            );
        }
    };
    let curated = CuratedList::parse(&content);

    let songs = score::favorite_scores(&saved, &top, &playlist_tracks, &curated);
    let lines = score::render_favorites(&songs);

    if let Err(e) = writer.write_dated(GENERATED_FILE, &lines).await {
        error!("Failed to write generated-favorite-songs.txt: {}", e);
    }

    success!(
        "Generated favorite songs file: {}",
        writer.path(GENERATED_FILE).display()
    );
    info!("Total songs processed: {}", songs.len());
    info!("Top 5 songs:");

    let rows: Vec<FavoriteTableRow> = songs
        .iter()
        .take(5)
        .map(|song| FavoriteTableRow {
            score: utils::format_score(song.score),
            name: song.name.clone(),
            artist: song.artist.clone(),
        })
        .collect();
    let table = Table::new(rows);
    println!("{}", table);
}
