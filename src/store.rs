use std::{
    fmt,
    io::Error,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::types::{
    PlaylistItem, PlaylistTrackRecord, SavedTrackItem, SavedTrackRecord, SnapshotHeader,
    TopTrackRecord, Track,
};

pub const SNAPSHOT_SAVED_TRACKS: &str = "saved-tracks";
pub const SNAPSHOT_TOP_TRACKS: &str = "top-tracks";
pub const SNAPSHOT_PLAYLIST_TRACKS: &str = "playlist-tracks";

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug)]
pub enum SnapshotError {
    IoError(Error),
    SchemaError(String),
    SerdeError(serde_json::Error),
}

impl From<Error> for SnapshotError {
    fn from(err: Error) -> Self {
        SnapshotError::IoError(err)
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::IoError(e) => write!(f, "io error: {}", e),
            SnapshotError::SchemaError(msg) => write!(f, "{}", msg),
            SnapshotError::SerdeError(e) => write!(f, "serialization error: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Line-oriented snapshot files under `<output>/snapshots/`, one JSON record
/// per line with a header record first. Offline commands read these instead
/// of hitting the API.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(output_dir: &Path) -> Self {
        SnapshotStore {
            dir: output_dir.join("snapshots"),
        }
    }

    pub fn path(&self, kind: &str) -> PathBuf {
        self.dir.join(format!("{}.jsonl", kind))
    }

    pub async fn persist<T: Serialize>(&self, kind: &str, records: &[T]) -> Result<(), SnapshotError> {
        let path = self.path(kind);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| SnapshotError::IoError(e))?;
        }

        let header = SnapshotHeader {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            snapshot: kind.to_string(),
            generated_at: chrono::Local::now().to_rfc3339(),
        };

        let mut lines = Vec::with_capacity(records.len() + 1);
        lines.push(serde_json::to_string(&header).map_err(|e| SnapshotError::SerdeError(e))?);
        for record in records {
            lines.push(serde_json::to_string(record).map_err(|e| SnapshotError::SerdeError(e))?);
        }

        let mut content = lines.join("\n");
        content.push('\n');

        async_fs::write(path, content)
            .await
            .map_err(|e| SnapshotError::IoError(e))
    }

    pub async fn load<T: DeserializeOwned>(&self, kind: &str) -> Result<Vec<T>, SnapshotError> {
        let path = self.path(kind);
        let content = async_fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SnapshotError::SchemaError(format!(
                    "No '{}' snapshot at {}. Run soundcheck intersections first.",
                    kind,
                    path.display()
                ))
            } else {
                SnapshotError::IoError(e)
            }
        })?;

        let mut lines = content.lines();
        let header_line = lines
            .next()
            .ok_or_else(|| SnapshotError::SchemaError(format!("Snapshot '{}' is empty.", kind)))?;
        let header: SnapshotHeader =
            serde_json::from_str(header_line).map_err(|e| SnapshotError::SerdeError(e))?;

        if header.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(SnapshotError::SchemaError(format!(
                "Snapshot '{}' has schema version {}, this build reads version {}. Regenerate it.",
                kind, header.schema_version, SNAPSHOT_SCHEMA_VERSION
            )));
        }
        if header.snapshot != kind {
            return Err(SnapshotError::SchemaError(format!(
                "Snapshot file {} contains '{}' records, expected '{}'.",
                path.display(),
                header.snapshot,
                kind
            )));
        }

        // malformed record lines are skipped, not fatal
        let mut records = Vec::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Ok(record) = serde_json::from_str::<T>(line) {
                records.push(record);
            }
        }

        Ok(records)
    }
}

pub fn saved_track_records(items: &[SavedTrackItem]) -> Vec<SavedTrackRecord> {
    items
        .iter()
        .filter_map(|item| {
            let track = item.track.as_ref()?;
            let id = track.id.clone()?;
            Some(SavedTrackRecord {
                id,
                name: track.name.clone(),
                artist: track.primary_artist().to_string(),
                added_at: item.added_at.clone().unwrap_or_default(),
            })
        })
        .collect()
}

pub fn top_track_records(tracks: &[Track]) -> Vec<TopTrackRecord> {
    tracks
        .iter()
        .filter_map(|track| {
            let id = track.id.clone()?;
            Some(TopTrackRecord {
                id,
                name: track.name.clone(),
                artist: track.primary_artist().to_string(),
            })
        })
        .collect()
}

pub fn playlist_track_records(playlists: &[(String, Vec<PlaylistItem>)]) -> Vec<PlaylistTrackRecord> {
    let mut records = Vec::new();
    for (playlist, items) in playlists {
        for item in items {
            let Some(track) = item.track.as_ref() else {
                continue;
            };
            let Some(id) = track.id.clone() else {
                continue;
            };
            records.push(PlaylistTrackRecord {
                playlist: playlist.clone(),
                id,
                name: track.name.clone(),
                artist: track.primary_artist().to_string(),
            });
        }
    }
    records
}
