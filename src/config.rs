//! Runtime configuration for the soundcheck CLI.
//!
//! All configuration comes from environment variables, optionally seeded from
//! a `.env` file. Two locations are consulted, in order: a per-user file under
//! the platform data directory (e.g. `~/.local/share/soundcheck/.env`) and a
//! `.env` in the current working directory. Values already present in the
//! process environment always win.
//!
//! Recognized variables:
//!
//! - `SPOTIFY_CLIENT_ID` - client id of the registered Spotify application.
//!   Only needed by commands that talk to the Web API; offline commands run
//!   without it.
//! - `SPOTIFY_REDIRECT_URI` - redirect URI registered for the application.
//!   Defaults to `http://127.0.0.1:8080/callback`.
//! - `SOUNDCHECK_OUTPUT_DIR` - directory that receives report files and
//!   snapshots. Defaults to the current working directory. A leading `~/` is
//!   expanded to the user's home directory.

use std::{env, path::PathBuf};

/// Resolved configuration, built once at startup and passed to every
/// component that needs it. Nothing else in the crate reads the process
/// environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: Option<String>,
    pub redirect_uri: String,
    pub output_dir: PathBuf,
}

impl Config {
    /// Loads `.env` files and resolves all recognized variables, applying
    /// defaults for the optional ones. A missing `SPOTIFY_CLIENT_ID` is not
    /// an error here; commands that need it report one when they try to
    /// authorize.
    pub fn from_env() -> Self {
        if let Some(data_dir) = dirs::data_local_dir() {
            let env_file = data_dir.join("soundcheck").join(".env");
            if env_file.exists() {
                let _ = dotenv::from_path(&env_file);
            }
        }
        let _ = dotenv::dotenv();

        let client_id = env::var("SPOTIFY_CLIENT_ID").ok().filter(|v| !v.is_empty());

        let redirect_uri = env::var("SPOTIFY_REDIRECT_URI")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "http://127.0.0.1:8080/callback".to_string());

        let output_dir = env::var("SOUNDCHECK_OUTPUT_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| expand_home(&v))
            .unwrap_or_else(|| PathBuf::from("."));

        Config {
            client_id,
            redirect_uri,
            output_dir,
        }
    }
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
