//! # CLI Module
//!
//! This module provides the command-line interface layer for Soundcheck, a
//! Spotify API client that turns a user's playlists, saved tracks, and top
//! tracks into flat text reports. It implements all user-facing CLI commands
//! and coordinates between authorization, the fetch client, the pure analysis
//! passes, and the report and snapshot writers.
//!
//! ## Overview
//!
//! The CLI module is the primary interface between users and Soundcheck's
//! functionality. It provides commands for:
//!
//! - **Playlist Analysis**: Recency distributions, cross-playlist frequency
//!   rankings, pairwise overlap counts, and listening timelines
//! - **Saved-Library Analysis**: Artist/album frequencies, orderings by
//!   popularity, duration, and release date, and duplicate detection
//! - **Intersections**: The full saved/top/playlist set-relation report suite
//! - **Favorites**: A weighted composite score over all three collections
//!
//! ## Command Categories
//!
//! ### Fetch Commands
//!
//! These authorize against the Spotify Web API, fetch one or more
//! collections page by page, and write reports plus snapshots:
//!
//! - [`playlist_stats`] - Recency and frequency reports over every playlist
//! - [`playlist_timeline`] - Start/crossfade timestamps for one playlist
//! - [`saved_stats`] - Saved-library statistics and duplicate detection
//! - [`saved_orphans`] - Saved tracks that appear in no playlist
//! - [`intersections`] - Twelve set-relation reports plus all snapshots
//!
//! ### Offline Commands
//!
//! These read snapshots written by an earlier fetch command and never touch
//! the network:
//!
//! - [`playlist_overlaps`] - Pairwise shared-track counts between playlists
//! - [`favorites`] - Weighted favorite-song scoring against a curated list
//!
//! ## Architecture Design
//!
//! The CLI module follows a layered architecture approach:
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Analysis Layer (Pure Computation)
//!     ↓
//! API Layer (Spotify Integration)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Each CLI command authorizes with exactly the OAuth scope it needs,
//! delegates computation to [`crate::stats`], and handles user interaction,
//! progress feedback, and error presentation itself.
//!
//! ## Data Flow Patterns
//!
//! ### Fetch Operations
//! 1. **Authorization**: Run the PKCE flow with the command's scope
//! 2. **Collection Fetch**: Follow pagination cursors with spinner feedback
//! 3. **Analysis**: Build frequency maps, set relations, or scores in memory
//! 4. **Report Output**: Write one text file per report, overwriting
//! 5. **Snapshot Output**: Persist fetched records for offline commands
//!
//! ### Offline Operations
//! 1. **Snapshot Loading**: Read record-per-line snapshot files
//! 2. **Analysis**: Same pure passes as fetch operations
//! 3. **Report Output**: Write the report and print a summary
//!
//! ## Error Handling Philosophy
//!
//! The CLI module implements user-friendly error handling:
//!
//! - **Fatal by Default**: A failed request or write stops the run with a
//!   non-zero exit; there is no partial-result checkpointing
//! - **Helpful Messages**: Missing snapshots and credentials report which
//!   command or setting produces them
//! - **Context Preservation**: HTTP failures carry status code and body
//!
//! ## Progress and User Experience
//!
//! All long-running fetches provide comprehensive user feedback:
//!
//! - **Progress Indicators**: Spinners with per-playlist progress counters
//! - **Status Messages**: Informative messages about the current phase
//! - **Success Confirmation**: Per-report line counts after writing
//! - **Detailed Output**: Rich formatting using tables and color coding

mod favorites;
mod intersections;
mod playlists;
mod saved;

pub use favorites::favorites;
pub use intersections::intersections;
pub use playlists::playlist_overlaps;
pub use playlists::playlist_stats;
pub use playlists::playlist_timeline;
pub use saved::saved_orphans;
pub use saved::saved_stats;
