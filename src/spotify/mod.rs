//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by all
//! online commands. It implements authentication and read-only data
//! retrieval, and serves as the integration layer between soundcheck and
//! Spotify's services, handling HTTP communication, the OAuth flow, and
//! pagination.
//!
//! ## Architecture
//!
//! The module is organized by concern, with one submodule per domain:
//!
//! ```text
//! Application Layer (CLI handlers)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     └── Data Retrieval (Playlists, Library, Top Tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 PKCE (Proof Key for Code Exchange)
//! flow:
//! - **PKCE Security**: Cryptographically secure authentication without a
//!   client secret
//! - **Browser Integration**: Automatic browser launch for user authorization
//! - **Console Code Entry**: The authorization code is pasted back from the
//!   redirect URL; no local callback server is started
//! - **Single-Use Tokens**: Tokens live only for the duration of one command
//!   invocation and are never written to disk
//!
//! ### Client Module
//!
//! [`client`] - Read-only access to the Web API endpoints the analysis
//! commands consume:
//! - **User Playlists**: The current user's playlists, filtered down to the
//!   ones they own
//! - **Playlist Tracks**: A single playlist with its complete track listing
//! - **Saved Library**: The user's saved tracks in library order
//! - **Top Tracks**: The personalized top-track ranking for a time range
//! - **Cursor Pagination**: Follows Spotify's `next` URLs until a collection
//!   is exhausted or the page ceiling is reached
//!
//! ## Error Handling
//!
//! Any non-success HTTP status is treated as fatal: the status code and
//! response body are surfaced to the caller and the command aborts. There is
//! no retry, backoff, or rate-limit handling; a failed request fails the run.
//!
//! ## API Coverage
//!
//! - `GET /me/playlists` - User's playlists with pagination
//! - `GET /playlists/{id}` - Playlist details including the track listing
//! - `GET /me/tracks` - Saved-track library with pagination
//! - `GET /me/top/tracks` - Top tracks for a given time range
//! - `POST /api/token` - Authorization-code exchange
//!
//! ## Security Considerations
//!
//! - **No Secrets Storage**: Client secrets are neither required nor stored
//! - **No Token Persistence**: Access tokens never touch the filesystem
//! - **HTTPS Only**: All API communication uses HTTPS
//! - **Limited Scope**: Each command requests only the scopes it needs

pub mod auth;
pub mod client;
