//! # Statistics Module
//!
//! Analysis passes over fetched and snapshotted track data. Everything in
//! here is pure computation: the functions take slices of tracks or records,
//! produce aggregate structures or ready-to-write report lines, and never
//! perform I/O. The CLI handlers own fetching, snapshot access, and file
//! writing.
//!
//! ## Submodules
//!
//! - [`recency`] - buckets playlist tracks into recently added, outdated,
//!   and in-between windows and renders the per-playlist percentage report
//! - [`frequency`] - counts how often tracks, artists, and albums appear
//!   across all playlists, with per-playlist breakdowns
//! - [`library`] - saved-library passes: artist and album counts, the
//!   popularity, duration, and release-date orderings, and duplicate
//!   detection
//! - [`intersect`] - the full set-comparison suite between the saved
//!   library, the top-track ranking, and playlist contents
//! - [`overlap`] - counts tracks shared between pairs of playlists
//! - [`score`] - composite favorite-song scoring from top-track rank,
//!   playlist presence, and the hand-curated top-100 list
//! - [`timeline`] - cumulative play-time timeline for a single playlist,
//!   with and without crossfade
//!
//! ## Ordering Conventions
//!
//! Count-ranked reports sort by count descending with ties broken by name
//! ascending. Orderings over floating-point scores sort descending and rely
//! on the sort being stable to keep input order for exact ties.

pub mod frequency;
pub mod intersect;
pub mod library;
pub mod overlap;
pub mod recency;
pub mod score;
pub mod timeline;
