use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    Res,
    types::{
        PlaylistDetail, PlaylistSummary, PlaylistTracksPage, PlaylistsPage, SavedTrackItem,
        SavedTracksPage, TokenResponse, TopTracksPage, Track,
    },
    utils::TimeRange,
};

/// Base URL of the Spotify Web API.
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Display name of the account whose playlists are analyzed. The playlists
/// endpoint also returns followed and collaborative playlists owned by other
/// users; those are dropped.
pub const PLAYLIST_OWNER: &str = "eliasjohnsondow";

/// Spotify-generated playlist that shows up under the user's own playlists
/// and is excluded from every analysis.
pub const EXCLUDED_PLAYLIST: &str = "On Repeat 🎧";

// Saved-track fetches pin a market so relinked tracks resolve to one id.
const SAVED_TRACKS_MARKET: &str = "ES";

/// Pagination parameters shared by all listing endpoints.
///
/// `limit` is the page size sent to Spotify (the API maximum is 50).
/// `max_pages` is a hard stop on the number of pages followed per
/// collection, so a bad `next` cursor can never loop forever.
#[derive(Debug, Clone, Copy)]
pub struct Paging {
    pub limit: u32,
    pub max_pages: u32,
}

impl Default for Paging {
    fn default() -> Self {
        Paging {
            limit: 50,
            max_pages: 100,
        }
    }
}

/// Read-only client over the Spotify Web API endpoints used by the analysis
/// commands.
///
/// A client is constructed from the token obtained through the PKCE flow and
/// sends it as a bearer token on every request. Constructing the client from
/// a token makes an unauthorized request unrepresentable; there is no
/// "not yet authorized" state to check for.
///
/// All listing endpoints paginate the same way: the first page is requested
/// with the configured limit, then the `next` URL returned by Spotify is
/// followed verbatim until it is `null` or the page ceiling is reached.
///
/// # Example
///
/// ```
/// let token = auth::authorize(&config, "user-library-read").await?;
/// let client = SpotifyClient::new(&token);
/// let saved = client.saved_tracks(Paging::default()).await?;
/// ```
pub struct SpotifyClient {
    http: Client,
    token: String,
    api_base: String,
}

impl SpotifyClient {
    /// Creates a client for the public Spotify Web API.
    pub fn new(token: &TokenResponse) -> Self {
        Self::with_api_base(token, SPOTIFY_API_URL)
    }

    /// Creates a client against an alternate base URL. Integration tests use
    /// this to point the client at a local mock server.
    pub fn with_api_base(token: &TokenResponse, api_base: impl Into<String>) -> Self {
        SpotifyClient {
            http: Client::new(),
            token: token.access_token.clone(),
            api_base: api_base.into(),
        }
    }

    /// Fetches all playlists of the current user and keeps only the ones
    /// owned by [`PLAYLIST_OWNER`], skipping [`EXCLUDED_PLAYLIST`].
    ///
    /// # Returns
    ///
    /// Playlist summaries in the order Spotify returns them. The summaries
    /// carry the total track count but not the tracks themselves; use
    /// [`SpotifyClient::playlist`] for the full listing.
    pub async fn current_user_playlists(&self, paging: Paging) -> Res<Vec<PlaylistSummary>> {
        let mut playlists: Vec<PlaylistSummary> = Vec::new();
        let mut next = Some(format!(
            "{}/me/playlists?limit={}&offset=0",
            self.api_base, paging.limit
        ));

        let mut pages = 0;
        while let Some(url) = next {
            if pages >= paging.max_pages {
                break;
            }

            let page: PlaylistsPage = self.get_json(&url, "Failed to get playlists").await?;
            playlists.extend(page.items.into_iter().filter(is_own_playlist));
            next = page.next;
            pages += 1;
        }

        Ok(playlists)
    }

    /// Fetches a single playlist with its complete track listing.
    ///
    /// The playlist endpoint embeds the first page of tracks; the remaining
    /// pages are fetched through the embedded `next` cursor and appended, so
    /// the returned detail always carries every track.
    pub async fn playlist(&self, playlist_id: &str, paging: Paging) -> Res<PlaylistDetail> {
        let url = format!("{}/playlists/{}", self.api_base, playlist_id);
        let mut detail: PlaylistDetail = self.get_json(&url, "Failed to get playlist").await?;

        let mut next = detail.tracks.next.take();
        let mut pages = 1;
        while let Some(url) = next {
            if pages >= paging.max_pages {
                break;
            }

            let page: PlaylistTracksPage =
                self.get_json(&url, "Failed to get playlist tracks").await?;
            detail.tracks.items.extend(page.items);
            next = page.next;
            pages += 1;
        }

        Ok(detail)
    }

    /// Fetches the user's saved-track library in library order.
    pub async fn saved_tracks(&self, paging: Paging) -> Res<Vec<SavedTrackItem>> {
        let mut items: Vec<SavedTrackItem> = Vec::new();
        let mut next = Some(format!(
            "{}/me/tracks?market={}&limit={}&offset=0",
            self.api_base, SAVED_TRACKS_MARKET, paging.limit
        ));

        let mut pages = 0;
        while let Some(url) = next {
            if pages >= paging.max_pages {
                break;
            }

            let page: SavedTracksPage = self.get_json(&url, "Failed to get saved songs").await?;
            items.extend(page.items);
            next = page.next;
            pages += 1;
        }

        Ok(items)
    }

    /// Fetches the user's top tracks for the given time range, most played
    /// first.
    pub async fn top_tracks(&self, time_range: TimeRange, paging: Paging) -> Res<Vec<Track>> {
        let mut tracks: Vec<Track> = Vec::new();
        let mut next = Some(format!(
            "{}/me/top/tracks?time_range={}&limit={}&offset=0",
            self.api_base, time_range, paging.limit
        ));

        let mut pages = 0;
        while let Some(url) = next {
            if pages >= paging.max_pages {
                break;
            }

            let page: TopTracksPage = self.get_json(&url, "Failed to get top songs").await?;
            tracks.extend(page.items);
            next = page.next;
            pages += 1;
        }

        Ok(tracks)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, context: &str) -> Res<T> {
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("{}: {}, {}", context, status, body).into());
        }

        Ok(response.json::<T>().await?)
    }
}

/// Keeps playlists owned by [`PLAYLIST_OWNER`], excluding
/// [`EXCLUDED_PLAYLIST`].
pub fn is_own_playlist(playlist: &PlaylistSummary) -> bool {
    playlist.owner.display_name.as_deref() == Some(PLAYLIST_OWNER)
        && playlist.name != EXCLUDED_PLAYLIST
}
