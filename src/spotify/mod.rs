//! # Spotify Integration Module
//!
//! Read-only access to the Spotify Web API: just enough to turn a playlist
//! into an ordered list of [`TrackReference`](crate::types::TrackReference)s.
//!
//! ## Architecture
//!
//! ```text
//! Pipeline
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 Client Credentials)
//!     └── Playlist Reading (paginated track listing)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Exchanges the application's client ID and secret for an app
//!   access token. No user login is involved.
//! - [`playlist`] - Follows the `next` links of `GET /playlists/{id}/tracks`
//!   until the last page and reduces each item to a track reference.
//!
//! ## Error Handling
//!
//! Catalog access is all-or-nothing. Any non-success status (bad
//! credentials, unknown playlist, rate limiting) or transport error is
//! returned as [`Error::Catalog`](crate::error::Error::Catalog) or
//! [`Error::Http`](crate::error::Error::Http) and ends the run. Requests are
//! never retried.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Client credentials grant
//! - `GET /playlists/{playlist_id}/tracks` - Playlist items with pagination
//!
//! ## Testing Seam
//!
//! The playlist reader depends on the [`Catalog`] trait rather than on
//! [`SpotifyClient`] directly, so pagination can be exercised with in-memory
//! pages.

pub mod auth;
pub mod playlist;

use reqwest::{Client, Response};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config::{self, Credentials},
    error::{Error, Result},
    management::TokenManager,
    types::PlaylistTracksPage,
};

/// Maximum page size accepted by the playlist items endpoint.
pub const PAGE_LIMIT: u32 = 100;

/// Source of playlist pages.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Fetches the first page of items of the playlist.
    async fn first_page(&self, playlist_id: &str) -> Result<PlaylistTracksPage>;

    /// Fetches the page behind a `next` link of a previous page.
    async fn next_page(&self, next_url: &str) -> Result<PlaylistTracksPage>;
}

/// Spotify Web API client authenticated with the client credentials grant.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_urls(
            credentials,
            config::spotify_apiurl(),
            config::spotify_apitoken_url(),
        )
    }

    pub fn with_urls(credentials: Credentials, api_url: String, token_url: String) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            tokens: Mutex::new(TokenManager::new(credentials, token_url)),
        }
    }

    pub fn playlist_tracks_url(&self, playlist_id: &str) -> String {
        format!(
            "{uri}/playlists/{id}/tracks?limit={limit}",
            uri = self.api_url,
            id = playlist_id,
            limit = PAGE_LIMIT
        )
    }

    async fn get_page(&self, url: &str) -> Result<PlaylistTracksPage> {
        let token = self.tokens.lock().await.get_valid_token(&self.http).await?;

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = ensure_success(response).await?;

        Ok(response.json::<PlaylistTracksPage>().await?)
    }
}

impl Catalog for SpotifyClient {
    async fn first_page(&self, playlist_id: &str) -> Result<PlaylistTracksPage> {
        let url = self.playlist_tracks_url(playlist_id);
        self.get_page(&url).await
    }

    async fn next_page(&self, next_url: &str) -> Result<PlaylistTracksPage> {
        self.get_page(next_url).await
    }
}

/// Turns a non-success response into [`Error::Catalog`], including the
/// message of Spotify's error object when there is one.
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Catalog(format!(
        "Spotify returned {}: {}",
        status,
        error_message(&body)
    )))
}

/// Extracts a readable message from a Spotify error body.
///
/// The Web API uses `{"error": {"status": 404, "message": "..."}}` while the
/// accounts service uses `{"error": "invalid_client", "error_description": "..."}`.
pub fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    if let Some(message) = json["error"]["message"].as_str() {
        return message.to_string();
    }
    if let Some(description) = json["error_description"].as_str() {
        return description.to_string();
    }
    if let Some(error) = json["error"].as_str() {
        return error.to_string();
    }

    body.trim().to_string()
}

pub use playlist::read_tracks;
