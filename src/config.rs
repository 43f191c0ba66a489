//! Configuration management for the playlist downloader.
//!
//! Values come from environment variables, which may be supplied through
//! `.env` files. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/sporldl/.env`)
//! 4. Application defaults (where applicable)
//!
//! Command-line flags override all of the above; `main` passes them in.

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";

/// Returns `<data_local_dir>/sporldl`.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporldl");
    path
}

/// Loads `.env` files into the process environment.
///
/// The working directory `.env` is read first so that its values take
/// precedence; `dotenv` never overwrites variables that are already set.
/// Missing files are not an error.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or a present
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    load_env_file(PathBuf::from(".env"))?;
    load_env_file(dir.join(".env"))
}

fn load_env_file(path: PathBuf) -> Result<()> {
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} must be set", key))),
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the Spotify application client ID (`SPOTIFY_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify application client secret (`SPOTIFY_CLIENT_SECRET`).
///
/// The secret should never be printed or logged.
pub fn spotify_client_secret() -> Result<String> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the OAuth token endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string())
}

/// Explicit yt-dlp executable (`YT_DLP_PATH`), if configured.
pub fn yt_dlp_path() -> Option<PathBuf> {
    optional("YT_DLP_PATH").map(PathBuf::from)
}

/// Explicit ffmpeg executable or directory (`FFMPEG_LOCATION`), if configured.
pub fn ffmpeg_location() -> Option<PathBuf> {
    optional("FFMPEG_LOCATION").map(PathBuf::from)
}

/// Spotify application credentials.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Reads both credentials; either one missing is a configuration error.
pub fn credentials() -> Result<Credentials> {
    Ok(Credentials {
        client_id: spotify_client_id()?,
        client_secret: spotify_client_secret()?,
    })
}
