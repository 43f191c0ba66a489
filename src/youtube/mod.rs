//! # YouTube Integration Module
//!
//! Everything that talks to YouTube goes through the `yt-dlp` executable,
//! which in turn uses `ffmpeg` for audio conversion.
//!
//! - [`tools`] - Locates the `yt-dlp` and `ffmpeg` executables
//! - [`search`] - Resolves a text query to the top-ranked video
//! - [`fetch`] - Downloads a video's audio and converts it to MP3
//! - [`progress`] - Parses and renders yt-dlp's download progress
//!
//! The pipeline depends on the [`VideoSearch`] and [`Fetcher`] traits; the
//! `yt-dlp` backed implementations are [`YtDlpSearch`] and [`YtDlpFetcher`].

pub mod fetch;
pub mod progress;
pub mod search;
pub mod tools;

use std::path::Path;

use crate::{error::Result, types::VideoMatch};

pub use fetch::YtDlpFetcher;
pub use search::{YtDlpSearch, find_match};
pub use tools::Toolchain;

/// Best-effort video lookup by free-text query.
#[allow(async_fn_in_trait)]
pub trait VideoSearch {
    /// Returns at most one candidate, best ranked first. An empty vector
    /// means the search found nothing.
    async fn search(&self, query: &str) -> Result<Vec<VideoMatch>>;
}

/// Downloads a video's audio track into a directory as an MP3 file.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, locator: &str, output_dir: &Path) -> Result<()>;
}
