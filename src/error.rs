//! Error taxonomy for the download pipeline.
//!
//! Errors fall into two groups. Run-level errors ([`Error::Config`],
//! [`Error::ToolNotFound`], [`Error::Catalog`], [`Error::Http`]) abort the
//! whole run. Track-level errors ([`Error::Search`], [`Error::Fetch`]) are
//! caught by the pipeline and recorded against a single track. Cleanup I/O
//! errors are logged and never escalated.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration, e.g. absent Spotify credentials.
    #[error("configuration error: {0}")]
    Config(String),

    /// An external executable could not be located.
    #[error("{tool} not found: {hint}")]
    ToolNotFound { tool: String, hint: String },

    /// The Spotify catalog rejected a request or returned unusable data.
    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The video search could not be performed.
    #[error("search failed: {0}")]
    Search(String),

    /// Download or audio conversion failed.
    #[error("download failed: {0}")]
    Fetch(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
