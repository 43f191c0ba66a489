//! # CLI Module
//!
//! User-facing commands. Each command resolves its configuration, hands the
//! work to the library modules and reports the outcome on the console.
//!
//! ## Commands
//!
//! - [`download`] - Downloads a Spotify playlist as MP3 files
//! - [`clean`] - Removes leftover non-MP3 files from a download folder
//!
//! ## Error Handling
//!
//! Fatal conditions (missing credentials, missing tools, unreadable
//! playlist) are reported with `error!` and exit with status
//! 1. Failures of single tracks are only reported; the command still exits
//! with status 0 after printing the summary.
//!
//! ## Usage Patterns
//!
//! ```bash
//! sporldl download                                   # prompts for the URL
//! sporldl download https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! sporldl download --output ~/Music/mix --min-similarity 0.5 <URL>
//! sporldl clean --output ~/Music/mix
//! ```

mod clean;
mod download;

pub use clean::clean;
pub use download::DownloadOptions;
pub use download::download;
