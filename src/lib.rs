//! Spotify Playlist Downloader Library
//!
//! Turns a Spotify playlist into a folder of MP3 files: every track is looked
//! up on YouTube and the best match is downloaded and converted with
//! `yt-dlp` and `ffmpeg`.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by all modules
//! - `management` - Token lifetime and output directory housekeeping
//! - `pipeline` - Track-by-track orchestration and the run summary
//! - `spotify` - Spotify Web API client (playlist reading)
//! - `types` - Data structures and type definitions
//! - `utils` - Playlist ID, query and file name helpers
//! - `youtube` - yt-dlp backed search and download
//!
//! # Example
//!
//! ```
//! use sporldl::{config, pipeline::{Pipeline, PipelineOptions}, spotify::SpotifyClient};
//! use sporldl::youtube::{Toolchain, YtDlpFetcher, YtDlpSearch};
//!
//! #[tokio::main]
//! async fn main() -> sporldl::error::Result<()> {
//!     config::load_env().await?;
//!     let tools = Toolchain::resolve(None, None)?;
//!     let pipeline = Pipeline::new(
//!         SpotifyClient::new(config::credentials()?),
//!         YtDlpSearch::new(tools.yt_dlp.clone()),
//!         YtDlpFetcher::new(tools.yt_dlp, Some(tools.ffmpeg)),
//!         PipelineOptions::default(),
//!     );
//!     let tally = pipeline.run("https://open.spotify.com/playlist/...").await?;
//!     sporldl::pipeline::print_summary(&tally);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod pipeline;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod youtube;

pub use error::Error;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Fetching initial playlist data...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Successfully downloaded and converted to MP3");
/// success!("Removed {} files", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// error!("yt-dlp not found: {}", hint);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program termination.
/// Used for recoverable issues or important information that users should notice.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("No matches found on YouTube");
/// warning!("Failed to remove temporary file {}: {}", name, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
