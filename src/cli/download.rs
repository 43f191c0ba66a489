use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::{
    config, error,
    error::Result,
    info,
    pipeline::{Pipeline, PipelineOptions, print_summary},
    spotify::SpotifyClient,
    youtube::{Toolchain, YtDlpFetcher, YtDlpSearch, tools},
};

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub playlist: Option<String>,
    pub output_dir: PathBuf,
    pub yt_dlp: Option<PathBuf>,
    pub ffmpeg: Option<PathBuf>,
    pub min_similarity: f64,
}

/// Downloads every track of a playlist into the output directory.
///
/// Credentials are checked first, then the external tools; either one
/// missing ends the program before any network request is made. Without a
/// playlist argument the URL is read from the console.
pub async fn download(options: DownloadOptions) {
    let credentials = match config::credentials() {
        Ok(credentials) => credentials,
        Err(e) => error!(
            "Spotify credentials not found ({}). Set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET in the environment or a .env file.",
            e
        ),
    };

    let toolchain = match Toolchain::resolve(options.yt_dlp.clone(), options.ffmpeg.clone()) {
        Ok(toolchain) => toolchain,
        Err(e) => error!("{}", e),
    };
    info!(
        "Using {} at {}",
        tools::display_name(&toolchain.yt_dlp),
        toolchain.yt_dlp.display()
    );
    info!(
        "Using {} at {}",
        tools::display_name(&toolchain.ffmpeg),
        toolchain.ffmpeg.display()
    );

    println!("\n=== Spotify Playlist Downloader ===\n");
    let playlist = match options.playlist.clone() {
        Some(playlist) => playlist,
        None => match prompt_playlist_url().await {
            Ok(playlist) => playlist,
            Err(e) => error!("Cannot read playlist URL: {}", e),
        },
    };

    if playlist.trim().is_empty() {
        error!("No playlist URL given.");
    }

    let pipeline = Pipeline::new(
        SpotifyClient::new(credentials),
        YtDlpSearch::new(toolchain.yt_dlp.clone()),
        YtDlpFetcher::new(toolchain.yt_dlp, Some(toolchain.ffmpeg)),
        PipelineOptions {
            output_dir: options.output_dir,
            min_similarity: options.min_similarity,
        },
    );

    match pipeline.run(playlist.trim()).await {
        Ok(tally) => print_summary(&tally),
        Err(e) => error!("{}", e),
    }
}

async fn prompt_playlist_url() -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Enter Spotify playlist URL: ").await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;

    Ok(line.trim().to_string())
}
