//! Track-by-track download pipeline.
//!
//! For every track of the playlist, in order: search YouTube, download the
//! top match as MP3, sweep leftovers out of the output directory. Tracks
//! are processed one at a time and a failing track never stops the run.
//! Only catalog and configuration errors abort it.

use std::path::{Path, PathBuf};

use tabled::Table;

use crate::{
    config::DEFAULT_OUTPUT_DIR,
    error::Result,
    info,
    management::{clean_output_dir, ensure_output_dir},
    spotify::{self, Catalog},
    success,
    types::{DownloadOutcome, FailedTrackTableRow, Tally, TrackReference, TrackState, VideoMatch},
    utils, warning,
    youtube::{Fetcher, VideoSearch, find_match},
};

const SEPARATOR_WIDTH: usize = 50;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub output_dir: PathBuf,
    /// Minimum [`utils::title_similarity`] a match needs; `0.0` accepts any.
    pub min_similarity: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            min_similarity: 0.0,
        }
    }
}

/// Tracks one track's state and rejects transitions the pipeline never makes.
#[derive(Debug)]
struct TrackProgress {
    state: TrackState,
    reason: Option<String>,
}

impl TrackProgress {
    fn new() -> Self {
        Self {
            state: TrackState::Pending,
            reason: None,
        }
    }

    fn advance(&mut self, next: TrackState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "invalid track transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }

    fn fail(&mut self, next: TrackState, reason: String) {
        self.advance(next);
        self.reason = Some(reason);
    }

    fn into_outcome(self) -> DownloadOutcome {
        debug_assert!(self.state.is_terminal(), "track ended in {:?}", self.state);
        self.state
            .outcome(self.reason)
            .unwrap_or_else(|| DownloadOutcome::FetchFailure("track left unfinished".to_string()))
    }
}

pub struct Pipeline<C, S, F> {
    catalog: C,
    search: S,
    fetcher: F,
    options: PipelineOptions,
}

impl<C, S, F> Pipeline<C, S, F>
where
    C: Catalog,
    S: VideoSearch,
    F: Fetcher,
{
    pub fn new(catalog: C, search: S, fetcher: F, options: PipelineOptions) -> Self {
        Self {
            catalog,
            search,
            fetcher,
            options,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.options.output_dir
    }

    /// Downloads a whole playlist and returns the tally.
    ///
    /// # Errors
    ///
    /// Only errors that end the run are returned: the output directory
    /// cannot be created, or the playlist cannot be read. Per-track failures
    /// are recorded in the [`Tally`].
    pub async fn run(&self, playlist: &str) -> Result<Tally> {
        info!("Initializing download directory...");
        ensure_output_dir(self.output_dir()).await?;
        info!(
            "Download directory: {}",
            std::path::absolute(self.output_dir())
                .unwrap_or_else(|_| self.output_dir().to_path_buf())
                .display()
        );

        info!("Connecting to Spotify API...");
        let tracks = spotify::read_tracks(&self.catalog, playlist).await?;
        info!("Total tracks found in playlist: {}", tracks.len());

        info!("Starting download process...");
        let tally = self.process_tracks(&tracks).await;

        // final sweep for anything a failed download left behind
        info!("Cleaning up download folder...");
        clean_output_dir(self.output_dir()).await;

        Ok(tally)
    }

    /// Processes every track in order; never stops early.
    pub async fn process_tracks(&self, tracks: &[TrackReference]) -> Tally {
        let mut tally = Tally::default();
        let total = tracks.len();

        for (index, track) in tracks.iter().enumerate() {
            let position = index + 1;
            let query = utils::track_query(track);

            println!("\n{}", "=".repeat(SEPARATOR_WIDTH));
            info!("Processing track {}/{}", position, total);
            info!("Track: {}", query);

            let outcome = self.process_track(track, &query).await;
            match &outcome {
                DownloadOutcome::Success => {
                    success!("Successfully downloaded and converted to MP3")
                }
                DownloadOutcome::SearchMiss => {
                    warning!("Skipping track due to YouTube search failure")
                }
                DownloadOutcome::FetchFailure(reason) => {
                    warning!("Failed to download: {}", reason)
                }
            }

            tally.record(position, &query, &outcome);
        }

        tally
    }

    /// Runs one track from `Pending` to a terminal state.
    pub async fn process_track(&self, track: &TrackReference, query: &str) -> DownloadOutcome {
        let mut progress = TrackProgress::new();

        progress.advance(TrackState::Searching);
        let found = match find_match(&self.search, query).await {
            Ok(found) => found,
            Err(e) => {
                warning!("{}", e);
                None
            }
        };

        let Some(found) = found else {
            progress.advance(TrackState::NotFound);
            progress.advance(TrackState::Skipped);
            return progress.into_outcome();
        };
        progress.advance(TrackState::Found);

        if !self.accepts(track, &found) {
            progress.advance(TrackState::NotFound);
            progress.advance(TrackState::Skipped);
            return progress.into_outcome();
        }

        progress.advance(TrackState::Downloading);
        match self.fetcher.fetch(&found.locator, self.output_dir()).await {
            Ok(()) => {
                clean_output_dir(self.output_dir()).await;
                progress.advance(TrackState::Done);
            }
            Err(e) => progress.fail(TrackState::FetchFailed, e.to_string()),
        }

        progress.into_outcome()
    }

    fn accepts(&self, track: &TrackReference, found: &VideoMatch) -> bool {
        if self.options.min_similarity <= 0.0 {
            return true;
        }

        let similarity = utils::title_similarity(&track.title, &found.title);
        if similarity < self.options.min_similarity {
            warning!(
                "Rejected match '{}': title similarity {:.2} is below {:.2}",
                found.title,
                similarity,
                self.options.min_similarity
            );
            return false;
        }

        true
    }
}

/// Prints the end-of-run summary, with a table of the failed tracks.
pub fn print_summary(tally: &Tally) {
    println!("\n{}", "=".repeat(SEPARATOR_WIDTH));
    info!("Download Summary:");
    info!("Total tracks processed: {}", tally.total);
    success!("Successfully downloaded: {}", tally.successful);
    if tally.failed > 0 {
        warning!("Failed downloads: {}", tally.failed);
        let rows: Vec<FailedTrackTableRow> =
            tally.failures.iter().map(FailedTrackTableRow::from).collect();
        println!("{}", Table::new(rows));
    } else {
        info!("Failed downloads: 0");
    }
    success!("Done!");
}
