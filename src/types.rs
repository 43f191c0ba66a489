use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub obtained_at: u64,
}

/// One page of `GET /playlists/{id}/tracks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub name: String,
    // episodes carry no artists
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

/// A track as read from the playlist, reduced to what the search needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackReference {
    pub title: String,
    pub artists: Vec<String>,
}

impl TrackReference {
    pub fn new(title: impl Into<String>, artists: Vec<String>) -> Self {
        Self {
            title: title.into(),
            artists,
        }
    }

    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

impl From<PlaylistTrack> for TrackReference {
    fn from(track: PlaylistTrack) -> Self {
        Self {
            title: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
        }
    }
}

/// Best-effort search hit for a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMatch {
    pub title: String,
    pub locator: String,
    pub duration_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Success,
    SearchMiss,
    FetchFailure(String),
}

impl DownloadOutcome {
    pub fn reason(&self) -> Option<String> {
        match self {
            DownloadOutcome::Success => None,
            DownloadOutcome::SearchMiss => Some("no YouTube match".to_string()),
            DownloadOutcome::FetchFailure(reason) => Some(reason.clone()),
        }
    }
}

/// Per-track progress through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    Pending,
    Searching,
    Found,
    NotFound,
    Downloading,
    Done,
    FetchFailed,
    Skipped,
}

impl TrackState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TrackState::Done | TrackState::FetchFailed | TrackState::Skipped
        )
    }

    /// `Pending → Searching → (Found → Downloading → {Done | FetchFailed})
    /// | (NotFound → Skipped)`
    pub fn can_advance_to(&self, next: TrackState) -> bool {
        use TrackState::*;
        matches!(
            (*self, next),
            (Pending, Searching)
                | (Searching, Found)
                | (Searching, NotFound)
                | (Found, Downloading)
                | (Found, NotFound)
                | (Downloading, Done)
                | (Downloading, FetchFailed)
                | (NotFound, Skipped)
        )
    }

    pub fn outcome(&self, reason: Option<String>) -> Option<DownloadOutcome> {
        match self {
            TrackState::Done => Some(DownloadOutcome::Success),
            TrackState::Skipped => Some(DownloadOutcome::SearchMiss),
            TrackState::FetchFailed => Some(DownloadOutcome::FetchFailure(
                reason.unwrap_or_else(|| "unknown error".to_string()),
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTrack {
    pub position: usize,
    pub query: String,
    pub reason: String,
}

#[derive(Tabled)]
pub struct FailedTrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub track: String,
    pub reason: String,
}

impl From<&FailedTrack> for FailedTrackTableRow {
    fn from(failed: &FailedTrack) -> Self {
        Self {
            position: failed.position,
            track: failed.query.clone(),
            reason: failed.reason.clone(),
        }
    }
}

/// Run-level outcome counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub failures: Vec<FailedTrack>,
}

impl Tally {
    pub fn record(&mut self, position: usize, query: &str, outcome: &DownloadOutcome) {
        self.total += 1;
        match outcome.reason() {
            None => self.successful += 1,
            Some(reason) => {
                self.failed += 1;
                self.failures.push(FailedTrack {
                    position,
                    query: query.to_string(),
                    reason,
                });
            }
        }
    }
}

/// Result of one sweep over the output directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: usize,
    pub failed: usize,
}
