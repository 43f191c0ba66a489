use std::path::PathBuf;

use tokio::process::Command;

use crate::{
    error::{Error, Result},
    info,
    types::VideoMatch,
    warning,
    youtube::VideoSearch,
};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const PRINT_TEMPLATE: &str = "%(id)s\t%(title)s\t%(duration)s";

/// Searches YouTube through yt-dlp's `ytsearch1:` pseudo-URL.
///
/// Ranking is entirely YouTube's; the single top result is returned.
pub struct YtDlpSearch {
    yt_dlp: PathBuf,
}

impl YtDlpSearch {
    pub fn new(yt_dlp: PathBuf) -> Self {
        Self { yt_dlp }
    }
}

impl VideoSearch for YtDlpSearch {
    async fn search(&self, query: &str) -> Result<Vec<VideoMatch>> {
        let output = Command::new(&self.yt_dlp)
            .args(["--flat-playlist", "--no-warnings", "--print", PRINT_TEMPLATE])
            .arg(format!("ytsearch1:{}", query))
            .output()
            .await
            .map_err(|e| Error::Search(format!("failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Search(last_line(&stderr).unwrap_or_else(|| {
                format!("yt-dlp exited with {}", output.status)
            })));
        }

        Ok(parse_search_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parses `id<TAB>title<TAB>duration` lines printed by the search.
///
/// Lines without an ID are ignored. yt-dlp prints `NA` for unknown fields.
pub fn parse_search_output(stdout: &str) -> Vec<VideoMatch> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.splitn(3, '\t');
            let id = fields.next()?.trim();
            if id.is_empty() || id == "NA" {
                return None;
            }

            let title = fields.next().unwrap_or_default().trim().to_string();
            let duration_secs = fields
                .next()
                .and_then(|d| d.trim().parse::<f64>().ok())
                .map(|d| d.round() as u64);

            Some(VideoMatch {
                title,
                locator: format!("{}{}", WATCH_URL, id),
                duration_secs,
            })
        })
        .collect()
}

/// Looks up the best match for a query.
///
/// Returns `None` if and only if the search comes back empty; otherwise the
/// first result, unexamined.
pub async fn find_match<S: VideoSearch>(search: &S, query: &str) -> Result<Option<VideoMatch>> {
    info!("Searching YouTube for: {}", query);

    match search.search(query).await?.into_iter().next() {
        Some(found) => {
            match found.duration_secs {
                Some(secs) => info!(
                    "Found match: {} ({}:{:02})",
                    found.title,
                    secs / 60,
                    secs % 60
                ),
                None => info!("Found match: {}", found.title),
            }
            Ok(Some(found))
        }
        None => {
            warning!("No matches found on YouTube");
            Ok(None)
        }
    }
}

pub(crate) fn last_line(text: &str) -> Option<String> {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}
