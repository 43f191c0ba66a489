use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::info;

/// Marker that starts every line produced by [`PROGRESS_TEMPLATE`].
pub const PROGRESS_MARKER: &str = "sporldl-progress";

/// `--progress-template` handed to yt-dlp; one `|`-separated line per update.
pub const PROGRESS_TEMPLATE: &str = "download:sporldl-progress|%(progress.status)s|%(progress._percent_str)s|%(progress._speed_str)s|%(progress._eta_str)s|%(progress.filename)s";

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Downloading {
        percent: String,
        speed: String,
        eta: String,
        filename: String,
    },
    Finished {
        filename: String,
    },
}

impl ProgressEvent {
    /// Completion as a number in `[0, 100]`, if the event carries one.
    pub fn percent_value(&self) -> Option<f64> {
        match self {
            ProgressEvent::Downloading { percent, .. } => percent
                .trim()
                .trim_end_matches('%')
                .trim()
                .parse::<f64>()
                .ok()
                .map(|p| p.clamp(0.0, 100.0)),
            ProgressEvent::Finished { .. } => Some(100.0),
        }
    }
}

/// Parses one stdout line of yt-dlp. Anything that is not a progress line
/// (or has a status other than `downloading`/`finished`) yields `None`.
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let rest = line.trim().strip_prefix(PROGRESS_MARKER)?.strip_prefix('|')?;
    let fields: Vec<&str> = rest.splitn(5, '|').map(str::trim).collect();
    if fields.len() < 5 {
        return None;
    }

    let filename = base_name(fields[4]);
    match fields[0] {
        "downloading" => Some(ProgressEvent::Downloading {
            percent: clean_field(fields[1]),
            speed: clean_field(fields[2]),
            eta: clean_field(fields[3]),
            filename,
        }),
        "finished" => Some(ProgressEvent::Finished { filename }),
        _ => None,
    }
}

/// The single status line shown while a download runs.
pub fn render_progress_line(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::Downloading {
            percent,
            speed,
            eta,
            filename,
        } => format!(
            "Downloading {}: {} | Speed: {} | ETA: {}",
            filename, percent, speed, eta
        ),
        ProgressEvent::Finished { filename } => format!("Downloaded {}", filename),
    }
}

// yt-dlp prints "NA" for unknown values
fn clean_field(field: &str) -> String {
    match field {
        "NA" | "None" => String::new(),
        other => other.to_string(),
    }
}

fn base_name(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_string()
}

/// Renders progress events on one overwritten terminal line.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self { bar: None }
    }

    pub fn handle(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Downloading { .. } => {
                let bar = self.bar.get_or_insert_with(new_bar);
                if let Some(percent) = event.percent_value() {
                    bar.set_position(percent.round() as u64);
                }
                bar.set_message(render_progress_line(event));
            }
            ProgressEvent::Finished { .. } => {
                self.clear();
                info!("Download complete. Starting audio conversion...");
            }
        }
    }

    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.clear();
    }
}

fn new_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:20.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .progress_chars("=> "),
    );
    bar
}
