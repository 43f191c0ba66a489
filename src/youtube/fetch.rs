use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
};

use crate::{
    error::{Error, Result},
    info,
    management::ensure_output_dir,
    utils::TARGET_EXTENSION,
    warning,
    youtube::{
        Fetcher,
        progress::{PROGRESS_TEMPLATE, ProgressReporter, parse_progress_line},
        search::last_line,
    },
};

/// Target bitrate of the converted audio.
pub const AUDIO_QUALITY: &str = "192K";

/// Output file name template; the video title names the file.
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Downloads the best audio stream with yt-dlp and converts it to MP3 with
/// ffmpeg.
pub struct YtDlpFetcher {
    yt_dlp: PathBuf,
    ffmpeg: Option<PathBuf>,
}

impl YtDlpFetcher {
    /// `ffmpeg` is passed to yt-dlp as `--ffmpeg-location`; with `None`
    /// yt-dlp searches `PATH` itself.
    pub fn new(yt_dlp: PathBuf, ffmpeg: Option<PathBuf>) -> Self {
        Self { yt_dlp, ffmpeg }
    }

    /// Arguments for one download into `output_dir`.
    pub fn command_args(&self, locator: &str, output_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-f",
            "bestaudio/best",
            "--extract-audio",
            "--audio-format",
            TARGET_EXTENSION,
            "--audio-quality",
            AUDIO_QUALITY,
            "--no-playlist",
            "--no-overwrites",
            "--quiet",
            "--no-warnings",
            "--progress",
            "--newline",
            "--progress-template",
            PROGRESS_TEMPLATE,
            "-o",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();

        args.push(output_dir.join(OUTPUT_TEMPLATE).into_os_string());

        if let Some(ffmpeg) = &self.ffmpeg {
            args.push(OsString::from("--ffmpeg-location"));
            args.push(ffmpeg.clone().into_os_string());
        }

        args.push(OsString::from(locator));
        args
    }
}

impl Fetcher for YtDlpFetcher {
    async fn fetch(&self, locator: &str, output_dir: &Path) -> Result<()> {
        info!("Preparing to download from: {}", locator);
        ensure_output_dir(output_dir).await?;
        info!(
            "Output directory: {}",
            std::path::absolute(output_dir)
                .unwrap_or_else(|_| output_dir.to_path_buf())
                .display()
        );

        info!("Starting download...");
        let mut child = Command::new(&self.yt_dlp)
            .args(self.command_args(locator, output_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Fetch(format!("failed to run yt-dlp: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Fetch("yt-dlp stdout unavailable".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Fetch("yt-dlp stderr unavailable".to_string()))?;

        let mut reporter = ProgressReporter::new();
        let ((), errors) = tokio::join!(
            report_progress(stdout, &mut reporter),
            collect_lines(stderr)
        );
        reporter.clear();

        let status = child.wait().await?;
        if !status.success() {
            return Err(Error::Fetch(
                last_line(&errors.join("\n"))
                    .unwrap_or_else(|| format!("yt-dlp exited with {}", status)),
            ));
        }

        Ok(())
    }
}

// Output is decoded lossily: consoles with a legacy code page emit file
// names that are not UTF-8. A read error only ends the reading; the exit
// status decides whether the download failed.
async fn report_progress<R: AsyncRead + Unpin>(stdout: R, reporter: &mut ProgressReporter) {
    let mut reader = BufReader::new(stdout);
    let mut buf = Vec::new();
    while let Some(line) = next_line(&mut reader, &mut buf).await {
        if let Some(event) = parse_progress_line(&line) {
            reporter.handle(&event);
        }
    }
}

async fn collect_lines<R: AsyncRead + Unpin>(stderr: R) -> Vec<String> {
    let mut reader = BufReader::new(stderr);
    let mut buf = Vec::new();
    let mut collected = Vec::new();
    while let Some(line) = next_line(&mut reader, &mut buf).await {
        collected.push(line);
    }
    collected
}

async fn next_line<R: AsyncRead + Unpin>(
    reader: &mut BufReader<R>,
    buf: &mut Vec<u8>,
) -> Option<String> {
    buf.clear();
    match reader.read_until(b'\n', buf).await {
        Ok(0) => None,
        Ok(_) => {
            let line = String::from_utf8_lossy(buf);
            Some(line.trim_end_matches(['\r', '\n']).to_string())
        }
        Err(e) => {
            warning!("Cannot read yt-dlp output: {}", e);
            None
        }
    }
}
