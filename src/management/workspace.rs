use std::{path::Path, pin::pin};

use futures_util::StreamExt;

use crate::{error::Result, types::CleanupReport, utils, warning};

/// Creates the output directory (and parents) if it does not exist yet.
pub async fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    async_fs::create_dir_all(output_dir).await?;
    Ok(())
}

/// Removes every file in `output_dir` whose name does not end in `.mp3`.
///
/// Partial downloads (`.part`), yt-dlp fragments and the source audio left
/// behind by the conversion step all fall under this. Files ending in `.mp3`
/// (any case) are never touched, and neither are subdirectories.
///
/// Failures are reported as warnings and counted in the returned
/// [`CleanupReport`]; the sweep always runs to the end.
pub async fn clean_output_dir(output_dir: &Path) -> CleanupReport {
    let mut report = CleanupReport::default();

    let entries = match async_fs::read_dir(output_dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warning!(
                "Cannot read download folder {}: {}",
                output_dir.display(),
                e
            );
            return report;
        }
    };

    let mut entries = pin!(entries);
    while let Some(entry) = entries.next().await {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warning!("Cannot read entry in download folder: {}", e);
                report.failed += 1;
                continue;
            }
        };

        if is_dir(&path).await || utils::has_target_extension(&path) {
            continue;
        }

        match async_fs::remove_file(&path).await {
            Ok(()) => report.removed += 1,
            Err(e) => {
                warning!(
                    "Failed to remove temporary file {}: {}",
                    file_label(&path),
                    e
                );
                report.failed += 1;
            }
        }
    }

    report
}

async fn is_dir(path: &Path) -> bool {
    async_fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
