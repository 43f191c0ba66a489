use std::path::{Path, PathBuf};

use crate::{
    config,
    error::{Error, Result},
};

pub const YT_DLP: &str = "yt-dlp";
pub const FFMPEG: &str = "ffmpeg";

/// Resolved locations of the external executables.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub yt_dlp: PathBuf,
    pub ffmpeg: PathBuf,
}

impl Toolchain {
    /// Resolves both tools, preferring explicit settings over `PATH`.
    ///
    /// `yt_dlp` and `ffmpeg` are command-line overrides; when absent the
    /// `YT_DLP_PATH` and `FFMPEG_LOCATION` settings are consulted, then `PATH`.
    pub fn resolve(yt_dlp: Option<PathBuf>, ffmpeg: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            yt_dlp: resolve_tool(
                YT_DLP,
                yt_dlp.or_else(config::yt_dlp_path),
                "install it (https://github.com/yt-dlp/yt-dlp) or set YT_DLP_PATH",
            )?,
            ffmpeg: resolve_tool(
                FFMPEG,
                ffmpeg.or_else(config::ffmpeg_location),
                "install it (https://ffmpeg.org) or set FFMPEG_LOCATION",
            )?,
        })
    }
}

/// Locates an executable.
///
/// A configured location wins when it exists on disk (a file, or for ffmpeg
/// also the directory holding the binaries) or resolves through `PATH`.
/// Without one, `PATH` is searched for `name`.
pub fn resolve_tool(name: &str, configured: Option<PathBuf>, hint: &str) -> Result<PathBuf> {
    match configured {
        Some(path) => {
            if path.exists() {
                return Ok(path);
            }

            which::which(&path).map_err(|_| Error::ToolNotFound {
                tool: name.to_string(),
                hint: format!("configured location {} does not exist", path.display()),
            })
        }
        None => which::which(name).map_err(|_| Error::ToolNotFound {
            tool: name.to_string(),
            hint: format!("not found on PATH; {}", hint),
        }),
    }
}

/// Name of a tool as shown to the user.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
