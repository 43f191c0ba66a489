use std::{collections::HashSet, path::Path};

use crate::{
    error::{Error, Result},
    types::TrackReference,
};

pub const TARGET_EXTENSION: &str = "mp3";

const PLAYLIST_URI_PREFIX: &str = "spotify:playlist:";

/// Extracts the Spotify playlist ID from a playlist URL or URI.
///
/// Takes the last path segment and strips any query string, so
/// `https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc` yields
/// `37i9dQZF1DXcBWIGoYBM5M`. A bare ID is returned unchanged.
pub fn extract_playlist_id(input: &str) -> Result<String> {
    let input = input.trim();
    let input = input.strip_prefix(PLAYLIST_URI_PREFIX).unwrap_or(input);
    let without_query = input.split('?').next().unwrap_or_default();
    let id = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    if id.is_empty() {
        return Err(Error::Catalog(format!(
            "cannot extract a playlist ID from '{}'",
            input
        )));
    }

    Ok(id.to_string())
}

/// Builds the search query for a track: the title, a space, then the
/// comma-joined artist names. No casing or punctuation normalization.
pub fn search_query(title: &str, artists: &[String]) -> String {
    format!("{} {}", title, artists.join(", "))
}

pub fn track_query(track: &TrackReference) -> String {
    search_query(&track.title, &track.artists)
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Fraction of the track title's distinct words that appear in the
/// candidate title, in `[0.0, 1.0]`. A title without words scores `1.0`.
pub fn title_similarity(track_title: &str, candidate_title: &str) -> f64 {
    let wanted: HashSet<String> = words(track_title).into_iter().collect();
    if wanted.is_empty() {
        return 1.0;
    }

    let found: HashSet<String> = words(candidate_title).into_iter().collect();
    let hits = wanted.iter().filter(|w| found.contains(*w)).count();
    hits as f64 / wanted.len() as f64
}

/// True when the file name ends in `.mp3`, ignoring case.
pub fn has_target_extension(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            name.to_string_lossy()
                .to_lowercase()
                .ends_with(&format!(".{}", TARGET_EXTENSION))
        })
        .unwrap_or(false)
}

/// Value parser for `--min-similarity`: a number in `[0, 1]`.
pub fn parse_similarity(value: &str) -> std::result::Result<f64, String> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;

    if !(0.0..=1.0).contains(&parsed) {
        return Err(format!("{} is not between 0 and 1", parsed));
    }

    Ok(parsed)
}
