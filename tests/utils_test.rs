use std::path::Path;

use sporldl::error::Error;
use sporldl::types::TrackReference;
use sporldl::utils::*;

fn artists(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_extract_playlist_id_from_url() {
    let id = extract_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M")
        .unwrap();
    assert_eq!(id, "37i9dQZF1DXcBWIGoYBM5M");
}

#[test]
fn test_extract_playlist_id_strips_query_string() {
    let id = extract_playlist_id(
        "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=a1b2c3&pt=xyz",
    )
    .unwrap();
    assert_eq!(id, "37i9dQZF1DXcBWIGoYBM5M");
}

#[test]
fn test_extract_playlist_id_variants() {
    // bare ID is returned unchanged
    assert_eq!(extract_playlist_id("abc123").unwrap(), "abc123");

    // surrounding whitespace from the console prompt
    assert_eq!(
        extract_playlist_id("  https://open.spotify.com/playlist/abc123\n").unwrap(),
        "abc123"
    );

    // trailing slash
    assert_eq!(
        extract_playlist_id("https://open.spotify.com/playlist/abc123/").unwrap(),
        "abc123"
    );

    // localized URL
    assert_eq!(
        extract_playlist_id("https://open.spotify.com/intl-de/playlist/abc123?si=x").unwrap(),
        "abc123"
    );

    // Spotify URI
    assert_eq!(extract_playlist_id("spotify:playlist:abc123").unwrap(), "abc123");
}

#[test]
fn test_extract_playlist_id_rejects_empty_input() {
    assert!(matches!(extract_playlist_id(""), Err(Error::Catalog(_))));
    assert!(matches!(extract_playlist_id("   "), Err(Error::Catalog(_))));
    assert!(matches!(extract_playlist_id("?si=abc"), Err(Error::Catalog(_))));
}

#[test]
fn test_search_query_joins_artists() {
    assert_eq!(
        search_query("Song", &artists(&["Artist A", "Artist B"])),
        "Song Artist A, Artist B"
    );
    assert_eq!(search_query("Song", &artists(&["Solo"])), "Song Solo");
}

#[test]
fn test_search_query_with_no_artists_keeps_separator() {
    assert_eq!(search_query("Song", &[]), "Song ");
}

#[test]
fn test_search_query_is_not_normalized() {
    // casing and punctuation are passed through untouched
    assert_eq!(
        search_query("HELLO, World!", &artists(&["AC/DC"])),
        "HELLO, World! AC/DC"
    );
}

#[test]
fn test_search_query_is_deterministic() {
    let names = artists(&["a1", "a2", "a3"]);
    let first = search_query("t", &names);
    let second = search_query("t", &names);
    assert_eq!(first, second);
    assert_eq!(first, "t a1, a2, a3");
}

#[test]
fn test_track_query_matches_search_query() {
    let track = TrackReference::new("Bohemian Rhapsody", artists(&["Queen"]));
    assert_eq!(track_query(&track), "Bohemian Rhapsody Queen");
}

#[test]
fn test_title_similarity() {
    // all words present, ignoring case and punctuation
    assert_eq!(
        title_similarity("Bohemian Rhapsody", "Queen – Bohemian RHAPSODY (Official Video)"),
        1.0
    );

    // half the words present
    assert_eq!(title_similarity("Bohemian Rhapsody", "Rhapsody in Blue"), 0.5);

    // nothing in common
    assert_eq!(title_similarity("Bohemian Rhapsody", "Cat compilation"), 0.0);

    // a title without words cannot be judged and always passes
    assert_eq!(title_similarity("!!!", "anything"), 1.0);
}

#[test]
fn test_has_target_extension() {
    assert!(has_target_extension(Path::new("a.mp3")));
    assert!(has_target_extension(Path::new("downloads/Track.MP3")));
    assert!(has_target_extension(Path::new("song.Mp3")));

    assert!(!has_target_extension(Path::new("a.part")));
    assert!(!has_target_extension(Path::new("a.mp3.part")));
    assert!(!has_target_extension(Path::new("a.webm")));
    assert!(!has_target_extension(Path::new("mp3")));
}

#[test]
fn test_parse_similarity() {
    assert_eq!(parse_similarity("0").unwrap(), 0.0);
    assert_eq!(parse_similarity("0.75").unwrap(), 0.75);
    assert_eq!(parse_similarity("1").unwrap(), 1.0);

    assert!(parse_similarity("1.5").is_err());
    assert!(parse_similarity("-0.1").is_err());
    assert!(parse_similarity("high").is_err());
}
