use std::{collections::HashMap, sync::Mutex};

use serde_json::json;
use sporldl::error::{Error, Result};
use sporldl::management::TokenManager;
use sporldl::spotify::{Catalog, auth::parse_token, error_message, read_tracks};
use sporldl::types::{PlaylistTracksPage, Token, TrackReference};

/// In-memory catalog: a first page plus pages reachable by `next` URL.
struct PagedCatalog {
    first: PlaylistTracksPage,
    pages: HashMap<String, PlaylistTracksPage>,
    requested: Mutex<Vec<String>>,
}

impl PagedCatalog {
    fn new(first: PlaylistTracksPage) -> Self {
        Self {
            first,
            pages: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    fn with_page(mut self, url: &str, page: PlaylistTracksPage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Catalog for PagedCatalog {
    async fn first_page(&self, playlist_id: &str) -> Result<PlaylistTracksPage> {
        self.requested.lock().unwrap().push(playlist_id.to_string());
        Ok(self.first.clone())
    }

    async fn next_page(&self, next_url: &str) -> Result<PlaylistTracksPage> {
        self.requested.lock().unwrap().push(next_url.to_string());
        self.pages
            .get(next_url)
            .cloned()
            .ok_or_else(|| Error::Catalog(format!("no page at {}", next_url)))
    }
}

fn page(value: serde_json::Value) -> PlaylistTracksPage {
    serde_json::from_value(value).unwrap()
}

fn item(name: &str, artists: &[&str]) -> serde_json::Value {
    let artists: Vec<_> = artists.iter().map(|a| json!({ "name": a })).collect();
    json!({ "track": { "name": name, "artists": artists } })
}

#[test]
fn test_page_deserializes_null_tracks_and_episodes() {
    let page = page(json!({
        "items": [
            item("Song", &["A", "B"]),
            { "track": null },
            { "track": { "name": "Episode 12" } },
        ],
        "next": null,
        "total": 3
    }));

    assert_eq!(page.items.len(), 3);
    assert!(page.items[1].track.is_none());
    assert!(page.items[2].track.as_ref().unwrap().artists.is_empty());
    assert_eq!(page.next, None);
    assert_eq!(page.total, Some(3));
}

#[tokio::test]
async fn test_read_tracks_follows_next_and_skips_null_tracks() {
    let catalog = PagedCatalog::new(page(json!({
        "items": [item("One", &["A1"]), { "track": null }, item("Two", &["A2", "A3"])],
        "next": "page-2",
    })))
    .with_page(
        "page-2",
        page(json!({ "items": [item("Three", &["A4"])], "next": null })),
    );

    let tracks = read_tracks(&catalog, "https://open.spotify.com/playlist/pl1?si=x")
        .await
        .unwrap();

    assert_eq!(
        tracks,
        vec![
            TrackReference::new("One", vec!["A1".to_string()]),
            TrackReference::new("Two", vec!["A2".to_string(), "A3".to_string()]),
            TrackReference::new("Three", vec!["A4".to_string()]),
        ]
    );
    assert_eq!(catalog.requested(), vec!["pl1", "page-2"]);
}

#[tokio::test]
async fn test_read_tracks_stops_at_first_page_without_next() {
    // page-3 exists but page-2 does not link to it
    let catalog = PagedCatalog::new(page(json!({
        "items": [item("One", &["A"])],
        "next": "page-2",
    })))
    .with_page("page-2", page(json!({ "items": [item("Two", &["B"])] })))
    .with_page("page-3", page(json!({ "items": [item("Three", &["C"])] })));

    let tracks = read_tracks(&catalog, "pl1").await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(catalog.requested(), vec!["pl1", "page-2"]);
}

#[tokio::test]
async fn test_read_tracks_empty_playlist() {
    let catalog = PagedCatalog::new(page(json!({ "items": [], "next": null, "total": 0 })));

    let tracks = read_tracks(&catalog, "spotify:playlist:empty").await.unwrap();

    assert!(tracks.is_empty());
    assert_eq!(catalog.requested(), vec!["empty"]);
}

#[tokio::test]
async fn test_read_tracks_propagates_catalog_errors() {
    // next link points at a page the catalog cannot serve
    let catalog = PagedCatalog::new(page(json!({
        "items": [item("One", &["A"])],
        "next": "missing",
    })));

    let result = read_tracks(&catalog, "pl1").await;
    assert!(matches!(result, Err(Error::Catalog(_))));
}

#[tokio::test]
async fn test_read_tracks_rejects_empty_playlist_reference() {
    let catalog = PagedCatalog::new(PlaylistTracksPage::default());

    let result = read_tracks(&catalog, "").await;

    assert!(matches!(result, Err(Error::Catalog(_))));
    assert!(catalog.requested().is_empty());
}

#[test]
fn test_error_message_shapes() {
    // Web API error object
    assert_eq!(
        error_message(r#"{"error": {"status": 404, "message": "Resource not found"}}"#),
        "Resource not found"
    );

    // accounts service error
    assert_eq!(
        error_message(r#"{"error": "invalid_client", "error_description": "Invalid client secret"}"#),
        "Invalid client secret"
    );
    assert_eq!(error_message(r#"{"error": "invalid_client"}"#), "invalid_client");

    // not JSON
    assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
}

#[test]
fn test_parse_token() {
    let token = parse_token(
        &json!({ "access_token": "abc", "token_type": "Bearer", "expires_in": 3600 }),
        1_000,
    )
    .unwrap();

    assert_eq!(token.access_token, "abc");
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 3600);
    assert_eq!(token.obtained_at, 1_000);
}

#[test]
fn test_parse_token_defaults_and_errors() {
    let token = parse_token(&json!({ "access_token": "abc" }), 0).unwrap();
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 3600);

    assert!(matches!(
        parse_token(&json!({ "token_type": "Bearer" }), 0),
        Err(Error::Catalog(_))
    ));
    assert!(matches!(
        parse_token(&json!({ "access_token": "" }), 0),
        Err(Error::Catalog(_))
    ));
}

#[test]
fn test_token_expiry_margin() {
    let token = Token {
        access_token: "abc".to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 3600,
        obtained_at: 10_000,
    };

    assert!(!TokenManager::is_expired(&token, 10_000));
    assert!(!TokenManager::is_expired(&token, 10_000 + 3600 - 241));
    // renewed four minutes ahead of the actual expiry
    assert!(TokenManager::is_expired(&token, 10_000 + 3600 - 240));
    assert!(TokenManager::is_expired(&token, 10_000 + 3600));
}
