use crate::{
    error::Result,
    info,
    spotify::Catalog,
    types::{PlaylistTracksPage, TrackReference},
    utils,
};

/// Reads every track of a playlist, in playlist order.
///
/// Accepts a playlist URL, `spotify:playlist:` URI or bare ID. Pages are
/// requested for as long as the previous page carried a `next` link; the
/// first page without one ends the listing. Items whose `track` is `null`
/// (removed or unavailable tracks) are skipped without notice.
///
/// # Errors
///
/// Any catalog error is returned as-is; nothing is retried and no partial
/// listing is returned.
pub async fn read_tracks<C: Catalog>(catalog: &C, playlist: &str) -> Result<Vec<TrackReference>> {
    info!("Extracting playlist ID from URL...");
    let playlist_id = utils::extract_playlist_id(playlist)?;
    info!("Playlist ID: {}", playlist_id);

    info!("Fetching initial playlist data...");
    let mut page = catalog.first_page(&playlist_id).await?;
    if let Some(total) = page.total {
        info!("Playlist has {} items", total);
    }
    let mut tracks: Vec<TrackReference> = Vec::new();
    let mut page_number = 1;

    loop {
        info!("Processing page {} of playlist...", page_number);
        let next = page.next.take();
        collect_page_tracks(page, &mut tracks);

        let Some(next_url) = next else {
            info!("Reached end of playlist.");
            break;
        };

        info!("More tracks available, fetching next page...");
        page = catalog.next_page(&next_url).await?;
        page_number += 1;
    }

    Ok(tracks)
}

/// Appends the non-null tracks of `page` to `tracks`, reporting each one.
pub fn collect_page_tracks(page: PlaylistTracksPage, tracks: &mut Vec<TrackReference>) {
    for track in page.items.into_iter().filter_map(|item| item.track) {
        let track = TrackReference::from(track);
        info!(
            "  [{}] Found track: {} by {}",
            tracks.len() + 1,
            track.title,
            track.artist_line()
        );
        tracks.push(track);
    }
}
