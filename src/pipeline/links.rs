use std::sync::Arc;

use crate::{search::SearchProvider, types::ResolvedLinks};

/// URL path fragment identifying a playable video page.
const YOUTUBE_WATCH_PATTERN: &str = "youtube.com/watch";
/// URL path fragment identifying a track page on the music service.
const SPOTIFY_TRACK_PATTERN: &str = "open.spotify.com/track";

/// Resolves platform links for a song by querying the search backend once
/// per target platform and scanning the results in order for the first URL
/// matching the platform's path pattern.
///
/// The resolver is fail-open: a search backend failure is logged and treated
/// as the link not resolving, never as a request failure. A false negative
/// here costs one recommendation, aborting the request would cost them all.
pub struct LinkResolver {
    search: Arc<dyn SearchProvider>,
    max_results: u32,
}

impl LinkResolver {
    pub fn new(search: Arc<dyn SearchProvider>, max_results: u32) -> Self {
        Self {
            search,
            max_results,
        }
    }

    pub async fn resolve(&self, title: &str, artist: &str) -> ResolvedLinks {
        let video_query = format!("\"{title}\" \"{artist}\" official video site:youtube.com");
        let track_query = format!("\"{title}\" \"{artist}\" site:open.spotify.com");

        let youtube = self.first_match(&video_query, YOUTUBE_WATCH_PATTERN).await;
        let spotify = self.first_match(&track_query, SPOTIFY_TRACK_PATTERN).await;

        ResolvedLinks { youtube, spotify }
    }

    async fn first_match(&self, query: &str, pattern: &str) -> Option<String> {
        match self.search.search(query, self.max_results).await {
            Ok(results) => results
                .into_iter()
                .map(|result| result.url)
                .find(|url| url.contains(pattern)),
            Err(e) => {
                tracing::warn!(query, error = %e, "search request failed, treating link as unresolved");
                None
            }
        }
    }
}
