use crate::types::{EnrichedSong, SongCandidate};

use super::links::LinkResolver;

/// Attaches resolved platform links to each candidate and filters out the
/// ones that fail the link policy.
///
/// Candidates are processed in input order and survivors keep that order;
/// no re-ranking happens here. A shrinking list is normal operation, not an
/// error: the caller learns about dropped songs only through the logs and
/// the reduced count.
pub async fn enrich(
    resolver: &LinkResolver,
    candidates: Vec<SongCandidate>,
    require_both_links: bool,
) -> Vec<EnrichedSong> {
    let mut enriched = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let links = resolver
            .resolve(&candidate.song_name, &candidate.artist)
            .await;

        let keep = if require_both_links {
            links.youtube.is_some() && links.spotify.is_some()
        } else {
            links.youtube.is_some() || links.spotify.is_some()
        };

        if keep {
            tracing::debug!(
                song = %candidate.song_name,
                artist = %candidate.artist,
                "keeping song with resolved links"
            );
            enriched.push(EnrichedSong {
                song_name: candidate.song_name,
                artist: candidate.artist,
                mood_match: candidate.mood_match,
                youtube_link: links.youtube,
                spotify_link: links.spotify,
            });
        } else {
            tracing::info!(
                song = %candidate.song_name,
                artist = %candidate.artist,
                "skipping song due to missing links"
            );
        }
    }

    enriched
}
