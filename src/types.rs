use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub name: Option<String>,
    pub artists: Option<String>,
    pub duration: Option<String>,
    pub image: Option<String>,
    pub language: Option<String>,
    pub release_year: Option<i32>,
    pub play_count: Option<i64>,
    pub song_url: Option<String>,
    pub genre: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongCreate {
    pub name: Option<String>,
    pub artists: Option<String>,
    pub duration: Option<String>,
    pub image: Option<String>,
    pub language: Option<String>,
    pub release_year: Option<i32>,
    pub play_count: Option<i64>,
    pub song_url: Option<String>,
    pub genre: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongUpdate {
    pub name: Option<String>,
    pub artists: Option<String>,
    pub duration: Option<String>,
    pub image: Option<String>,
    pub language: Option<String>,
    pub release_year: Option<i32>,
    pub play_count: Option<i64>,
    pub song_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub song_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistCreate {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistUpdate {
    pub name: Option<String>,
}

/// Body of `POST /process-song`: the free-text mood or listening request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongRequest {
    pub input: String,
}

/// A song proposed by the language model before link enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongCandidate {
    pub song_name: String,
    pub artist: String,
    #[serde(default)]
    pub mood_match: Option<String>,
}

/// Platform links resolved for a single song. A `None` link means no
/// matching URL was found, or the search backend failed for that query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLinks {
    pub youtube: Option<String>,
    pub spotify: Option<String>,
}

/// A candidate that survived the link filter, carrying its resolved links.
/// Which links must be present is decided by the enricher's policy, not by
/// this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedSong {
    pub song_name: String,
    pub artist: String,
    #[serde(default)]
    pub mood_match: Option<String>,
    pub youtube_link: Option<String>,
    pub spotify_link: Option<String>,
}

/// One entry of the final response. The descriptive fields (`album`,
/// `language`, `release_year`) are synthesized by the language model from
/// its own knowledge and are not validated against any authority, which is
/// why `release_year` is kept as a raw JSON value (models return both
/// numbers and strings for it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub song_name: String,
    pub artist: String,
    #[serde(default)]
    pub youtube_link: Option<String>,
    #[serde(default)]
    pub spotify_link: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub release_year: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_match: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub greeting: String,
    pub recommendations: Vec<Recommendation>,
}
