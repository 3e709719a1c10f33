use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use discofy::Res;
use discofy::llm::LanguageModel;
use discofy::pipeline::{
    GENERATION_ERROR, LinkResolver, Pipeline, PipelineError, PipelineOptions, enrich, format,
    recommend,
};
use discofy::search::{SearchProvider, SearchResult};
use discofy::types::SongCandidate;

// Helper to build a candidate without mood rationale
fn candidate(name: &str, artist: &str) -> SongCandidate {
    SongCandidate {
        song_name: name.to_string(),
        artist: artist.to_string(),
        mood_match: None,
    }
}

fn result(url: &str) -> SearchResult {
    SearchResult {
        url: url.to_string(),
        title: String::new(),
    }
}

/// Language model double returning scripted replies in order and recording
/// the prompts it was called with.
struct ScriptedModel {
    replies: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Res<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err("no scripted reply left".into());
        }
        Ok(replies.remove(0))
    }
}

/// Search double resolving both platform links for any song whose title
/// appears in `resolvable`; all other queries return no results.
struct TitleKeyedSearch {
    resolvable: Vec<String>,
}

impl TitleKeyedSearch {
    fn new(resolvable: &[&str]) -> Self {
        Self {
            resolvable: resolvable.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[async_trait]
impl SearchProvider for TitleKeyedSearch {
    async fn search(&self, query: &str, _max_results: u32) -> Res<Vec<SearchResult>> {
        if !self.resolvable.iter().any(|t| query.contains(t.as_str())) {
            return Ok(Vec::new());
        }
        let url = if query.contains("site:youtube.com") {
            "https://www.youtube.com/watch?v=abc123"
        } else {
            "https://open.spotify.com/track/xyz789"
        };
        Ok(vec![result(url)])
    }
}

/// Search double returning the same fixed result list for every query.
struct ListSearch {
    results: Vec<SearchResult>,
}

#[async_trait]
impl SearchProvider for ListSearch {
    async fn search(&self, _query: &str, _max_results: u32) -> Res<Vec<SearchResult>> {
        Ok(self.results.clone())
    }
}

/// Search double that always fails.
struct FailingSearch;

#[async_trait]
impl SearchProvider for FailingSearch {
    async fn search(&self, _query: &str, _max_results: u32) -> Res<Vec<SearchResult>> {
        Err("search backend unavailable".into())
    }
}

/// Search double that fails for queries mentioning one title and resolves
/// both platform links for everything else.
struct FailingForTitle {
    title: String,
}

#[async_trait]
impl SearchProvider for FailingForTitle {
    async fn search(&self, query: &str, _max_results: u32) -> Res<Vec<SearchResult>> {
        if query.contains(self.title.as_str()) {
            return Err("search backend unavailable".into());
        }
        let url = if query.contains("site:youtube.com") {
            "https://www.youtube.com/watch?v=abc123"
        } else {
            "https://open.spotify.com/track/xyz789"
        };
        Ok(vec![result(url)])
    }
}

/// Search double resolving only the configured platforms.
struct PlatformSearch {
    youtube: bool,
    spotify: bool,
}

#[async_trait]
impl SearchProvider for PlatformSearch {
    async fn search(&self, query: &str, _max_results: u32) -> Res<Vec<SearchResult>> {
        if query.contains("site:youtube.com") && self.youtube {
            return Ok(vec![result("https://www.youtube.com/watch?v=yt1")]);
        }
        if query.contains("site:open.spotify.com") && self.spotify {
            return Ok(vec![result("https://open.spotify.com/track/sp1")]);
        }
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn generate_preserves_length_and_fields() {
    let model = ScriptedModel::new(&[
        r#"[{"song_name":"Le Freak","artist":"Chic","mood_match":"pure groove"},{"song_name":"Stayin' Alive","artist":"Bee Gees"}]"#,
    ]);

    let candidates = recommend::generate(&model, "happy").await.unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].song_name, "Le Freak");
    assert_eq!(candidates[0].artist, "Chic");
    assert_eq!(candidates[0].mood_match.as_deref(), Some("pure groove"));
    assert_eq!(candidates[1].mood_match, None);

    // Prompt carries the original input verbatim
    assert!(model.prompts()[0].contains("happy"));
}

#[tokio::test]
async fn generate_rejects_non_json_with_fixed_message() {
    let model = ScriptedModel::new(&["not json"]);

    let err = recommend::generate(&model, "happy").await.unwrap_err();
    match err {
        PipelineError::MalformedModelOutput(detail) => assert_eq!(detail, GENERATION_ERROR),
        other => panic!("unexpected error: {other:?}"),
    }

    // A single attempt is made, no retry
    assert_eq!(model.prompts().len(), 1);
}

#[tokio::test]
async fn resolver_picks_first_matching_url_in_result_order() {
    let search = Arc::new(ListSearch {
        results: vec![
            result("https://www.youtube.com/channel/some-channel"),
            result("https://www.youtube.com/watch?v=first"),
            result("https://www.youtube.com/watch?v=second"),
        ],
    });
    let resolver = LinkResolver::new(search, 15);

    let links = resolver.resolve("Le Freak", "Chic").await;

    assert_eq!(
        links.youtube.as_deref(),
        Some("https://www.youtube.com/watch?v=first")
    );
    // No track URL in the result list
    assert_eq!(links.spotify, None);
}

#[tokio::test]
async fn resolver_is_idempotent_against_deterministic_search() {
    let search = Arc::new(TitleKeyedSearch::new(&["Le Freak"]));
    let resolver = LinkResolver::new(search, 15);

    let first = resolver.resolve("Le Freak", "Chic").await;
    let second = resolver.resolve("Le Freak", "Chic").await;

    assert_eq!(first, second);
    assert!(first.youtube.is_some());
    assert!(first.spotify.is_some());
}

#[tokio::test]
async fn resolver_fails_open_when_search_errors() {
    let resolver = LinkResolver::new(Arc::new(FailingSearch), 15);

    let links = resolver.resolve("Le Freak", "Chic").await;

    assert_eq!(links.youtube, None);
    assert_eq!(links.spotify, None);
}

#[tokio::test]
async fn enrich_drops_candidates_without_results() {
    let resolver = LinkResolver::new(Arc::new(TitleKeyedSearch::new(&[])), 15);

    let enriched = enrich::enrich(&resolver, vec![candidate("Le Freak", "Chic")], true).await;

    assert!(enriched.is_empty());
}

#[tokio::test]
async fn enrich_keeps_matched_urls_unmodified() {
    let resolver = LinkResolver::new(Arc::new(TitleKeyedSearch::new(&["Le Freak"])), 15);

    let enriched = enrich::enrich(&resolver, vec![candidate("Le Freak", "Chic")], true).await;

    assert_eq!(enriched.len(), 1);
    assert_eq!(
        enriched[0].youtube_link.as_deref(),
        Some("https://www.youtube.com/watch?v=abc123")
    );
    assert_eq!(
        enriched[0].spotify_link.as_deref(),
        Some("https://open.spotify.com/track/xyz789")
    );
}

#[tokio::test]
async fn enrich_output_is_order_preserving_subsequence() {
    let resolver = LinkResolver::new(Arc::new(TitleKeyedSearch::new(&["One", "Three"])), 15);
    let candidates = vec![
        candidate("One", "A"),
        candidate("Two", "B"),
        candidate("Three", "C"),
    ];

    let enriched = enrich::enrich(&resolver, candidates, true).await;

    let names: Vec<&str> = enriched.iter().map(|s| s.song_name.as_str()).collect();
    assert_eq!(names, vec!["One", "Three"]);
}

#[tokio::test]
async fn strict_policy_drops_single_link_songs() {
    let resolver = LinkResolver::new(
        Arc::new(PlatformSearch {
            youtube: true,
            spotify: false,
        }),
        15,
    );

    let enriched = enrich::enrich(&resolver, vec![candidate("Le Freak", "Chic")], true).await;

    assert!(enriched.is_empty());
}

#[tokio::test]
async fn lenient_policy_keeps_single_link_songs() {
    let resolver = LinkResolver::new(
        Arc::new(PlatformSearch {
            youtube: true,
            spotify: false,
        }),
        15,
    );

    let enriched = enrich::enrich(&resolver, vec![candidate("Le Freak", "Chic")], false).await;

    assert_eq!(enriched.len(), 1);
    assert!(enriched[0].youtube_link.is_some());
    assert_eq!(enriched[0].spotify_link, None);
}

#[tokio::test]
async fn format_rejects_non_json_with_fixed_message() {
    let model = ScriptedModel::new(&["definitely not json"]);

    let err = format::format_response(&model, "happy", &[]).await.unwrap_err();
    match err {
        PipelineError::MalformedModelOutput(detail) => assert_eq!(detail, GENERATION_ERROR),
        other => panic!("unexpected error: {other:?}"),
    }
}

// Scenario A: one generated song, both links resolve, one recommendation out.
#[tokio::test]
async fn pipeline_returns_single_enriched_recommendation() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"[{"song_name":"X","artist":"Y","mood_match":"upbeat"}]"#,
        r#"{"greeting":"Here you go!","recommendations":[{"song_name":"X","artist":"Y","youtube_link":"https://www.youtube.com/watch?v=abc123","spotify_link":"https://open.spotify.com/track/xyz789","album":"Album","language":"English","release_year":1977}]}"#,
    ]));
    let search = Arc::new(TitleKeyedSearch::new(&["X"]));
    let pipeline = Pipeline::new(model.clone(), search, PipelineOptions::default());

    let response = pipeline.run("happy").await.unwrap();

    assert_eq!(response.greeting, "Here you go!");
    assert_eq!(response.recommendations.len(), 1);
    assert!(response.recommendations[0].youtube_link.is_some());
    assert!(response.recommendations[0].spotify_link.is_some());

    // Both prompts carry the original input
    let prompts = model.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts.iter().all(|p| p.contains("happy")));
}

// Generator failure short-circuits: the formatter call never happens.
#[tokio::test]
async fn pipeline_short_circuits_on_generator_failure() {
    let model = Arc::new(ScriptedModel::new(&["oops"]));
    let search = Arc::new(TitleKeyedSearch::new(&["X"]));
    let pipeline = Pipeline::new(model.clone(), search, PipelineOptions::default());

    let err = pipeline.run("happy").await.unwrap_err();
    match err {
        PipelineError::MalformedModelOutput(detail) => assert_eq!(detail, GENERATION_ERROR),
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(model.prompts().len(), 1);
}

// Scenario C: every candidate is dropped, the formatter still runs with an
// empty list and the request does not fail.
#[tokio::test]
async fn pipeline_formats_empty_list_when_all_candidates_drop() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"[{"song_name":"A","artist":"1"},{"song_name":"B","artist":"2"},{"song_name":"C","artist":"3"}]"#,
        r#"{"greeting":"Sorry, nothing found this time.","recommendations":[]}"#,
    ]));
    let search = Arc::new(TitleKeyedSearch::new(&[]));
    let pipeline = Pipeline::new(model.clone(), search, PipelineOptions::default());

    let response = pipeline.run("happy").await.unwrap();

    assert!(response.recommendations.is_empty());
    // The formatter was invoked with an empty song list
    let prompts = model.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("Songs: []"));
}

// Scenario D: search fails for one candidate only; the others survive.
#[tokio::test]
async fn pipeline_drops_only_the_candidate_whose_search_fails() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"[{"song_name":"One","artist":"A"},{"song_name":"Two","artist":"B"},{"song_name":"Three","artist":"C"}]"#,
        r#"{"greeting":"Two picks for you.","recommendations":[{"song_name":"One","artist":"A"},{"song_name":"Three","artist":"C"}]}"#,
    ]));
    let search = Arc::new(FailingForTitle {
        title: "Two".to_string(),
    });
    let pipeline = Pipeline::new(model.clone(), search, PipelineOptions::default());

    let response = pipeline.run("happy").await.unwrap();

    assert_eq!(response.recommendations.len(), 2);
    // The failing candidate never reached the formatter
    let prompts = model.prompts();
    assert!(prompts[1].contains("One"));
    assert!(prompts[1].contains("Three"));
    assert!(!prompts[1].contains("Two"));
}
