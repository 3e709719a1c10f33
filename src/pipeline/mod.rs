//! # Recommendation Pipeline
//!
//! This module implements the song recommendation pipeline behind
//! `POST /process-song`. A free-text mood description flows one direction
//! through three stages:
//!
//! ```text
//! input ── recommend ──> Vec<SongCandidate>
//!       ──   enrich  ──> Vec<EnrichedSong>   (link resolution + filter)
//!       ──   format  ──> RecommendationResponse
//! ```
//!
//! Each stage returns a `Result`; the orchestrator threads the original
//! input through unchanged and short-circuits on the first error. Enrichment
//! never fails the request: a song whose links cannot be resolved is simply
//! dropped, and search backend failures degrade to unresolved links.
//!
//! The pipeline holds its external collaborators behind trait objects
//! ([`crate::llm::LanguageModel`], [`crate::search::SearchProvider`]), built
//! once at startup and shared across requests. No state is kept between
//! invocations.

pub mod enrich;
pub mod format;
pub mod links;
pub mod recommend;

use std::sync::Arc;

use thiserror::Error;

use crate::{
    llm::LanguageModel,
    search::SearchProvider,
    types::RecommendationResponse,
};

pub use links::LinkResolver;

/// Detail message surfaced when the model's reply cannot be parsed as the
/// JSON shape the prompt asked for.
pub const GENERATION_ERROR: &str = "Failed to generate song list";

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The language model replied with text that is not the requested JSON
    /// shape. Carries the fixed user-facing detail message.
    #[error("{0}")]
    MalformedModelOutput(&'static str),

    /// Transport or protocol failure while talking to the language model.
    #[error("language model request failed: {0}")]
    ModelRequest(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The enriched song list could not be encoded into the formatter prompt.
    #[error("failed to encode prompt payload: {0}")]
    PromptEncoding(#[from] serde_json::Error),
}

/// Tuning knobs for the pipeline, resolved from configuration at startup.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Keep a song only when both platform links resolve (strict policy).
    /// When `false`, one resolved link suffices.
    pub require_both_links: bool,
    /// Result window requested per search query.
    pub max_search_results: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            require_both_links: true,
            max_search_results: 15,
        }
    }
}

/// Sequences the three stages and propagates the first error encountered.
pub struct Pipeline {
    llm: Arc<dyn LanguageModel>,
    resolver: LinkResolver,
    require_both_links: bool,
}

impl Pipeline {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        search: Arc<dyn SearchProvider>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            llm,
            resolver: LinkResolver::new(search, options.max_search_results),
            require_both_links: options.require_both_links,
        }
    }

    /// Runs the full pipeline for one request.
    ///
    /// The formatter is invoked even when every candidate was dropped during
    /// enrichment; what the model makes of an empty song list is its own
    /// business, as long as it returns the requested JSON shape.
    pub async fn run(&self, input: &str) -> Result<RecommendationResponse, PipelineError> {
        let candidates = recommend::generate(self.llm.as_ref(), input).await?;
        tracing::debug!(count = candidates.len(), "generated song candidates");

        let enriched =
            enrich::enrich(&self.resolver, candidates, self.require_both_links).await;

        let response = format::format_response(self.llm.as_ref(), input, &enriched).await?;
        Ok(response)
    }
}
