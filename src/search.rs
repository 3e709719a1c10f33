//! Web search client.
//!
//! Implements the Tavily-style search API used by the link resolver. As with
//! the language model, the pipeline depends only on the [`SearchProvider`]
//! trait so tests can drive it with deterministic stubs.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Res, config};

/// A single search hit. Only the URL is inspected by the link resolver;
/// the remaining fields are kept for logging.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub url: String,
    #[serde(default)]
    pub title: String,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Res<Vec<SearchResult>>;
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

/// Client for the Tavily search API.
pub struct TavilyClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl TavilyClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }

    /// Builds a client from the process environment.
    ///
    /// # Panics
    ///
    /// Panics if `TAVILY_API_KEY` is not set.
    pub fn from_env() -> Self {
        Self::new(config::tavily_api_url(), config::tavily_api_key())
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str, max_results: u32) -> Res<Vec<SearchResult>> {
        let request = SearchRequest {
            api_key: &self.api_key,
            query,
            max_results,
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<SearchResponse>().await?.results)
    }
}
