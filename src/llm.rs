//! Language model client.
//!
//! Implements the chat-completions API used by the recommendation pipeline.
//! The pipeline only depends on the [`LanguageModel`] trait so that tests can
//! substitute a scripted double for the real client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Res, config};

/// Minimal completion interface consumed by the pipeline: one prompt in,
/// the raw text of the model's reply out. The reply may or may not be
/// well-formed JSON despite prompt instructions; callers parse it.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Res<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for an OpenAI-style chat-completions endpoint.
///
/// Constructed once at startup and shared by reference; the underlying
/// `reqwest::Client` reuses connections across requests.
pub struct OpenAiClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// Builds a client from the process environment.
    ///
    /// # Panics
    ///
    /// Panics if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Self {
        Self::new(
            config::openai_api_url(),
            config::openai_api_key(),
            config::openai_model(),
        )
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Res<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let completion = response.json::<ChatCompletionResponse>().await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or("chat completion contained no choices")?;

        Ok(choice.message.content)
    }
}
