//! Configuration management for the discofy service.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including the language model and search API credentials, server
//! settings, and pipeline tuning parameters.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory, falling back to the working directory
//! 3. Application defaults (where applicable)
//!
//! The two API credentials are required: their accessors panic when unset, and
//! `main` resolves them once before the server starts serving, so a missing
//! credential is a startup-time fatal error rather than a per-request one.

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `discofy/.env`. When no file exists there, a
/// `.env` in the current working directory is tried instead; it is not an
/// error for neither to exist, since configuration may come entirely from
/// the process environment.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/discofy/.env`
/// - macOS: `~/Library/Application Support/discofy/.env`
/// - Windows: `%LOCALAPPDATA%/discofy/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - An existing `.env` file cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("discofy/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    } else {
        dotenv::dotenv().ok();
    }
    Ok(())
}

/// Returns the address for the HTTP server to bind to.
///
/// Retrieves the `SERVER_ADDRESS` environment variable, defaulting to
/// `0.0.0.0:8000` when unset.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "0.0.0.0:8000"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string())
}

/// Returns the API key for the language model provider.
///
/// Retrieves the `OPENAI_API_KEY` environment variable, which authenticates
/// requests against the chat-completions API.
///
/// # Panics
///
/// Panics if the `OPENAI_API_KEY` environment variable is not set.
///
/// # Security Note
///
/// The key should be kept confidential and never exposed in logs
/// or version control.
pub fn openai_api_key() -> String {
    env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set")
}

/// Returns the chat-completions endpoint URL for the language model provider.
///
/// Retrieves the `OPENAI_API_URL` environment variable, defaulting to the
/// public OpenAI endpoint.
pub fn openai_api_url() -> String {
    env::var("OPENAI_API_URL")
        .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string())
}

/// Returns the model identifier to request from the language model provider.
///
/// Retrieves the `OPENAI_MODEL` environment variable, defaulting to `gpt-4o`.
pub fn openai_model() -> String {
    env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string())
}

/// Returns the API key for the web search provider.
///
/// Retrieves the `TAVILY_API_KEY` environment variable, which authenticates
/// requests against the search API used for link resolution.
///
/// # Panics
///
/// Panics if the `TAVILY_API_KEY` environment variable is not set.
pub fn tavily_api_key() -> String {
    env::var("TAVILY_API_KEY").expect("TAVILY_API_KEY must be set")
}

/// Returns the search endpoint URL for the web search provider.
///
/// Retrieves the `TAVILY_API_URL` environment variable, defaulting to the
/// public Tavily endpoint.
pub fn tavily_api_url() -> String {
    env::var("TAVILY_API_URL").unwrap_or_else(|_| "https://api.tavily.com/search".to_string())
}

/// Returns the maximum number of results requested per search query.
///
/// Retrieves the `SEARCH_MAX_RESULTS` environment variable, defaulting to 15.
/// A wider result window increases the chance of finding a platform link for
/// a song at the cost of larger search responses.
pub fn search_max_results() -> u32 {
    env::var("SEARCH_MAX_RESULTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(15)
}

/// Returns the link-filter policy for the song enricher.
///
/// Retrieves the `REQUIRE_BOTH_LINKS` environment variable, defaulting to
/// `true`. When `true` a recommended song is kept only if both a YouTube and
/// a Spotify link resolve; when `false` a single resolved link suffices.
pub fn require_both_links() -> bool {
    env::var("REQUIRE_BOTH_LINKS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(true)
}

/// Returns the directory where the document store keeps its collections.
///
/// Retrieves the `DISCOFY_DATA_DIR` environment variable, defaulting to
/// `discofy/store` under the platform-specific local data directory.
pub fn data_dir() -> PathBuf {
    match env::var("DISCOFY_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("discofy/store");
            path
        }
    }
}
