//! # API Module
//!
//! This module provides the HTTP API endpoints for the discofy service.
//!
//! ## Endpoints
//!
//! ### Songs
//!
//! - [`get_all_songs`] - List stored songs with an optional limit
//! - [`create_song`] - Create a song with a server-assigned id
//! - [`get_song`] / [`update_song`] / [`delete_song`] - Operate on one song
//!
//! ### Playlists
//!
//! - [`create_playlist`] - Create an empty playlist
//! - [`get_playlist`] / [`update_playlist`] / [`delete_playlist`] - Operate
//!   on one playlist
//! - [`add_song_to_playlist`] / [`remove_song_from_playlist`] - Manage
//!   playlist membership
//!
//! ### Recommendations
//!
//! - [`process_song`] - Run the recommendation pipeline for a mood input
//!
//! ### Monitoring
//!
//! - [`health`] - Health check endpoint returning status and version
//!
//! ## Error Handling
//!
//! Handlers return [`ApiError`], which renders as a JSON body of the shape
//! `{"detail": string}` with a 404 or 500 status. Details of unexpected
//! failures are logged but never leaked to the caller; only the fixed
//! pipeline parse-failure message and the "not found" messages travel
//! verbatim.

mod health;
mod playlists;
mod process;
mod songs;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{pipeline::PipelineError, store::StoreError};

pub use health::health;
pub use playlists::{
    add_song_to_playlist, create_playlist, delete_playlist, get_playlist,
    remove_song_from_playlist, update_playlist,
};
pub use process::process_song;
pub use songs::{create_song, delete_song, get_all_songs, get_song, update_song};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("Internal Server Error")]
    Internal(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string()),
            ApiError::Pipeline(PipelineError::MalformedModelOutput(message)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            ApiError::Pipeline(other) => {
                tracing::error!(error = %other, "song processing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while processing your request".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
