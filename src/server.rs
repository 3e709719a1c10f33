use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{api, error, info, pipeline::Pipeline, store::DocumentStore};

/// Shared application state injected into every handler. Both collaborators
/// are built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub pipeline: Arc<Pipeline>,
}

/// Builds the service router. Split out from [`start_api_server`] so tests
/// can drive the full surface without binding a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/process-song", post(api::process_song))
        .route("/songs/all_songs", get(api::get_all_songs))
        .route("/songs/create_song", post(api::create_song))
        .route(
            "/songs/{song_id}",
            get(api::get_song).put(api::update_song).delete(api::delete_song),
        )
        .route("/playlists/playlist_create", post(api::create_playlist))
        .route(
            "/playlists/{playlist_id}",
            get(api::get_playlist)
                .put(api::update_playlist)
                .delete(api::delete_playlist),
        )
        .route(
            "/playlists/{playlist_id}/songs/{song_id}",
            post(api::add_song_to_playlist).delete(api::remove_song_from_playlist),
        )
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn start_api_server(addr: &str, state: AppState) {
    let app = build_router(state);

    let addr = match SocketAddr::from_str(addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}
