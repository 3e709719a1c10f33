use axum::{Extension, Json, extract::Path};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    server::AppState,
    store,
    types::{Playlist, PlaylistCreate, PlaylistUpdate, Song},
};

use super::ApiError;

pub async fn create_playlist(
    Extension(state): Extension<AppState>,
    Json(create): Json<PlaylistCreate>,
) -> Result<Json<Playlist>, ApiError> {
    let id = Uuid::new_v4().to_string();
    let playlist = Playlist {
        id: id.clone(),
        name: create.name,
        song_ids: Vec::new(),
    };

    state.store.insert(store::PLAYLISTS, &id, &playlist).await?;
    tracing::info!(playlist_id = %id, "created playlist");
    Ok(Json(playlist))
}

pub async fn get_playlist(
    Path(playlist_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Playlist>, ApiError> {
    match state
        .store
        .find_one::<Playlist>(store::PLAYLISTS, &playlist_id)
        .await?
    {
        Some(playlist) => Ok(Json(playlist)),
        None => Err(ApiError::NotFound("Playlist not found")),
    }
}

pub async fn update_playlist(
    Path(playlist_id): Path<String>,
    Extension(state): Extension<AppState>,
    Json(update): Json<PlaylistUpdate>,
) -> Result<Json<Playlist>, ApiError> {
    let Some(mut playlist) = state
        .store
        .find_one::<Playlist>(store::PLAYLISTS, &playlist_id)
        .await?
    else {
        return Err(ApiError::NotFound("Playlist not found"));
    };

    if let Some(name) = update.name {
        playlist.name = name;
    }

    if !state
        .store
        .update_one(store::PLAYLISTS, &playlist_id, &playlist)
        .await?
    {
        return Err(ApiError::NotFound("Playlist not found"));
    }
    Ok(Json(playlist))
}

pub async fn delete_playlist(
    Path(playlist_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    if state.store.delete_one(store::PLAYLISTS, &playlist_id).await? {
        tracing::info!(%playlist_id, "deleted playlist");
        Ok(Json(json!({ "message": "Playlist deleted successfully" })))
    } else {
        Err(ApiError::NotFound("Playlist not found"))
    }
}

/// Adds a song to a playlist. Membership is a set: adding a song that is
/// already present leaves the playlist unchanged.
pub async fn add_song_to_playlist(
    Path((playlist_id, song_id)): Path<(String, String)>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Playlist>, ApiError> {
    let Some(mut playlist) = state
        .store
        .find_one::<Playlist>(store::PLAYLISTS, &playlist_id)
        .await?
    else {
        return Err(ApiError::NotFound("Playlist not found"));
    };

    if state
        .store
        .find_one::<Song>(store::SONGS, &song_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Song not found"));
    }

    if !playlist.song_ids.contains(&song_id) {
        playlist.song_ids.push(song_id);
        state
            .store
            .update_one(store::PLAYLISTS, &playlist_id, &playlist)
            .await?;
    }

    Ok(Json(playlist))
}

/// Removes a song from a playlist. Removing a song that is not a member is
/// a no-op returning the unchanged playlist.
pub async fn remove_song_from_playlist(
    Path((playlist_id, song_id)): Path<(String, String)>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Playlist>, ApiError> {
    let Some(mut playlist) = state
        .store
        .find_one::<Playlist>(store::PLAYLISTS, &playlist_id)
        .await?
    else {
        return Err(ApiError::NotFound("Playlist not found"));
    };

    if playlist.song_ids.contains(&song_id) {
        playlist.song_ids.retain(|id| id != &song_id);
        state
            .store
            .update_one(store::PLAYLISTS, &playlist_id, &playlist)
            .await?;
    }

    Ok(Json(playlist))
}
