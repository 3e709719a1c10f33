use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    server::AppState,
    store,
    types::{Song, SongCreate, SongUpdate},
};

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

pub async fn get_all_songs(
    Query(params): Query<ListParams>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Song>>, ApiError> {
    let limit = params.limit.unwrap_or(100);
    let songs = state.store.find_all::<Song>(store::SONGS, limit).await?;
    tracing::info!(count = songs.len(), "retrieved songs from store");
    Ok(Json(songs))
}

pub async fn create_song(
    Extension(state): Extension<AppState>,
    Json(create): Json<SongCreate>,
) -> Result<Json<Song>, ApiError> {
    let id = Uuid::new_v4().to_string();
    let song = Song {
        id: id.clone(),
        name: create.name,
        artists: create.artists,
        duration: create.duration,
        image: create.image,
        language: create.language,
        release_year: create.release_year,
        play_count: create.play_count,
        song_url: create.song_url,
        genre: create.genre,
    };

    state.store.insert(store::SONGS, &id, &song).await?;
    tracing::info!(song_id = %id, "inserted song into store");
    Ok(Json(song))
}

pub async fn get_song(
    Path(song_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Song>, ApiError> {
    match state.store.find_one::<Song>(store::SONGS, &song_id).await? {
        Some(song) => Ok(Json(song)),
        None => {
            tracing::warn!(%song_id, "song not found");
            Err(ApiError::NotFound("Song not found"))
        }
    }
}

pub async fn update_song(
    Path(song_id): Path<String>,
    Extension(state): Extension<AppState>,
    Json(update): Json<SongUpdate>,
) -> Result<Json<Song>, ApiError> {
    let Some(mut song) = state.store.find_one::<Song>(store::SONGS, &song_id).await? else {
        tracing::warn!(%song_id, "song not found for update");
        return Err(ApiError::NotFound("Song not found"));
    };

    // Partial update: only fields present in the request body are applied.
    if let Some(name) = update.name {
        song.name = Some(name);
    }
    if let Some(artists) = update.artists {
        song.artists = Some(artists);
    }
    if let Some(duration) = update.duration {
        song.duration = Some(duration);
    }
    if let Some(image) = update.image {
        song.image = Some(image);
    }
    if let Some(language) = update.language {
        song.language = Some(language);
    }
    if let Some(release_year) = update.release_year {
        song.release_year = Some(release_year);
    }
    if let Some(play_count) = update.play_count {
        song.play_count = Some(play_count);
    }
    if let Some(song_url) = update.song_url {
        song.song_url = Some(song_url);
    }

    if !state.store.update_one(store::SONGS, &song_id, &song).await? {
        return Err(ApiError::NotFound("Song not found"));
    }
    tracing::info!(%song_id, "updated song");
    Ok(Json(song))
}

pub async fn delete_song(
    Path(song_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    if state.store.delete_one(store::SONGS, &song_id).await? {
        tracing::info!(%song_id, "deleted song");
        Ok(Json(json!({ "message": "Song deleted successfully" })))
    } else {
        tracing::warn!(%song_id, "song not found for deletion");
        Err(ApiError::NotFound("Song not found"))
    }
}
