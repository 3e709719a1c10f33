use axum::{Extension, Json};

use crate::{
    server::AppState,
    types::{RecommendationResponse, SongRequest},
};

use super::ApiError;

pub async fn process_song(
    Extension(state): Extension<AppState>,
    Json(request): Json<SongRequest>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    tracing::info!(input = %request.input, "processing song recommendation request");

    let response = state.pipeline.run(&request.input).await?;

    tracing::info!(
        recommendations = response.recommendations.len(),
        "recommendation pipeline completed"
    );
    Ok(Json(response))
}
