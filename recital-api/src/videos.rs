use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use recital_core::content::{VideoEntry, VideosInput};
use serde::{Deserialize, Serialize};

use crate::content::Saved;
use crate::error::{AppError, AppResult, OrFail};
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct VideosResponse {
    success: bool,
    videos: Vec<VideoEntry>,
}

#[derive(Debug, Deserialize)]
struct DeleteVideoQuery {
    id: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/admin/videos",
        get(list_videos).post(replace_videos).delete(delete_video),
    )
}

/// GET /api/admin/videos
async fn list_videos(State(state): State<AppState>) -> AppResult<Json<VideosResponse>> {
    let videos = state.content.load_videos().await.or_fail("Failed to read videos")?;
    Ok(Json(VideosResponse { success: true, videos }))
}

/// POST /api/admin/videos
///
/// Replaces the whole list. Reordering happens client-side; the submitted
/// order is the stored order.
async fn replace_videos(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<VideosInput>,
) -> AppResult<Json<Saved>> {
    let videos = input.validate()?;
    state.content.save_videos(&videos).await.or_fail("Failed to update videos")?;
    Ok(Json(Saved::new("Videos updated successfully")))
}

/// DELETE /api/admin/videos?id=...
async fn delete_video(
    State(state): State<AppState>,
    Query(query): Query<DeleteVideoQuery>,
) -> AppResult<Json<Saved>> {
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::ValidationError("Video ID is required".to_string()))?;

    let removed = state.content.delete_video(&id).await.or_fail("Failed to delete video")?;
    if removed == 0 {
        tracing::debug!("Delete for unknown video id {}", id);
    }
    Ok(Json(Saved::new("Video deleted successfully")))
}
