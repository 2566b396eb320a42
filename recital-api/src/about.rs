use axum::{extract::State, routing::get, Json, Router};
use recital_core::content::{AboutContent, AboutInput};
use serde::Serialize;

use crate::content::Saved;
use crate::error::{AppResult, OrFail};
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct AboutResponse {
    success: bool,
    data: AboutContent,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/admin/about", get(read_about).post(write_about))
}

/// GET /api/admin/about
async fn read_about(State(state): State<AppState>) -> AppResult<Json<AboutResponse>> {
    let data = state.content.load_about().await.or_fail("Failed to read about data")?;
    Ok(Json(AboutResponse { success: true, data }))
}

/// POST /api/admin/about
async fn write_about(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<AboutInput>,
) -> AppResult<Json<Saved>> {
    let about = input.validate()?;
    state.content.save_about(&about).await.or_fail("Failed to update about data")?;
    Ok(Json(Saved::new("About section updated successfully")))
}
