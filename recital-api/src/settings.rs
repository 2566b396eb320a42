use axum::{extract::State, routing::get, Json, Router};
use recital_core::content::{SettingsInput, SiteSettings};
use serde::Serialize;

use crate::content::Saved;
use crate::error::{AppResult, OrFail};
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct SettingsResponse {
    success: bool,
    settings: SiteSettings,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/admin/settings", get(read_settings).post(write_settings))
}

async fn read_settings(State(state): State<AppState>) -> AppResult<Json<SettingsResponse>> {
    let settings = state.content.load_settings().await.or_fail("Failed to read settings")?;
    Ok(Json(SettingsResponse { success: true, settings }))
}

async fn write_settings(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SettingsInput>,
) -> AppResult<Json<Saved>> {
    let settings = input.validate()?;
    state
        .content
        .save_settings(&settings)
        .await
        .or_fail("Failed to update settings")?;
    Ok(Json(Saved::new("Settings updated successfully")))
}
