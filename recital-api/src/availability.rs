use axum::{extract::State, routing::get, Json, Router};
use recital_core::content::AvailabilityInput;
use serde::Serialize;

use crate::content::Saved;
use crate::error::{AppResult, OrFail};
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityResponse {
    success: bool,
    unavailable_dates: Vec<String>,
    note: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/admin/availability", get(read_availability).post(write_availability))
}

async fn read_availability(State(state): State<AppState>) -> AppResult<Json<AvailabilityResponse>> {
    let record = state
        .content
        .load_availability()
        .await
        .or_fail("Failed to read availability")?;

    Ok(Json(AvailabilityResponse {
        success: true,
        unavailable_dates: record.unavailable_dates,
        note: record.note,
    }))
}

async fn write_availability(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<AvailabilityInput>,
) -> AppResult<Json<Saved>> {
    let record = input.validate()?;
    state
        .content
        .save_availability(&record)
        .await
        .or_fail("Failed to update availability")?;
    Ok(Json(Saved::new("Availability updated successfully")))
}
