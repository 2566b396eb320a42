use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use recital_core::booking::BookingRequest;
use recital_core::desk::DeliveryReport;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{AppResult, OrFail};
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingResponse {
    success: bool,
    message: &'static str,
    whatsapp_url: String,
    delivery: DeliveryReport,
}

/// Public booking form endpoint.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/booking", post(submit_booking))
}

/// Admin view of recorded bookings.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/api/admin/bookings", get(list_bookings))
}

/// POST /api/booking
async fn submit_booking(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<BookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    let receipt = state
        .desk
        .submit(&req, Utc::now())
        .await
        .or_fail("Failed to submit booking request")?;

    Ok(Json(BookingResponse {
        success: true,
        message: "Booking request submitted successfully",
        whatsapp_url: receipt.whatsapp_url,
        delivery: receipt.delivery,
    }))
}

/// GET /api/admin/bookings
///
/// Bookings live in the spreadsheet. When the webhook cannot list them the
/// admin is pointed at the sheet instead.
async fn list_bookings(State(state): State<AppState>) -> Json<Value> {
    let Some(sheet) = state.desk.sheet() else {
        return Json(json!({
            "success": false,
            "error": "Google Sheets webhook URL is not configured",
            "bookings": [],
        }));
    };

    match sheet.list().await {
        Ok(bookings) => Json(json!({ "success": true, "bookings": bookings })),
        Err(e) => {
            tracing::warn!("Could not fetch bookings from sheet: {}", e);
            Json(json!({
                "success": true,
                "bookings": [],
                "message": "Bookings are stored in Google Sheets. Please check your Google Sheet directly for booking data.",
                "sheetConfigured": true,
            }))
        }
    }
}
