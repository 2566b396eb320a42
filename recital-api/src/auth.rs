use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use recital_core::{session, CoreError};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, extract::JsonBody, state::AppState};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    success: bool,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct VerifyResponse {
    authenticated: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/auth/login", post(login))
        .route("/api/admin/auth/logout", post(logout))
        .route("/api/admin/auth/verify", get(verify))
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::ValidationError("Password is required".to_string()))?;

    if !state.auth.session.is_enabled() {
        return Err(AppError::NotConfigured("Admin panel is not configured".to_string()));
    }

    let now = Utc::now();
    let session = session::authenticate(&password, state.auth.admin_password.as_ref(), now).map_err(|e| match e {
        CoreError::Unauthorized => {
            tracing::warn!("Admin login rejected: invalid password");
            AppError::AuthenticationError("Invalid password".to_string())
        }
        other => other.into(),
    })?;

    let cookie = state.auth.session.issue(&session, now)?;
    tracing::info!("Admin logged in");

    Ok((
        jar.add(cookie),
        Json(AuthResponse { success: true, message: "Login successful" }),
    ))
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<AuthResponse>) {
    (
        jar.remove(state.auth.session.removal()),
        Json(AuthResponse { success: true, message: "Logout successful" }),
    )
}

async fn verify(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<VerifyResponse>) {
    let (check, jar) = state.auth.session.check(jar, Utc::now());
    (jar, Json(VerifyResponse { authenticated: check.is_active() }))
}
