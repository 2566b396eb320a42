#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use recital_api::{app, middleware::SessionCodec, state::AuthConfig, AppState};
use recital_core::desk::BookingDesk;
use recital_shared::Masked;
use recital_store::FileContentStore;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct horse battery staple";
pub const SECRET: &str = "test-session-secret-with-enough-length";
pub const WHATSAPP: &str = "919419237802";

pub struct TestSite {
    pub dir: TempDir,
    pub state: AppState,
    pub router: Router,
}

pub fn seed(dir: &Path) {
    std::fs::write(
        dir.join("about.md"),
        "---\ntitle: About Me\nimage: /images/profile.jpg\n---\n\nViolinist from Jammu.\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("videos.json"),
        r#"{"videos":[{"id":"abc123","title":"Wedding Set","platform":"youtube","thumbnail":""},{"id":"reel9","title":"Reel","platform":"instagram","thumbnail":""}]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("availability.json"),
        r#"{"unavailableDates":["2025-01-10"],"note":"Booked"}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("settings.json"),
        r#"{"title":"Violin","description":"","email":"me@example.com","whatsapp":"","instagram":"","youtube":""}"#,
    )
    .unwrap();
}

pub fn auth_config(password: Option<&str>, secret: Option<&str>) -> AuthConfig {
    AuthConfig {
        admin_password: password.map(|p| Masked::new(p.to_string())),
        session: SessionCodec::new(
            secret.map(|s| Masked::new(s.to_string())),
            "admin_session",
            Duration::hours(1),
            false,
        ),
    }
}

pub fn site_with(desk: BookingDesk, auth: AuthConfig) -> TestSite {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let state = AppState {
        content: Arc::new(FileContentStore::new(dir.path())),
        desk: Arc::new(desk),
        editor: None,
        auth,
    };
    let router = app(state.clone());
    TestSite { dir, state, router }
}

pub fn site() -> TestSite {
    site_with(
        BookingDesk::new(WHATSAPP, "Test Site"),
        auth_config(Some(PASSWORD), Some(SECRET)),
    )
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Reply {
    /// `name=value` of the session cookie set by this reply, if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("admin_session="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

pub async fn send(router: &Router, method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply { status, headers, body }
}

pub async fn login(router: &Router) -> String {
    let reply = send(
        router,
        Method::POST,
        "/api/admin/auth/login",
        None,
        Some(serde_json::json!({ "password": PASSWORD })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.session_cookie().expect("login sets the session cookie")
}
