use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use recital_core::editor::token_error;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult, OrFail};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/auth", get(oauth_callback))
}

/// GET /api/auth?code=...
///
/// OAuth callback for the Git-backed content editor. Hands the token to the
/// opener window in the `authorization:github:success:<json>` message format.
async fn oauth_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> AppResult<Html<String>> {
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::ValidationError("No code provided".to_string()))?;

    let exchange = state
        .editor
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("GitHub OAuth credentials not configured".to_string()))?;

    let reply = exchange
        .exchange(&code)
        .await
        .or_fail("Failed to authenticate with GitHub")?;

    if let Some(description) = token_error(&reply) {
        return Err(AppError::ValidationError(description));
    }

    Ok(Html(authorization_page(&reply)))
}

fn authorization_page(reply: &Value) -> String {
    let message = format!("authorization:github:success:{}", reply);
    // JSON string literal, with `</` broken up so it cannot close the script tag.
    let literal = serde_json::to_string(&message)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/");

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>Authorization Complete</title>
  </head>
  <body>
    <script>
      if (window.opener) {{
        window.opener.postMessage({literal}, window.location.origin);
        window.close();
      }}
    </script>
    <p>Authorization successful! You can close this window.</p>
  </body>
</html>
"#
    )
}
