use async_trait::async_trait;
use serde_json::Value;

use crate::CoreResult;

/// Exchanges an OAuth authorization code for the content editor's access
/// token. The reply is passed back to the editor untouched.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(&self, code: &str) -> CoreResult<Value>;
}

/// Error text from an OAuth token reply, if it carries one.
pub fn token_error(reply: &Value) -> Option<String> {
    reply.get("error")?;
    Some(
        reply
            .get("error_description")
            .and_then(Value::as_str)
            .or_else(|| reply.get("error").and_then(Value::as_str))
            .unwrap_or("OAuth exchange failed")
            .to_string(),
    )
}
