use async_trait::async_trait;
use recital_core::booking::SheetRow;
use recital_core::notify::BookingSheet;
use recital_core::{CoreError, CoreResult};
use serde_json::Value;

/// Google Apps Script web app that appends booking rows to a sheet.
pub struct WebhookSheet {
    client: reqwest::Client,
    url: String,
}

impl WebhookSheet {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }
}

/// The script answers 200 even when it fails, with `{"status":"error"}`.
fn check_script_reply(body: &Value) -> CoreResult<()> {
    match body.get("status").and_then(Value::as_str) {
        Some("error") => Err(CoreError::Upstream(format!(
            "sheet script rejected row: {}",
            body.get("message").and_then(Value::as_str).unwrap_or("unknown error")
        ))),
        _ => Ok(()),
    }
}

fn bookings_from(body: &Value) -> Vec<Value> {
    body.get("bookings")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

#[async_trait]
impl BookingSheet for WebhookSheet {
    async fn append(&self, row: &SheetRow<'_>) -> CoreResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(row)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CoreError::Upstream(format!("sheet webhook: {}", e)))?;

        // Non-JSON replies (redirect pages) are accepted as-is.
        if let Ok(body) = response.json::<Value>().await {
            check_script_reply(&body)?;
        }
        tracing::debug!("Booking row forwarded to spreadsheet");
        Ok(())
    }

    async fn list(&self) -> CoreResult<Vec<Value>> {
        let body: Value = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CoreError::Upstream(format!("sheet webhook: {}", e)))?
            .json()
            .await
            .map_err(|e| CoreError::Upstream(format!("sheet webhook reply: {}", e)))?;
        Ok(bookings_from(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_error_reply_is_upstream_failure() {
        let body = json!({ "status": "error", "message": "Error: Missing required fields" });
        match check_script_reply(&body) {
            Err(CoreError::Upstream(msg)) => assert!(msg.contains("Missing required fields")),
            other => panic!("expected upstream error, got {:?}", other),
        }
        assert!(check_script_reply(&json!({ "status": "success" })).is_ok());
        assert!(check_script_reply(&json!({})).is_ok());
    }

    #[test]
    fn test_bookings_from_reply() {
        assert_eq!(bookings_from(&json!({ "bookings": [{ "name": "A" }] })).len(), 1);
        assert!(bookings_from(&json!({ "status": "success" })).is_empty());
    }
}
