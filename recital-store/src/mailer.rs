use async_trait::async_trait;
use recital_core::booking::BookingEmail;
use recital_core::notify::BookingMailer;
use recital_core::{CoreError, CoreResult};
use recital_shared::Masked;
use serde::Serialize;
use serde_json::Value;

/// Web3Forms submission endpoint used as a transactional mailer.
pub struct Web3FormsMailer {
    client: reqwest::Client,
    endpoint: String,
    access_key: Masked<String>,
    recipient: String,
}

#[derive(Serialize)]
struct Submission<'a> {
    access_key: &'a str,
    subject: &'a str,
    from_name: &'a str,
    to_email: &'a str,
    message: &'a str,
    email: &'a str,
    name: &'a str,
}

impl Web3FormsMailer {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        access_key: Masked<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            access_key,
            recipient: recipient.into(),
        }
    }
}

fn check_reply(body: &Value) -> CoreResult<()> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(CoreError::Upstream(format!(
            "email rejected: {}",
            body.get("message").and_then(Value::as_str).unwrap_or("no reason given")
        )));
    }
    Ok(())
}

#[async_trait]
impl BookingMailer for Web3FormsMailer {
    async fn send(&self, email: &BookingEmail) -> CoreResult<()> {
        let submission = Submission {
            access_key: self.access_key.expose(),
            subject: &email.subject,
            from_name: &email.sender_name,
            to_email: &self.recipient,
            message: &email.body,
            email: &email.reply_to,
            name: &email.visitor_name,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&submission)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CoreError::Upstream(format!("email service: {}", e)))?;

        if let Ok(body) = response.json::<Value>().await {
            check_reply(&body)?;
        }
        tracing::debug!("Booking email sent for {}", email.visitor_name);
        Ok(())
    }
}
