use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::booking::{BookingEmail, SheetRow};
use crate::CoreResult;

/// Spreadsheet-backed booking log reached over a webhook.
#[async_trait]
pub trait BookingSheet: Send + Sync {
    /// Append one booking row.
    async fn append(&self, row: &SheetRow<'_>) -> CoreResult<()>;

    /// Fetch rows already recorded, if the webhook supports reads.
    async fn list(&self) -> CoreResult<Vec<Value>>;
}

/// Transactional email service.
#[async_trait]
pub trait BookingMailer: Send + Sync {
    async fn send(&self, email: &BookingEmail) -> CoreResult<()>;
}

/// Outcome of one outbound channel for a single booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    Delivered,
    Failed,
    Skipped,
}
