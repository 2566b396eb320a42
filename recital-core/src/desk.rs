use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::booking::BookingRequest;
use crate::notify::{BookingMailer, BookingSheet, Delivery};
use crate::CoreResult;

/// Per-channel report returned with every accepted booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub spreadsheet: Delivery,
    pub email: Delivery,
}

#[derive(Debug, Clone)]
pub struct BookingReceipt {
    pub whatsapp_url: String,
    pub delivery: DeliveryReport,
}

/// Forwards public booking requests to the configured channels.
///
/// Both outbound legs are best-effort: a missing channel is skipped and a
/// failing one is logged, neither fails the booking. The deep link is always
/// built so the visitor can still reach the musician directly.
pub struct BookingDesk {
    sheet: Option<Arc<dyn BookingSheet>>,
    mailer: Option<Arc<dyn BookingMailer>>,
    whatsapp_number: String,
    sender_name: String,
}

impl BookingDesk {
    pub fn new(whatsapp_number: impl Into<String>, sender_name: impl Into<String>) -> Self {
        Self {
            sheet: None,
            mailer: None,
            whatsapp_number: whatsapp_number.into(),
            sender_name: sender_name.into(),
        }
    }

    pub fn with_sheet(mut self, sheet: Arc<dyn BookingSheet>) -> Self {
        self.sheet = Some(sheet);
        self
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn BookingMailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn sheet(&self) -> Option<&Arc<dyn BookingSheet>> {
        self.sheet.as_ref()
    }

    pub async fn submit(&self, req: &BookingRequest, now: DateTime<Utc>) -> CoreResult<BookingReceipt> {
        let event_date = req.validate()?;
        let whatsapp_url = req.whatsapp_link(&self.whatsapp_number)?.to_string();

        tracing::info!("Booking request received from {} for {}", req.name, req.event_date);

        let spreadsheet = match &self.sheet {
            None => Delivery::Skipped,
            Some(sheet) => match sheet.append(&req.sheet_row(now)).await {
                Ok(()) => Delivery::Delivered,
                Err(e) => {
                    tracing::warn!("Spreadsheet forward failed, continuing: {}", e);
                    Delivery::Failed
                }
            },
        };

        let email = match &self.mailer {
            None => Delivery::Skipped,
            Some(mailer) => match mailer.send(&req.email(event_date, &self.sender_name)).await {
                Ok(()) => Delivery::Delivered,
                Err(e) => {
                    tracing::warn!("Booking email failed, continuing: {}", e);
                    Delivery::Failed
                }
            },
        };

        tracing::debug!("WhatsApp link for {}: {}", req.name, whatsapp_url);

        Ok(BookingReceipt {
            whatsapp_url,
            delivery: DeliveryReport { spreadsheet, email },
        })
    }
}
