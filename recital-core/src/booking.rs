use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

use crate::patterns::{is_email, is_iso_date};
use crate::{CoreError, CoreResult};

pub const DEFAULT_BOOKING_STATUS: &str = "Pending";

/// A performance enquiry from the public form. Never stored locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub budget: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Forms send `budget` and `phone` as JSON numbers when the input is numeric.
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("expected text or number, got {}", other))),
    }
}

/// What the spreadsheet webhook receives: the request verbatim plus
/// bookkeeping columns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow<'a> {
    #[serde(flatten)]
    pub booking: &'a BookingRequest,
    pub timestamp: String,
    pub status: &'static str,
}

/// Transactional email handed to the mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingEmail {
    pub subject: String,
    pub visitor_name: String,
    pub reply_to: String,
    pub sender_name: String,
    pub body: String,
}

impl BookingRequest {
    /// Server-side checks; returns the parsed event date.
    pub fn validate(&self) -> CoreResult<NaiveDate> {
        let required = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("eventDate", &self.event_date),
            ("eventTime", &self.event_time),
            ("location", &self.location),
            ("budget", &self.budget),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        if !is_email(self.email.trim()) {
            return Err(CoreError::validation("Please enter a valid email address"));
        }

        parse_event_date(&self.event_date)
    }

    fn extra_message(&self) -> Option<&str> {
        self.message.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }

    pub fn sheet_row(&self, now: DateTime<Utc>) -> SheetRow<'_> {
        SheetRow {
            booking: self,
            timestamp: now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            status: DEFAULT_BOOKING_STATUS,
        }
    }

    pub fn email(&self, event_date: NaiveDate, sender_name: &str) -> BookingEmail {
        let mut body = format!(
            "New Booking Request from {name}\n\n\
             Contact Information:\n\
             - Name: {name}\n\
             - Phone: {phone}\n\
             - Email: {email}\n\n\
             Event Details:\n\
             - Date: {date}\n\
             - Time: {time}\n\
             - Location: {location}\n\
             - Budget: {budget}\n",
            name = self.name,
            phone = self.phone,
            email = self.email,
            date = long_date(event_date),
            time = self.event_time,
            location = self.location,
            budget = self.budget,
        );
        if let Some(message) = self.extra_message() {
            body.push_str(&format!("\nAdditional Details:\n{}\n", message));
        }
        body.push_str("\nPlease respond to confirm availability.");

        BookingEmail {
            subject: format!("New Booking Request from {}", self.name),
            visitor_name: self.name.clone(),
            reply_to: self.email.clone(),
            sender_name: sender_name.to_string(),
            body,
        }
    }

    /// Text for the messaging deep link. Fields are copied as submitted.
    pub fn chat_text(&self) -> String {
        let mut text = format!(
            "New Booking Request!\n\nName: {}\nPhone: {}\nEmail: {}\nDate: {}\nTime: {}\nLocation: {}\nBudget: {}",
            self.name,
            self.phone,
            self.email,
            self.event_date,
            self.event_time,
            self.location,
            self.budget,
        );
        if let Some(message) = self.extra_message() {
            text.push_str(&format!("\n\nMessage: {}", message));
        }
        text
    }

    /// `https://wa.me/<number>?text=<chat text>`. Built only, never fetched.
    pub fn whatsapp_link(&self, number: &str) -> CoreResult<Url> {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(CoreError::NotConfigured("WhatsApp number".to_string()));
        }
        Url::parse_with_params(&format!("https://wa.me/{}", digits), &[("text", self.chat_text())])
            .map_err(|e| CoreError::validation(format!("Could not build deep link: {}", e)))
    }
}

/// Accepts a plain `YYYY-MM-DD` or a full RFC 3339 timestamp (what browser
/// date pickers serialize). Timestamps keep the calendar date of their own offset.
pub fn parse_event_date(raw: &str) -> CoreResult<NaiveDate> {
    let raw = raw.trim();
    let parsed = if is_iso_date(raw) {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    } else {
        DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
    };
    parsed.ok_or_else(|| CoreError::validation(format!("Invalid event date: {}", raw)))
}

/// "Saturday, March 15, 2025"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking() -> BookingRequest {
        BookingRequest {
            name: "Asha Rao".into(),
            phone: "+91 98765 43210".into(),
            email: "asha@example.com".into(),
            event_date: "2025-03-15".into(),
            event_time: "18:00".into(),
            location: "Jammu Club, Jammu".into(),
            budget: "₹ 50,000".into(),
            message: Some("Wedding reception & sangeet".into()),
        }
    }

    #[test]
    fn test_validate_lists_missing_fields() {
        let mut req = booking();
        req.name = " ".into();
        req.budget.clear();
        match req.validate() {
            Err(CoreError::Validation(msg)) => {
                assert!(msg.contains("name"));
                assert!(msg.contains("budget"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_email_and_date() {
        let mut req = booking();
        req.email = "asha".into();
        assert!(req.validate().is_err());

        let mut req = booking();
        req.event_date = "15/03/2025".into();
        assert!(req.validate().is_err());

        // chrono alone would accept unpadded fields.
        let mut req = booking();
        req.event_date = "2025-3-2".into();
        assert!(matches!(req.validate(), Err(CoreError::Validation(_))));

        let mut req = booking();
        req.event_date = "2025-02-30".into();
        assert!(req.validate().is_err());

        let mut req = booking();
        req.event_date = "2025-03-15T00:00:00.000Z".into();
        assert_eq!(req.validate().unwrap(), NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    }

    #[test]
    fn test_numeric_fields_are_kept_as_text() {
        let req: BookingRequest = serde_json::from_value(serde_json::json!({
            "name": "Asha Rao",
            "phone": 919876543210u64,
            "budget": 50000,
        }))
        .unwrap();
        assert_eq!(req.phone, "919876543210");
        assert_eq!(req.budget, "50000");

        let bad = serde_json::from_value::<BookingRequest>(serde_json::json!({ "budget": ["a"] }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(long_date(date), "Saturday, March 15, 2025");
    }

    #[test]
    fn test_sheet_row_shape() {
        let req = booking();
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 9, 30, 0).unwrap();
        let row = serde_json::to_value(req.sheet_row(now)).unwrap();
        assert_eq!(row["name"], "Asha Rao");
        assert_eq!(row["eventDate"], "2025-03-15");
        assert_eq!(row["status"], "Pending");
        assert_eq!(row["timestamp"], "2025-02-01T09:30:00.000Z");
    }

    #[test]
    fn test_email_body() {
        let req = booking();
        let email = req.email(req.validate().unwrap(), "Recital Website");
        assert_eq!(email.subject, "New Booking Request from Asha Rao");
        assert_eq!(email.reply_to, "asha@example.com");
        assert!(email.body.contains("- Date: Saturday, March 15, 2025"));
        assert!(email.body.contains("Additional Details:\nWedding reception & sangeet"));
        assert!(email.body.ends_with("Please respond to confirm availability."));

        let mut quiet = booking();
        quiet.message = None;
        let email = quiet.email(quiet.validate().unwrap(), "Recital Website");
        assert!(!email.body.contains("Additional Details"));
    }

    #[test]
    fn test_whatsapp_link_round_trips_fields() {
        let req = booking();
        let link = req.whatsapp_link("+91 94192 37802").unwrap();
        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/919419237802");

        let text = link
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert!(text.contains("Name: Asha Rao"));
        assert!(text.contains("Date: 2025-03-15"));
        assert!(text.contains("Location: Jammu Club, Jammu"));
        assert!(text.contains("Message: Wedding reception & sangeet"));
    }

    #[test]
    fn test_whatsapp_link_needs_a_number() {
        assert!(matches!(booking().whatsapp_link(""), Err(CoreError::NotConfigured(_))));
    }
}
