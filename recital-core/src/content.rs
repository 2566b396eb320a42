use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::patterns::{is_email, is_iso_date, present};
use crate::{CoreError, CoreResult};

pub const DEFAULT_ABOUT_IMAGE: &str = "/images/profile.jpg";
pub const DEFAULT_AVAILABILITY_NOTE: &str =
    "Dates listed here are unavailable for booking. Admin can update this via the admin panel.";

// ============================================================================
// About
// ============================================================================

/// Bio section. Stored as Markdown with `title`/`image` front matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AboutInput {
    pub title: Option<String>,
    pub image: Option<String>,
    pub content: Option<String>,
}

impl AboutInput {
    pub fn validate(self) -> CoreResult<AboutContent> {
        let (Some(title), Some(content)) = (present(self.title), present(self.content)) else {
            return Err(CoreError::validation("Title and content are required"));
        };

        Ok(AboutContent {
            title,
            image: present(self.image).unwrap_or_else(|| DEFAULT_ABOUT_IMAGE.to_string()),
            content: content.trim().to_string(),
        })
    }
}

// ============================================================================
// Videos
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Instagram,
    Vimeo,
}

impl std::str::FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" => Ok(Platform::Youtube),
            "instagram" => Ok(Platform::Instagram),
            "vimeo" => Ok(Platform::Vimeo),
            other => Err(CoreError::validation(format!(
                "Unsupported platform: {}. Use youtube, instagram or vimeo",
                other
            ))),
        }
    }
}

/// One entry of the gallery. List order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    pub id: String,
    pub title: String,
    pub platform: Platform,
    #[serde(default)]
    pub thumbnail: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct VideosInput {
    pub videos: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct VideoInput {
    id: Option<String>,
    title: Option<String>,
    platform: Option<String>,
    thumbnail: Option<String>,
}

impl VideosInput {
    /// Keeps the submitted order; ids are not checked for uniqueness.
    pub fn validate(self) -> CoreResult<Vec<VideoEntry>> {
        let Some(Value::Array(items)) = self.videos else {
            return Err(CoreError::validation("Videos must be an array"));
        };

        items
            .into_iter()
            .map(|item| {
                let video: VideoInput = serde_json::from_value(item).map_err(|_| {
                    CoreError::validation("Each video must have id, title, and platform")
                })?;
                let (Some(id), Some(title), Some(platform)) =
                    (present(video.id), present(video.title), present(video.platform))
                else {
                    return Err(CoreError::validation(
                        "Each video must have id, title, and platform",
                    ));
                };
                Ok(VideoEntry {
                    id,
                    title,
                    platform: platform.parse()?,
                    thumbnail: video.thumbnail.unwrap_or_default(),
                })
            })
            .collect()
    }
}

/// Drops every entry whose id matches. Returns how many were removed;
/// zero is not an error.
pub fn remove_video(videos: &mut Vec<VideoEntry>, id: &str) -> usize {
    let before = videos.len();
    videos.retain(|v| v.id != id);
    before - videos.len()
}

// ============================================================================
// Availability
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    #[serde(default)]
    pub unavailable_dates: Vec<String>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityInput {
    pub unavailable_dates: Option<Value>,
    pub note: Option<String>,
}

impl AvailabilityInput {
    /// Dates come back sorted ascending. Duplicates are kept.
    pub fn validate(self) -> CoreResult<AvailabilityRecord> {
        let Some(Value::Array(items)) = self.unavailable_dates else {
            return Err(CoreError::validation("unavailableDates must be an array"));
        };

        let mut dates = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(date) if is_iso_date(&date) => dates.push(date),
                Value::String(date) => {
                    return Err(CoreError::validation(format!(
                        "Invalid date format: {}. Use YYYY-MM-DD",
                        date
                    )))
                }
                other => {
                    return Err(CoreError::validation(format!(
                        "Invalid date format: {}. Use YYYY-MM-DD",
                        other
                    )))
                }
            }
        }
        dates.sort();

        Ok(AvailabilityRecord {
            unavailable_dates: dates,
            note: present(self.note).unwrap_or_else(|| DEFAULT_AVAILABILITY_NOTE.to_string()),
        })
    }
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub title: String,
    pub description: String,
    pub email: String,
    pub whatsapp: String,
    pub instagram: String,
    pub youtube: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
}

impl SettingsInput {
    pub fn validate(self) -> CoreResult<SiteSettings> {
        let (Some(title), Some(email)) = (present(self.title), present(self.email)) else {
            return Err(CoreError::validation("Title and email are required"));
        };
        if !is_email(&email) {
            return Err(CoreError::validation("Invalid email format"));
        }

        Ok(SiteSettings {
            title,
            description: self.description.unwrap_or_default(),
            email,
            whatsapp: self.whatsapp.unwrap_or_default(),
            instagram: self.instagram.unwrap_or_default(),
            youtube: self.youtube.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<T: serde::de::DeserializeOwned>(value: Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_about_requires_title_and_content() {
        let input: AboutInput = parse(json!({ "title": "About Me" }));
        assert!(matches!(input.validate(), Err(CoreError::Validation(_))));

        let input: AboutInput = parse(json!({ "title": "", "content": "Hi" }));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_about_defaults_image_and_trims() {
        let input: AboutInput = parse(json!({ "title": "About Me", "content": "\n  Violinist.  \n" }));
        let about = input.validate().unwrap();
        assert_eq!(about.image, DEFAULT_ABOUT_IMAGE);
        assert_eq!(about.content, "Violinist.");
    }

    #[test]
    fn test_availability_sorted_not_deduplicated() {
        let input: AvailabilityInput = parse(json!({
            "unavailableDates": ["2025-03-02", "2025-01-10", "2025-03-02"]
        }));
        let record = input.validate().unwrap();
        assert_eq!(record.unavailable_dates, vec!["2025-01-10", "2025-03-02", "2025-03-02"]);
        assert_eq!(record.note, DEFAULT_AVAILABILITY_NOTE);
    }

    #[test]
    fn test_availability_rejects_bad_dates() {
        let input: AvailabilityInput = parse(json!({ "unavailableDates": ["2025-3-2"] }));
        match input.validate() {
            Err(CoreError::Validation(msg)) => assert!(msg.contains("2025-3-2")),
            other => panic!("expected validation error, got {:?}", other),
        }

        let input: AvailabilityInput = parse(json!({ "unavailableDates": "2025-01-10" }));
        assert!(input.validate().is_err());

        let input: AvailabilityInput = parse(json!({ "unavailableDates": [20250110] }));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_videos_validation() {
        let input: VideosInput = parse(json!({ "videos": {} }));
        assert!(input.validate().is_err());

        let input: VideosInput = parse(json!({ "videos": [{ "id": "a", "title": "Live" }] }));
        assert!(input.validate().is_err());

        let input: VideosInput = parse(json!({
            "videos": [{ "id": "a", "title": "Live", "platform": "myspace" }]
        }));
        assert!(input.validate().is_err());

        let input: VideosInput = parse(json!({
            "videos": [
                { "id": "b", "title": "Second", "platform": "vimeo" },
                { "id": "a", "title": "First", "platform": "YouTube", "thumbnail": "https://img/a.jpg" }
            ]
        }));
        let videos = input.validate().unwrap();
        assert_eq!(videos[0].id, "b");
        assert_eq!(videos[0].thumbnail, "");
        assert_eq!(videos[1].platform, Platform::Youtube);
    }

    #[test]
    fn test_remove_video_is_noop_for_unknown_id() {
        let mut videos = vec![VideoEntry {
            id: "a".into(),
            title: "Live".into(),
            platform: Platform::Instagram,
            thumbnail: String::new(),
        }];
        assert_eq!(remove_video(&mut videos, "zzz"), 0);
        assert_eq!(videos.len(), 1);
        assert_eq!(remove_video(&mut videos, "a"), 1);
        assert!(videos.is_empty());
    }

    #[test]
    fn test_settings_email_and_defaults() {
        let input: SettingsInput = parse(json!({ "title": "Site", "email": "not-an-email" }));
        assert!(matches!(input.validate(), Err(CoreError::Validation(msg)) if msg == "Invalid email format"));

        let input: SettingsInput = parse(json!({ "title": "Site", "email": "me@example.com" }));
        let settings = input.validate().unwrap();
        assert_eq!(settings.description, "");
        assert_eq!(settings.whatsapp, "");
        assert_eq!(settings.instagram, "");
        assert_eq!(settings.youtube, "");
    }

    #[test]
    fn test_settings_read_fills_missing_fields() {
        let settings: SiteSettings = parse(json!({ "title": "Site", "email": "me@example.com" }));
        assert_eq!(settings.youtube, "");
    }
}
