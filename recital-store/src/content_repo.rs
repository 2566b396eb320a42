use async_trait::async_trait;
use recital_core::content::{remove_video, AboutContent, AvailabilityRecord, SiteSettings, VideoEntry};
use recital_core::repository::ContentRepository;
use recital_core::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::document::Document;
use crate::front_matter;

pub const ABOUT_FILE: &str = "about.md";
pub const VIDEOS_FILE: &str = "videos.json";
pub const AVAILABILITY_FILE: &str = "availability.json";
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct VideoFile {
    #[serde(default)]
    videos: Vec<VideoEntry>,
}

#[derive(Serialize)]
struct VideoFileRef<'a> {
    videos: &'a [VideoEntry],
}

/// Site content kept as four independent files under one data directory.
pub struct FileContentStore {
    about: Document,
    videos: Document,
    availability: Document,
    settings: Document,
}

impl FileContentStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            about: Document::new(dir.join(ABOUT_FILE)),
            videos: Document::new(dir.join(VIDEOS_FILE)),
            availability: Document::new(dir.join(AVAILABILITY_FILE)),
            settings: Document::new(dir.join(SETTINGS_FILE)),
        }
    }
}

#[async_trait]
impl ContentRepository for FileContentStore {
    async fn load_about(&self) -> CoreResult<AboutContent> {
        let raw = self.about.read().await?;
        front_matter::parse_about(&raw)
            .map_err(|e| CoreError::Storage(format!("parse {}: {}", self.about.path().display(), e)))
    }

    async fn save_about(&self, about: &AboutContent) -> CoreResult<()> {
        let doc = front_matter::render_about(about)
            .map_err(|e| CoreError::Storage(format!("render front matter: {}", e)))?;
        self.about.replace(&doc).await
    }

    async fn load_videos(&self) -> CoreResult<Vec<VideoEntry>> {
        let file: VideoFile = self.videos.read_json().await?;
        Ok(file.videos)
    }

    async fn save_videos(&self, videos: &[VideoEntry]) -> CoreResult<()> {
        self.videos.replace_json(&VideoFileRef { videos }).await
    }

    async fn delete_video(&self, id: &str) -> CoreResult<usize> {
        let mut videos = self.load_videos().await?;
        let removed = remove_video(&mut videos, id);
        self.save_videos(&videos).await?;
        Ok(removed)
    }

    async fn load_availability(&self) -> CoreResult<AvailabilityRecord> {
        self.availability.read_json().await
    }

    async fn save_availability(&self, record: &AvailabilityRecord) -> CoreResult<()> {
        self.availability.replace_json(record).await
    }

    async fn load_settings(&self) -> CoreResult<SiteSettings> {
        self.settings.read_json().await
    }

    async fn save_settings(&self, settings: &SiteSettings) -> CoreResult<()> {
        self.settings.replace_json(settings).await
    }
}
