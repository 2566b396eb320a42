use async_trait::async_trait;

use crate::content::{AboutContent, AvailabilityRecord, SiteSettings, VideoEntry};
use crate::CoreResult;

/// Whole-document access to the site content.
///
/// Every save replaces the stored document. There is no locking: two
/// concurrent writers to the same resource race and the last write wins.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn load_about(&self) -> CoreResult<AboutContent>;

    async fn save_about(&self, about: &AboutContent) -> CoreResult<()>;

    async fn load_videos(&self) -> CoreResult<Vec<VideoEntry>>;

    async fn save_videos(&self, videos: &[VideoEntry]) -> CoreResult<()>;

    /// Remove every video with this id and return how many went.
    /// An unknown id removes nothing and still succeeds.
    async fn delete_video(&self, id: &str) -> CoreResult<usize>;

    async fn load_availability(&self) -> CoreResult<AvailabilityRecord>;

    async fn save_availability(&self, record: &AvailabilityRecord) -> CoreResult<()>;

    async fn load_settings(&self) -> CoreResult<SiteSettings>;

    async fn save_settings(&self, settings: &SiteSettings) -> CoreResult<()>;
}
