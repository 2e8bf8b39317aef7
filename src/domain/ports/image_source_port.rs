//! Remote image source port definition.

use async_trait::async_trait;

use crate::domain::entities::ImageRecord;
use crate::domain::errors::GalleryError;

/// Port for fetching random images.
#[async_trait]
pub trait ImageSourcePort: Send + Sync {
    /// Fetches one random image record.
    async fn fetch_one(&self) -> Result<ImageRecord, GalleryError>;
}
