//! Batch image loading use case.

use std::sync::Arc;
use std::time::Instant;

use futures_util::future::try_join_all;
use tracing::{debug, info, warn};

use crate::domain::entities::ImageRecord;
use crate::domain::errors::GalleryError;
use crate::domain::ports::ImageSourcePort;

/// Fetches `count` images concurrently.
///
/// All requests are issued at once and joined; the first failure fails the
/// whole batch and the remaining requests are dropped. Records keep request
/// order.
///
/// # Errors
/// Returns the first error reported by any request.
pub async fn fetch_many(
    source: &dyn ImageSourcePort,
    count: usize,
) -> Result<Vec<ImageRecord>, GalleryError> {
    debug!(count, "Fetching image batch");
    let started = Instant::now();

    let records = try_join_all((0..count).map(|_| source.fetch_one()))
        .await
        .map_err(|e| {
            warn!(error = %e, count, "Image batch failed");
            e
        })?;

    info!(
        count = records.len(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "Image batch fetched"
    );
    Ok(records)
}

/// Loads one batch of random images.
#[derive(Clone)]
pub struct LoadImagesUseCase {
    source: Arc<dyn ImageSourcePort>,
    batch_size: usize,
}

impl LoadImagesUseCase {
    /// Creates new load use case.
    #[must_use]
    pub fn new(source: Arc<dyn ImageSourcePort>, batch_size: usize) -> Self {
        Self { source, batch_size }
    }

    /// Returns images requested per batch.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Executes one batch fetch.
    ///
    /// # Errors
    /// Returns error if any request in the batch fails.
    pub async fn execute(&self) -> Result<Vec<ImageRecord>, GalleryError> {
        fetch_many(self.source.as_ref(), self.batch_size).await
    }
}
