//! Full-size image download for the preview overlay.

use std::sync::Arc;

use bytes::Bytes;
use image::DynamicImage;
use reqwest::Client;
use tracing::{debug, warn};

use crate::domain::errors::GalleryError;
use crate::infrastructure::api::map_transport_error;

/// Message sent when a preview finishes loading.
#[derive(Debug, Clone)]
pub struct PreviewLoadedEvent {
    /// The image URL the preview was requested for.
    pub url: String,
    /// The decoded image, or the failure.
    pub result: Result<Arc<DynamicImage>, GalleryError>,
}

/// Downloads and decodes preview images on demand.
#[derive(Debug, Clone)]
pub struct PreviewLoader {
    http_client: Client,
}

impl PreviewLoader {
    /// Creates a loader sharing an existing HTTP client.
    #[must_use]
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Downloads and decodes the image at `url`.
    ///
    /// # Errors
    /// Returns `Preview` error if the download fails or the bytes are not
    /// a supported image.
    pub async fn load(&self, url: &str) -> Result<Arc<DynamicImage>, GalleryError> {
        if url.is_empty() {
            return Err(GalleryError::preview("image has no URL"));
        }

        debug!(url, "Downloading preview");
        let bytes = self.download(url).await?;

        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .map_err(|e| GalleryError::preview(format!("decode task panicked: {e}")))?
            .map_err(|e| {
                warn!(error = %e, "Failed to decode preview");
                GalleryError::preview(format!("failed to decode image: {e}"))
            })?;

        debug!(
            width = decoded.width(),
            height = decoded.height(),
            "Preview decoded"
        );
        Ok(Arc::new(decoded))
    }

    /// Loads `url` and packages the outcome for the event loop.
    pub async fn load_event(&self, url: String) -> PreviewLoadedEvent {
        let result = self.load(&url).await;
        PreviewLoadedEvent { url, result }
    }

    async fn download(&self, url: &str) -> Result<Bytes, GalleryError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| GalleryError::preview(map_transport_error(&e).to_string()))?;

        if !response.status().is_success() {
            return Err(GalleryError::preview(format!(
                "HTTP {}: {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| GalleryError::preview(format!("failed to read body: {e}")))
    }
}
