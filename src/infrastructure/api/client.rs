//! Random fox API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::dto::FoxResponse;
use crate::domain::entities::ImageRecord;
use crate::domain::errors::GalleryError;
use crate::domain::ports::ImageSourcePort;

/// Default endpoint returning one random fox per request.
pub const DEFAULT_API_URL: &str = "https://randomfox.ca/floof/";
const USER_AGENT: &str = concat!("foxgallery/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP adapter for the random fox endpoint.
#[derive(Debug, Clone)]
pub struct RandomFoxClient {
    client: Client,
    api_url: String,
}

impl RandomFoxClient {
    /// Creates client for the default endpoint.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, GalleryError> {
        Self::with_base_url(DEFAULT_API_URL, DEFAULT_TIMEOUT)
    }

    /// Creates client with custom endpoint and request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GalleryError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| GalleryError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the underlying HTTP client for sharing connection pools.
    #[must_use]
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}

pub(crate) fn map_transport_error(e: &reqwest::Error) -> GalleryError {
    if e.is_timeout() {
        GalleryError::network("request timed out")
    } else if e.is_connect() {
        GalleryError::network("failed to connect to image API")
    } else {
        GalleryError::network(e.to_string())
    }
}

/// Parses a response body, which must be a JSON object.
fn parse_body(body: &str) -> Result<FoxResponse, GalleryError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| GalleryError::parse(e.to_string()))?;
    if !value.is_object() {
        return Err(GalleryError::parse("response is not a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| GalleryError::parse(e.to_string()))
}

#[async_trait]
impl ImageSourcePort for RandomFoxClient {
    async fn fetch_one(&self) -> Result<ImageRecord, GalleryError> {
        let response = self.client.get(&self.api_url).send().await.map_err(|e| {
            warn!(error = %e, url = %self.api_url, "Failed to reach image API");
            map_transport_error(&e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Image API returned an error status");
            return Err(GalleryError::network(format!("image API returned {status}")));
        }

        let body = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read image API response");
            map_transport_error(&e)
        })?;

        let fox = parse_body(&body).inspect_err(|e| {
            warn!(error = %e, "Failed to parse image API response");
        })?;

        debug!(image = %fox.image, "Fetched fox");
        Ok(fox.into())
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves the same canned HTTP response to every connection and returns
    /// the base URL.
    pub async fn serve(
        status_line: &'static str,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let body = body.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let head = format!(
                        "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    let _ = socket.write_all(head.as_bytes()).await;
                    let _ = socket.write_all(&body).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{addr}/floof/")
    }

    pub async fn serve_json(status_line: &'static str, body: &str) -> String {
        serve(status_line, "application/json", body.as_bytes().to_vec()).await
    }
}
