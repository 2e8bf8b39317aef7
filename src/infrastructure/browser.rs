use tracing::{debug, warn};

use crate::domain::errors::GalleryError;

/// Opens image source links in the system browser.
#[derive(Clone, Default)]
pub struct BrowserService {}

impl BrowserService {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Opens `url` with the platform handler.
    ///
    /// Only `http` and `https` links are opened.
    ///
    /// # Errors
    /// Returns `OpenLink` error if the link is not a web URL or no handler
    /// could be launched.
    pub fn open(&self, url: &str) -> Result<(), GalleryError> {
        check_web_url(url)?;

        debug!(url, "Opening link");
        opener::open(url).map_err(|e| {
            warn!(url, error = %e, "Failed to open link");
            GalleryError::open_link(e.to_string())
        })
    }
}

fn check_web_url(url: &str) -> Result<(), GalleryError> {
    let lower = url.trim().to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        Ok(())
    } else {
        Err(GalleryError::open_link(format!("not a web link: '{url}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://randomfox.ca/?i=1", true ; "https")]
    #[test_case("HTTP://randomfox.ca/", true ; "uppercase scheme")]
    #[test_case("file:///etc/passwd", false ; "file scheme")]
    #[test_case("", false ; "empty")]
    fn test_check_web_url(url: &str, accepted: bool) {
        assert_eq!(check_web_url(url).is_ok(), accepted);
    }

    #[test]
    fn test_open_rejects_non_web_links_before_launching() {
        let browser = BrowserService::new();
        assert!(matches!(
            browser.open("javascript:alert(1)"),
            Err(GalleryError::OpenLink { .. })
        ));
    }
}
