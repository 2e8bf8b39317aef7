//! Gallery action error types.

use thiserror::Error;

/// Errors surfaced by user-triggered gallery actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum GalleryError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("unexpected response body: {message}")]
    Parse { message: String },

    #[error("invalid input: {message}")]
    Validation { message: String },

    #[error("no images tagged with '{query}'")]
    NotFound { query: String },

    #[error("preview unavailable: {message}")]
    Preview { message: String },

    #[error("failed to open link: {message}")]
    OpenLink { message: String },
}

impl GalleryError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates not found error.
    #[must_use]
    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Creates preview error.
    #[must_use]
    pub fn preview(message: impl Into<String>) -> Self {
        Self::Preview {
            message: message.into(),
        }
    }

    /// Creates open link error.
    #[must_use]
    pub fn open_link(message: impl Into<String>) -> Self {
        Self::OpenLink {
            message: message.into(),
        }
    }

    /// Returns the text shown in the message area.
    ///
    /// Load failures share one generic message whatever the cause.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { .. } | Self::Parse { .. } => {
                "Failed to load fox images. Please try again.".to_string()
            }
            Self::Validation { .. } => "Please enter a tag or keyword.".to_string(),
            Self::NotFound { .. } => "No foxes found for that tag.".to_string(),
            Self::Preview { message } => format!("Could not load preview: {message}"),
            Self::OpenLink { .. } => "Could not open link in a browser.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(GalleryError::network("timeout"), "Failed to load fox images. Please try again." ; "network")]
    #[test_case(GalleryError::parse("eof"), "Failed to load fox images. Please try again." ; "parse")]
    #[test_case(GalleryError::validation("empty"), "Please enter a tag or keyword." ; "validation")]
    #[test_case(GalleryError::not_found("cute"), "No foxes found for that tag." ; "not found")]
    fn test_user_message(error: GalleryError, expected: &str) {
        assert_eq!(error.user_message(), expected);
    }
}
