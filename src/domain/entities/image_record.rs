//! Fetched image entity.

use serde::{Deserialize, Serialize};

/// A single fox picture and the page it came from.
///
/// Identity is the `image` URL: two records with the same `image` are the
/// same picture regardless of `link`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRecord {
    image: String,
    link: String,
}

impl ImageRecord {
    /// Creates a record from an image URL and its source link.
    #[must_use]
    pub fn new(image: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            link: link.into(),
        }
    }

    /// Creates a record that only knows its image URL.
    ///
    /// The link falls back to the image itself.
    #[must_use]
    pub fn minimal(image: impl Into<String>) -> Self {
        let image = image.into();
        Self {
            link: image.clone(),
            image,
        }
    }

    /// Returns the image URL, which is also the record key.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the source link.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Returns whether both records refer to the same picture.
    #[must_use]
    pub fn same_image(&self, other: &Self) -> bool {
        self.image == other.image
    }

    /// Returns the last path segment of the image URL, for compact display.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.image
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(&self.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_uses_image_as_link() {
        let record = ImageRecord::minimal("https://randomfox.ca/images/12.jpg");
        assert_eq!(record.image(), "https://randomfox.ca/images/12.jpg");
        assert_eq!(record.link(), "https://randomfox.ca/images/12.jpg");
    }

    #[test]
    fn test_identity_ignores_link() {
        let a = ImageRecord::new("https://randomfox.ca/images/1.jpg", "https://randomfox.ca/?i=1");
        let b = ImageRecord::minimal("https://randomfox.ca/images/1.jpg");
        assert!(a.same_image(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_file_name() {
        let record = ImageRecord::minimal("https://randomfox.ca/images/57.jpg");
        assert_eq!(record.file_name(), "57.jpg");

        let empty = ImageRecord::minimal("");
        assert_eq!(empty.file_name(), "");
    }

    #[test]
    fn test_json_shape() {
        let record: ImageRecord = serde_json::from_str(
            r#"{"image":"https://randomfox.ca/images/3.jpg","link":"https://randomfox.ca/?i=3"}"#,
        )
        .unwrap();
        assert_eq!(record.link(), "https://randomfox.ca/?i=3");

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""image":"https://randomfox.ca/images/3.jpg""#));
    }
}
