use serde::Deserialize;

use crate::domain::entities::ImageRecord;

/// Random fox API response structure.
///
/// Fields are not validated: a missing field becomes an empty string.
#[derive(Debug, Deserialize)]
pub struct FoxResponse {
    /// Direct image URL.
    #[serde(default)]
    pub image: String,
    /// Page linking back to the image.
    #[serde(default)]
    pub link: String,
}

impl From<FoxResponse> for ImageRecord {
    fn from(response: FoxResponse) -> Self {
        Self::new(response.image, response.link)
    }
}
