//! Favorites collection.

use serde::{Deserialize, Deserializer, Serialize};

use super::ImageRecord;

/// Ordered list of favorited images, unique by image URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FavoritesList {
    items: Vec<ImageRecord>,
}

impl FavoritesList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns whether `record` is favorited.
    #[must_use]
    pub fn contains(&self, record: &ImageRecord) -> bool {
        self.contains_url(record.image())
    }

    /// Returns whether an image URL is favorited.
    #[must_use]
    pub fn contains_url(&self, image: &str) -> bool {
        self.items.iter().any(|fav| fav.image() == image)
    }

    /// Adds `record` when absent, removes it when present.
    ///
    /// Returns `true` if the record is favorited afterwards.
    pub fn toggle(&mut self, record: &ImageRecord) -> bool {
        if self.contains(record) {
            self.items.retain(|fav| !fav.same_image(record));
            false
        } else {
            self.items.push(record.clone());
            true
        }
    }

    /// Returns the favorited records in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[ImageRecord] {
        &self.items
    }

    /// Returns the number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether nothing is favorited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<ImageRecord>> for FavoritesList {
    fn from(records: Vec<ImageRecord>) -> Self {
        let mut list = Self::new();
        for record in records {
            if !list.contains(&record) {
                list.items.push(record);
            }
        }
        list
    }
}

impl<'de> Deserialize<'de> for FavoritesList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<ImageRecord>::deserialize(deserializer).map(Self::from)
    }
}
