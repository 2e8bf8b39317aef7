//! Typed persistence of favorites, tags and theme.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::entities::{FavoritesList, TagMap, ThemePreference};
use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValuePort;

/// Storage key of the favorites JSON array.
pub const FAVORITES_KEY: &str = "foxFavorites";
/// Storage key of the tag JSON object.
pub const TAGS_KEY: &str = "foxTags";
/// Storage key of the theme string.
pub const THEME_KEY: &str = "theme";

/// Reads and writes the durable gallery records.
///
/// Loads never fail: an absent, unreadable or malformed record yields the
/// empty default and a warning in the log.
#[derive(Clone)]
pub struct StateStore {
    backend: Arc<dyn KeyValuePort>,
}

impl StateStore {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValuePort>) -> Self {
        Self { backend }
    }

    /// Loads favorites, or an empty list.
    #[must_use]
    pub fn load_favorites(&self) -> FavoritesList {
        self.load_json(FAVORITES_KEY)
    }

    /// Loads tags, or an empty map.
    #[must_use]
    pub fn load_tags(&self) -> TagMap {
        self.load_json(TAGS_KEY)
    }

    /// Loads the theme preference, or light.
    #[must_use]
    pub fn load_theme(&self) -> ThemePreference {
        match self.read(THEME_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(key = THEME_KEY, error = %e, "Ignoring stored theme");
                ThemePreference::default()
            }),
            None => ThemePreference::default(),
        }
    }

    /// Persists the full favorites list.
    ///
    /// # Errors
    /// Returns error if serialization or the backend write fails.
    pub fn save_favorites(&self, favorites: &FavoritesList) -> Result<(), StorageError> {
        self.save_json(FAVORITES_KEY, favorites)
    }

    /// Persists the full tag map.
    ///
    /// # Errors
    /// Returns error if serialization or the backend write fails.
    pub fn save_tags(&self, tags: &TagMap) -> Result<(), StorageError> {
        self.save_json(TAGS_KEY, tags)
    }

    /// Persists the theme preference.
    ///
    /// # Errors
    /// Returns error if the backend write fails.
    pub fn save_theme(&self, theme: ThemePreference) -> Result<(), StorageError> {
        self.backend.set(THEME_KEY, theme.as_str())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read stored record, using default");
                None
            }
        }
    }

    fn load_json<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.read(key) else {
            debug!(key, "Record absent, using default");
            return T::default();
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Stored record is malformed, using default");
                T::default()
            }
        }
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &json)
    }
}
