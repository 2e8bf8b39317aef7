//! In-memory gallery state.

use crate::domain::entities::{FavoritesList, ImageRecord, TagMap, ThemePreference};

/// Everything the gallery knows while running.
///
/// `favorites`, `tags` and `theme` mirror the persisted records; the rest
/// lives only for the session.
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    /// Most recently fetched batch.
    pub working: Vec<ImageRecord>,
    /// Favorited images.
    pub favorites: FavoritesList,
    /// Per-image tags.
    pub tags: TagMap,
    /// Active color scheme.
    pub theme: ThemePreference,
    /// Whether a batch fetch is in flight.
    pub loading: bool,
    /// Last accepted search query, already normalized.
    pub last_search: Option<String>,
    /// Text of the shared message area.
    pub message: Option<String>,
}
