//! Tag based image search.

use crate::domain::entities::{FavoritesList, ImageRecord, TagMap};
use crate::domain::errors::GalleryError;

/// Trims and lower-cases raw search input.
///
/// # Errors
/// Returns `Validation` error if nothing is left after trimming.
pub fn normalize_query(raw: &str) -> Result<String, GalleryError> {
    let query = raw.trim().to_lowercase();
    if query.is_empty() {
        return Err(GalleryError::validation("search query is empty"));
    }
    Ok(query)
}

/// Finds every tagged image whose tags contain `query`.
///
/// Known records are taken from the working gallery first, then from
/// favorites, keeping the first occurrence of each image. Matches with no
/// known record get a minimal record, appended in tag map order.
#[must_use]
pub fn search_by_tag(
    query: &str,
    tags: &TagMap,
    working: &[ImageRecord],
    favorites: &FavoritesList,
) -> Vec<ImageRecord> {
    let matched = tags.matching(query);

    let mut results: Vec<ImageRecord> = Vec::with_capacity(matched.len());
    for record in working.iter().chain(favorites.as_slice()) {
        if matched.contains(&record.image()) && !results.iter().any(|r| r.same_image(record)) {
            results.push(record.clone());
        }
    }

    for url in matched {
        if !results.iter().any(|r| r.image() == url) {
            results.push(ImageRecord::minimal(url));
        }
    }

    results
}
