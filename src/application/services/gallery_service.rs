//! Gallery state transitions.

use tracing::{debug, info, warn};

use super::tag_search::{normalize_query, search_by_tag};
use crate::application::state::GalleryState;
use crate::domain::entities::{ImageRecord, ThemePreference};
use crate::domain::errors::GalleryError;
use crate::infrastructure::state_store::StateStore;

/// Owns the gallery state and persists every durable change.
///
/// Persistence failures are logged and never undo the in-memory change.
pub struct GalleryService {
    store: StateStore,
    state: GalleryState,
}

impl GalleryService {
    /// Creates the service, restoring favorites, tags and theme.
    #[must_use]
    pub fn new(store: StateStore) -> Self {
        let state = GalleryState {
            favorites: store.load_favorites(),
            tags: store.load_tags(),
            theme: store.load_theme(),
            ..GalleryState::default()
        };

        info!(
            favorites = state.favorites.len(),
            tagged = state.tags.len(),
            theme = %state.theme,
            "Gallery state restored"
        );

        Self { store, state }
    }

    #[must_use]
    pub const fn state(&self) -> &GalleryState {
        &self.state
    }

    /// Marks a batch fetch as started.
    ///
    /// Returns `false` if one is already in flight.
    pub fn begin_load(&mut self) -> bool {
        if self.state.loading {
            debug!("Load already in progress, ignoring");
            return false;
        }
        self.state.loading = true;
        self.clear_message();
        true
    }

    /// Applies a finished batch fetch.
    ///
    /// The loading flag is cleared whatever the outcome. On success the
    /// working gallery is replaced; on failure it is left as it was.
    ///
    /// # Errors
    /// Returns the fetch error after recording it in the message area.
    pub fn finish_load(
        &mut self,
        result: Result<Vec<ImageRecord>, GalleryError>,
    ) -> Result<&[ImageRecord], GalleryError> {
        self.state.loading = false;

        match result {
            Ok(records) => {
                info!(count = records.len(), "Working gallery replaced");
                self.state.working = records;
                Ok(self.state.working.as_slice())
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Flips favorite membership of `record` and persists the list.
    ///
    /// Returns whether the record is favorited afterwards.
    pub fn toggle_favorite(&mut self, record: &ImageRecord) -> bool {
        self.clear_message();
        let favorited = self.state.favorites.toggle(record);
        debug!(image = record.image(), favorited, "Favorite toggled");

        if let Err(e) = self.store.save_favorites(&self.state.favorites) {
            warn!(error = %e, "Failed to persist favorites");
        }
        favorited
    }

    /// Adds a trimmed tag to `record`.
    ///
    /// Returns the image's updated tags, or `None` when the input was empty
    /// or the tag already present.
    pub fn add_tag(&mut self, record: &ImageRecord, raw: &str) -> Option<&[String]> {
        self.clear_message();
        let tag = raw.trim();
        if tag.is_empty() {
            return None;
        }

        if !self.state.tags.add(record.image(), tag) {
            debug!(image = record.image(), tag, "Duplicate tag ignored");
            return None;
        }

        debug!(image = record.image(), tag, "Tag added");
        if let Err(e) = self.store.save_tags(&self.state.tags) {
            warn!(error = %e, "Failed to persist tags");
        }
        Some(self.state.tags.tags_for(record.image()))
    }

    /// Searches tags for `raw`.
    ///
    /// The working gallery is not modified; callers render the returned
    /// records instead.
    ///
    /// # Errors
    /// Returns `Validation` for blank input and `NotFound` when nothing
    /// matches; both are recorded in the message area.
    pub fn search(&mut self, raw: &str) -> Result<Vec<ImageRecord>, GalleryError> {
        self.clear_message();

        let query = normalize_query(raw).inspect_err(|e| self.report(e))?;

        let results = search_by_tag(
            &query,
            &self.state.tags,
            &self.state.working,
            &self.state.favorites,
        );
        info!(query = %query, matches = results.len(), "Tag search");

        if results.is_empty() {
            let e = GalleryError::not_found(query.as_str());
            self.state.last_search = Some(query);
            self.report(&e);
            return Err(e);
        }

        self.state.last_search = Some(query);
        Ok(results)
    }

    /// Switches between light and dark and persists the choice.
    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.clear_message();
        self.state.theme = self.state.theme.toggled();
        info!(theme = %self.state.theme, "Theme toggled");

        if let Err(e) = self.store.save_theme(self.state.theme) {
            warn!(error = %e, "Failed to persist theme");
        }
        self.state.theme
    }

    /// Shows an error in the shared message area.
    pub fn report(&mut self, error: &GalleryError) {
        warn!(error = %error, "Action failed");
        self.state.message = Some(error.user_message());
    }

    /// Empties the shared message area.
    pub fn clear_message(&mut self) {
        self.state.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::fetch_many;
    use crate::domain::entities::{FavoritesList, TagMap};
    use crate::domain::ports::KeyValuePort;
    use crate::domain::ports::mocks::{MockImageSource, fox};
    use crate::infrastructure::state_store::{FAVORITES_KEY, TAGS_KEY, THEME_KEY};
    use crate::infrastructure::storage::MemoryKeyValueStore;
    use std::sync::Arc;

    fn service() -> (GalleryService, Arc<MemoryKeyValueStore>) {
        let backend = Arc::new(MemoryKeyValueStore::new());
        let service = GalleryService::new(StateStore::new(backend.clone()));
        (service, backend)
    }

    #[test]
    fn test_restores_persisted_state() {
        let backend = Arc::new(MemoryKeyValueStore::with_records([
            (TAGS_KEY, r#"{"https://randomfox.ca/images/1.jpg":["cute"]}"#),
            (THEME_KEY, "dark"),
            (FAVORITES_KEY, "{broken"),
        ]));

        let service = GalleryService::new(StateStore::new(backend));

        assert_eq!(
            service.state().tags.tags_for("https://randomfox.ca/images/1.jpg"),
            ["cute"]
        );
        assert_eq!(service.state().theme, ThemePreference::Dark);
        assert!(service.state().favorites.is_empty());
    }

    #[test]
    fn test_favorite_scenario_persists_each_step() {
        let (mut service, backend) = service();

        assert!(service.toggle_favorite(&fox(1)));
        assert_eq!(service.state().favorites.as_slice(), &[fox(1)]);
        let stored: FavoritesList =
            serde_json::from_str(&backend.get(FAVORITES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.as_slice(), &[fox(1)]);

        assert!(!service.toggle_favorite(&fox(1)));
        assert!(service.state().favorites.is_empty());
        assert_eq!(backend.get(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_tag_scenario() {
        let (mut service, backend) = service();

        assert_eq!(
            service.add_tag(&fox(2), "  cute "),
            Some(["cute".to_string()].as_slice())
        );
        assert_eq!(service.add_tag(&fox(2), "cute"), None);
        assert_eq!(service.add_tag(&fox(2), "   "), None);

        let stored: TagMap =
            serde_json::from_str(&backend.get(TAGS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.tags_for(fox(2).image()), ["cute"]);
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_batch_leaves_working_gallery() {
        let (mut service, _) = service();
        assert!(service.begin_load());
        service
            .finish_load(fetch_many(&MockImageSource::foxes(6), 6).await)
            .unwrap();
        let before = service.state().working.clone();

        assert!(service.begin_load());
        let failing = MockImageSource::new(vec![
            Ok(fox(7)),
            Ok(fox(8)),
            Ok(fox(9)),
            Ok(fox(10)),
            Ok(fox(11)),
            Err(GalleryError::network("HTTP 500")),
        ]);
        let result = service.finish_load(fetch_many(&failing, 6).await);

        assert!(result.is_err());
        assert_eq!(service.state().working, before);
        assert!(!service.state().loading);
        assert_eq!(
            service.state().message.as_deref(),
            Some("Failed to load fox images. Please try again.")
        );
    }

    #[test]
    fn test_begin_load_rejects_overlap_and_clears_message() {
        let (mut service, _) = service();
        service.report(&GalleryError::not_found("x"));

        assert!(service.begin_load());
        assert!(service.state().message.is_none());
        assert!(!service.begin_load());

        service.finish_load(Ok(vec![fox(1)])).unwrap();
        assert!(service.begin_load());
    }

    #[test]
    fn test_search_scenario_synthesizes_and_keeps_working_gallery() {
        let (mut service, _) = service();
        service.add_tag(&fox(2), "cute");
        service.add_tag(&fox(3), "wild");
        service.begin_load();
        service.finish_load(Ok(vec![fox(3)])).unwrap();

        let results = service.search("  CUTE").unwrap();

        assert_eq!(results, vec![ImageRecord::minimal(fox(2).image())]);
        assert_eq!(service.state().working, vec![fox(3)]);
        assert_eq!(service.state().last_search.as_deref(), Some("cute"));
    }

    #[test]
    fn test_search_without_match_reports_not_found() {
        let (mut service, _) = service();
        service.add_tag(&fox(1), "sleepy");
        service.finish_load(Ok(vec![fox(1)])).unwrap();

        let result = service.search("cute");

        assert_eq!(result, Err(GalleryError::not_found("cute")));
        assert_eq!(service.state().working, vec![fox(1)]);
        assert_eq!(
            service.state().message.as_deref(),
            Some("No foxes found for that tag.")
        );
    }

    #[test]
    fn test_blank_search_reports_validation() {
        let (mut service, _) = service();

        let result = service.search("   ");

        assert!(matches!(result, Err(GalleryError::Validation { .. })));
        assert_eq!(
            service.state().message.as_deref(),
            Some("Please enter a tag or keyword.")
        );
        assert!(service.state().last_search.is_none());
    }

    #[test]
    fn test_toggle_theme_persists() {
        let (mut service, backend) = service();

        assert_eq!(service.toggle_theme(), ThemePreference::Dark);
        assert_eq!(backend.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(service.toggle_theme(), ThemePreference::Light);
        assert_eq!(backend.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }
}
