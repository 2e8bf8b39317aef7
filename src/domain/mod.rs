//! Domain layer with core gallery entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Port definitions.
pub mod ports;

pub use entities::{FavoritesList, ImageRecord, TagMap, ThemePreference};
pub use errors::{GalleryError, StorageError};
pub use ports::{ImageSourcePort, KeyValuePort};
