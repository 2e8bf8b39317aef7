//! Domain entity definitions.

mod favorites;
mod image_record;
mod tag_map;
mod theme;

pub use favorites::FavoritesList;
pub use image_record::ImageRecord;
pub use tag_map::TagMap;
pub use theme::ThemePreference;
