//! Application services.

pub mod gallery_service;
pub mod tag_search;

pub use gallery_service::GalleryService;
pub use tag_search::{normalize_query, search_by_tag};
