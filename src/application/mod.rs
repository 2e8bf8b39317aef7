//! Application layer with gallery state, services and use cases.

/// Application services.
pub mod services;
/// In-memory gallery state.
pub mod state;
/// Use case implementations.
pub mod use_cases;

pub use services::GalleryService;
pub use state::GalleryState;
pub use use_cases::{LoadImagesUseCase, fetch_many};
