//! Domain error types.

mod gallery_error;
mod storage_error;

pub use gallery_error::GalleryError;
pub use storage_error::StorageError;
