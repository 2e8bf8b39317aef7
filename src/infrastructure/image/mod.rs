//! Image handling infrastructure.

pub mod preview_loader;

pub use preview_loader::{PreviewLoadedEvent, PreviewLoader};
