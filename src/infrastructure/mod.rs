//! Infrastructure layer with external service adapters.

/// Random fox API client.
pub mod api;
pub mod browser;
/// Application configuration.
pub mod config;
/// Preview image loading.
pub mod image;
/// Typed persistence of gallery records.
pub mod state_store;
/// Key-value storage adapters.
pub mod storage;

pub use api::{DEFAULT_API_URL, RandomFoxClient};
pub use browser::BrowserService;
pub use config::{AppConfig, CliArgs, ConfigManager, LogLevel};
pub use image::{PreviewLoadedEvent, PreviewLoader};
pub use state_store::StateStore;
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};
