use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use foxgallery::application::{GalleryService, LoadImagesUseCase};
use foxgallery::domain::ports::KeyValuePort;
use foxgallery::infrastructure::{
    AppConfig, BrowserService, CliArgs, ConfigManager, FileKeyValueStore, MemoryKeyValueStore,
    PreviewLoader, RandomFoxClient, StateStore,
};
use foxgallery::presentation::App;
use foxgallery::presentation::widgets::ImageModal;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();

    let manager = ConfigManager::new()?;
    let mut config = manager.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    Ok(config)
}

fn create_store(config: &AppConfig) -> Result<Arc<dyn KeyValuePort>> {
    if config.ephemeral {
        warn!("Ephemeral mode, favorites and tags will not be saved");
        return Ok(Arc::new(MemoryKeyValueStore::new()));
    }

    let store = match &config.data_dir {
        Some(dir) => FileKeyValueStore::with_dir(dir.clone()),
        None => FileKeyValueStore::new()?,
    };
    info!(dir = %store.dir().display(), "Using data directory");
    Ok(Arc::new(store))
}

fn create_app(config: &AppConfig) -> Result<App> {
    let store = StateStore::new(create_store(config)?);
    let service = GalleryService::new(store);

    let client =
        RandomFoxClient::with_base_url(config.api_url.clone(), config.request_timeout())?;
    let preview_loader = PreviewLoader::new(client.http_client().clone());
    info!(
        api_url = client.api_url(),
        batch_size = config.effective_batch_size(),
        "Image source ready"
    );

    let load_use_case = LoadImagesUseCase::new(Arc::new(client), config.effective_batch_size());

    let picker = config.ui.image_preview.then(ImageModal::detect_picker);

    Ok(App::new(
        service,
        load_use_case,
        preview_loader,
        BrowserService::new(),
        &config.theme.accent_color,
        picker,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let config = load_config()?;
    init_logging(&config)?;

    info!(version = foxgallery::VERSION, "Starting foxgallery");

    let mut terminal = ratatui::init();

    let result = match create_app(&config) {
        Ok(app) => app.run(&mut terminal).await,
        Err(e) => Err(e),
    };

    ratatui::restore();

    result
}
