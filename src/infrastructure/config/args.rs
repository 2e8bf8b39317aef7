use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "foxgallery",
    version,
    about = "A wildlife image gallery for the terminal",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Random image endpoint.
    #[arg(long, env = "FOX_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Images fetched per load.
    #[arg(long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Directory for favorites, tags and theme records.
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Download and draw the full image in the preview overlay.
    #[arg(long)]
    pub image_preview: Option<bool>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,

    /// Keep favorites, tags and theme in memory only.
    #[arg(long)]
    pub ephemeral: bool,
}
