mod app;
mod form_view;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    sync::{Arc, Mutex},
};

use courtside_core::{
    config::{self, AppConfig},
    CourtApi, HttpCourtApi,
};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let path = config::ensure_default_config()?;
    let config = AppConfig::load()
        .with_context(|| format!("edit {} or set COURTSIDE_API_BASE_URL", path.display()))?;
    tracing::info!(base_url = %config.api_base_url, "Starting courtside");

    let api: Arc<dyn CourtApi> = Arc::new(HttpCourtApi::from_config(&config)?);
    let mut app = app::CourtsideApp::new(api, config);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("courtside.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the terminal UI, so events only go to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
