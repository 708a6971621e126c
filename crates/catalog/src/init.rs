//! Process lifecycle: configuration, logging, bootstrap, shutdown

use std::path::Path;
use std::time::Duration;

use catalog_infrastructure::config::{AppConfig, ConfigLoader};
use catalog_infrastructure::constants::SHUTDOWN_DRAIN_TIMEOUT_SECS;
use catalog_infrastructure::di::init_app;
use catalog_infrastructure::logging::init_logging;
use tracing::{info, warn};

/// Run the engine until Ctrl-C
///
/// `log_level` overrides the configured level when given.
pub async fn run(
    config_path: Option<&Path>,
    log_level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    if let Some(level) = log_level {
        config.logging.level = level.to_string();
    }
    init_logging(&config.logging)?;

    let context = init_app(config).await?;
    info!(?context, "catalog semantic index initialized");

    let sync = context.start_sync().await?;
    let scheduled = context.catalog().resync_all().await?;
    info!(scheduled, "initial reconciliation scheduled");

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");

    if !context
        .wait_for_sync(Duration::from_secs(SHUTDOWN_DRAIN_TIMEOUT_SECS))
        .await
    {
        warn!("pending synchronization work abandoned at shutdown");
    }
    sync.shutdown().await;

    let stats = context.catalog().sync_stats();
    info!(
        records_stored = stats.records_stored,
        degraded = stats.degraded,
        "catalog semantic index stopped"
    );
    Ok(())
}

/// Load configuration from optional path
fn load_config(config_path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}
