//! Configuration loader
//!
//! Sources are merged with Figment, later ones overriding earlier ones:
//! 1. `AppConfig::default()`
//! 2. TOML file (explicit path, or the first default location found)
//! 3. `CATALOG__`-prefixed environment variables, `__` between nested keys
//!    (e.g. `CATALOG__SYNC__WORKERS=8`)

use crate::config::types::{AppConfig, EventBusConfig, LoggingConfig, SearchConfig, SyncConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use catalog_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            // An explicit path must exist
            if !config_path.exists() {
                log_config_loaded(config_path, false);
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            figment = figment.merge(Toml::file(config_path));
            log_config_loaded(config_path, true);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        let prefix = format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix);
        figment = figment.merge(Env::prefixed(&prefix).split(CONFIG_ENV_SEPARATOR));

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context(format!(
            "Failed to write config file {}",
            path.as_ref().display()
        ))?;

        Ok(())
    }

    /// Explicit configuration file path, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing file among the default locations
    fn find_default_config_path() -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(current_dir) = env::current_dir() {
            candidates.push(current_dir.join(DEFAULT_CONFIG_FILENAME));
            candidates.push(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            );
        }
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
        }
        if let Some(dir) = dirs::home_dir() {
            candidates.push(
                dir.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME),
            );
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate every configuration section
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(&config.logging)?;
    validate_embedding_config(config)?;
    validate_event_bus_config(&config.event_bus)?;
    validate_sync_config(&config.sync)?;
    validate_search_config(&config.search)?;
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

fn validate_embedding_config(config: &AppConfig) -> Result<()> {
    let embedding = &config.providers.embedding;
    if embedding.provider.trim().is_empty() {
        return Err(Error::configuration("Embedding provider cannot be empty"));
    }
    if embedding.dimensions == Some(0) {
        return Err(Error::configuration("Embedding dimensions cannot be 0"));
    }
    if config.providers.vector_store.provider.trim().is_empty() {
        return Err(Error::configuration("Vector store provider cannot be empty"));
    }
    Ok(())
}

fn validate_event_bus_config(config: &EventBusConfig) -> Result<()> {
    if config.capacity == 0 {
        return Err(Error::configuration("Event bus capacity cannot be 0"));
    }
    Ok(())
}

fn validate_sync_config(config: &SyncConfig) -> Result<()> {
    if config.workers == 0 {
        return Err(Error::configuration("Sync workers cannot be 0"));
    }
    if config.queue_capacity == 0 {
        return Err(Error::configuration("Sync queue capacity cannot be 0"));
    }
    if config.embedding_timeout_ms == 0 {
        return Err(Error::configuration("Embedding timeout cannot be 0"));
    }
    if config.batch_size == 0 {
        return Err(Error::configuration("Embedding batch size cannot be 0"));
    }
    if config.backoff_base_ms > config.backoff_max_ms {
        return Err(Error::configuration(format!(
            "Backoff base ({} ms) cannot exceed backoff cap ({} ms)",
            config.backoff_base_ms, config.backoff_max_ms
        )));
    }
    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> Result<()> {
    if config.default_k == 0 {
        return Err(Error::configuration("Default k cannot be 0"));
    }
    if config.default_k > config.max_k {
        return Err(Error::configuration(format!(
            "Default k ({}) cannot exceed max k ({})",
            config.default_k, config.max_k
        )));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Select the embedding provider
    pub fn with_embedding_provider(mut self, provider: impl Into<String>) -> Self {
        self.config.providers.embedding.provider = provider.into();
        self
    }

    /// Set the embedding dimension
    pub fn with_embedding_dimensions(mut self, dimensions: usize) -> Self {
        self.config.providers.embedding.dimensions = Some(dimensions);
        self
    }

    /// Select the vector record store
    pub fn with_vector_store_provider(mut self, provider: impl Into<String>) -> Self {
        self.config.providers.vector_store.provider = provider.into();
        self
    }

    /// Set event bus configuration
    pub fn with_event_bus(mut self, event_bus: EventBusConfig) -> Self {
        self.config.event_bus = event_bus;
        self
    }

    /// Set synchronization configuration
    pub fn with_sync(mut self, sync: SyncConfig) -> Self {
        self.config.sync = sync;
        self
    }

    /// Set query limits
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.config.search = search;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
