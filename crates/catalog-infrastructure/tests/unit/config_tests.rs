//! Configuration Loader Tests

use catalog_infrastructure::config::loader::{ConfigBuilder, ConfigLoader, validate_app_config};
use catalog_infrastructure::config::{EventBusConfig, EventBusKind, SearchConfig, SyncConfig};
use catalog_infrastructure::constants::{
    DEFAULT_EMBEDDING_PROVIDER, DEFAULT_LOG_LEVEL, DEFAULT_SEARCH_K, DEFAULT_SYNC_WORKERS,
    DEFAULT_VECTOR_STORE_PROVIDER,
};
use std::env;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_config_loader_default() {
    let config = ConfigLoader::new().load().unwrap();

    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.providers.embedding.provider, DEFAULT_EMBEDDING_PROVIDER);
    assert_eq!(
        config.providers.vector_store.provider,
        DEFAULT_VECTOR_STORE_PROVIDER
    );
    assert_eq!(config.event_bus.provider, EventBusKind::Tokio);
    assert_eq!(config.sync.workers, DEFAULT_SYNC_WORKERS);
    assert_eq!(config.search.default_k, DEFAULT_SEARCH_K);
}

#[test]
fn test_documented_defaults() {
    let sync = SyncConfig::default();
    assert_eq!(sync.workers, 4);
    assert_eq!(sync.queue_capacity, 1024);
    assert_eq!(sync.max_retries, 5);
    assert_eq!(sync.embedding_timeout(), Duration::from_secs(10));
    assert_eq!(sync.batch_size, 32);

    let retry = sync.retry_policy();
    assert_eq!(retry.base_delay, Duration::from_millis(200));
    assert_eq!(retry.max_delay, Duration::from_secs(30));

    let search = SearchConfig::default();
    assert_eq!(search.default_k, 10);
    assert_eq!(search.max_k, 100);
    assert_eq!(search.max_staleness, None);
}

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("catalog.toml");

    let original = ConfigBuilder::new()
        .with_embedding_provider("null")
        .with_embedding_dimensions(64)
        .with_event_bus(EventBusConfig::null())
        .with_sync(SyncConfig {
            workers: 2,
            ..SyncConfig::default()
        })
        .with_search(SearchConfig {
            max_staleness: Some(1),
            ..SearchConfig::default()
        })
        .build();

    let loader = ConfigLoader::new();
    loader.save_to_file(&original, &config_path).unwrap();

    let loaded = ConfigLoader::new()
        .with_config_path(&config_path)
        .load()
        .unwrap();

    assert_eq!(loaded, original);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("catalog.toml");
    std::fs::write(
        &config_path,
        "[sync]\nworkers = 8\n\n[search]\nmax_k = 50\n",
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_config_path(&config_path)
        .load()
        .unwrap();

    assert_eq!(config.sync.workers, 8);
    assert_eq!(config.sync.queue_capacity, 1024);
    assert_eq!(config.search.max_k, 50);
    assert_eq!(config.search.default_k, 10);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("absent.toml"))
        .load();

    assert!(result.is_err());
}

#[test]
fn test_invalid_file_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("catalog.toml");
    std::fs::write(&config_path, "[sync]\nworkers = 0\n").unwrap();

    let err = ConfigLoader::new()
        .with_config_path(&config_path)
        .load()
        .unwrap_err();

    assert!(err.to_string().contains("workers"));
}

#[test]
fn test_validation_rules() {
    let valid = ConfigBuilder::new().build();
    assert!(validate_app_config(&valid).is_ok());

    let zero_queue = ConfigBuilder::new()
        .with_sync(SyncConfig {
            queue_capacity: 0,
            ..SyncConfig::default()
        })
        .build();
    assert!(validate_app_config(&zero_queue).is_err());

    let zero_timeout = ConfigBuilder::new()
        .with_sync(SyncConfig {
            embedding_timeout_ms: 0,
            ..SyncConfig::default()
        })
        .build();
    assert!(validate_app_config(&zero_timeout).is_err());

    let inverted_backoff = ConfigBuilder::new()
        .with_sync(SyncConfig {
            backoff_base_ms: 5_000,
            backoff_max_ms: 1_000,
            ..SyncConfig::default()
        })
        .build();
    assert!(validate_app_config(&inverted_backoff).is_err());

    let zero_k = ConfigBuilder::new()
        .with_search(SearchConfig {
            default_k: 0,
            ..SearchConfig::default()
        })
        .build();
    assert!(validate_app_config(&zero_k).is_err());

    let default_above_max = ConfigBuilder::new()
        .with_search(SearchConfig {
            default_k: 20,
            max_k: 10,
            max_staleness: None,
        })
        .build();
    assert!(validate_app_config(&default_above_max).is_err());

    let mut bad_level = ConfigBuilder::new().build();
    bad_level.logging.level = "verbose".to_string();
    assert!(validate_app_config(&bad_level).is_err());
}

/// Helper to set env var
fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

/// Helper to remove env var
fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

/// Run with: `cargo test -p catalog-infrastructure --test unit env_ -- --test-threads=1 --ignored`
#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_nested_keys() {
    set_env("CATALOGTEST__SYNC__WORKERS", "7");
    set_env("CATALOGTEST__PROVIDERS__EMBEDDING__PROVIDER", "ollama");
    set_env("CATALOGTEST__EVENT_BUS__PROVIDER", "null");

    let config = ConfigLoader::new()
        .with_env_prefix("CATALOGTEST")
        .load()
        .unwrap();

    assert_eq!(config.sync.workers, 7);
    assert_eq!(config.providers.embedding.provider, "ollama");
    assert_eq!(config.event_bus.provider, EventBusKind::Null);

    remove_env("CATALOGTEST__SYNC__WORKERS");
    remove_env("CATALOGTEST__PROVIDERS__EMBEDDING__PROVIDER");
    remove_env("CATALOGTEST__EVENT_BUS__PROVIDER");
}
