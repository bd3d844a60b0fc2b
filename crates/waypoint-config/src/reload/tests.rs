//! Tests for the reload manager.

use super::*;
use std::path::PathBuf;

#[tokio::test]
async fn start_with_nonexistent_path_uses_defaults() {
    let path = PathBuf::from("/tmp/nonexistent_waypoint_reload_test.toml");
    let (config, _rx) = ReloadManager::start(path).await;
    assert_eq!(config, crate::WaypointConfig::default());
}

#[tokio::test]
async fn start_with_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[providers.windows]\ninterval_ms = 5000\n").unwrap();

    let (config, rx) = ReloadManager::start(path).await;
    assert_eq!(config.providers.windows.interval_ms, 5000);
    assert_eq!(rx.borrow().providers.windows.interval_ms, 5000);
    assert!(config.providers.git_projects.enabled); // default
}

#[test]
fn reload_config_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[providers.git_projects]\nmax_depth = 0\n").unwrap();

    let manager = ReloadManager::new(path);
    let err = manager.reload_config().unwrap_err();
    assert!(matches!(err, waypoint_common::ConfigError::ValidationError(_)));
}

#[test]
fn reload_config_accepts_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[providers.applications]\nenabled = false\n").unwrap();

    let manager = ReloadManager::new(path.clone());
    assert_eq!(manager.path(), path.as_path());
    let config = manager.reload_config().unwrap();
    assert!(!config.providers.applications.enabled);
}
