//! Reload manager: load once, then republish on every valid change.

use crate::schema::WaypointConfig;
use crate::toml_loader;
use crate::validation;
use crate::watcher::ConfigWatcher;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{error, info, warn};
use waypoint_common::ConfigError;

/// Manages live config reloading.
///
/// Watches the config file for changes and publishes new configs
/// via a [`tokio::sync::watch`] channel. Invalid edits are logged and
/// ignored so the last good config stays in effect.
pub struct ReloadManager {
    config_path: PathBuf,
}

impl ReloadManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Load the initial config and start watching for changes.
    ///
    /// Returns the initial config and a receiver that observes every
    /// subsequent accepted config. A missing or unreadable file yields
    /// defaults; the watcher keeps running in a background task until all
    /// receivers are dropped.
    pub async fn start(config_path: PathBuf) -> (WaypointConfig, watch::Receiver<WaypointConfig>) {
        let manager = Self::new(config_path);
        let initial = match toml_loader::load_from_path(&manager.config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to load config: {e}, using defaults");
                WaypointConfig::default()
            }
        };

        let (config_tx, config_rx) = watch::channel(initial.clone());
        tokio::spawn(async move {
            manager.run_watch_loop(config_tx).await;
        });

        (initial, config_rx)
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    async fn run_watch_loop(&self, config_tx: watch::Sender<WaypointConfig>) {
        let mut watcher = match ConfigWatcher::new(self.config_path.clone()) {
            Ok(w) => w,
            Err(e) => {
                error!("failed to create config watcher: {e}");
                return;
            }
        };

        loop {
            tokio::select! {
                _ = config_tx.closed() => {
                    info!("all config receivers dropped, stopping reload manager");
                    break;
                }
                changed = watcher.changed() => {
                    if !changed {
                        break;
                    }
                }
            }

            info!("reloading config from {}", self.config_path.display());
            let config = match self.reload_config() {
                Ok(config) => config,
                Err(e) => {
                    warn!("config reload rejected: {e}");
                    continue;
                }
            };

            // Editors often touch the file without changing it.
            config_tx.send_if_modified(|current| {
                if *current == config {
                    false
                } else {
                    *current = config;
                    true
                }
            });
        }
    }

    /// Reload config from disk; unlike the initial load, validation errors
    /// reject the new config.
    pub fn reload_config(&self) -> Result<WaypointConfig, ConfigError> {
        let config = toml_loader::load_from_path(&self.config_path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
