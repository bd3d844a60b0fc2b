//! Waypoint configuration system.
//!
//! Provides TOML-based configuration for the launcher's providers, with
//! live reload and validation. All config sections use defaults so partial
//! configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use waypoint_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod validation;
pub mod watcher;

// Re-export core types for convenience
pub use reload::ReloadManager;
pub use schema::{WaypointConfig, CONFIG_SCHEMA_VERSION};
pub use watcher::ConfigWatcher;

use waypoint_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<WaypointConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &WaypointConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
