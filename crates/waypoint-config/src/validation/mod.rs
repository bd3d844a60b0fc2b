//! Full configuration validation.
//!
//! Validates numeric ranges and required lists. Each domain has its own
//! submodule; this orchestrator calls them all and collects errors into a
//! single `ConfigError`.

mod helpers;
mod providers;


use crate::schema::WaypointConfig;
use waypoint_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WaypointConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    providers::validate_windows(&mut errors, config);
    providers::validate_applications(&mut errors, config);
    providers::validate_git_projects(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
