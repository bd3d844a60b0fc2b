//! Configuration schema types for Waypoint.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the launcher ships with.

mod logging;
mod providers;

pub use logging::*;
pub use providers::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct WaypointConfig {
    pub providers: ProvidersConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
