use std::path::PathBuf;

use waypoint_common::PlatformError;

pub(super) const APP_NAME: &str = "waypoint";

/// Returns the platform-specific configuration directory for Waypoint.
///
/// - Linux: `$XDG_CONFIG_HOME/waypoint` (defaults to `~/.config/waypoint`)
/// - macOS: `~/Library/Application Support/waypoint`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the path to the main configuration file.
///
/// Located at `config_dir()/config.toml`.
pub fn config_file() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Returns the current user's home directory.
pub fn home_dir() -> Result<PathBuf, PlatformError> {
    dirs::home_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine home directory".into()))
}

/// Expands a leading `~` or `~/` to the home directory.
///
/// Other paths are returned unchanged; `~user` forms are not supported.
pub fn expand_home(path: &str) -> Result<PathBuf, PlatformError> {
    if path == "~" {
        return home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => Ok(home_dir()?.join(rest)),
        None => Ok(PathBuf::from(path)),
    }
}
