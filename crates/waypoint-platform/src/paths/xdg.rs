use std::path::PathBuf;

use waypoint_common::PlatformError;

use super::resolve::expand_home;

const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";

/// Directories searched for `.desktop` files, highest precedence first.
///
/// Order: `extra` (as configured), `$XDG_DATA_HOME/applications`, then each
/// entry of `$XDG_DATA_DIRS` (default `/usr/local/share:/usr/share`) with
/// `/applications` appended. Duplicates are removed keeping the first.
pub fn application_dirs(extra: &[String]) -> Result<Vec<PathBuf>, PlatformError> {
    let data_home = match std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => dirs::data_dir(),
    };
    let data_dirs = std::env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATA_DIRS.to_string());

    build_application_dirs(extra, data_home, &data_dirs)
}

pub(super) fn build_application_dirs(
    extra: &[String],
    data_home: Option<PathBuf>,
    data_dirs: &str,
) -> Result<Vec<PathBuf>, PlatformError> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for dir in extra {
        dirs.push(expand_home(dir)?);
    }
    if let Some(home) = data_home {
        dirs.push(home.join("applications"));
    }
    dirs.extend(
        data_dirs
            .split(':')
            .filter(|d| !d.is_empty())
            .map(|d| PathBuf::from(d).join("applications")),
    );

    let mut seen = std::collections::HashSet::new();
    dirs.retain(|d| seen.insert(d.clone()));
    Ok(dirs)
}
