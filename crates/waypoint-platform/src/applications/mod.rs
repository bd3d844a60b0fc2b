//! Installed application discovery from freedesktop `.desktop` files.

mod desktop_entry;

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;
use waypoint_common::PlatformError;

pub use desktop_entry::{split_exec, DesktopEntry};

use crate::paths;

/// One launchable application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Desktop file id, e.g. `org.gnome.Nautilus.desktop`.
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub command: Vec<String>,
    pub desktop_file: PathBuf,
}

/// Source of the installed application list.
pub trait ApplicationSource: Send + Sync {
    /// Visible applications, in no particular order.
    fn fetch_applications(&self) -> Result<Vec<AppInfo>, PlatformError>;
}

/// [`ApplicationSource`] that scans XDG application directories.
#[derive(Debug, Clone)]
pub struct DesktopEntries {
    dirs: Vec<PathBuf>,
    desktops: Vec<String>,
    locale: Option<String>,
}

impl DesktopEntries {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self {
            dirs,
            desktops: Vec::new(),
            locale: None,
        }
    }

    /// Directories and desktop/locale filters from the environment.
    pub fn from_env(extra_dirs: &[String]) -> Result<Self, PlatformError> {
        let desktops = std::env::var("XDG_CURRENT_DESKTOP")
            .map(|v| {
                v.split(':')
                    .filter(|d| !d.is_empty())
                    .map(|d| d.to_ascii_lowercase())
                    .collect()
            })
            .unwrap_or_default();
        let locale = std::env::var("LC_MESSAGES")
            .or_else(|_| std::env::var("LANG"))
            .ok()
            .filter(|l| !l.is_empty());

        Ok(Self {
            dirs: paths::application_dirs(extra_dirs)?,
            desktops,
            locale,
        })
    }

    pub fn with_desktops(mut self, desktops: Vec<String>) -> Self {
        self.desktops = desktops;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    fn load(&self, id: String, path: &Path) -> Option<AppInfo> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("skipping desktop entry {}: {e}", path.display());
                return None;
            }
        };

        let entry = DesktopEntry::parse(&content);
        if !entry.is_visible(&self.desktops) {
            return None;
        }
        let name = entry.localized("Name", self.locale.as_deref())?.to_string();
        let command = entry.command();
        if command.is_empty() {
            return None;
        }

        Some(AppInfo {
            id,
            name,
            icon: entry.get("Icon").map(str::to_string),
            command,
            desktop_file: path.to_path_buf(),
        })
    }
}

impl ApplicationSource for DesktopEntries {
    fn fetch_applications(&self) -> Result<Vec<AppInfo>, PlatformError> {
        // A desktop id seen in an earlier directory shadows later ones, even
        // when the earlier entry is hidden.
        let mut seen: HashSet<String> = HashSet::new();
        let mut apps = Vec::new();

        for dir in &self.dirs {
            if !dir.is_dir() {
                debug!("application directory {} does not exist", dir.display());
                continue;
            }
            for entry in WalkDir::new(dir).follow_links(true) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("error while scanning {}: {e}", dir.display());
                        continue;
                    }
                };
                let path = entry.path();
                if !entry.file_type().is_file()
                    || path.extension().and_then(|e| e.to_str()) != Some("desktop")
                {
                    continue;
                }
                let Some(id) = desktop_file_id(dir, path) else {
                    continue;
                };
                if !seen.insert(id.clone()) {
                    continue;
                }
                if let Some(app) = self.load(id, path) {
                    apps.push(app);
                }
            }
        }

        debug!(count = apps.len(), "discovered applications");
        Ok(apps)
    }
}

/// Desktop file id: the path relative to its applications directory with
/// `/` replaced by `-`.
fn desktop_file_id(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("-"))
}
