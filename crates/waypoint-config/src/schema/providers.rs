//! Per-provider configuration types.

use serde::{Deserialize, Serialize};

/// How often a provider re-fetches its data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RefreshMode {
    /// Fetch once when the provider is registered.
    OneShot,
    /// Fetch on registration and then every `interval_ms`.
    Periodic,
}

/// Compositor whose IPC tree is used to enumerate windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum WindowBackend {
    #[default]
    Sway,
    I3,
}

/// Open windows provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowsProviderConfig {
    pub enabled: bool,
    pub refresh: RefreshMode,
    /// Refresh interval in milliseconds (valid range: 250-600000).
    pub interval_ms: u32,
    pub backend: WindowBackend,
}

impl Default for WindowsProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refresh: RefreshMode::Periodic,
            interval_ms: 3000,
            backend: WindowBackend::Sway,
        }
    }
}

/// Installed applications provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationsProviderConfig {
    pub enabled: bool,
    /// Directories scanned for `.desktop` files before the XDG defaults.
    pub extra_dirs: Vec<String>,
}

impl Default for ApplicationsProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extra_dirs: Vec::new(),
        }
    }
}

/// Local git repositories provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitProjectsProviderConfig {
    pub enabled: bool,
    /// Directories to scan. A leading `~` expands to the home directory.
    pub roots: Vec<String>,
    /// Maximum directory depth below each root (valid range: 1-32).
    pub max_depth: u32,
    /// Program and leading arguments used to open a repository.
    pub open_command: Vec<String>,
}

impl Default for GitProjectsProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            roots: vec!["~".into()],
            max_depth: 4,
            open_command: vec!["code".into()],
        }
    }
}

/// All providers, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ProvidersConfig {
    pub windows: WindowsProviderConfig,
    pub applications: ApplicationsProviderConfig,
    pub git_projects: GitProjectsProviderConfig,
}
