//! Turn a [`WaypointConfig`] into providers and an activator.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use waypoint_common::{EventBus, PlatformError, WaypointError};
use waypoint_config::schema::{RefreshMode, WindowBackend, WindowsProviderConfig};
use waypoint_config::WaypointConfig;
use waypoint_platform::{
    expand_home, Activator, Compositor, CompositorTree, DesktopEntries, GitScanner,
};
use waypoint_providers::{
    ApplicationsProvider, GitProjectsProvider, Provider, ProviderRegistry, RefreshPolicy,
    WindowsProvider,
};

pub fn compositor(backend: WindowBackend) -> Compositor {
    match backend {
        WindowBackend::Sway => Compositor::Sway,
        WindowBackend::I3 => Compositor::I3,
    }
}

pub fn windows_policy(config: &WindowsProviderConfig) -> RefreshPolicy {
    match config.refresh {
        RefreshMode::OneShot => RefreshPolicy::OneShot,
        RefreshMode::Periodic => {
            RefreshPolicy::Periodic(Duration::from_millis(u64::from(config.interval_ms)))
        }
    }
}

/// Enabled providers in display order: windows, applications, git projects.
pub fn providers(config: &WaypointConfig) -> Result<Vec<Arc<dyn Provider>>, PlatformError> {
    let mut providers: Vec<Arc<dyn Provider>> = Vec::new();
    let cfg = &config.providers;

    if cfg.windows.enabled {
        let source = CompositorTree::new(compositor(cfg.windows.backend));
        providers.push(Arc::new(
            WindowsProvider::new(Arc::new(source)).with_policy(windows_policy(&cfg.windows)),
        ));
    }

    if cfg.applications.enabled {
        let source = DesktopEntries::from_env(&cfg.applications.extra_dirs)?;
        debug!(dirs = ?source.dirs(), "application directories");
        providers.push(Arc::new(ApplicationsProvider::new(Arc::new(source))));
    }

    if cfg.git_projects.enabled {
        let roots = cfg
            .git_projects
            .roots
            .iter()
            .map(|root| expand_home(root))
            .collect::<Result<Vec<PathBuf>, _>>()?;
        let scanner = GitScanner::new(cfg.git_projects.max_depth as usize);
        providers.push(Arc::new(GitProjectsProvider::new(Arc::new(scanner), roots)));
    }

    Ok(providers)
}

/// Register every enabled provider. Must run inside the tokio runtime.
pub fn build_registry(
    config: &WaypointConfig,
    events: EventBus,
) -> Result<ProviderRegistry, WaypointError> {
    let mut registry = ProviderRegistry::with_events(events);
    for provider in providers(config)? {
        registry.register(provider)?;
    }
    Ok(registry)
}

pub fn activator(config: &WaypointConfig) -> Activator {
    Activator::new(
        compositor(config.providers.windows.backend),
        config.providers.git_projects.open_command.clone(),
    )
}
