//! Subcommand bodies.

use std::fmt::Write as _;
use std::future::Future;
use std::io;
use std::path::Path;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};
use waypoint_common::{ErrorKind, EventBus, ItemGroup, WaypointError};
use waypoint_config::{ReloadManager, WaypointConfig};
use waypoint_providers::{ProviderRegistry, ProviderSnapshot};

use crate::{observer, wiring};

/// Register, wait for the first results, and print them.
pub async fn list(
    config: &WaypointConfig,
    json: bool,
    query: Option<&str>,
    timeout: Duration,
) -> Result<(), WaypointError> {
    let mut registry = wiring::build_registry(config, EventBus::default())?;
    if !registry.wait_settled(timeout).await {
        warn!("some providers were still loading after {timeout:?}");
    }
    report_errors(&registry.snapshots());

    let groups = match query {
        Some(q) => registry.search(q),
        None => registry.all_groups(),
    };
    registry.shutdown();

    if json {
        let out = serde_json::to_string_pretty(&groups)
            .map_err(|e| WaypointError::Other(format!("failed to serialize groups: {e}")))?;
        println!("{out}");
    } else {
        print!("{}", render_text(&groups));
    }
    Ok(())
}

/// Run until Ctrl-C, rebuilding the providers whenever the config file changes.
pub async fn watch(config_path: &Path) -> Result<(), WaypointError> {
    let (config, mut config_rx) = ReloadManager::start(config_path.to_path_buf()).await;
    let events = EventBus::default();
    let observer = observer::spawn(events.subscribe());

    let mut registry = wiring::build_registry(&config, events.clone())?;
    info!(providers = ?registry.names(), "watching, press Ctrl-C to stop");

    let result = watch_loop(
        &mut registry,
        &mut config_rx,
        tokio::signal::ctrl_c(),
        |config| wiring::build_registry(config, events.clone()),
    )
    .await;

    registry.shutdown();
    drop(registry);
    drop(events);
    if let Ok(seen) = observer.await {
        info!(events = seen, "shutdown complete");
    }
    result
}

/// Follow config changes until `shutdown` resolves.
///
/// A replacement registry is built before the current one is shut down; if
/// the build fails the current providers keep running.
async fn watch_loop<F>(
    registry: &mut ProviderRegistry,
    config_rx: &mut watch::Receiver<WaypointConfig>,
    shutdown: impl Future<Output = io::Result<()>>,
    build: F,
) -> Result<(), WaypointError>
where
    F: Fn(&WaypointConfig) -> Result<ProviderRegistry, WaypointError>,
{
    tokio::pin!(shutdown);
    let mut following = true;
    loop {
        tokio::select! {
            signal = &mut shutdown => {
                signal?;
                info!("interrupt received, shutting down");
                return Ok(());
            }
            changed = config_rx.changed(), if following => {
                if changed.is_err() {
                    warn!("config watcher stopped, keeping current providers");
                    following = false;
                    continue;
                }
                let config = config_rx.borrow_and_update().clone();
                info!("config changed, rebuilding providers");
                match build(&config) {
                    Ok(next) => {
                        registry.shutdown();
                        *registry = next;
                    }
                    Err(e) => warn!("failed to rebuild providers, keeping current ones: {e}"),
                }
            }
        }
    }
}

/// Wait for results, then activate `label` in `group`.
pub async fn activate(
    config: &WaypointConfig,
    group: &str,
    label: &str,
    timeout: Duration,
) -> Result<(), WaypointError> {
    let mut registry = wiring::build_registry(config, EventBus::default())?;
    registry.wait_settled(timeout).await;
    let groups = registry.all_groups();
    registry.shutdown();

    let action = find_action(&groups, group, label)?;
    wiring::activator(config).activate(&action)?;
    Ok(())
}

fn find_action(
    groups: &[ItemGroup],
    group: &str,
    label: &str,
) -> Result<waypoint_common::ItemAction, ErrorKind> {
    let found = groups
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(group))
        .ok_or_else(|| ErrorKind::NotFound(format!("no group named '{group}'")))?;
    found
        .find(label)
        .map(|item| item.payload().clone())
        .ok_or_else(|| ErrorKind::NotFound(format!("no item '{label}' in '{}'", found.name)))
}

fn report_errors(snapshots: &[ProviderSnapshot]) {
    for snap in snapshots {
        if let Some(error) = &snap.last_error {
            warn!(provider = %snap.name, %error, "provider reported an error");
        }
    }
}

fn render_text(groups: &[ItemGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "{} ({})", group.name, group.len());
        for item in &group.items {
            let _ = writeln!(out, "  {item}");
        }
    }
    out
}
