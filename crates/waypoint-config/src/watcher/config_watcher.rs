//! Config file watcher backed by `notify`.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use waypoint_common::ConfigError;

/// Quiet period after the last file event before a change is reported.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches one config file and yields a debounced signal per change burst.
///
/// The underlying OS watcher lives as long as this value.
pub struct ConfigWatcher {
    path: PathBuf,
    raw_rx: mpsc::Receiver<()>,
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// Start watching `path`. The file itself need not exist yet; its
    /// parent directory is watched so creation is noticed too.
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(
                "config file {} does not exist yet, will watch for creation",
                path.display()
            );
        }

        let dir = watch_dir(&path);
        let file_name: OsString = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        let (raw_tx, raw_rx) = mpsc::channel::<()>(16);

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) if is_relevant(&event, &file_name) => {
                    debug!("config file change detected");
                    let _ = raw_tx.try_send(());
                }
                Ok(_) => {}
                Err(e) => error!("file watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatchError(format!("failed to watch {}: {e}", dir.display())))?;

        info!("watching config file {}", path.display());
        Ok(Self {
            path,
            raw_rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for the next change burst to settle.
    ///
    /// Returns `false` once the watcher has shut down.
    pub async fn changed(&mut self) -> bool {
        if self.raw_rx.recv().await.is_none() {
            return false;
        }
        loop {
            tokio::select! {
                _ = tokio::time::sleep(DEBOUNCE) => return true,
                more = self.raw_rx.recv() => {
                    if more.is_none() {
                        return false;
                    }
                }
            }
        }
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub(super) fn is_relevant(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|n| n == file_name))
}

