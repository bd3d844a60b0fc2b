//! Open window enumeration through the compositor's IPC tree.
//!
//! Both sway and i3 answer `-t get_tree` with the same JSON layout, so a
//! single parser serves both.

mod tree;

#[cfg(test)]
mod tests;

use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;
use waypoint_common::PlatformError;

pub use tree::parse_tree;

/// One on-screen window as reported by the compositor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// Compositor container id, used to focus the window.
    pub id: i64,
    pub title: String,
    pub app_id: Option<String>,
    pub workspace: Option<String>,
}

/// Source of the current window list.
pub trait WindowSource: Send + Sync {
    /// Windows ordered most recently focused first.
    fn fetch_windows(&self) -> Result<Vec<WindowInfo>, PlatformError>;
}

/// Which IPC client to shell out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compositor {
    #[default]
    Sway,
    I3,
}

impl Compositor {
    pub fn program(self) -> &'static str {
        match self {
            Compositor::Sway => "swaymsg",
            Compositor::I3 => "i3-msg",
        }
    }
}

/// [`WindowSource`] backed by `swaymsg`/`i3-msg`.
#[derive(Debug, Clone, Default)]
pub struct CompositorTree {
    compositor: Compositor,
}

impl CompositorTree {
    pub fn new(compositor: Compositor) -> Self {
        Self { compositor }
    }

    pub fn compositor(&self) -> Compositor {
        self.compositor
    }

    /// Focus the container with the given id.
    pub fn focus(&self, id: i64) -> Result<(), PlatformError> {
        run_ipc(self.compositor, &[&format!("[con_id={id}]"), "focus"]).map(|_| ())
    }
}

impl WindowSource for CompositorTree {
    fn fetch_windows(&self) -> Result<Vec<WindowInfo>, PlatformError> {
        let json = run_ipc(self.compositor, &["-t", "get_tree"])?;
        let windows = parse_tree(&json)?;
        debug!(count = windows.len(), "enumerated windows");
        Ok(windows)
    }
}

fn run_ipc(compositor: Compositor, args: &[&str]) -> Result<String, PlatformError> {
    let program = compositor.program();
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| PlatformError::from_io(format!("failed to run {program}"), &e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PlatformError::Io(format!(
            "{program} exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
