//! Carry out an item's action: focus, launch or open.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;
use waypoint_common::{ItemAction, PlatformError};

use crate::windows::{Compositor, CompositorTree};

#[derive(Debug, Clone)]
pub struct Activator {
    windows: CompositorTree,
    open_command: Vec<String>,
}

impl Activator {
    /// `open_command` is the program (plus leading args) that receives a
    /// repository path.
    pub fn new(compositor: Compositor, open_command: Vec<String>) -> Self {
        Self {
            windows: CompositorTree::new(compositor),
            open_command,
        }
    }

    pub fn activate(&self, action: &ItemAction) -> Result<(), PlatformError> {
        match action {
            ItemAction::FocusWindow { id } => {
                info!(id, "focusing window");
                self.windows.focus(*id)
            }
            ItemAction::Launch { command, .. } => spawn_detached(command),
            ItemAction::OpenRepository { path } => {
                spawn_detached(&open_repository_command(&self.open_command, path))
            }
        }
    }
}

fn open_repository_command(open_command: &[String], path: &Path) -> Vec<String> {
    let mut argv = open_command.to_vec();
    argv.push(path.display().to_string());
    argv
}

fn spawn_detached(argv: &[String]) -> Result<(), PlatformError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(PlatformError::NotSupported("empty command line".into()));
    };
    info!(program = %program, "launching");
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| PlatformError::from_io(format!("failed to launch {program}"), &e))
}
