//! Local git repository discovery.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};
use waypoint_common::PlatformError;

/// A working tree containing a `.git` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub name: String,
    pub path: PathBuf,
}

/// Source of local git repositories below a set of roots.
pub trait RepositorySource: Send + Sync {
    fn fetch_git_repositories(&self, roots: &[PathBuf]) -> Result<Vec<RepoInfo>, PlatformError>;
}

/// Filesystem walker that skips hidden directories and never follows
/// symlinks.
#[derive(Debug, Clone)]
pub struct GitScanner {
    max_depth: usize,
}

impl GitScanner {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn scan_root(&self, root: &Path, out: &mut Vec<RepoInfo>) -> Result<(), PlatformError> {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .max_depth(self.max_depth)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let context = format!("failed to scan {}", root.display());
                    return Err(match e.io_error() {
                        Some(io) => PlatformError::from_io(context, io),
                        None => PlatformError::Io(format!("{context}: {e}")),
                    });
                }
                Err(e) => {
                    debug!("skipping unreadable entry: {e}");
                    continue;
                }
            };

            if entry.file_type().is_dir() && entry.path().join(".git").exists() {
                out.push(RepoInfo {
                    name: repo_name(entry.path()),
                    path: entry.path().to_path_buf(),
                });
            }
        }
        Ok(())
    }
}

impl Default for GitScanner {
    fn default() -> Self {
        Self::new(4)
    }
}

impl RepositorySource for GitScanner {
    fn fetch_git_repositories(&self, roots: &[PathBuf]) -> Result<Vec<RepoInfo>, PlatformError> {
        let mut repos = Vec::new();
        let mut scanned = 0usize;

        for root in roots {
            if !root.is_dir() {
                warn!("git root {} does not exist, skipping", root.display());
                continue;
            }
            scanned += 1;
            self.scan_root(root, &mut repos)?;
        }

        if scanned == 0 && !roots.is_empty() {
            return Err(PlatformError::NotFound(format!(
                "none of the git roots exist: {}",
                roots
                    .iter()
                    .map(|r| r.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        debug!(count = repos.len(), "discovered git repositories");
        Ok(repos)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn repo_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
