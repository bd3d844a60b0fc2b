//! OS-facing data sources for the launcher's providers.
//!
//! Every source here is synchronous and may block on process spawning or
//! filesystem walks; callers on an async runtime should run them on the
//! blocking pool.

pub mod activate;
pub mod applications;
pub mod git;
pub mod paths;
pub mod windows;

pub use activate::Activator;
pub use applications::{AppInfo, ApplicationSource, DesktopEntries};
pub use git::{GitScanner, RepoInfo, RepositorySource};
pub use paths::{application_dirs, config_dir, config_file, expand_home, home_dir};
pub use windows::{Compositor, CompositorTree, WindowInfo, WindowSource};
