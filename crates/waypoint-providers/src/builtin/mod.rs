//! Providers backed by `waypoint-platform` sources.

mod applications;
mod git_projects;
mod windows;

pub use applications::ApplicationsProvider;
pub use git_projects::GitProjectsProvider;
pub use windows::WindowsProvider;

use waypoint_common::{ErrorKind, PlatformError};

/// Run a blocking platform call on tokio's blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T, ErrorKind>
where
    F: FnOnce() -> Result<T, PlatformError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ErrorKind::Io(format!("fetch task failed: {e}")))?
        .map_err(ErrorKind::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn platform_errors_are_classified() {
        let err = run_blocking(|| -> Result<(), _> {
            Err(PlatformError::PermissionDenied("/srv".into()))
        })
        .await
        .unwrap_err();
        assert_eq!(err, ErrorKind::PermissionDenied("/srv".into()));

        let err = run_blocking(|| -> Result<(), _> { Err(PlatformError::Parse("tree".into())) })
            .await
            .unwrap_err();
        assert!(matches!(err, ErrorKind::Io(_)));
    }

    #[tokio::test]
    async fn panics_become_io_errors() {
        let err = run_blocking(|| -> Result<(), PlatformError> { panic!("scanner crashed") })
            .await
            .unwrap_err();
        assert!(matches!(err, ErrorKind::Io(msg) if msg.starts_with("fetch task failed")));
    }
}
