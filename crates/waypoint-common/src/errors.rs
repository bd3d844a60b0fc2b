use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Error taxonomy surfaced by providers and registry commands.
///
/// Fetch failures are stored in provider state as one of these and never
/// propagated through the read API, so the type is `Clone + PartialEq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ErrorKind {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("invalid state: {0}")]
    InvalidState(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("path error: {0}")]
    PathError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

impl PlatformError {
    /// Classify an `std::io::Error` with some context about what was attempted.
    pub fn from_io(context: impl std::fmt::Display, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(format!("{context}: {err}")),
            std::io::ErrorKind::PermissionDenied => {
                Self::PermissionDenied(format!("{context}: {err}"))
            }
            _ => Self::Io(format!("{context}: {err}")),
        }
    }
}

impl From<PlatformError> for ErrorKind {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::NotFound(msg) => ErrorKind::NotFound(msg),
            PlatformError::PermissionDenied(msg) => ErrorKind::PermissionDenied(msg),
            other @ (PlatformError::Io(_)
            | PlatformError::Parse(_)
            | PlatformError::PathError(_)
            | PlatformError::NotSupported(_)) => ErrorKind::Io(other.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WaypointError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Provider(#[from] ErrorKind),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
