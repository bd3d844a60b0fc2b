use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What the presentation layer does when an item is chosen.
///
/// Opaque to the aggregation core; only the platform layer interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemAction {
    /// Focus a compositor container by id.
    FocusWindow { id: i64 },
    /// Spawn an application command line.
    Launch {
        command: Vec<String>,
        desktop_file: Option<PathBuf>,
    },
    /// Open a repository working tree.
    OpenRepository { path: PathBuf },
}

/// A single selectable entry. Value object: a changed entry is a new `Item`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    label: String,
    icon: String,
    payload: ItemAction,
}

impl Item {
    pub fn new(label: impl Into<String>, icon: impl Into<String>, payload: ItemAction) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            payload,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn payload(&self) -> &ItemAction {
        &self.payload
    }

    /// Case-insensitive substring match against the label.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.label.to_lowercase().contains(&query.to_lowercase())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
