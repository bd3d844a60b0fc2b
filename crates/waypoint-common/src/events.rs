use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::errors::ErrorKind;

/// Provider state transitions, published for observers such as logging.
///
/// Nothing in the core depends on these being received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ProviderEvent {
    Registered { provider: String },
    RefreshStarted { provider: String },
    RefreshSucceeded { provider: String, items: usize },
    RefreshFailed { provider: String, error: String },
    /// A scheduled tick or reload found a refresh already in flight.
    RefreshSkipped { provider: String },
    /// A fetch completed after its provider was cancelled.
    ResultDiscarded { provider: String },
    Removed { provider: String },
    #[serde(other)]
    Unknown,
}

impl ProviderEvent {
    pub fn failed(provider: impl Into<String>, error: &ErrorKind) -> Self {
        Self::RefreshFailed {
            provider: provider.into(),
            error: error.to_string(),
        }
    }

    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Registered { provider }
            | Self::RefreshStarted { provider }
            | Self::RefreshSucceeded { provider, .. }
            | Self::RefreshFailed { provider, .. }
            | Self::RefreshSkipped { provider }
            | Self::ResultDiscarded { provider }
            | Self::Removed { provider } => Some(provider),
            Self::Unknown => None,
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ProviderEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ProviderEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
