use std::time::Duration;

use async_trait::async_trait;
use waypoint_common::{ErrorKind, ItemGroup};

/// When a provider's data is fetched after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Exactly one fetch, started at initialization.
    OneShot,
    /// A fetch at initialization and then one per interval.
    Periodic(Duration),
}

impl RefreshPolicy {
    pub fn interval(&self) -> Option<Duration> {
        match self {
            Self::OneShot => None,
            Self::Periodic(interval) => Some(*interval),
        }
    }
}

/// A source of one [`ItemGroup`].
///
/// Implementations only know how to fetch. Loading flags, error retention and
/// scheduling are handled uniformly by [`ProviderHandle`](crate::ProviderHandle).
#[async_trait]
pub trait Provider: Send + Sync {
    /// Key used for lookups and logging. Unique within a registry.
    fn name(&self) -> &str;

    fn policy(&self) -> RefreshPolicy;

    /// Produce a fresh group. May block on I/O for a long time.
    async fn fetch(&self) -> Result<ItemGroup, ErrorKind>;
}
