//! The aggregation point the presentation layer reads from.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::Instant;
use tracing::{debug, info};
use waypoint_common::{ErrorKind, EventBus, ItemGroup, ProviderEvent};

use crate::handle::ProviderHandle;
use crate::provider::Provider;
use crate::state::ProviderSnapshot;

/// Ordered set of providers.
///
/// Reads never block on a fetch: they copy whatever each provider last
/// produced. Registration order is display order.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<ProviderHandle>,
    events: EventBus,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: EventBus) -> Self {
        Self {
            providers: Vec::new(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }

    /// Add a provider and start its schedule.
    ///
    /// Fails with `InvalidState` if the name is already taken. Must be called
    /// from within a tokio runtime.
    pub fn register(&mut self, provider: Arc<dyn Provider>) -> Result<(), ErrorKind> {
        let name = provider.name().to_string();
        if self.position(&name).is_some() {
            return Err(ErrorKind::InvalidState(format!(
                "provider '{name}' is already registered"
            )));
        }

        let handle = ProviderHandle::new(provider, self.events.clone());
        handle.initialize()?;
        info!(provider = %name, policy = ?handle.policy(), "provider registered");
        self.events
            .publish(ProviderEvent::Registered { provider: name });
        self.providers.push(handle);
        Ok(())
    }

    /// Cancel and drop a provider. Any refresh still in flight is discarded.
    pub fn remove(&mut self, name: &str) -> Result<(), ErrorKind> {
        let index = self.position(name).ok_or_else(|| not_registered(name))?;
        let handle = self.providers.remove(index);
        handle.cancel();
        info!(provider = %name, "provider removed");
        self.events.publish(ProviderEvent::Removed {
            provider: name.to_string(),
        });
        Ok(())
    }

    /// Cancel every provider.
    pub fn shutdown(&mut self) {
        for handle in self.providers.drain(..) {
            handle.cancel();
            debug!(provider = %handle.name(), "provider cancelled");
        }
    }

    /// Ask one provider to refresh in the background.
    ///
    /// Returns once the request is accepted. If that provider is already
    /// refreshing the request is dropped. Unknown names fail with `NotFound`.
    pub fn reload(&self, name: &str) -> Result<(), ErrorKind> {
        let handle = self.get(name).ok_or_else(|| not_registered(name))?;
        debug!(provider = %name, "reload requested");
        handle.trigger();
        Ok(())
    }

    /// Last good group of every provider that has one, in registration order.
    pub fn all_groups(&self) -> Vec<ItemGroup> {
        self.providers
            .iter()
            .filter_map(ProviderHandle::current_group)
            .collect()
    }

    pub fn is_any_loading(&self) -> bool {
        self.providers.iter().any(ProviderHandle::is_loading)
    }

    /// `all_groups` with each group narrowed to items matching `query`.
    /// Groups left empty are omitted.
    pub fn search(&self, query: &str) -> Vec<ItemGroup> {
        self.all_groups()
            .iter()
            .map(|group| group.filtered(query))
            .filter(|group| !group.is_empty())
            .collect()
    }

    pub fn snapshots(&self) -> Vec<ProviderSnapshot> {
        self.providers.iter().map(ProviderHandle::snapshot).collect()
    }

    pub fn snapshot(&self, name: &str) -> Option<ProviderSnapshot> {
        self.get(name).map(ProviderHandle::snapshot)
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(ProviderHandle::name).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// True once every provider has applied at least one result and none is
    /// loading.
    pub fn is_settled(&self) -> bool {
        self.providers.iter().all(|handle| {
            let snap = handle.snapshot();
            snap.generation > 0 && !snap.is_loading
        })
    }

    /// Wait until [`is_settled`](Self::is_settled) or the timeout passes.
    /// Returns whether the registry settled.
    pub async fn wait_settled(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut rx = self.events.subscribe();
        loop {
            if self.is_settled() {
                return true;
            }
            match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(Ok(_)) | Ok(Err(RecvError::Lagged(_))) => continue,
                Ok(Err(RecvError::Closed)) | Err(_) => return self.is_settled(),
            }
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.providers.iter().position(|handle| handle.name() == name)
    }

    fn get(&self, name: &str) -> Option<&ProviderHandle> {
        self.providers.iter().find(|handle| handle.name() == name)
    }
}

fn not_registered(name: &str) -> ErrorKind {
    ErrorKind::NotFound(format!("provider '{name}' is not registered"))
}
