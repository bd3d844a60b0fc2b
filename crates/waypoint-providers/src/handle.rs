//! Lifecycle wrapper around a single [`Provider`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use waypoint_common::{ErrorKind, EventBus, ItemGroup, ProviderEvent};

use crate::provider::{Provider, RefreshPolicy};
use crate::scheduler::RefreshScheduler;
use crate::state::{Completion, ProviderSnapshot, ProviderState, RefreshGuard};

/// The pieces a refresh needs, cheap to clone into spawned tasks.
#[derive(Clone)]
pub(crate) struct Refresher {
    provider: Arc<dyn Provider>,
    state: Arc<ProviderState>,
    events: EventBus,
}

impl Refresher {
    pub(crate) fn name(&self) -> &str {
        self.provider.name()
    }

    /// Refresh now, or fail with `InvalidState` if one is already running.
    pub(crate) async fn refresh(&self) -> Result<ItemGroup, ErrorKind> {
        let Some(guard) = self.state.try_begin() else {
            return Err(self.busy_error());
        };
        self.run(guard).await
    }

    /// Refresh unless one is already running, in which case the request is
    /// dropped. Used for scheduler ticks and reloads.
    pub(crate) async fn refresh_if_idle(&self) {
        match self.state.try_begin() {
            Some(guard) => {
                // Failures are already recorded in state and published.
                let _ = self.run(guard).await;
            }
            None => {
                debug!(provider = %self.name(), "refresh in flight, skipping");
                self.events.publish(ProviderEvent::RefreshSkipped {
                    provider: self.name().to_string(),
                });
            }
        }
    }

    async fn run(&self, guard: RefreshGuard) -> Result<ItemGroup, ErrorKind> {
        let name = self.name().to_string();
        debug!(provider = %name, "refresh started");
        self.events.publish(ProviderEvent::RefreshStarted {
            provider: name.clone(),
        });

        let result = self.provider.fetch().await;

        match (guard.finish(&result), &result) {
            (Completion::Discarded, _) => {
                debug!(provider = %name, "provider cancelled, discarding result");
                self.events
                    .publish(ProviderEvent::ResultDiscarded { provider: name });
            }
            (Completion::Applied, Ok(group)) => {
                debug!(provider = %name, items = group.len(), "refresh succeeded");
                self.events.publish(ProviderEvent::RefreshSucceeded {
                    provider: name,
                    items: group.len(),
                });
            }
            (Completion::Applied, Err(e)) => {
                warn!(provider = %name, error = %e, "refresh failed");
                self.events.publish(ProviderEvent::failed(name, e));
            }
        }
        result
    }

    fn busy_error(&self) -> ErrorKind {
        if self.state.is_cancelled() {
            ErrorKind::InvalidState(format!("provider '{}' has been cancelled", self.name()))
        } else {
            ErrorKind::InvalidState(format!(
                "provider '{}' is already refreshing",
                self.name()
            ))
        }
    }
}

/// Owns a provider, its state and its refresh schedule.
///
/// Dropping the handle cancels it.
pub struct ProviderHandle {
    refresher: Refresher,
    policy: RefreshPolicy,
    cancel: CancellationToken,
    initialized: AtomicBool,
    scheduler: Mutex<Option<RefreshScheduler>>,
}

impl ProviderHandle {
    pub fn new(provider: Arc<dyn Provider>, events: EventBus) -> Self {
        let state = Arc::new(ProviderState::new(provider.name()));
        let policy = provider.policy();
        Self {
            refresher: Refresher {
                provider,
                state,
                events,
            },
            policy,
            cancel: CancellationToken::new(),
            initialized: AtomicBool::new(false),
            scheduler: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        self.refresher.name()
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Start the refresh schedule. Must be called from within a tokio runtime.
    ///
    /// A second call fails with `InvalidState` and starts nothing.
    pub fn initialize(&self) -> Result<(), ErrorKind> {
        if self.cancel.is_cancelled() {
            return Err(ErrorKind::InvalidState(format!(
                "provider '{}' has been cancelled",
                self.name()
            )));
        }
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(ErrorKind::InvalidState(format!(
                "provider '{}' is already initialized",
                self.name()
            )));
        }

        let scheduler =
            RefreshScheduler::start(self.refresher.clone(), self.policy, self.cancel.child_token());
        *self.scheduler.lock().unwrap_or_else(PoisonError::into_inner) = Some(scheduler);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Fetch now and wait for the result.
    ///
    /// Fails with `InvalidState` without touching state if a refresh is
    /// already in flight. Fetch failures are returned and also recorded.
    pub async fn refresh(&self) -> Result<ItemGroup, ErrorKind> {
        self.refresher.refresh().await
    }

    /// Start a background refresh unless one is already in flight.
    pub fn trigger(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        let refresher = self.refresher.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = refresher.refresh_if_idle() => {}
            }
        });
    }

    pub fn current_group(&self) -> Option<ItemGroup> {
        self.refresher.state.current_group()
    }

    pub fn is_loading(&self) -> bool {
        self.refresher.state.is_loading()
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.refresher.state.last_error()
    }

    pub fn snapshot(&self) -> ProviderSnapshot {
        self.refresher.state.snapshot()
    }

    /// Stop the schedule and drop any result still in flight. Idempotent.
    pub fn cancel(&self) {
        self.refresher.state.cancel();
        self.cancel.cancel();
        if let Some(scheduler) = self
            .scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            scheduler.stop();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ProviderHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests;
