//! Per-provider loading state.
//!
//! Each provider owns exactly one [`ProviderState`]. Writers hold the lock
//! only long enough to swap fields, so readers never wait on a fetch and
//! never observe a half-applied refresh.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use waypoint_common::{ErrorKind, ItemGroup};

/// Read-only copy of a provider's state for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSnapshot {
    pub name: String,
    pub is_loading: bool,
    pub last_group: Option<ItemGroup>,
    pub last_error: Option<ErrorKind>,
    /// When `last_group` was fetched.
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Number of refresh results applied so far, successful or not.
    pub generation: u64,
}

#[derive(Debug, Default)]
struct Inner {
    is_loading: bool,
    last_group: Option<ItemGroup>,
    last_error: Option<ErrorKind>,
    refreshed_at: Option<DateTime<Utc>>,
    generation: u64,
    cancelled: bool,
}

/// Outcome of handing a fetch result to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Completion {
    Applied,
    /// The provider was cancelled while the fetch ran.
    Discarded,
}

#[derive(Debug)]
pub struct ProviderState {
    name: String,
    inner: RwLock<Inner>,
}

impl ProviderState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading
    }

    pub fn current_group(&self) -> Option<ItemGroup> {
        self.read().last_group.clone()
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.read().last_error.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.read().cancelled
    }

    pub fn snapshot(&self) -> ProviderSnapshot {
        let inner = self.read();
        ProviderSnapshot {
            name: self.name.clone(),
            is_loading: inner.is_loading,
            last_group: inner.last_group.clone(),
            last_error: inner.last_error.clone(),
            refreshed_at: inner.refreshed_at,
            generation: inner.generation,
        }
    }

    /// Mark the start of a refresh.
    ///
    /// Returns `None` when a refresh is already in flight or the provider has
    /// been cancelled; otherwise `is_loading` is now true and stays true until
    /// the returned guard is finished or dropped.
    pub(crate) fn try_begin(self: &Arc<Self>) -> Option<RefreshGuard> {
        let mut inner = self.write();
        if inner.is_loading || inner.cancelled {
            return None;
        }
        inner.is_loading = true;
        Some(RefreshGuard {
            state: Some(Arc::clone(self)),
        })
    }

    /// One-way transition to cancelled. Later results are discarded.
    pub(crate) fn cancel(&self) {
        self.write().cancelled = true;
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Proof that a refresh is in flight. Dropping an unfinished guard clears
/// `is_loading`, so a cancelled or panicking fetch can never leave the
/// provider stuck loading.
#[derive(Debug)]
pub(crate) struct RefreshGuard {
    /// `None` once `finish` has released the refresh slot.
    state: Option<Arc<ProviderState>>,
}

impl RefreshGuard {
    /// Apply a fetch result and clear `is_loading` in one step.
    ///
    /// The slot is released exactly once: a refresh admitted right after this
    /// returns must not be cleared by this guard's drop.
    pub(crate) fn finish(mut self, result: &Result<ItemGroup, ErrorKind>) -> Completion {
        let Some(state) = self.state.take() else {
            return Completion::Discarded;
        };
        let mut inner = state.write();
        inner.is_loading = false;
        if inner.cancelled {
            return Completion::Discarded;
        }

        match result {
            Ok(group) => {
                inner.last_group = Some(group.clone());
                inner.last_error = None;
                inner.refreshed_at = Some(Utc::now());
            }
            Err(error) => {
                inner.last_error = Some(error.clone());
            }
        }
        inner.generation += 1;
        Completion::Applied
    }
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            state.write().is_loading = false;
        }
    }
}
