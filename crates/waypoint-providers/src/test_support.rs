//! Scripted providers for exercising scheduling and registry behavior.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use waypoint_common::{ErrorKind, Item, ItemAction, ItemGroup};

use crate::provider::{Provider, RefreshPolicy};

pub(crate) fn group(name: &str, labels: &[&str]) -> ItemGroup {
    let items = labels
        .iter()
        .enumerate()
        .map(|(i, label)| Item::new(*label, "icon", ItemAction::FocusWindow { id: i as i64 }))
        .collect();
    ItemGroup::new(name, "icon", items)
}

/// Let spawned tasks run and advance the (paused) clock by `duration`.
pub(crate) async fn settle(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Yield until `condition` holds. Panics if it never does.
pub(crate) async fn wait_for(mut condition: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}

/// Returns queued results in order, then empty groups named after itself.
pub(crate) struct ScriptedProvider {
    name: String,
    policy: RefreshPolicy,
    results: Mutex<VecDeque<Result<ItemGroup, ErrorKind>>>,
    delay: Option<Duration>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    pub(crate) active: AtomicUsize,
    max_active: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn new(name: &str, policy: RefreshPolicy) -> Self {
        Self {
            name: name.to_string(),
            policy,
            results: Mutex::new(VecDeque::new()),
            delay: None,
            gate: None,
            calls: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_results(self, results: Vec<Result<ItemGroup, ErrorKind>>) -> Self {
        *self.results.lock().unwrap() = results.into();
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Each fetch waits for one `notify_one` on the returned handle.
    pub(crate) fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

struct ActiveGuard<'a>(&'a AtomicUsize);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    async fn fetch(&self) -> Result<ItemGroup, ErrorKind> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);
        let _active = ActiveGuard(&self.active);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self.results.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(group(&self.name, &[])))
    }
}
