//! Background refresh scheduling.

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::handle::Refresher;
use crate::provider::RefreshPolicy;

/// Drives one provider's refreshes according to its [`RefreshPolicy`].
///
/// Each tick spawns its refresh so a slow fetch never delays the timer; a tick
/// that lands while a fetch is still running is dropped, never queued.
pub struct RefreshScheduler {
    token: CancellationToken,
}

impl RefreshScheduler {
    pub(crate) fn start(refresher: Refresher, policy: RefreshPolicy, token: CancellationToken) -> Self {
        tokio::spawn(run(refresher, policy, token.clone()));
        Self { token }
    }

    /// Stop ticking and abandon any refresh this scheduler started.
    pub fn stop(&self) {
        self.token.cancel();
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run(refresher: Refresher, policy: RefreshPolicy, token: CancellationToken) {
    match policy {
        RefreshPolicy::OneShot => {
            spawn_refresh(&refresher, &token);
        }
        RefreshPolicy::Periodic(period) => {
            // First tick completes immediately, giving the initial fetch.
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => spawn_refresh(&refresher, &token),
                }
            }
        }
    }
    debug!(provider = %refresher.name(), "scheduler stopped");
}

fn spawn_refresh(refresher: &Refresher, token: &CancellationToken) {
    let refresher = refresher.clone();
    let token = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            _ = refresher.refresh_if_idle() => {}
        }
    });
}
