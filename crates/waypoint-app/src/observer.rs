//! Logs provider events as they happen.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use waypoint_common::ProviderEvent;

/// Runs until every sender of the bus is gone.
pub fn spawn(rx: broadcast::Receiver<ProviderEvent>) -> JoinHandle<usize> {
    tokio::spawn(run(rx))
}

async fn run(mut rx: broadcast::Receiver<ProviderEvent>) -> usize {
    let mut seen = 0;
    loop {
        match rx.recv().await {
            Ok(event) => {
                seen += 1;
                log_event(&event);
            }
            Err(RecvError::Lagged(n)) => warn!("event observer lagged, {n} events dropped"),
            Err(RecvError::Closed) => break,
        }
    }
    seen
}

fn log_event(event: &ProviderEvent) {
    match event {
        ProviderEvent::Registered { provider } => info!(%provider, "provider registered"),
        ProviderEvent::RefreshSucceeded { provider, items } => {
            info!(%provider, items, "provider refreshed")
        }
        ProviderEvent::RefreshFailed { provider, error } => {
            warn!(%provider, %error, "provider refresh failed")
        }
        ProviderEvent::Removed { provider } => info!(%provider, "provider removed"),
        ProviderEvent::RefreshStarted { provider }
        | ProviderEvent::RefreshSkipped { provider }
        | ProviderEvent::ResultDiscarded { provider } => {
            debug!(%provider, ?event, "provider event")
        }
        ProviderEvent::Unknown => {}
    }
}
