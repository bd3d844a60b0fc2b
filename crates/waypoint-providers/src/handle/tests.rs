use std::sync::Arc;
use std::time::Duration;

use waypoint_common::{ErrorKind, EventBus, ProviderEvent};

use super::*;
use crate::test_support::{group, settle, wait_for, ScriptedProvider};

#[tokio::test(start_paused = true)]
async fn second_initialize_is_rejected() {
    let provider = Arc::new(ScriptedProvider::new("apps", RefreshPolicy::OneShot));
    let handle = ProviderHandle::new(provider.clone(), EventBus::default());

    handle.initialize().unwrap();
    let err = handle.initialize().unwrap_err();
    assert!(matches!(err, ErrorKind::InvalidState(_)));

    settle(Duration::from_millis(10)).await;
    assert_eq!(provider.calls(), 1);
    assert!(handle.is_initialized());
}

#[tokio::test]
async fn refresh_records_failure_and_clears_loading() {
    let provider = Arc::new(
        ScriptedProvider::new("git", RefreshPolicy::OneShot)
            .with_results(vec![Err(ErrorKind::PermissionDenied("/srv".into()))]),
    );
    let handle = ProviderHandle::new(provider, EventBus::default());

    let err = handle.refresh().await.unwrap_err();
    assert_eq!(err, ErrorKind::PermissionDenied("/srv".into()));
    assert_eq!(handle.last_error(), Some(err));
    assert!(handle.current_group().is_none());
    assert!(!handle.is_loading());
}

#[tokio::test]
async fn refresh_while_in_flight_is_rejected_without_side_effects() {
    let (provider, gate) = ScriptedProvider::new("windows", RefreshPolicy::OneShot).gated();
    let provider = Arc::new(provider.with_results(vec![Ok(group("Windows", &["A"]))]));
    let handle = Arc::new(ProviderHandle::new(provider.clone(), EventBus::default()));

    let first = tokio::spawn({
        let handle = Arc::clone(&handle);
        async move { handle.refresh().await }
    });
    wait_for(|| handle.is_loading()).await;

    let before = handle.snapshot();
    let err = handle.refresh().await.unwrap_err();
    assert!(matches!(err, ErrorKind::InvalidState(_)));
    assert_eq!(handle.snapshot(), before);
    assert_eq!(provider.calls(), 1);

    gate.notify_one();
    let group_a = first.await.unwrap().unwrap();
    assert_eq!(group_a, group("Windows", &["A"]));
    assert_eq!(handle.current_group(), Some(group_a));
    assert!(!handle.is_loading());
}

#[tokio::test]
async fn cancel_discards_in_flight_result() {
    let (provider, gate) = ScriptedProvider::new("windows", RefreshPolicy::OneShot).gated();
    let events = EventBus::default();
    let mut rx = events.subscribe();
    let handle = Arc::new(ProviderHandle::new(Arc::new(provider), events));

    let pending = tokio::spawn({
        let handle = Arc::clone(&handle);
        async move { handle.refresh().await }
    });
    wait_for(|| handle.is_loading()).await;

    handle.cancel();
    gate.notify_one();
    assert!(pending.await.unwrap().is_ok());

    assert!(handle.current_group().is_none());
    assert!(!handle.is_loading());
    assert_eq!(handle.snapshot().generation, 0);

    let mut discarded = false;
    while let Ok(event) = rx.try_recv() {
        discarded |= matches!(event, ProviderEvent::ResultDiscarded { .. });
    }
    assert!(discarded);
}

#[tokio::test]
async fn cancelled_handle_cannot_initialize_or_refresh() {
    let provider = Arc::new(ScriptedProvider::new("windows", RefreshPolicy::OneShot));
    let handle = ProviderHandle::new(provider.clone(), EventBus::default());
    handle.cancel();
    handle.cancel();

    assert!(handle.is_cancelled());
    assert!(matches!(
        handle.initialize(),
        Err(ErrorKind::InvalidState(_))
    ));
    assert!(matches!(
        handle.refresh().await,
        Err(ErrorKind::InvalidState(_))
    ));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn trigger_is_dropped_while_refresh_in_flight() {
    let (provider, gate) = ScriptedProvider::new("windows", RefreshPolicy::OneShot).gated();
    let provider = Arc::new(provider);
    let events = EventBus::default();
    let mut rx = events.subscribe();
    let handle = Arc::new(ProviderHandle::new(provider.clone(), events));

    let first = tokio::spawn({
        let handle = Arc::clone(&handle);
        async move { handle.refresh().await }
    });
    wait_for(|| handle.is_loading()).await;

    handle.trigger();
    let mut skipped = false;
    for _ in 0..100 {
        tokio::task::yield_now().await;
        if let Ok(ProviderEvent::RefreshSkipped { .. }) = rx.try_recv() {
            skipped = true;
            break;
        }
    }
    assert!(skipped);

    gate.notify_one();
    first.await.unwrap().unwrap();
    assert_eq!(provider.calls(), 1);
    assert_eq!(provider.max_active(), 1);
}
