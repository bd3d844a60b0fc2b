use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use waypoint_common::{ErrorKind, Item, ItemAction, ItemGroup};
use waypoint_platform::{WindowInfo, WindowSource};

use super::run_blocking;
use crate::provider::{Provider, RefreshPolicy};

pub const NAME: &str = "windows";
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);

/// Open windows, most recently focused first.
pub struct WindowsProvider {
    source: Arc<dyn WindowSource>,
    policy: RefreshPolicy,
}

impl WindowsProvider {
    /// Refreshes every [`DEFAULT_INTERVAL`] unless overridden.
    pub fn new(source: Arc<dyn WindowSource>) -> Self {
        Self {
            source,
            policy: RefreshPolicy::Periodic(DEFAULT_INTERVAL),
        }
    }

    pub fn with_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }
}

fn to_item(window: WindowInfo) -> Item {
    let icon = window.app_id.unwrap_or_else(|| "window".to_string());
    Item::new(window.title, icon, ItemAction::FocusWindow { id: window.id })
}

#[async_trait]
impl Provider for WindowsProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    async fn fetch(&self) -> Result<ItemGroup, ErrorKind> {
        let source = Arc::clone(&self.source);
        let windows = run_blocking(move || source.fetch_windows()).await?;
        let items = windows.into_iter().map(to_item).collect();
        Ok(ItemGroup::new("Windows", "window-maximize", items))
    }
}
