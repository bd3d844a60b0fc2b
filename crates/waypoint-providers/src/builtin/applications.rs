use std::sync::Arc;

use async_trait::async_trait;
use waypoint_common::{ErrorKind, Item, ItemAction, ItemGroup};
use waypoint_platform::{AppInfo, ApplicationSource};

use super::run_blocking;
use crate::provider::{Provider, RefreshPolicy};

pub const NAME: &str = "applications";

const FALLBACK_ICON: &str = "application-x-executable";

/// Installed desktop applications, sorted by name. Fetched once.
pub struct ApplicationsProvider {
    source: Arc<dyn ApplicationSource>,
}

impl ApplicationsProvider {
    pub fn new(source: Arc<dyn ApplicationSource>) -> Self {
        Self { source }
    }
}

/// Sort case-insensitively and keep one entry per display name.
fn arrange(mut apps: Vec<AppInfo>) -> Vec<AppInfo> {
    apps.sort_by_cached_key(|app| (app.name.to_lowercase(), app.id.clone()));
    apps.dedup_by(|b, a| a.name.to_lowercase() == b.name.to_lowercase());
    apps
}

fn to_item(app: AppInfo) -> Item {
    let icon = app.icon.unwrap_or_else(|| FALLBACK_ICON.to_string());
    Item::new(
        app.name,
        icon,
        ItemAction::Launch {
            command: app.command,
            desktop_file: Some(app.desktop_file),
        },
    )
}

#[async_trait]
impl Provider for ApplicationsProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn policy(&self) -> RefreshPolicy {
        RefreshPolicy::OneShot
    }

    async fn fetch(&self) -> Result<ItemGroup, ErrorKind> {
        let source = Arc::clone(&self.source);
        let apps = run_blocking(move || source.fetch_applications()).await?;
        let items = arrange(apps).into_iter().map(to_item).collect();
        Ok(ItemGroup::new("Apps", "rocket", items))
    }
}
