use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use waypoint_common::{ErrorKind, Item, ItemAction, ItemGroup};
use waypoint_platform::{RepoInfo, RepositorySource};

use super::run_blocking;
use crate::provider::{Provider, RefreshPolicy};

pub const NAME: &str = "git_projects";

/// Git working trees found below a set of roots. Fetched once.
pub struct GitProjectsProvider {
    source: Arc<dyn RepositorySource>,
    roots: Vec<PathBuf>,
}

impl GitProjectsProvider {
    pub fn new(source: Arc<dyn RepositorySource>, roots: Vec<PathBuf>) -> Self {
        Self { source, roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

fn to_item(repo: RepoInfo) -> Item {
    Item::new(repo.name, "git", ItemAction::OpenRepository { path: repo.path })
}

#[async_trait]
impl Provider for GitProjectsProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn policy(&self) -> RefreshPolicy {
        RefreshPolicy::OneShot
    }

    async fn fetch(&self) -> Result<ItemGroup, ErrorKind> {
        let source = Arc::clone(&self.source);
        let roots = self.roots.clone();
        let mut repos = run_blocking(move || source.fetch_git_repositories(&roots)).await?;

        repos.sort_by_cached_key(|repo| (repo.name.to_lowercase(), repo.path.clone()));
        repos.dedup_by(|b, a| a.path == b.path);

        let items = repos.into_iter().map(to_item).collect();
        Ok(ItemGroup::new("Git Repositories", "folder", items))
    }
}
