//! Provider aggregation for the waypoint launcher.
//!
//! A [`ProviderRegistry`] owns a set of [`Provider`]s, refreshes each on its
//! own [`RefreshPolicy`], and exposes whatever every provider last produced
//! as an ordered list of item groups.

pub mod builtin;
pub mod handle;
pub mod provider;
pub mod registry;
pub mod scheduler;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use builtin::{ApplicationsProvider, GitProjectsProvider, WindowsProvider};
pub use handle::ProviderHandle;
pub use provider::{Provider, RefreshPolicy};
pub use registry::ProviderRegistry;
pub use scheduler::RefreshScheduler;
pub use state::{ProviderSnapshot, ProviderState};
