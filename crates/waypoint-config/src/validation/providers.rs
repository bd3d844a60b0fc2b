//! Provider section validation.

use super::helpers::{validate_non_blank, validate_range};
use crate::schema::WaypointConfig;

pub(super) fn validate_windows(errors: &mut Vec<String>, config: &WaypointConfig) {
    let windows = &config.providers.windows;
    validate_range(
        errors,
        "providers.windows.interval_ms",
        windows.interval_ms,
        250,
        600_000,
    );
}

pub(super) fn validate_applications(errors: &mut Vec<String>, config: &WaypointConfig) {
    validate_non_blank(
        errors,
        "providers.applications.extra_dirs",
        &config.providers.applications.extra_dirs,
    );
}

pub(super) fn validate_git_projects(errors: &mut Vec<String>, config: &WaypointConfig) {
    let git = &config.providers.git_projects;
    validate_range(errors, "providers.git_projects.max_depth", git.max_depth, 1, 32);
    validate_non_blank(errors, "providers.git_projects.roots", &git.roots);

    if git.enabled && git.roots.is_empty() {
        errors.push("providers.git_projects.roots must not be empty when enabled".into());
    }
    if git.open_command.is_empty() {
        errors.push("providers.git_projects.open_command must name a program".into());
    }
}
