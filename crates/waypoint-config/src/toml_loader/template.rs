//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Waypoint Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

# Providers are shown in this order: windows, applications, git_projects.

[providers.windows]
# enabled = true
# refresh = "periodic"   # periodic, one-shot
# interval_ms = 3000     # 250-600000
# backend = "sway"       # sway, i3

[providers.applications]
# enabled = true
# extra_dirs = []        # scanned before $XDG_DATA_HOME and $XDG_DATA_DIRS

[providers.git_projects]
# enabled = true
# roots = ["~"]
# max_depth = 4          # 1-32
# open_command = ["code"]

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}
