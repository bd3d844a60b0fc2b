use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Waypoint: windows, applications and git projects in one launcher list.
#[derive(Parser, Debug)]
#[command(name = "waypoint", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. "debug", "waypoint_providers=trace").
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load every provider once and print the resulting groups.
    List {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Only show items whose label contains this text (case-insensitive).
        #[arg(short, long)]
        query: Option<String>,

        /// How long to wait for providers to finish loading.
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
    },

    /// Keep providers refreshing, log changes and follow config edits.
    Watch,

    /// Activate the item with the given label in the named group.
    Activate {
        /// Group name, e.g. "Apps" (case-insensitive).
        group: String,

        /// Exact item label.
        label: String,

        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
