mod cli;
mod commands;
mod observer;
mod wiring;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use waypoint_common::{ConfigError, WaypointError};
use waypoint_config::{toml_loader, validation, WaypointConfig};

use cli::Command;

/// Explicit paths must exist; the default path is created on first run.
fn load_config(path: Option<&PathBuf>) -> Result<WaypointConfig, ConfigError> {
    match path {
        Some(path) => {
            let config = toml_loader::load_from_path(path)?;
            validation::validate(&config)?;
            Ok(config)
        }
        None => waypoint_config::load_config(),
    }
}

/// `RUST_LOG` plus `directive`; an unparsable directive falls back to `info`.
fn log_filter(directive: &str) -> EnvFilter {
    let directive = directive
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    EnvFilter::from_default_env().add_directive(directive)
}

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(directive))
        .init();
}

async fn run(args: cli::Args, config: WaypointConfig) -> Result<(), WaypointError> {
    match args.command {
        Command::List {
            json,
            query,
            timeout_ms,
        } => {
            commands::list(
                &config,
                json,
                query.as_deref(),
                Duration::from_millis(timeout_ms),
            )
            .await
        }
        Command::Watch => {
            let path = match args.config {
                Some(path) => path,
                None => toml_loader::default_config_path()?,
            };
            commands::watch(&path).await
        }
        Command::Activate {
            group,
            label,
            timeout_ms,
        } => {
            commands::activate(&config, &group, &label, Duration::from_millis(timeout_ms)).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Logging needs the configured level, so load first and report after.
    let loaded = load_config(args.config.as_ref());
    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.as_directive().to_string(),
        (None, Err(_)) => "info".to_string(),
    };
    init_logging(&directive);

    tracing::info!("waypoint v{} starting", env!("CARGO_PKG_VERSION"));
    let config = match loaded {
        Ok(config) => config,
        Err(e @ ConfigError::FileNotFound(_)) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::warn!("config load failed, using defaults: {e}");
            WaypointConfig::default()
        }
    };

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_log_directive_falls_back_to_info() {
        let filter = log_filter("not a [valid directive").to_string();
        assert!(filter.contains("info"), "{filter}");
    }

    #[test]
    fn valid_log_directive_is_kept() {
        let filter = log_filter("waypoint_providers=trace").to_string();
        assert!(filter.contains("waypoint_providers=trace"), "{filter}");
    }
}
