//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments into an immutable `SnapshotConfig`
//! - sets up logging
//! - runs the snapshot pipeline for today's date

use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::domain::{SnapshotConfig, ValueFilter, Watchlist};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `kzz` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging();

    let config = snapshot_config_from_cli(&cli)?;
    let today = Local::now().date_naive();
    let out = pipeline::run_snapshot(&config, today)?;

    info!(
        total = out.total,
        folder = %out.folder.display(),
        "snapshot complete"
    );
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

pub fn snapshot_config_from_cli(cli: &Cli) -> Result<SnapshotConfig, AppError> {
    if !(cli.max_price.is_finite() && cli.max_rate.is_finite()) {
        return Err(AppError::io("--max-price and --max-rate must be finite numbers."));
    }

    let watchlist = match &cli.watchlist {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                AppError::io(format!("Failed to read watchlist '{}': {e}", path.display()))
            })?;
            Watchlist::parse(&text)
        }
        None => Watchlist::default(),
    };

    Ok(SnapshotConfig {
        order: cli.order,
        filter: ValueFilter {
            max_price: cli.max_price,
            max_rate: cli.max_rate,
        },
        target: cli.target.clone(),
        archive: cli.archive.clone(),
        watchlist,
        input: cli.input.clone(),
    })
}
