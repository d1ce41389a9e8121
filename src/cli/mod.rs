//! Command-line parsing for the convertible-bond snapshot.
//!
//! Every option maps onto one field of `SnapshotConfig`; defaults reproduce the
//! operator's usual run (`kzz` with no arguments).

use std::path::PathBuf;

use clap::Parser;

use crate::domain::SortOrder;

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "kzz",
    version,
    about = "Convertible-bond snapshot: fetch, decode, archive and report"
)]
pub struct Cli {
    /// Sort order (by subscription start date) requested from the endpoint.
    #[arg(long, value_enum, default_value_t = SortOrder::Desc)]
    pub order: SortOrder,

    /// Filtered report: maximum listed price.
    #[arg(long, default_value_t = 112.0)]
    pub max_price: f64,

    /// Filtered report: maximum premium rate as a fraction (0.15 = 15%).
    #[arg(long, default_value_t = 0.15)]
    pub max_rate: f64,

    /// Root folder for the dated report folder.
    #[arg(long, default_value = "data", value_name = "DIR")]
    pub target: PathBuf,

    /// Where to write the decoded JSON archive.
    #[arg(long, default_value = "kzz.json", value_name = "FILE")]
    pub archive: PathBuf,

    /// Watchlist file, one bond code per line (defaults to the built-in list).
    #[arg(long, value_name = "FILE")]
    pub watchlist: Option<PathBuf>,

    /// Decode a saved raw response instead of fetching.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}
