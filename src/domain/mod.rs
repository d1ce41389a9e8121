//! Domain types used throughout the pipeline.
//!
//! - bond records and field names (`BondRecord`, `fields`)
//! - run configuration (`SnapshotConfig`, `ValueFilter`, `Watchlist`, `SortOrder`)
//! - sentinel normalization (`normalize`)

pub mod normalize;
pub mod types;

pub use normalize::{normalize_all, normalize_record};
pub use types::*;
