//! Shared domain types.
//!
//! Bond records are kept as loosely-typed JSON maps: the upstream payload has no
//! stable schema and values arrive as either strings or numbers. Accessors render
//! or parse fields at the point of use.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Upstream field names consumed by the normalizer and the reports.
pub mod fields {
    pub const BOND_CODE: &str = "BONDCODE";
    pub const SHORT_NAME: &str = "SNAME";
    pub const SUBSCRIPTION_CODE: &str = "CORRESCODE";
    pub const ISSUE_VOLUME: &str = "AISSUEVOL";
    pub const SWAP_CODE: &str = "SWAPSCODE";
    pub const SECURITY_SHORT_NAME: &str = "SECURITYSHORTNAME";
    pub const REFERENCE_PRICE: &str = "ZGJ";
    pub const SWAP_PRICE: &str = "SWAPPRICE";
    pub const CONVERSION_VALUE: &str = "ZGJZGJJZ";
    pub const CURRENT_PRICE: &str = "ZQNEW";
    pub const PREMIUM_RATE: &str = "YJL";
    pub const LOTTERY_DATE: &str = "ZQHDATE";
    pub const LOTTERY_RATE: &str = "LUCKRATE";
    pub const LISTING_DATE: &str = "LISTDATE";
}

/// Sort direction requested from the endpoint (by subscription start date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// One convertible bond's market snapshot, as decoded from the payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BondRecord(Map<String, Value>);

impl BondRecord {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }

    /// Field rendered as report text. Missing fields render empty.
    pub fn text(&self, field: &str) -> String {
        self.0.get(field).map(value_text).unwrap_or_default()
    }

    pub fn code(&self) -> String {
        self.text(fields::BOND_CODE)
    }

    /// Field parsed as a float, from either a JSON number or numeric text.
    pub fn number(&self, field: &str) -> Result<f64, AppError> {
        let value = self.0.get(field).ok_or_else(|| {
            AppError::data(format!("Bond {} has no '{field}' field.", self.code()))
        })?;
        if let Some(v) = value.as_f64() {
            return Ok(v);
        }
        let raw = value_text(value);
        raw.trim().parse::<f64>().map_err(|_| {
            AppError::data(format!("Bond {} has non-numeric '{field}': '{raw}'.", self.code()))
        })
    }
}

/// Render a JSON value the way it should appear in text output.
///
/// Strings are emitted without quotes, `null` as an empty string, everything else
/// via its JSON representation.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Thresholds for the value-filtered report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueFilter {
    /// Maximum listed price (inclusive).
    pub max_price: f64,
    /// Maximum premium rate as a fraction (0.15 = 15%), inclusive.
    pub max_rate: f64,
}

impl Default for ValueFilter {
    fn default() -> Self {
        Self {
            max_price: 112.0,
            max_rate: 0.15,
        }
    }
}

/// Bond codes followed by the operator.
pub const DEFAULT_WATCHLIST: &[&str] = &[
    "110059", "110063", "113531", "113540", "113545", "123036", "123041", "128075", "128089",
    "128092", "132018", "128070", "123028", "113537", "128068", "113535", "113026", "113532",
    "128062", "110057", "128060", "127012", "123023", "110053", "113022", "113529", "128057",
    "113021", "113528", "127006", "127005", "128036", "113019", "110043", "128034", "113018",
    "128024",
];

/// Set of bond codes of interest for the watchlist report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    codes: HashSet<String>,
}

impl Watchlist {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a watchlist file: one code per line, `#` starts a comment.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|line| line.split('#').next().unwrap_or("").trim())
                .filter(|code| !code.is_empty()),
        )
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::new(DEFAULT_WATCHLIST.iter().copied())
    }
}

/// Immutable settings for one snapshot run.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    pub order: SortOrder,
    pub filter: ValueFilter,
    /// Root folder; reports go to `<target>/<YYYYMMDD>/`.
    pub target: PathBuf,
    /// Path of the decoded JSON archive.
    pub archive: PathBuf,
    pub watchlist: Watchlist,
    /// Replay a saved raw response instead of fetching.
    pub input: Option<PathBuf>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            order: SortOrder::default(),
            filter: ValueFilter::default(),
            target: PathBuf::from("data"),
            archive: PathBuf::from("kzz.json"),
            watchlist: Watchlist::default(),
            input: None,
        }
    }
}
