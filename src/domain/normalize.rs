//! Sentinel normalization.
//!
//! The upstream feed uses `"-"` for values that are not known yet (unlisted bonds,
//! missing conversion value). Reports expect numbers there, so each sentinel is
//! rewritten according to a fixed table before any report reads the records.

use serde_json::Value;

use crate::domain::types::{BondRecord, fields};

/// Value written in place of a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    Number(i64),
    Text(&'static str),
}

impl Replacement {
    fn to_value(self) -> Value {
        match self {
            Replacement::Number(n) => Value::from(n),
            Replacement::Text(s) => Value::from(s),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SentinelRule {
    pub field: &'static str,
    pub sentinel: &'static str,
    pub replacement: Replacement,
}

pub const SENTINEL_RULES: &[SentinelRule] = &[
    SentinelRule {
        field: fields::CONVERSION_VALUE,
        sentinel: "-",
        replacement: Replacement::Number(0),
    },
    SentinelRule {
        field: fields::PREMIUM_RATE,
        sentinel: "-",
        replacement: Replacement::Text("0"),
    },
    SentinelRule {
        field: fields::CURRENT_PRICE,
        sentinel: "-",
        replacement: Replacement::Number(0),
    },
];

/// Apply the sentinel table to one record. Returns how many fields were rewritten.
pub fn normalize_record(bond: &mut BondRecord) -> usize {
    let mut rewritten = 0;
    for rule in SENTINEL_RULES {
        let matches = matches!(
            bond.get(rule.field),
            Some(Value::String(s)) if s.trim() == rule.sentinel
        );
        if matches {
            bond.set(rule.field, rule.replacement.to_value());
            rewritten += 1;
        }
    }
    rewritten
}

/// Apply the sentinel table to every record in place.
pub fn normalize_all(bonds: &mut [BondRecord]) -> usize {
    bonds.iter_mut().map(normalize_record).sum()
}
