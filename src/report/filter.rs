//! Record selection for the filtered reports.

use std::collections::BTreeMap;

use crate::domain::{BondRecord, ValueFilter, Watchlist, fields};
use crate::error::AppError;

/// Absolute tolerance for the "equal to" checks.
const TOLERANCE: f64 = 1e-6;

/// Newly issued bonds are quoted at par until they list.
const PAR_PRICE: f64 = 100.0;

/// Why a bond was left out of the value-filtered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Exclusion {
    NotListed,
    ZeroPremium,
    AbovePriceCeiling,
    AboveRateCeiling,
}

/// Bonds kept by the value filter, plus a per-reason count of the rest.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub kept: Vec<&'a BondRecord>,
    pub excluded: BTreeMap<Exclusion, usize>,
}

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// First exclusion rule that applies to `bond`, if any.
///
/// A listed price of 0 is not treated as unlisted.
pub fn value_exclusion(
    bond: &BondRecord,
    filter: &ValueFilter,
) -> Result<Option<Exclusion>, AppError> {
    let price = bond.number(fields::CURRENT_PRICE)?;
    if is_close(price, PAR_PRICE) || bond.text(fields::LISTING_DATE) == "-" {
        return Ok(Some(Exclusion::NotListed));
    }

    let premium = bond.number(fields::PREMIUM_RATE)?;
    if is_close(premium, 0.0) {
        return Ok(Some(Exclusion::ZeroPremium));
    }
    if price > filter.max_price {
        return Ok(Some(Exclusion::AbovePriceCeiling));
    }
    if premium / 100.0 > filter.max_rate {
        return Ok(Some(Exclusion::AboveRateCeiling));
    }
    Ok(None)
}

/// Apply the value filter to every bond, preserving input order.
pub fn select_by_value<'a>(
    bonds: &'a [BondRecord],
    filter: &ValueFilter,
) -> Result<Selection<'a>, AppError> {
    let mut kept = Vec::new();
    let mut excluded = BTreeMap::new();
    for bond in bonds {
        match value_exclusion(bond, filter)? {
            None => kept.push(bond),
            Some(reason) => *excluded.entry(reason).or_insert(0) += 1,
        }
    }
    Ok(Selection { kept, excluded })
}

/// Bonds whose code is on the watchlist, in input order.
pub fn select_watchlist<'a>(bonds: &'a [BondRecord], watchlist: &Watchlist) -> Vec<&'a BondRecord> {
    bonds
        .iter()
        .filter(|bond| watchlist.contains(&bond.code()))
        .collect()
}
