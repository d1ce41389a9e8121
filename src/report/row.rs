//! Report columns.

use crate::domain::{BondRecord, fields};

/// Shared header for every report.
pub const HEADER: [&str; 9] = [
    "债券代码_简称_申购代码",
    "发行规模（亿元）",
    "正股代码_简称",
    "正股价_转股价",
    "转股价值",
    "债现价",
    "转股溢价率",
    "中签号发布日_中签率%",
    "上市日期",
];

/// Dates arrive as timestamps (`2019-12-30T00:00:00`); only the day is kept.
const DATE_CHARS: usize = 10;

/// Derive the 9 report columns for one bond.
pub fn report_row(bond: &BondRecord) -> [String; 9] {
    [
        format!(
            "{}_{}_{}",
            bond.text(fields::BOND_CODE),
            bond.text(fields::SHORT_NAME),
            bond.text(fields::SUBSCRIPTION_CODE)
        ),
        bond.text(fields::ISSUE_VOLUME),
        format!(
            "{}_{}",
            bond.text(fields::SWAP_CODE),
            bond.text(fields::SECURITY_SHORT_NAME)
        ),
        format!(
            "{}_{}",
            bond.text(fields::REFERENCE_PRICE),
            bond.text(fields::SWAP_PRICE)
        ),
        bond.text(fields::CONVERSION_VALUE),
        bond.text(fields::CURRENT_PRICE),
        format!("{}%", bond.text(fields::PREMIUM_RATE)),
        format!(
            "{}_{}",
            prefix(&bond.text(fields::LOTTERY_DATE), DATE_CHARS),
            bond.text(fields::LOTTERY_RATE)
        ),
        prefix(&bond.text(fields::LISTING_DATE), DATE_CHARS),
    ]
}

fn prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
