//! Report definitions: columns, record selection, and per-report file layout.

pub mod filter;
pub mod row;

pub use filter::{Exclusion, Selection, select_by_value, select_watchlist, value_exclusion};
pub use row::{HEADER, report_row};

/// The three CSV views written per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Every record.
    Full,
    /// Listed bonds within the price and premium ceilings.
    Filtered,
    /// Bonds on the operator's watchlist.
    Watchlist,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::Full,
        ReportKind::Filtered,
        ReportKind::Watchlist,
    ];

    pub fn file_name(self, stamp: &str) -> String {
        match self {
            ReportKind::Full => format!("kzz_{stamp}.csv"),
            ReportKind::Filtered => format!("kzz_{stamp}_filtered.csv"),
            ReportKind::Watchlist => format!("kzz_{stamp}_history.csv"),
        }
    }

    pub fn delimiter(self) -> u8 {
        match self {
            ReportKind::Full => b',',
            ReportKind::Filtered | ReportKind::Watchlist => b'\t',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_date_stamp() {
        assert_eq!(ReportKind::Full.file_name("20200105"), "kzz_20200105.csv");
        assert_eq!(ReportKind::Filtered.file_name("20200105"), "kzz_20200105_filtered.csv");
        assert_eq!(ReportKind::Watchlist.file_name("20200105"), "kzz_20200105_history.csv");
    }

    #[test]
    fn only_full_report_is_comma_delimited() {
        assert_eq!(ReportKind::Full.delimiter(), b',');
        assert_eq!(ReportKind::Filtered.delimiter(), b'\t');
        assert_eq!(ReportKind::Watchlist.delimiter(), b'\t');
    }
}
