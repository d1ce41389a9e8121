//! The snapshot workflow:
//! fetch (or replay) -> decode -> archive -> reset folder -> normalize -> reports

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::data::{KzzClient, decode, read_raw};
use crate::domain::{BondRecord, SnapshotConfig, normalize_all};
use crate::error::AppError;
use crate::io::{date_stamp, reset_folder, write_archive_json, write_report_csv};
use crate::report::{ReportKind, select_by_value, select_watchlist};

/// One written report.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub kind: ReportKind,
    pub path: PathBuf,
    pub rows: usize,
}

/// Outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub total: usize,
    pub folder: PathBuf,
    pub reports: Vec<ReportOutput>,
}

/// Fetch the bond list (or replay `config.input`) and run the full workflow.
pub fn run_snapshot(config: &SnapshotConfig, date: NaiveDate) -> Result<RunOutput, AppError> {
    let raw = match &config.input {
        Some(path) => read_raw(path)?,
        None => KzzClient::new().fetch_raw(config.order)?,
    };
    run_snapshot_with_raw(config, &raw, date)
}

/// Run the workflow on an already obtained raw response.
pub fn run_snapshot_with_raw(
    config: &SnapshotConfig,
    raw: &str,
    date: NaiveDate,
) -> Result<RunOutput, AppError> {
    let snapshot = decode(raw)?;
    let total = snapshot.total();
    let mut bonds = snapshot.bonds;

    write_archive_json(&config.archive, &bonds)?;
    info!(total, archive = %config.archive.display(), "decoded bond list saved");

    let stamp = date_stamp(date);
    let folder = reset_folder(&config.target, &stamp)?;

    let rewritten = normalize_all(&mut bonds);
    debug!(rewritten, "sentinel values normalized");

    let mut reports = Vec::with_capacity(ReportKind::ALL.len());
    for kind in ReportKind::ALL {
        reports.push(write_report(kind, &folder, &stamp, &bonds, config)?);
    }

    Ok(RunOutput {
        total,
        folder,
        reports,
    })
}

fn write_report(
    kind: ReportKind,
    folder: &Path,
    stamp: &str,
    bonds: &[BondRecord],
    config: &SnapshotConfig,
) -> Result<ReportOutput, AppError> {
    let path = folder.join(kind.file_name(stamp));
    let delimiter = kind.delimiter();

    let rows = match kind {
        ReportKind::Full => write_report_csv(&path, delimiter, bonds)?,
        ReportKind::Filtered => {
            let selection = select_by_value(bonds, &config.filter)?;
            debug!(excluded = ?selection.excluded, "value filter applied");
            write_report_csv(&path, delimiter, selection.kept.iter().copied())?
        }
        ReportKind::Watchlist => {
            write_report_csv(&path, delimiter, select_watchlist(bonds, &config.watchlist))?
        }
    };

    info!(path = %path.display(), rows, "report saved");
    Ok(ReportOutput { kind, path, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ValueFilter, Watchlist};
    use crate::report::HEADER;

    /// Digits 0-9 are obfuscated as `&#xE730;`..`&#xE739;`.
    fn glyph(digits: &str) -> String {
        digits
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => format!("&#xE73{d};"),
                None => c.to_string(),
            })
            .collect()
    }

    fn fixture() -> String {
        let mapping: Vec<String> = (0..10)
            .map(|d| format!(r#"{{"code":"&#xE73{d};","value":{d}}}"#))
            .collect();
        format!(
            concat!(
                "{{data:[",
                r#"{{"BONDCODE":"113531","SNAME":"百合转债","CORRESCODE":"754433","AISSUEVOL":"3.0","#,
                r#""SWAPSCODE":"603102","SECURITYSHORTNAME":"百合股份","ZGJ":"{zgj}","SWAPPRICE":"29.5","#,
                r#""ZGJZGJJZ":"95.627","ZQNEW":"{p1}","YJL":"{y1}","ZQHDATE":"2019-05-24T00:00:00","#,
                r#""LUCKRATE":"0.0142","LISTDATE":"2019-06-12T00:00:00"}},"#,
                r#"{{"BONDCODE":"128075","SNAME":"远东转债","CORRESCODE":"072975","AISSUEVOL":"4.0","#,
                r#""SWAPSCODE":"002975","SECURITYSHORTNAME":"远东股份","ZGJ":"9.1","SWAPPRICE":"9.2","#,
                r#""ZGJZGJJZ":"98.9","ZQNEW":"{p2}","YJL":"5.1","ZQHDATE":"2019-08-20T00:00:00","#,
                r#""LUCKRATE":"0.01","LISTDATE":"2019-09-05T00:00:00"}},"#,
                r#"{{"BONDCODE":"123041","SNAME":"东财转2","CORRESCODE":"370059","AISSUEVOL":"46.0","#,
                r#""SWAPSCODE":"300059","SECURITYSHORTNAME":"东方财富","ZGJ":"15.1","SWAPPRICE":"13.5","#,
                r#""ZGJZGJJZ":"-","ZQNEW":"104.5","YJL":"-","ZQHDATE":"2020-01-14T00:00:00","#,
                r#""LUCKRATE":"0.2","LISTDATE":"2020-02-05T00:00:00"}}"#,
                "],font:{{\"WoffUrl\":\"\",\"FontMapping\":[{mapping}]}}}}"
            ),
            zgj = glyph("28.21"),
            p1 = glyph("105.3"),
            y1 = glyph("8.2"),
            p2 = glyph("100"),
            mapping = mapping.join(","),
        )
    }

    fn config(root: &Path) -> SnapshotConfig {
        SnapshotConfig {
            target: root.join("data"),
            archive: root.join("kzz.json"),
            ..SnapshotConfig::default()
        }
    }

    fn data_rows(path: &Path) -> Vec<csv::StringRecord> {
        csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(path)
            .unwrap()
            .records()
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn end_to_end_writes_archive_and_reports() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path());
        let date = NaiveDate::from_ymd_opt(2020, 3, 5).unwrap();

        let out = run_snapshot_with_raw(&config, &fixture(), date).unwrap();
        assert_eq!(out.total, 3);
        assert_eq!(out.folder, root.path().join("data").join("20200305"));

        // Archive is written before normalization and fully decoded.
        let archive = std::fs::read_to_string(&config.archive).unwrap();
        assert!(archive.contains("\"ZQNEW\": \"105.3\""));
        assert!(archive.contains("\"YJL\": \"-\""));
        assert!(!archive.contains("&#x"));

        let rows: Vec<usize> = out.reports.iter().map(|r| r.rows).collect();
        assert_eq!(rows, vec![3, 1, 3]);

        let filtered = data_rows(&out.folder.join("kzz_20200305_filtered.csv"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(&filtered[0][0], "113531_百合转债_754433");
        assert_eq!(&filtered[0][3], "28.21_29.5");
        assert_eq!(&filtered[0][6], "8.2%");

        let full = std::fs::read_to_string(out.folder.join("kzz_20200305.csv")).unwrap();
        assert_eq!(full.lines().count(), 4);
        assert!(full.starts_with(&format!("{}\r\n", HEADER.join(","))));
        assert_eq!(full.matches("\r\n").count(), 4);
        let tabbed =
            std::fs::read_to_string(out.folder.join("kzz_20200305_filtered.csv")).unwrap();
        assert!(tabbed.starts_with(&format!("{}\r\n", HEADER.join("\t"))));
        // Normalized sentinels show up in the reports.
        let normalized = "123041_东财转2_370059,46.0,300059_东方财富,15.1_13.5,0,104.5,0%,";
        assert!(full.contains(normalized));
    }

    #[test]
    fn price_ceiling_changes_filtered_rows() {
        let root = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2020, 3, 5).unwrap();
        let config = SnapshotConfig {
            filter: ValueFilter {
                max_price: 105.0,
                ..ValueFilter::default()
            },
            ..config(root.path())
        };

        let out = run_snapshot_with_raw(&config, &fixture(), date).unwrap();
        assert_eq!(out.reports[1].kind, ReportKind::Filtered);
        assert_eq!(out.reports[1].rows, 0);
    }

    #[test]
    fn watchlist_report_follows_input_order() {
        let root = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2020, 3, 5).unwrap();
        let config = SnapshotConfig {
            watchlist: Watchlist::new(["123041", "113531", "000000"]),
            ..config(root.path())
        };

        let out = run_snapshot_with_raw(&config, &fixture(), date).unwrap();
        let history = data_rows(&out.folder.join("kzz_20200305_history.csv"));
        let codes: Vec<&str> = history.iter().map(|r| r[0].split('_').next().unwrap()).collect();
        assert_eq!(codes, vec!["113531", "123041"]);
    }

    #[test]
    fn replayed_input_is_decoded() {
        let root = tempfile::tempdir().unwrap();
        let raw_path = root.path().join("raw.txt");
        std::fs::write(&raw_path, fixture()).unwrap();
        let config = SnapshotConfig {
            input: Some(raw_path),
            ..config(root.path())
        };

        let date = NaiveDate::from_ymd_opt(2020, 3, 5).unwrap();
        let out = run_snapshot(&config, date).unwrap();
        assert_eq!(out.total, 3);
    }

    #[test]
    fn malformed_response_aborts_before_writing() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path());
        let date = NaiveDate::from_ymd_opt(2020, 3, 5).unwrap();
        let err = run_snapshot_with_raw(&config, "{data:[]}", date).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(!config.archive.exists());
        assert!(!config.target.exists());
    }
}
