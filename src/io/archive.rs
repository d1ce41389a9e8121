//! JSON archive of the decoded bond list.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::BondRecord;
use crate::error::AppError;

/// Write the decoded records as pretty-printed UTF-8 JSON, replacing `path`.
pub fn write_archive_json(path: &Path, bonds: &[BondRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| {
            AppError::io(format!("Failed to create archive '{}': {e}", path.display()))
        })?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, bonds)
        .map_err(|e| AppError::io(format!("Failed to write archive JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to write archive JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn archive_keeps_order_and_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kzz.json");
        let bonds: Vec<BondRecord> = vec![
            serde_json::from_value(json!({
                "SNAME": "百合转债",
                "BONDCODE": "113531",
                "ZQNEW": 105.3
            }))
            .unwrap(),
        ];

        write_archive_json(&path, &bonds).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("百合转债"));
        assert!(text.find("SNAME").unwrap() < text.find("BONDCODE").unwrap());
        assert!(text.contains("\n  {"));

        let back: Vec<BondRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, bonds);
    }
}
