//! Dated output folder.

use std::fs::{create_dir_all, remove_dir_all};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::AppError;

/// `YYYYMMDD` stamp used for the folder and report names.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Create `<root>/<stamp>`, clearing it first if it already exists.
pub fn reset_folder(root: &Path, stamp: &str) -> Result<PathBuf, AppError> {
    let dir = root.join(stamp);
    if dir.exists() {
        remove_dir_all(&dir)
            .map_err(|e| AppError::io(format!("Failed to clear '{}': {e}", dir.display())))?;
    }
    create_dir_all(&dir)
        .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", dir.display())))?;
    Ok(dir)
}
