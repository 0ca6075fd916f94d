use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MergeError, Result};
use crate::utils::get_local_datetime_with_format;

pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn backup_timestamp() -> String {
    get_local_datetime_with_format(BACKUP_TIMESTAMP_FORMAT)
}

pub fn backup_file_name(timestamp: &str) -> String {
    format!("backup_{timestamp}.xlsx")
}

/// Move `master` into `backup_dir` as `backup_<timestamp>.xlsx`.
///
/// The master is renamed, not copied: its original path stays empty until a
/// new workbook is saved there. An existing backup is never overwritten, a
/// `_1`, `_2`, ... suffix is added instead.
pub fn backup_master(master: &Path, backup_dir: &Path, timestamp: &str) -> Result<PathBuf> {
    fs::create_dir_all(backup_dir).map_err(|e| {
        MergeError::io(
            format!("Cannot create backup directory {}", backup_dir.display()),
            e,
        )
    })?;

    let backup_path = free_backup_path(backup_dir, timestamp);
    fs::rename(master, &backup_path).map_err(|e| {
        MergeError::io(
            format!(
                "Cannot move {} to {}",
                master.display(),
                backup_path.display()
            ),
            e,
        )
    })?;

    Ok(backup_path)
}

fn free_backup_path(backup_dir: &Path, timestamp: &str) -> PathBuf {
    let candidate = backup_dir.join(backup_file_name(timestamp));
    if !candidate.exists() {
        return candidate;
    }
    (1..)
        .map(|n| backup_dir.join(backup_file_name(&format!("{timestamp}_{n}"))))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}
