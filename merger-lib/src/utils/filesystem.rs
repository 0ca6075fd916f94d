use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::utils::get_utc_iso_datetime;

/// Centralized function to write error messages to the errors log file
///
/// # Arguments
/// * `log_file` - Path of the append-only log file (created if missing)
/// * `error_type` - A description of the error type/category (e.g., "Incoming File Load Error")
/// * `error_message` - The actual error message content
pub fn write_error_to_log(log_file: &Path, error_type: &str, error_message: &str) {
    let timestamp = get_utc_iso_datetime();
    let log_entry = format!("\n[{}] {}:\n{}\n", timestamp, error_type, error_message);

    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_file) {
        let _ = writeln!(file, "{}", log_entry);
    }
}

/// Returns `path` unchanged when absolute, otherwise joined onto `base`
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Excel keeps `~$name.xlsx` lock files next to open workbooks
pub fn is_lock_file(file_name: &str) -> bool {
    file_name.starts_with("~$")
}

pub fn is_xlsx_file_name(file_name: &str) -> bool {
    file_name.ends_with(".xlsx")
}
