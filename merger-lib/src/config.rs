use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MergeError, Result};
use crate::publisher::PublishOptions;
use crate::utils::resolve_against;

pub const DEFAULT_TABLE_NAME: &str = "DataTable";
pub const DEFAULT_SHEET_NAME: &str = "LastVersion";
pub const DEFAULT_SERIAL_COLUMN: &str = "Serial_Number";
pub const DEFAULT_TABLE_STYLE: &str = "TableStyleMedium9";
pub const DEFAULT_IMPORT_DIR: &str = "ImportNewData";
pub const DEFAULT_BACKUP_DIR: &str = "DataBackup";
pub const ERRORS_LOG_FILE: &str = "errors.log";

/// Settings of one merge run.
///
/// `import_dir`, `backup_dir` and `error_log` are resolved against `base_dir`
/// unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub base_dir: PathBuf,
    pub import_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub error_log: PathBuf,
    pub table_name: String,
    pub sheet_name: String,
    pub serial_column: String,
    pub table_style: String,
    /// How many accepted serials to print per incoming file
    pub preview_rows: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            base_dir: PathBuf::from("."),
            import_dir: PathBuf::from(DEFAULT_IMPORT_DIR),
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
            error_log: PathBuf::from(ERRORS_LOG_FILE),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            serial_column: DEFAULT_SERIAL_COLUMN.to_string(),
            table_style: DEFAULT_TABLE_STYLE.to_string(),
            preview_rows: 5,
        }
    }
}

impl MergeConfig {
    /// Read a JSON config file; keys left out keep their default value
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| MergeError::io(format!("Cannot read config {}", path.display()), e))?;
        Self::from_json(&content).map_err(|message| MergeError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// Directory scanned for incoming workbooks
    pub fn import_path(&self) -> PathBuf {
        resolve_against(&self.base_dir, &self.import_dir)
    }

    pub fn backup_path(&self) -> PathBuf {
        resolve_against(&self.base_dir, &self.backup_dir)
    }

    pub fn error_log_path(&self) -> PathBuf {
        resolve_against(&self.base_dir, &self.error_log)
    }

    pub fn publish_options(&self) -> PublishOptions {
        PublishOptions {
            sheet_name: self.sheet_name.clone(),
            table_name: self.table_name.clone(),
            table_style: self.table_style.clone(),
        }
    }
}
