//! Common helpers for the merger-lib integration tests

use merger_lib::MergeConfig;
use merger_lib::test_utils::{make_table, serial_rows, write_table_workbook};
use merger_lib::{CellValue, DataTable};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Re-export shared test utilities from src/test_utils.rs
#[allow(unused_imports)]
pub use merger_lib::test_utils::numbers;

pub const HEADERS: [&str; 2] = ["Serial Number", "Item Name"];

/// A scratch working directory laid out like a real one: master workbook at
/// the top, incoming files under ImportNewData/
#[allow(dead_code)]
pub struct Workspace {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("ImportNewData")).unwrap();
        Workspace { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> MergeConfig {
        MergeConfig {
            base_dir: self.path().to_path_buf(),
            ..MergeConfig::default()
        }
    }

    pub fn master_path(&self) -> PathBuf {
        self.path().join("Master.xlsx")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.path().join("DataBackup")
    }

    /// Master with a "DataTable" on a sheet called "Data"
    pub fn write_master(&self, serials: &[CellValue]) -> PathBuf {
        let path = self.master_path();
        write_table_workbook(&path, "Data", "DataTable", &serial_table(serials));
        path
    }

    pub fn write_incoming(&self, name: &str, serials: &[CellValue]) -> PathBuf {
        let path = self.path().join("ImportNewData").join(name);
        write_table_workbook(&path, "Export", "DataTable", &serial_table(serials));
        path
    }

    pub fn backups(&self) -> Vec<PathBuf> {
        let mut backups: Vec<PathBuf> = match fs::read_dir(self.backup_dir()) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        };
        backups.sort();
        backups
    }
}

/// Two-column table keyed by serial, with raw (un-normalized) headers
#[allow(dead_code)]
pub fn serial_table(serials: &[CellValue]) -> DataTable {
    make_table(&HEADERS, serial_rows(serials))
}

/// Serial column of a loaded table, as plain numbers where possible
#[allow(dead_code)]
pub fn serials_of(table: &DataTable) -> Vec<CellValue> {
    table.column("Serial_Number").unwrap().cloned().collect()
}
