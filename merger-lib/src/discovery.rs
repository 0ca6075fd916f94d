use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MergeError, Result};
use crate::utils::{is_lock_file, is_xlsx_file_name};

/// Outcome of looking for the master workbook in a directory
#[derive(Debug, Clone, PartialEq)]
pub enum MasterLookup {
    Found(PathBuf),
    NotFound,
    Ambiguous(Vec<PathBuf>),
}

impl MasterLookup {
    pub fn into_path(self, dir: &Path) -> Result<PathBuf> {
        match self {
            MasterLookup::Found(path) => Ok(path),
            MasterLookup::NotFound => Err(MergeError::MasterNotFound {
                dir: dir.to_path_buf(),
            }),
            MasterLookup::Ambiguous(paths) => Err(MergeError::AmbiguousMaster {
                dir: dir.to_path_buf(),
                candidates: paths
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .collect(),
            }),
        }
    }
}

/// Look for the single `.xlsx` workbook in `dir`, ignoring Excel lock files
pub fn locate_master(dir: &Path) -> Result<MasterLookup> {
    let mut candidates = list_workbooks(dir)?;
    Ok(match candidates.len() {
        0 => MasterLookup::NotFound,
        1 => MasterLookup::Found(candidates.remove(0)),
        _ => MasterLookup::Ambiguous(candidates),
    })
}

/// Workbooks waiting in the import directory, sorted by file name
pub fn list_incoming_files(import_dir: &Path) -> Result<Vec<PathBuf>> {
    if !import_dir.is_dir() {
        return Err(MergeError::ImportDirMissing(import_dir.to_path_buf()));
    }
    list_workbooks(import_dir)
}

fn list_workbooks(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| MergeError::io(format!("Cannot list directory {}", dir.display()), e))?;

    let mut workbooks = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| MergeError::io(format!("Cannot list directory {}", dir.display()), e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if is_xlsx_file_name(file_name) && !is_lock_file(file_name) {
            workbooks.push(path);
        }
    }

    workbooks.sort();
    Ok(workbooks)
}
