use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("No .xlsx master workbook found in {dir}")]
    MasterNotFound { dir: PathBuf },

    #[error("Expected exactly one .xlsx master workbook in {dir}, found {count}: {candidates:?}", count = .candidates.len())]
    AmbiguousMaster {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error("Import directory does not exist: {0}")]
    ImportDirMissing(PathBuf),

    #[error("Table '{table}' was not found in workbook: {path}")]
    TableNotFound { table: String, path: PathBuf },

    #[error("Column '{column}' is missing from table '{table}' in {path}")]
    MissingColumn {
        column: String,
        table: String,
        path: PathBuf,
    },

    #[error("Failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("Failed to publish workbook {path}: {message}")]
    Publish { path: PathBuf, message: String },

    #[error("Invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl MergeError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        MergeError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn publish(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        MergeError::Publish {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T, E = MergeError> = std::result::Result<T, E>;
