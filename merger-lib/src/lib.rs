#![allow(clippy::needless_return)]

pub mod backup;
pub mod config;
pub mod discovery;
mod error;
pub mod pipeline;
pub mod publisher;
pub mod reader;
pub mod table;
pub mod utils;
pub mod watermark;

// Test utilities - only compiled when testing or with test feature
// #[cfg(test)] alone doesn't work for integration tests (they're external crates)
// The feature flag makes it available to integration tests via dev-dependencies
#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use config::{ERRORS_LOG_FILE, MergeConfig};
pub use discovery::MasterLookup;
pub use error::{MergeError, Result};
pub use pipeline::{MergeReport, preview, run};
pub use table::{CellValue, DataTable};
