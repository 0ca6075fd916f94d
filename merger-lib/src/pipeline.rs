use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::backup::{backup_master, backup_timestamp};
use crate::config::MergeConfig;
use crate::discovery::{list_incoming_files, locate_master};
use crate::error::{MergeError, Result};
use crate::publisher::publish;
use crate::reader::load_normalized_table;
use crate::table::DataTable;
use crate::utils::{format_serial, write_error_to_log};
use crate::watermark::{coerce_serial, coerce_serial_column, filter_above, watermark};

/// The master's table as it was before this run
#[derive(Debug, Clone)]
pub struct Baseline {
    pub table: DataTable,
    pub watermark: Option<f64>,
}

/// Rows accepted from one incoming workbook
#[derive(Debug, Clone)]
pub struct IncomingBatch {
    pub file_name: String,
    pub rows: DataTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct IncomingScan {
    pub batches: Vec<IncomingBatch>,
    pub failures: Vec<FileFailure>,
}

impl IncomingScan {
    pub fn accepted_rows(&self) -> usize {
        self.batches.iter().map(|b| b.rows.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptedFile {
    pub file_name: String,
    pub rows: usize,
}

/// What a run did (or, for a dry run, would do)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeReport {
    pub master: PathBuf,
    pub backup: Option<PathBuf>,
    pub baseline_rows: usize,
    pub watermark: Option<f64>,
    pub accepted: Vec<AcceptedFile>,
    pub failures: Vec<FileFailure>,
    pub merged_rows: usize,
    pub published: bool,
}

impl MergeReport {
    pub fn accepted_rows(&self) -> usize {
        self.accepted.iter().map(|a| a.rows).sum()
    }
}

/// Load the baseline table, coerce its serial column and compute the watermark.
///
/// A baseline without the serial column is fatal.
pub fn load_baseline(path: &Path, config: &MergeConfig) -> Result<Baseline> {
    let mut table = load_normalized_table(path, &config.table_name)?;
    if !coerce_serial_column(&mut table, &config.serial_column) {
        return Err(missing_serial(path, config));
    }
    let watermark = watermark(&table, &config.serial_column);
    Ok(Baseline { table, watermark })
}

/// Load one incoming workbook and keep the rows above `watermark`
pub fn load_incoming(
    path: &Path,
    watermark: Option<f64>,
    config: &MergeConfig,
) -> Result<DataTable> {
    let mut table = load_normalized_table(path, &config.table_name)?;
    if !coerce_serial_column(&mut table, &config.serial_column) {
        return Err(missing_serial(path, config));
    }
    Ok(filter_above(&table, &config.serial_column, watermark))
}

/// Load every incoming file in order.
///
/// A file that fails to load is reported, written to the error log and
/// skipped; it never stops the scan. Files without new rows add no batch.
pub fn scan_incoming(
    files: &[PathBuf],
    watermark: Option<f64>,
    config: &MergeConfig,
) -> IncomingScan {
    let mut scan = IncomingScan::default();

    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match load_incoming(path, watermark, config) {
            Ok(rows) if rows.is_empty() => {}
            Ok(rows) => {
                println!(
                    "🆕 Adding {} new row(s) from {}: {}",
                    rows.len(),
                    file_name,
                    serial_preview(&rows, config)
                );
                scan.batches.push(IncomingBatch { file_name, rows });
            }
            Err(e) => {
                println!("⚠️ Failed to load {file_name}: {e}");
                write_error_to_log(
                    &config.error_log_path(),
                    "Incoming File Load Error",
                    &format!("{}: {}", path.display(), e),
                );
                scan.failures.push(FileFailure {
                    file_name,
                    error: e.to_string(),
                });
            }
        }
    }

    scan
}

/// Baseline rows first, then each batch in scan order
pub fn merge(baseline: DataTable, batches: Vec<IncomingBatch>) -> DataTable {
    DataTable::concat(std::iter::once(baseline).chain(batches.into_iter().map(|b| b.rows)))
}

/// Full run: locate, back up, load, scan, merge and publish.
///
/// The master is moved into the backup directory before anything is read, so
/// after a failure past that point the master path stays empty until the
/// backup is restored by hand. Every fatal error is written to the error log
/// once, here.
pub fn run(config: &MergeConfig) -> Result<MergeReport> {
    let (master, incoming) = prepare(config).inspect_err(|e| log_fatal(config, e))?;

    let backup = backup_master(&master, &config.backup_path(), &backup_timestamp())
        .inspect_err(|e| log_fatal(config, e))?;
    println!("📦 Backup created: {}", backup.display());

    merge_into(&master, &backup, &incoming, config).inspect_err(|e| {
        println!(
            "❌ {} was not rewritten; restore it from {}",
            master.display(),
            backup.display()
        );
        write_error_to_log(
            &config.error_log_path(),
            "Merge Aborted",
            &format!(
                "{e}\nMaster {} is missing; the last good copy is {}",
                master.display(),
                backup.display()
            ),
        );
    })
}

/// Same stages as [`run`] without touching any file: the master is read in
/// place and nothing is backed up or written.
pub fn preview(config: &MergeConfig) -> Result<MergeReport> {
    let (master, incoming) = prepare(config).inspect_err(|e| log_fatal(config, e))?;

    let (report, _merged) = load_and_merge(&master, &master, &incoming, config)
        .inspect_err(|e| log_fatal(config, e))?;
    Ok(report)
}

/// Checks that need no mutation: the master and the import directory
fn prepare(config: &MergeConfig) -> Result<(PathBuf, Vec<PathBuf>)> {
    let master = locate_master(&config.base_dir)?.into_path(&config.base_dir)?;
    let incoming = list_incoming_files(&config.import_path())?;
    Ok((master, incoming))
}

fn log_fatal(config: &MergeConfig, error: &MergeError) {
    write_error_to_log(&config.error_log_path(), "Fatal Merge Error", &error.to_string());
}

fn merge_into(
    master: &Path,
    backup: &Path,
    incoming: &[PathBuf],
    config: &MergeConfig,
) -> Result<MergeReport> {
    let (mut report, merged) = load_and_merge(master, backup, incoming, config)?;
    report.backup = Some(backup.to_path_buf());

    publish(&merged, backup, master, &config.publish_options())?;
    report.published = true;
    println!(
        "✅ Done. {} new row(s) added, sheet '{}' holds table '{}' in {}",
        report.accepted_rows(),
        config.sheet_name,
        config.table_name,
        master.display()
    );
    Ok(report)
}

/// Load the baseline from `source`, scan the incoming files and merge them
fn load_and_merge(
    master: &Path,
    source: &Path,
    incoming: &[PathBuf],
    config: &MergeConfig,
) -> Result<(MergeReport, DataTable)> {
    let baseline = load_baseline(source, config)?;
    match baseline.watermark {
        Some(w) => println!("🔢 Highest {}: {}", config.serial_column, format_serial(w)),
        None => println!(
            "⚠️ No numeric {} in the baseline, incoming rows cannot pass the filter",
            config.serial_column
        ),
    }

    let scan = scan_incoming(incoming, baseline.watermark, config);
    let accepted = scan
        .batches
        .iter()
        .map(|b| AcceptedFile {
            file_name: b.file_name.clone(),
            rows: b.rows.len(),
        })
        .collect();
    let baseline_rows = baseline.table.len();
    let watermark = baseline.watermark;

    let merged = merge(baseline.table, scan.batches);
    let report = MergeReport {
        master: master.to_path_buf(),
        backup: None,
        baseline_rows,
        watermark,
        accepted,
        failures: scan.failures,
        merged_rows: merged.len(),
        published: false,
    };
    Ok((report, merged))
}

fn serial_preview(rows: &DataTable, config: &MergeConfig) -> String {
    let Some(serials) = rows.column(&config.serial_column) else {
        return String::new();
    };
    let shown: Vec<String> = serials
        .take(config.preview_rows)
        .filter_map(coerce_serial)
        .map(format_serial)
        .collect();
    let more = if rows.len() > shown.len() { ", ..." } else { "" };
    format!("{}{}", shown.join(", "), more)
}

fn missing_serial(path: &Path, config: &MergeConfig) -> MergeError {
    MergeError::MissingColumn {
        column: config.serial_column.clone(),
        table: config.table_name.clone(),
        path: path.to_path_buf(),
    }
}
