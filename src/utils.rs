use std::path::{Path, PathBuf};

use merger_lib::utils::format_serial;
use merger_lib::{MergeConfig, MergeReport};

use crate::cli::Args;

/// Defaults, then the optional config file, then command line options
pub fn build_config(arguments: &Args) -> Result<MergeConfig, anyhow::Error> {
    let mut config = match &arguments.config {
        Some(path) => MergeConfig::from_file(Path::new(path))?,
        None => MergeConfig::default(),
    };

    if let Some(base_dir) = &arguments.base_dir {
        config.base_dir = PathBuf::from(base_dir);
    }
    if let Some(import_dir) = &arguments.import_dir {
        config.import_dir = PathBuf::from(import_dir);
    }
    if let Some(backup_dir) = &arguments.backup_dir {
        config.backup_dir = PathBuf::from(backup_dir);
    }
    if let Some(table_name) = &arguments.table_name {
        config.table_name = table_name.clone();
    }
    if let Some(sheet_name) = &arguments.sheet_name {
        config.sheet_name = sheet_name.clone();
    }
    if let Some(serial_column) = &arguments.serial_column {
        config.serial_column = serial_column.clone();
    }
    if let Some(table_style) = &arguments.table_style {
        config.table_style = table_style.clone();
    }

    if config.table_name.trim().is_empty() || config.sheet_name.trim().is_empty() {
        return Err(anyhow::anyhow!(
            "Table name and sheet name must not be empty"
        ));
    }

    Ok(config)
}

pub fn format_summary(report: &MergeReport) -> String {
    let mut summary = String::new();

    let mode = if report.published { "Merge" } else { "Dry run" };
    summary.push_str(&format!("{} summary for {}\n", mode, report.master.display()));
    if let Some(backup) = &report.backup {
        summary.push_str(&format!("  Backup: {}\n", backup.display()));
    }
    summary.push_str(&format!(
        "  Baseline rows: {} (highest serial: {})\n",
        report.baseline_rows,
        report
            .watermark
            .map(format_serial)
            .unwrap_or_else(|| "none".to_string())
    ));
    for accepted in &report.accepted {
        summary.push_str(&format!(
            "  + {} row(s) from {}\n",
            accepted.rows, accepted.file_name
        ));
    }
    for failure in &report.failures {
        summary.push_str(&format!(
            "  ! skipped {}: {}\n",
            failure.file_name, failure.error
        ));
    }
    summary.push_str(&format!("  Merged rows: {}", report.merged_rows));

    summary
}

pub fn print_summary(report: &MergeReport) {
    println!("{}", format_summary(report));
}
