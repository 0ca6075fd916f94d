use std::collections::HashSet;
use std::path::Path;
use umya_spreadsheet::{Spreadsheet, Table, TableColumn, TableStyleInfo, Worksheet, reader, writer};

use crate::error::{MergeError, Result};
use crate::table::{CellValue, DataTable};

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Where and how the merged table is written inside the workbook
#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub sheet_name: String,
    pub table_name: String,
    pub table_style: String,
}

/// Open `template`, replace the target sheet with `table` and save the result to `destination`.
///
/// The template file itself is only read.
pub fn publish(
    table: &DataTable,
    template: &Path,
    destination: &Path,
    options: &PublishOptions,
) -> Result<()> {
    let mut book = open_workbook(template)?;
    render_table(&mut book, table, options).map_err(|e| MergeError::publish(destination, e))?;
    save_workbook(&book, destination)
}

pub fn open_workbook(path: &Path) -> Result<Spreadsheet> {
    reader::xlsx::read(path).map_err(|e| MergeError::publish(path, format!("cannot open: {e}")))
}

pub fn save_workbook(book: &Spreadsheet, path: &Path) -> Result<()> {
    writer::xlsx::write(book, path).map_err(|e| MergeError::publish(path, format!("cannot save: {e}")))
}

/// Replace the target sheet of `book` with the header and rows of `table`,
/// registered as a styled worksheet table.
///
/// Works purely on the in-memory workbook.
pub fn render_table(
    book: &mut Spreadsheet,
    table: &DataTable,
    options: &PublishOptions,
) -> Result<(), String> {
    if book.get_sheet_by_name(&options.sheet_name).is_some() {
        book.remove_sheet_by_name(&options.sheet_name)
            .map_err(|e| format!("cannot remove sheet '{}': {e}", options.sheet_name))?;
    }

    // A workbook may hold only one table per name
    for sheet in book.get_sheet_collection_mut().iter_mut() {
        let before = sheet.get_tables().len();
        sheet
            .get_tables_mut()
            .retain(|t| t.get_name() != options.table_name.as_str());
        if sheet.get_tables().len() != before {
            println!(
                "⚠️ Dropped stale table '{}' definition from sheet '{}' (cells kept)",
                options.table_name,
                sheet.get_name()
            );
        }
    }

    let worksheet = book
        .new_sheet(&options.sheet_name)
        .map_err(|e| format!("cannot create sheet '{}': {e}", options.sheet_name))?;

    let headers = table_headers(&table.columns);
    write_rows(worksheet, &headers, table);
    worksheet.add_table(build_table(&headers, table, options)?);
    Ok(())
}

/// Header labels as written to the sheet.
///
/// Column names inside one worksheet table must be unique (case-insensitive),
/// so a repeated label gets the smallest free numeric suffix, `Code`,
/// `Code2`, `Code3`, the way Excel renames them.
pub(crate) fn table_headers(columns: &[String]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    columns
        .iter()
        .map(|label| {
            let mut candidate = label.clone();
            let mut suffix = 2;
            while taken.contains(&candidate.to_lowercase()) {
                candidate = format!("{label}{suffix}");
                suffix += 1;
            }
            taken.insert(candidate.to_lowercase());
            candidate
        })
        .collect()
}

fn write_rows(worksheet: &mut Worksheet, headers: &[String], table: &DataTable) {
    for (col_idx, header) in headers.iter().enumerate() {
        worksheet
            .get_cell_mut((col_idx as u32 + 1, 1u32))
            .set_value_string(header);
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_idx as u32 + 2;
        for (col_idx, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let cell = worksheet.get_cell_mut((col_idx as u32 + 1, row_num));
            match value {
                CellValue::Empty => {}
                CellValue::Text(s) | CellValue::Error(s) => {
                    cell.set_value_string(s);
                }
                CellValue::Number(n) => {
                    cell.set_value_number(*n);
                }
                CellValue::Bool(b) => {
                    cell.set_value_bool(*b);
                }
                CellValue::DateTime(serial) => {
                    cell.set_value_number(*serial);
                    cell.get_style_mut()
                        .get_number_format_mut()
                        .set_format_code(DATETIME_FORMAT);
                }
            }
        }
    }
}

fn build_table(
    headers: &[String],
    table: &DataTable,
    options: &PublishOptions,
) -> Result<Table, String> {
    if headers.is_empty() {
        return Err("merged table has no columns".to_string());
    }

    let last_col = headers.len() as u32;
    // The table range needs at least one row under the header
    let last_row = table.rows.len().max(1) as u32 + 1;

    let mut worksheet_table = Table::new(&options.table_name, ((1u32, 1u32), (last_col, last_row)));
    for header in headers {
        worksheet_table.add_column(TableColumn::new(header));
    }
    worksheet_table.set_style_info(Some(TableStyleInfo::new(
        &options.table_style,
        false,
        false,
        true,
        false,
    )));
    Ok(worksheet_table)
}
