use calamine::{Data, Xlsx, open_workbook};
use std::path::Path;

use crate::error::{MergeError, Result};
use crate::table::{CellValue, DataTable};

/// Load the worksheet table called `table_name` from the workbook at `path`.
///
/// Values are read as cached by the spreadsheet application, so formula cells
/// yield their last computed result. Every row inside the table's range is
/// returned, blank rows included; the header row becomes the column labels.
pub fn load_table(path: &Path, table_name: &str) -> Result<DataTable> {
    let workbook_error = |source: calamine::XlsxError| MergeError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(workbook_error)?;
    workbook.load_tables().map_err(workbook_error)?;

    let has_table = workbook
        .table_names()
        .into_iter()
        .any(|name| name == table_name);
    if !has_table {
        return Err(MergeError::TableNotFound {
            table: table_name.to_string(),
            path: path.to_path_buf(),
        });
    }

    let table = workbook
        .table_by_name(table_name)
        .map_err(workbook_error)?;

    let columns: Vec<String> = table.columns().to_vec();
    let rows = table
        .data()
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Ok(DataTable::new(columns, rows))
}

/// Same as [`load_table`] with every header passed through `normalize_header`
pub fn load_normalized_table(path: &Path, table_name: &str) -> Result<DataTable> {
    let mut table = load_table(path, table_name)?;
    table.normalize_headers();
    Ok(table)
}

pub(crate) fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}
