// Test utilities available to both unit and integration tests
// Only compiled when testing

use std::path::Path;

use crate::publisher::{PublishOptions, render_table, save_workbook};
use crate::table::{CellValue, DataTable};

/// Build a table from string headers and rows
#[allow(dead_code)]
pub fn make_table(headers: &[&str], rows: Vec<Vec<CellValue>>) -> DataTable {
    DataTable::new(headers.iter().map(|h| h.to_string()).collect(), rows)
}

/// Rows holding only a serial and a label derived from it
#[allow(dead_code)]
pub fn serial_rows(serials: &[CellValue]) -> Vec<Vec<CellValue>> {
    serials
        .iter()
        .map(|s| vec![s.clone(), CellValue::Text(format!("item {s}"))])
        .collect()
}

#[allow(dead_code)]
pub fn numbers(values: &[f64]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::Number(*v)).collect()
}

/// Write a workbook holding `table` as a worksheet table on `sheet_name`.
///
/// The default `Sheet1` is kept, so the table never sits on the first sheet
/// unless `sheet_name` is `Sheet1`.
#[allow(dead_code)]
pub fn write_table_workbook(path: &Path, sheet_name: &str, table_name: &str, table: &DataTable) {
    let mut book = umya_spreadsheet::new_file();
    let options = PublishOptions {
        sheet_name: sheet_name.to_string(),
        table_name: table_name.to_string(),
        table_style: "TableStyleLight1".to_string(),
    };
    render_table(&mut book, table, &options).unwrap();
    save_workbook(&book, path).unwrap();
}

/// Write a workbook with plain cells and no worksheet table at all
#[allow(dead_code)]
pub fn write_plain_workbook(path: &Path, table: &DataTable) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
    for (col, header) in table.columns.iter().enumerate() {
        sheet
            .get_cell_mut((col as u32 + 1, 1u32))
            .set_value_string(header);
    }
    save_workbook(&book, path).unwrap();
}
