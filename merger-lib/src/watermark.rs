use crate::table::{CellValue, DataTable};

/// Coerce a cell to a serial number.
///
/// Numbers pass through, text is trimmed and parsed, booleans count as 1/0.
/// Anything else, including unparsable text and non-finite results, has no
/// serial.
pub fn coerce_serial(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
        CellValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        CellValue::Empty | CellValue::DateTime(_) | CellValue::Error(_) => return None,
    };
    value.is_finite().then_some(value)
}

/// Rewrite `column` so every cell is either a `Number` or `Empty`.
///
/// Returns `false` without touching the table when the column does not exist.
pub fn coerce_serial_column(table: &mut DataTable, column: &str) -> bool {
    let Some(index) = table.column_index(column) else {
        return false;
    };

    for row in table.rows.iter_mut() {
        row[index] = match coerce_serial(&row[index]) {
            Some(serial) => CellValue::Number(serial),
            None => CellValue::Empty,
        };
    }
    true
}

/// Highest serial in `column`; `None` when the column is absent or holds no number
pub fn watermark(table: &DataTable, column: &str) -> Option<f64> {
    table
        .column(column)?
        .filter_map(coerce_serial)
        .fold(None, |max: Option<f64>, serial| match max {
            Some(current) if current >= serial => Some(current),
            _ => Some(serial),
        })
}

/// Keep the rows whose serial is strictly above `watermark`, in their original order.
///
/// Rows without a serial never pass, and nothing passes without a watermark.
/// A missing column yields an empty table with the same labels.
pub fn filter_above(table: &DataTable, column: &str, watermark: Option<f64>) -> DataTable {
    let mut filtered = table.empty_like();
    let (Some(index), Some(watermark)) = (table.column_index(column), watermark) else {
        return filtered;
    };

    filtered.rows = table
        .rows
        .iter()
        .filter(|row| coerce_serial(&row[index]).is_some_and(|serial| serial > watermark))
        .cloned()
        .collect();
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIAL: &str = "Serial_Number";

    fn serial_table(serials: Vec<CellValue>) -> DataTable {
        DataTable::new(
            vec![SERIAL.to_string(), "Label".to_string()],
            serials
                .into_iter()
                .enumerate()
                .map(|(i, s)| vec![s, CellValue::Text(format!("row{i}"))])
                .collect(),
        )
    }

    fn numbers(values: &[f64]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::Number(*v)).collect()
    }

    #[test]
    fn test_coerce_serial_text_and_numbers() {
        assert_eq!(coerce_serial(&CellValue::Number(7.0)), Some(7.0));
        assert_eq!(coerce_serial(&CellValue::Text(" 12 ".to_string())), Some(12.0));
        assert_eq!(coerce_serial(&CellValue::Text("1e3".to_string())), Some(1000.0));
        assert_eq!(coerce_serial(&CellValue::Bool(true)), Some(1.0));
    }

    #[test]
    fn test_coerce_serial_rejects_non_numeric() {
        assert_eq!(coerce_serial(&CellValue::Text("N/A".to_string())), None);
        assert_eq!(coerce_serial(&CellValue::Text(String::new())), None);
        assert_eq!(coerce_serial(&CellValue::Text("NaN".to_string())), None);
        assert_eq!(coerce_serial(&CellValue::Empty), None);
        assert_eq!(coerce_serial(&CellValue::DateTime(45537.0)), None);
        assert_eq!(coerce_serial(&CellValue::Error("#N/A".to_string())), None);
    }

    #[test]
    fn test_watermark_is_max_numeric() {
        let table = serial_table(numbers(&[1.0, 2.0, 3.0, 5.0]));
        assert_eq!(watermark(&table, SERIAL), Some(5.0));
    }

    #[test]
    fn test_watermark_ignores_text() {
        let mut serials = numbers(&[1.0, 9.0]);
        serials.push(CellValue::Text("999x".to_string()));
        serials.push(CellValue::Text("10".to_string()));
        let table = serial_table(serials);
        assert_eq!(watermark(&table, SERIAL), Some(10.0));
    }

    #[test]
    fn test_watermark_absent_without_numbers() {
        let table = serial_table(vec![CellValue::Text("N/A".to_string()), CellValue::Empty]);
        assert_eq!(watermark(&table, SERIAL), None);
        assert_eq!(watermark(&serial_table(vec![]), SERIAL), None);
        assert_eq!(watermark(&table, "Other"), None);
    }

    #[test]
    fn test_filter_keeps_only_rows_above_in_order() {
        let incoming = serial_table(numbers(&[4.0, 8.0, 6.0, 5.0]));
        let accepted = filter_above(&incoming, SERIAL, Some(5.0));

        let serials: Vec<_> = accepted.column(SERIAL).unwrap().cloned().collect();
        assert_eq!(serials, numbers(&[8.0, 6.0]));
        assert_eq!(accepted.rows[0][1], CellValue::Text("row1".to_string()));
        assert_eq!(accepted.columns, incoming.columns);
    }

    #[test]
    fn test_filter_all_below_appends_nothing() {
        let incoming = serial_table(numbers(&[1.0, 2.0, 5.0]));
        assert!(filter_above(&incoming, SERIAL, Some(5.0)).is_empty());
    }

    #[test]
    fn test_filter_excludes_non_numeric_serial() {
        let incoming = serial_table(vec![
            CellValue::Text("N/A".to_string()),
            CellValue::Number(100.0),
        ]);
        let accepted = filter_above(&incoming, SERIAL, Some(0.0));
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted.rows[0][0], CellValue::Number(100.0));
    }

    #[test]
    fn test_filter_without_watermark_accepts_nothing() {
        let incoming = serial_table(numbers(&[1.0, 2.0]));
        assert!(filter_above(&incoming, SERIAL, None).is_empty());
    }

    #[test]
    fn test_coerce_column_rewrites_cells() {
        let mut table = serial_table(vec![
            CellValue::Text("3".to_string()),
            CellValue::Text("N/A".to_string()),
            CellValue::Number(4.0),
        ]);
        assert!(coerce_serial_column(&mut table, SERIAL));
        let serials: Vec<_> = table.column(SERIAL).unwrap().cloned().collect();
        assert_eq!(
            serials,
            vec![CellValue::Number(3.0), CellValue::Empty, CellValue::Number(4.0)]
        );
        assert!(!coerce_serial_column(&mut table, "Missing"));
    }
}
