use crate::utils::normalize_header;

/// A single cell value as read from (or written to) a worksheet table
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excel serial date (days since 1899-12-30, fraction = time of day)
    DateTime(f64),
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) | CellValue::Error(s) => write!(f, "{s}"),
            CellValue::Number(n) | CellValue::DateTime(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// Row-oriented table: labelled columns and rows of equal width
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    /// Build a table, padding or truncating each row to the column count
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        DataTable { columns, rows }
    }

    pub fn empty_like(&self) -> Self {
        DataTable {
            columns: self.columns.clone(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate over the values of one column, `None` if the column is absent
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a CellValue> + use<'a>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }

    /// Apply `normalize_header` to every column label
    pub fn normalize_headers(&mut self) {
        for column in self.columns.iter_mut() {
            *column = normalize_header(column);
        }
    }

    /// Append tables one after another, aligning cells by column label.
    ///
    /// Columns of the first table come first, followed by labels first seen in
    /// later tables. Cells a table does not have are left `Empty`. A label
    /// that repeats inside one table keeps one merged column per occurrence,
    /// matched in order of appearance.
    pub fn concat<I>(tables: I) -> DataTable
    where
        I: IntoIterator<Item = DataTable>,
    {
        let mut merged = DataTable::default();

        for table in tables {
            let mut claimed = vec![false; merged.columns.len()];
            let mut mapping = Vec::with_capacity(table.columns.len());
            for label in &table.columns {
                let free = merged
                    .columns
                    .iter()
                    .zip(claimed.iter())
                    .position(|(c, &taken)| !taken && c == label);
                let index = match free {
                    Some(index) => index,
                    None => {
                        merged.columns.push(label.clone());
                        claimed.push(false);
                        merged.columns.len() - 1
                    }
                };
                claimed[index] = true;
                mapping.push(index);
            }

            let width = merged.columns.len();
            for existing in merged.rows.iter_mut() {
                existing.resize(width, CellValue::Empty);
            }

            for row in table.rows {
                let mut aligned = vec![CellValue::Empty; width];
                for (value, &target) in row.into_iter().zip(mapping.iter()) {
                    aligned[target] = value;
                }
                merged.rows.push(aligned);
            }
        }

        merged
    }
}
