use serde::Serialize;
use serde_json::Value;
use crate::utils::JsonMap;
use crate::utils::table::errors::ColumnCountMismatch;

/// A two-dimensional table of JSON values with labeled columns.
///
/// # Example
/// ```
/// use batchprompt::utils::table::Table;
/// use serde_json::json;
/// let table = Table::new(vec!["id".to_string(), "name".to_string()],
///                        vec![vec![json!(0), json!("alice")]]).unwrap();
/// assert_eq!(table.shape(), (1, 2));
/// assert_eq!(table.to_records()[0]["name"], "alice");
///
/// let ragged = Table::new(vec!["id".to_string()], vec![vec![json!(0), json!(1)]]);
/// assert!(ragged.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[readonly::make]
pub struct Table {
    /// Column names, readonly
    #[readonly]
    pub columns: Vec<String>,

    /// Rows, each with exactly one cell per column, readonly
    #[readonly]
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table. Returns an error if a row does not have exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, ColumnCountMismatch> {
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, cells)| cells.len() != columns.len()) {
            return Err(ColumnCountMismatch {
                expected: columns.len(),
                found: cells.len(),
                row,
            });
        }
        Ok(Self::from_parts_unchecked(columns, rows))
    }

    /// Caller must ensure every row has `columns.len()` cells.
    pub(crate) fn from_parts_unchecked(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
        }
    }

    /// (number of rows, number of columns)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Cells of the column named `name`, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// One JSON object per row, keyed by column name.
    pub fn to_records(&self) -> Vec<JsonMap> {
        self.rows.iter()
            .map(|row| self.columns.iter().cloned().zip(row.iter().cloned()).collect())
            .collect()
    }
}

pub mod errors {
    use std::error::Error;
    use std::fmt;
    use std::fmt::Formatter;

    /// Error when a row of a [Table](super::Table) does not have one cell per column.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ColumnCountMismatch {
        pub expected: usize,
        pub found: usize,
        pub row: usize,
    }

    impl fmt::Display for ColumnCountMismatch {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "ColumnCountMismatch: row {} has {} cells, but the table has {} columns",
                   self.row, self.found, self.expected)
        }
    }

    impl Error for ColumnCountMismatch {}
}

#[cfg(test)]
mod test_table {
    use serde_json::json;
    use super::Table;
    use super::errors::ColumnCountMismatch;

    fn columns() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn test_column_count_mismatch() {
        let err = Table::new(columns(), vec![
            vec![json!(1), json!(2)],
            vec![json!(3)],
        ]).expect_err("ragged rows should be rejected");
        assert_eq!(ColumnCountMismatch { expected: 2, found: 1, row: 1 }, err);
    }

    #[test]
    fn test_column_and_records() {
        let table = Table::new(columns(), vec![
            vec![json!(1), json!("x")],
            vec![json!(2), json!("y")],
        ]).unwrap();
        assert_eq!(Some(vec![&json!("x"), &json!("y")]), table.column("b"));
        assert_eq!(None, table.column("c"));
        let records = table.to_records();
        assert_eq!(2, records.len());
        assert_eq!(json!(2), records[1]["a"]);
    }

    #[test]
    fn test_serialize() {
        let table = Table::new(columns(), vec![vec![json!(1), json!("x")]]).unwrap();
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(json!({"columns": ["a", "b"], "rows": [[1, "x"]]}), value);
    }
}
