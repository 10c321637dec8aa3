//! Ordered, column-named record table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::Value;
use crate::errors::TableError;

/// An ordered sequence of records sharing one column set.
///
/// Row order is insertion order. Every operation that drops rows keeps the
/// survivors in their original order, and every transforming operation
/// returns a new table instead of touching `self`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table from columns and rows, checking every row's width.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Build a table from heterogeneous records.
    ///
    /// Columns appear in first-seen order; a record that lacks a column gets
    /// `Missing` in that cell. If a record repeats a key, the first wins.
    pub fn from_records<R, K>(records: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        let mut sparse: Vec<Vec<(usize, Value)>> = Vec::new();

        for record in records {
            let mut cells = Vec::new();
            for (key, value) in record {
                let key = key.into();
                let idx = match index.get(&key) {
                    Some(&idx) => idx,
                    None => {
                        let idx = columns.len();
                        index.insert(key.clone(), idx);
                        columns.push(key);
                        idx
                    }
                };
                if !cells.iter().any(|(i, _)| *i == idx) {
                    cells.push((idx, value));
                }
            }
            sparse.push(cells);
        }

        let width = columns.len();
        let rows = sparse
            .into_iter()
            .map(|cells| {
                let mut row = vec![Value::Missing; width];
                for (idx, value) in cells {
                    row[idx] = value;
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Append a row. Its width must match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::ColumnCountMismatch {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Borrow every cell of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Coerce one column to floats; failed coercions become `None`.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx].as_f64()).collect())
    }

    /// New table holding only the rows whose mask entry is `true`.
    ///
    /// A mask shorter than the table drops the unmatched tail.
    pub fn retain_rows(&self, mask: &[bool]) -> Table {
        let rows = self
            .rows
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(row, _)| row.clone())
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// New table with `name` set to `values`, replacing an existing column
    /// in place or appending a new one at the end.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<Table, TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::RowCountMismatch {
                column: name.to_string(),
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        let mut out = self.clone();
        match out.column_index(name) {
            Some(idx) => {
                for (row, value) in out.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                out.columns.push(name.to_string());
                for (row, value) in out.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(out)
    }

    /// Rename the column at `index`. Values are untouched.
    pub fn rename_column(&mut self, index: usize, name: impl Into<String>) {
        if let Some(slot) = self.columns.get_mut(index) {
            *slot = name.into();
        }
    }

    /// Overwrite one cell. Out-of-range coordinates are ignored.
    pub(crate) fn set_cell(&mut self, row: usize, column: usize, value: Value) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = value;
        }
    }

    /// New table with the cells of `column` at the given rows replaced.
    pub fn with_cells_replaced(&self, column: &str, rows: &[usize], value: Value) -> Table {
        let mut out = self.clone();
        if let Some(idx) = out.column_index(column) {
            for &row in rows {
                out.set_cell(row, idx, value.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            ["claim_id", "age"],
            vec![
                vec![Value::from(1_i64), Value::from(30_i64)],
                vec![Value::from(2_i64), Value::from("n/a")],
                vec![Value::from(3_i64), Value::Missing],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let err = Table::from_rows(["a", "b"], vec![vec![Value::Missing]]).unwrap_err();
        assert!(matches!(err, TableError::ColumnCountMismatch { expected: 2, found: 1, .. }));
    }

    #[test]
    fn test_numeric_column_coerces() {
        let ages = sample().numeric_column("age").unwrap();
        assert_eq!(ages, vec![Some(30.0), None, None]);
        assert!(sample().numeric_column("salary").is_none());
    }

    #[test]
    fn test_retain_rows_keeps_order() {
        let kept = sample().retain_rows(&[true, false, true]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.cell(0, "claim_id"), Some(&Value::Number(1.0)));
        assert_eq!(kept.cell(1, "claim_id"), Some(&Value::Number(3.0)));
    }

    #[test]
    fn test_with_column_appends_and_replaces() {
        let t = sample();
        let added = t.with_column("flag", vec![true.into(), false.into(), true.into()]).unwrap();
        assert_eq!(added.columns().last().map(String::as_str), Some("flag"));
        let replaced = added.with_column("age", vec![Value::Missing; 3]).unwrap();
        assert_eq!(replaced.columns().len(), 3);
        assert!(replaced.cell(0, "age").unwrap().is_missing());
        // original untouched
        assert_eq!(t.cell(0, "age"), Some(&Value::Number(30.0)));
    }

    #[test]
    fn test_from_records_fills_missing() {
        let t = Table::from_records(vec![
            vec![("age", Value::from(40_i64))],
            vec![("state", Value::from("NY")), ("age", Value::from(50_i64))],
        ]);
        assert_eq!(t.columns(), &["age".to_string(), "state".to_string()]);
        assert!(t.cell(0, "state").unwrap().is_missing());
        assert_eq!(t.cell(1, "age"), Some(&Value::Number(50.0)));
    }
}
