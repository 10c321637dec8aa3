//! Record table construction errors.

use super::error_code::{self, RiskErrorCode};

/// Errors raised while assembling a record table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Row {row} has {found} cells, table has {expected} columns")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Column {column} has {found} values, table has {expected} rows")]
    RowCountMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
}

impl RiskErrorCode for TableError {
    fn error_code(&self) -> &'static str {
        error_code::TABLE_ERROR
    }
}
