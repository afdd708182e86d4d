use super::OrderError;
use rusqlite::{ffi, ErrorCode};

/// Names the table and columns an ordered set lives in.
///
/// Identifiers are `'static` so they can be spliced into SQL text; values
/// always travel as bound parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedTable {
    pub table: &'static str,
    pub id_column: &'static str,
    pub order_column: &'static str,
}

impl OrderedTable {
    #[must_use]
    pub const fn new(
        table: &'static str,
        id_column: &'static str,
        order_column: &'static str,
    ) -> Self {
        Self {
            table,
            id_column,
            order_column,
        }
    }

    /// `table.column` as SQLite reports it in constraint failures.
    #[must_use]
    pub fn qualified_order_column(&self) -> String {
        format!("{}.{}", self.table, self.order_column)
    }

    /// Map a store error, recognising duplicate positions on this table's
    /// order column. Other unique violations (and everything else) pass
    /// through unchanged.
    #[must_use]
    pub fn classify(&self, err: rusqlite::Error) -> OrderError {
        match err {
            rusqlite::Error::SqliteFailure(failure, Some(message))
                if failure.code == ErrorCode::ConstraintViolation
                    && failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                    && message.contains(&self.qualified_order_column()) =>
            {
                OrderError::ConstraintViolation(message)
            }
            other => OrderError::Sqlite(other),
        }
    }
}
