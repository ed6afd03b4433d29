//! Row mapping traits and utilities

use crate::error::{JoblyError, JoblyResult};
use tokio_postgres::Row;

/// Trait for converting a database row into a Rust struct.
///
/// # Example
///
/// ```ignore
/// use jobly::{FromRow, RowExt};
///
/// impl FromRow for Job {
///     fn from_row(row: &Row) -> JoblyResult<Self> {
///         Ok(Self {
///             id: row.try_get_column("id")?,
///             title: row.try_get_column("title")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> JoblyResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning JoblyError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> JoblyResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> JoblyResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| JoblyError::decode(column, e.to_string()))
    }
}
