//! Assignment (`SET`) clauses for partial updates.

use super::ClauseFragment;
use crate::error::{JoblyError, JoblyResult};
use crate::fields::FieldValues;
use crate::ident::Ident;
use crate::translate::ColumnTable;
use std::fmt::Write;

/// Build `"<column>"=$1, "<column>"=$2, ...` from `fields`.
///
/// Columns come from `table`, falling back to the field name when the table has no
/// entry. Fails with [`JoblyError::EmptyInput`] when `fields` is empty: a bare `SET`
/// is invalid SQL.
pub fn build(fields: &FieldValues, table: &ColumnTable) -> JoblyResult<ClauseFragment> {
    if fields.is_empty() {
        return Err(JoblyError::EmptyInput);
    }

    let mut clause = String::new();
    let mut values = Vec::with_capacity(fields.len());

    for (idx, (field, value)) in fields.iter().enumerate() {
        if idx > 0 {
            clause.push_str(", ");
        }
        Ident::quoted(table.column(field))?.write_sql(&mut clause);
        let _ = write!(&mut clause, "=${}", idx + 1);
        values.push(value.clone());
    }

    Ok(ClauseFragment::new(clause, values))
}
