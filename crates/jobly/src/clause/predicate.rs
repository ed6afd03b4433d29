//! Predicate (`WHERE`) clauses for filtered searches.

use super::ClauseFragment;
use crate::error::{JoblyError, JoblyResult};
use crate::fields::FieldValues;
use crate::translate::PredicateTable;
use std::fmt::Write;

/// Build `<template> $1 AND <template> $2 ...` from `filters`.
///
/// Every field must have a template in `table`; a missing one is
/// [`JoblyError::UntranslatedField`]. An empty `filters` yields an empty fragment,
/// which callers must not splice after a bare `WHERE`.
pub fn build(filters: &FieldValues, table: &PredicateTable) -> JoblyResult<ClauseFragment> {
    let mut clause = String::new();
    let mut values = Vec::with_capacity(filters.len());

    for (idx, (field, value)) in filters.iter().enumerate() {
        let template = table
            .get(field)
            .ok_or_else(|| JoblyError::UntranslatedField(field.to_string()))?;
        if idx > 0 {
            clause.push_str(" AND ");
        }
        let _ = write!(&mut clause, "{} ${}", template, idx + 1);
        values.push(value.clone());
    }

    Ok(ClauseFragment::new(clause, values))
}
