//! Per-entity filter composition.
//!
//! A [`FilterSpec`] layers domain rules on top of [`predicate::build`]:
//!
//! - substring fields are wrapped as `%value%` for an `ILIKE` template, with `%`, `_`
//!   and `\` in the value escaped so the caller's text matches literally;
//! - range fields (`minEmployees`, `minSalary`, ...) pass through unchanged;
//! - flag fields (`hasEquity`) never become placeholders. A truthy flag appends its
//!   static predicate (`equity > 0`) to the clause as literal text.
//!
//! Flags consume no parameter slot, so the remaining placeholders keep their numbering.

#[cfg(test)]
mod tests;

use crate::clause::{ClauseFragment, predicate};
use crate::error::{JoblyError, JoblyResult};
use crate::fields::FieldValues;
use crate::translate::PredicateTable;

/// Filter rules for one record kind.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    /// Entity name used in error messages.
    pub entity: &'static str,
    /// Templates for parameterized filters.
    pub table: PredicateTable,
    /// Fields matched as case-insensitive substrings.
    pub substring_fields: &'static [&'static str],
    /// Flag field → static predicate appended when the flag is set.
    pub flags: &'static [(&'static str, &'static str)],
}

impl FilterSpec {
    /// Static predicate for a flag field.
    pub fn flag(&self, field: &str) -> Option<&'static str> {
        self.flags
            .iter()
            .find(|(k, _)| *k == field)
            .map(|(_, predicate)| *predicate)
    }

    /// Whether `field` is an accepted filter for this entity.
    pub fn allows(&self, field: &str) -> bool {
        self.table.contains(field) || self.flag(field).is_some()
    }

    /// Allow-list check for map-shaped input, run before [`compose`](Self::compose).
    pub fn check_fields(&self, filters: &FieldValues) -> JoblyResult<()> {
        match filters.keys().find(|field| !self.allows(field)) {
            Some(field) => Err(JoblyError::validation(format!(
                "Filter {field} is not supported for {}",
                self.entity
            ))),
            None => Ok(()),
        }
    }

    /// Compose the `WHERE` content for `filters`.
    ///
    /// `filters` is only read, so composing the same input twice gives the same
    /// fragment (no double wildcard wrapping). The result may be empty when no
    /// filter applies; callers then query without a `WHERE`.
    pub fn compose(&self, filters: &FieldValues) -> JoblyResult<ClauseFragment> {
        let mut params = FieldValues::new();
        let mut statics: Vec<&'static str> = Vec::new();

        for (field, value) in filters.iter() {
            if let Some(predicate) = self.flag(field) {
                if value.is_truthy() && !statics.contains(&predicate) {
                    statics.push(predicate);
                }
                continue;
            }

            if self.substring_fields.iter().any(|f| *f == field) {
                let text = value.as_text().ok_or_else(|| {
                    JoblyError::validation(format!(
                        "{} filter {field} expects text, got {value}",
                        self.entity
                    ))
                })?;
                params.insert(field, format!("%{}%", escape_like(text)));
            } else {
                params.insert(field, value.clone());
            }
        }

        let mut fragment = predicate::build(&params, &self.table)?;
        for predicate in statics {
            fragment.and_static(predicate);
        }
        Ok(fragment)
    }
}

/// Escape `LIKE` metacharacters with `\`, Postgres's default `LIKE` escape.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
