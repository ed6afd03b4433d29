//! Field translation tables.
//!
//! Each record kind declares two static tables that are the only place logical field
//! names are turned into SQL text:
//!
//! - [`ColumnTable`]: field → column name, for assignment clauses. Lookups fall back to
//!   the field name itself, so only renamed fields need an entry.
//! - [`PredicateTable`]: field → comparison template ending right before the value
//!   placeholder (e.g. `"num_employees >="`). There is no fallback.
//!
//! Table contents are interpolated into SQL unparameterized and must only ever be
//! written as literals in source.

/// Logical field → physical column name.
#[derive(Debug, Clone, Copy)]
pub struct ColumnTable {
    entries: &'static [(&'static str, &'static str)],
}

impl ColumnTable {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Translated column for `field`, if the table renames it.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        lookup(self.entries, field)
    }

    /// Column for `field`, falling back to the field name.
    pub fn column<'a>(&self, field: &'a str) -> &'a str {
        self.get(field).unwrap_or(field)
    }
}

/// Logical field → comparison template (`"<column> <operator>"`).
#[derive(Debug, Clone, Copy)]
pub struct PredicateTable {
    entries: &'static [(&'static str, &'static str)],
}

impl PredicateTable {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        lookup(self.entries, field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }
}

fn lookup(entries: &'static [(&'static str, &'static str)], field: &str) -> Option<&'static str> {
    entries
        .iter()
        .find(|(k, _)| *k == field)
        .map(|(_, fragment)| *fragment)
}
