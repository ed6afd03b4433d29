//! Quoted SQL identifiers.
//!
//! Column names in assignment clauses are always emitted in quoted form
//! (`"num_employees"`). Quoting keeps reserved words and mixed case intact, and
//! an embedded `"` is escaped as `""` so a name can never terminate the identifier
//! early.

use crate::error::{JoblyError, JoblyResult};

/// A single quoted SQL identifier (column name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident(String);

impl Ident {
    /// Create a quoted identifier. Any character except NUL is allowed.
    pub fn quoted(name: &str) -> JoblyResult<Self> {
        if name.is_empty() {
            return Err(JoblyError::validation("Empty quoted identifier"));
        }
        if name.contains('\0') {
            return Err(JoblyError::validation(
                "Identifier cannot contain NUL character",
            ));
        }
        Ok(Self(name.to_string()))
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 2);
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push('"');
        for ch in self.0.chars() {
            if ch == '"' {
                out.push_str("\"\"");
            } else {
                out.push(ch);
            }
        }
        out.push('"');
    }
}
