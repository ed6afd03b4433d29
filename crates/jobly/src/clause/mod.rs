//! Parameterized clause builders.
//!
//! Both builders turn an ordered [`FieldValues`](crate::FieldValues) into a
//! [`ClauseFragment`]: clause text with `$1, $2, ...` placeholders plus the values for
//! those placeholders, in the same order. Fragments carry no leading `SET`/`WHERE` so
//! the caller decides which statement they are spliced into.
//!
//! ```ignore
//! use jobly::{FieldValues, clause::assign, model::company};
//!
//! let fields = FieldValues::new().with("numEmployees", 40).with("name", "Acme");
//! let frag = assign::build(&fields, &company::COLUMNS)?;
//! assert_eq!(frag.clause(), r#""num_employees"=$1, "name"=$2"#);
//! ```

pub mod assign;
pub mod predicate;


use crate::value::Value;

/// Clause text plus its positional parameter values.
///
/// Placeholder `$i` in the text is bound to `values()[i - 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseFragment {
    clause: String,
    values: Vec<Value>,
}

impl ClauseFragment {
    pub(crate) fn new(clause: String, values: Vec<Value>) -> Self {
        Self { clause, values }
    }

    /// An empty fragment (no text, no values).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Whether there is no clause text at all.
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// Number of bound values (== highest placeholder index used).
    pub fn param_count(&self) -> usize {
        self.values.len()
    }

    /// Placeholder for the next parameter appended after this fragment, e.g. `$3`.
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.values.len() + 1)
    }

    /// Append a static, parameterless predicate with `AND`.
    ///
    /// On an empty fragment the predicate becomes the whole clause.
    pub fn and_static(&mut self, predicate: &str) -> &mut Self {
        if !self.clause.is_empty() {
            self.clause.push_str(" AND ");
        }
        self.clause.push_str(predicate);
        self
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.clause, self.values)
    }
}
