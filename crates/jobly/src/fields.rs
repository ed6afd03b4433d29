//! Ordered field/value sequences.

use crate::value::Value;

/// An ordered map from logical field name to [`Value`].
///
/// Insertion order is the order in which positional parameters (`$1, $2, ...`) are
/// assigned by the clause builders. Re-inserting an existing field replaces its value
/// in place, so a field never yields two placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    entries: Vec<(String, Value)>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field, returning the previous value if it existed.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == field) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((field, value));
                None
            }
        }
    }

    /// Chainable [`insert`](Self::insert).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Insert only when `value` is `Some`.
    pub fn insert_opt<T: Into<Value>>(&mut self, field: &str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.insert(field, v);
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == field).map(|(_, v)| v)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Remove a field, shifting later fields up one position.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == field)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

impl IntoIterator for FieldValues {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
