//! Caller-supplied rows
//!
//! A [`Row`] is an ordered mapping from column name to string value. Order is
//! insertion order, and it decides where new columns land when a row widens
//! the dataset schema.

use crate::{Error, Result};

/// Ordered column -> value mapping
///
/// Inserting an existing key replaces its value in place, so the key keeps
/// the position of its first occurrence ("last occurrence wins").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Build a row from `key=value` arguments
    ///
    /// Keys are trimmed, values keep their content except for trailing
    /// newlines. A pair without `=` or with an empty key is rejected.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut row = Self::new();
        for raw in pairs {
            let raw = raw.as_ref();
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| Error::InvalidPair(raw.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::InvalidPair(raw.to_string()));
            }
            row.insert(key, value.trim_end_matches('\n'));
        }
        Ok(row)
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}
