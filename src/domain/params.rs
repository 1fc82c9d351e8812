use crate::error::{ReleaseError, Result};
use std::collections::HashMap;

/// Multi-valued form parameters as submitted by a browser
///
/// Every key maps to a list of values, even for single-valued fields.
/// Checkbox-style flags are represented by key presence alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams {
    values: HashMap<String, Vec<String>>,
}

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for a key, keeping earlier values first
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Register a key with an empty value list
    pub fn insert_key(&mut self, key: impl Into<String>) {
        self.values.entry(key.into()).or_default();
    }

    /// Build from "key=value" strings; a bare "key" registers a flag with value "on"
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = FormParams::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            match assignment.split_once('=') {
                Some((key, _)) if key.is_empty() => {
                    return Err(ReleaseError::malformed(format!(
                        "Parameter without a name: '{}'",
                        assignment
                    )));
                }
                Some((key, value)) => params.insert(key, value),
                None if assignment.is_empty() => {
                    return Err(ReleaseError::malformed("Empty parameter"));
                }
                None => params.insert(assignment, "on"),
            }
        }
        Ok(params)
    }

    /// Whether the key was submitted at all, regardless of value
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// First submitted value for a key
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = FormParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl From<HashMap<String, Vec<String>>> for FormParams {
    fn from(values: HashMap<String, Vec<String>>) -> Self {
        FormParams { values }
    }
}
