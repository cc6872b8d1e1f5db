//! Mutable configuration bag mirroring a native options object.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::Value;

/// Ordered string-keyed option values. Keys are unique; later writes win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    entries: IndexMap<String, Value>,
}

impl Options {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Builder form of [`Options::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Value of `key` if it is a bool, `default` otherwise.
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Value of `key` if it is a number, `default` otherwise.
    pub fn get_f64_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

    /// Value of `key` if it is a string, `default` otherwise.
    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(Value::as_str).unwrap_or(default)
    }

    /// Reads `key` as a bool. Absent keys give `None`, mistyped ones fail.
    pub fn bool(&self, key: &str) -> Result<Option<bool>> {
        self.typed(key, "bool", Value::as_bool)
    }

    /// Reads `key` as a number. Absent keys give `None`, mistyped ones fail.
    pub fn f64(&self, key: &str) -> Result<Option<f64>> {
        self.typed(key, "number", Value::as_f64)
    }

    /// Reads `key` as a string. Absent keys give `None`, mistyped ones fail.
    pub fn str(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(mistyped(key, "string", other)),
        }
    }

    fn typed<T>(&self, key: &str, expected: &str, extract: fn(&Value) -> Option<T>) -> Result<Option<T>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => extract(v).map(Some).ok_or_else(|| mistyped(key, expected, v)),
        }
    }

    /// Overlays the entries of `other`, shallow; entries of `other` win.
    pub fn merge(&mut self, other: &Options) -> &mut Self {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
        self
    }

    /// Returns true if any entry is, or recursively holds, a handle.
    pub fn contains_handle(&self) -> bool {
        self.entries.values().any(Value::contains_handle)
    }

    /// Produces an independent copy.
    ///
    /// A shallow clone copies nested handles by reference. Foreign objects
    /// cannot be duplicated, so a deep clone of a container holding a handle
    /// fails.
    pub fn clone_options(&self, deep: bool) -> Result<Options> {
        if deep && self.contains_handle() {
            return Err(Error::Unsupported(
                "deep clone of options holding foreign handles".to_string(),
            ));
        }
        Ok(self.clone())
    }
}

fn mistyped(key: &str, expected: &str, found: &Value) -> Error {
    Error::config(key, format!("expected {}, found {}", expected, found.type_name()))
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (k, v) in iter {
            options.set(k, v);
        }
        options
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::HandleId;

    #[test]
    fn typed_defaults_ignore_mistyped_values() {
        let opts = Options::new().with("collapsed", "yes");
        assert!(opts.get_bool_or("collapsed", true));
        assert!(opts.bool("collapsed").is_err());
        assert_eq!(opts.bool("missing").unwrap(), None);
    }

    #[test]
    fn insertion_order_is_kept() {
        let opts = Options::new().with("b", 1).with("a", 2).with("b", 3);
        assert_eq!(opts.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(opts.get("b"), Some(&Value::Number(3.0)));
    }

    #[test]
    fn deep_clone_of_pure_data() {
        let nested = Options::new().with("color", "red");
        let opts = Options::new().with("style", nested);
        assert_eq!(opts.clone_options(true).unwrap(), opts);
    }

    #[test]
    fn deep_clone_rejects_nested_handle() {
        let nested = Options::new().with("layer", HandleId::new(7));
        let opts = Options::new().with("search", nested);
        assert!(matches!(opts.clone_options(true), Err(Error::Unsupported(_))));
        let shallow = opts.clone_options(false).unwrap();
        assert_eq!(shallow, opts);
    }
}
