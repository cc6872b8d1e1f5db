use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{LatLng, LatLngBounds};
use crate::options::Options;
use crate::runtime::{Handle, HandleId};

/// Untyped value exchanged with the foreign runtime.
///
/// Handles travel as raw [`HandleId`]s; wrappers are unwrapped before a call
/// and returned ids are re-wrapped by the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    LatLng(LatLng),
    Bounds(LatLngBounds),
    Handle(HandleId),
    List(Vec<Value>),
    Options(Options),
}

impl Value {
    /// Name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::LatLng(_) => "latlng",
            Value::Bounds(_) => "bounds",
            Value::Handle(_) => "handle",
            Value::List(_) => "list",
            Value::Options(_) => "options",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_lat_lng(&self) -> Option<LatLng> {
        match self {
            Value::LatLng(ll) => Some(*ll),
            _ => None,
        }
    }

    pub fn as_bounds(&self) -> Option<LatLngBounds> {
        match self {
            Value::Bounds(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<HandleId> {
        match self {
            Value::Handle(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_options(&self) -> Option<&Options> {
        match self {
            Value::Options(o) => Some(o),
            _ => None,
        }
    }

    /// Returns true if this value is, or recursively holds, a handle.
    pub fn contains_handle(&self) -> bool {
        match self {
            Value::Handle(_) => true,
            Value::List(items) => items.iter().any(Value::contains_handle),
            Value::Options(o) => o.contains_handle(),
            _ => false,
        }
    }

    /// Extracts a return value of the expected shape, failing with a foreign
    /// call error naming `operation` otherwise.
    pub(crate) fn extract<T>(self, operation: &str, f: impl FnOnce(&Value) -> Option<T>) -> Result<T> {
        f(&self).ok_or_else(|| {
            Error::foreign(
                operation,
                format!("unexpected return value of type {}", self.type_name()),
            )
        })
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<LatLng> for Value {
    fn from(ll: LatLng) -> Self {
        Value::LatLng(ll)
    }
}

impl From<LatLngBounds> for Value {
    fn from(b: LatLngBounds) -> Self {
        Value::Bounds(b)
    }
}

impl From<HandleId> for Value {
    fn from(id: HandleId) -> Self {
        Value::Handle(id)
    }
}

impl From<&Handle> for Value {
    fn from(h: &Handle) -> Self {
        Value::Handle(h.id())
    }
}

impl From<Options> for Value {
    fn from(o: Options) -> Self {
        Value::Options(o)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<&[LatLng]> for Value {
    fn from(points: &[LatLng]) -> Self {
        Value::List(points.iter().copied().map(Value::LatLng).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
