use crate::error::{Error, Result};
use crate::geometry::{LatLng, LatLngBounds};
use crate::options::Options;
use crate::runtime::HandleId;
use crate::value::Value;

/// Positional arguments of one call, with shape checks that fail naming the
/// operation.
pub(super) struct Args<'a> {
    operation: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub(super) fn new(operation: &'a str, values: &'a [Value]) -> Self {
        Self { operation, values }
    }

    pub(super) fn operation(&self) -> &'a str {
        self.operation
    }

    pub(super) fn arity(&self, min: usize, max: usize) -> Result<()> {
        let n = self.values.len();
        if n < min || n > max {
            let expected = if min == max {
                format!("{}", min)
            } else {
                format!("{} to {}", min, max)
            };
            return Err(Error::foreign(
                self.operation,
                format!("expected {} arguments, got {}", expected, n),
            ));
        }
        Ok(())
    }

    fn arg(&self, index: usize) -> Result<&'a Value> {
        self.values.get(index).ok_or_else(|| {
            Error::foreign(self.operation, format!("missing argument {}", index))
        })
    }

    fn mismatch(&self, index: usize, expected: &str, found: &Value) -> Error {
        Error::foreign(
            self.operation,
            format!(
                "argument {}: expected {}, got {}",
                index,
                expected,
                found.type_name()
            ),
        )
    }

    fn typed<T>(&self, index: usize, expected: &str, f: impl FnOnce(&'a Value) -> Option<T>) -> Result<T> {
        let v = self.arg(index)?;
        f(v).ok_or_else(|| self.mismatch(index, expected, v))
    }

    pub(super) fn str(&self, index: usize) -> Result<&'a str> {
        self.typed(index, "string", Value::as_str)
    }

    pub(super) fn f64(&self, index: usize) -> Result<f64> {
        let n = self.typed(index, "number", Value::as_f64)?;
        if n.is_nan() {
            return Err(Error::foreign(self.operation, format!("argument {} is NaN", index)));
        }
        Ok(n)
    }

    pub(super) fn bool(&self, index: usize) -> Result<bool> {
        self.typed(index, "bool", Value::as_bool)
    }

    pub(super) fn lat_lng(&self, index: usize) -> Result<LatLng> {
        let ll = self.typed(index, "latlng", Value::as_lat_lng)?;
        check_lat_lng(self.operation, ll)?;
        Ok(ll)
    }

    pub(super) fn bounds(&self, index: usize) -> Result<LatLngBounds> {
        self.typed(index, "bounds", Value::as_bounds)
    }

    pub(super) fn handle(&self, index: usize) -> Result<HandleId> {
        self.typed(index, "object", Value::as_handle)
    }

    /// Options at `index`; absent or null arguments give empty options.
    pub(super) fn options(&self, index: usize) -> Result<Options> {
        match self.values.get(index) {
            None | Some(Value::Null) => Ok(Options::new()),
            Some(Value::Options(o)) => Ok(o.clone()),
            Some(other) => Err(self.mismatch(index, "options", other)),
        }
    }

    /// List of handles at `index`; absent or null arguments give none.
    pub(super) fn handles(&self, index: usize) -> Result<Vec<HandleId>> {
        match self.values.get(index) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::List(items)) => items
                .iter()
                .map(|v| v.as_handle().ok_or_else(|| self.mismatch(index, "list of objects", v)))
                .collect(),
            Some(other) => Err(self.mismatch(index, "list of objects", other)),
        }
    }

    pub(super) fn lat_lngs(&self, index: usize) -> Result<Vec<LatLng>> {
        let items = self.typed(index, "list of latlngs", Value::as_list)?;
        items
            .iter()
            .map(|v| {
                let ll = v
                    .as_lat_lng()
                    .ok_or_else(|| self.mismatch(index, "list of latlngs", v))?;
                check_lat_lng(self.operation, ll)?;
                Ok(ll)
            })
            .collect()
    }

    /// Two numbers `[x, y]` at `index`.
    pub(super) fn point(&self, index: usize) -> Result<(f64, f64)> {
        let items = self.typed(index, "point", Value::as_list)?;
        match items {
            [x, y] => match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => Ok((x, y)),
                _ => Err(self.mismatch(index, "point", &items[0])),
            },
            _ => Err(Error::foreign(
                self.operation,
                format!("argument {}: a point has two coordinates", index),
            )),
        }
    }
}

pub(super) fn check_lat_lng(operation: &str, ll: LatLng) -> Result<()> {
    if ll.lat.is_nan() || ll.lng.is_nan() {
        return Err(Error::foreign(
            operation,
            format!("Invalid LatLng object: ({}, {})", ll.lat, ll.lng),
        ));
    }
    Ok(())
}
