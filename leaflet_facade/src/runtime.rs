//! Handles to foreign objects and the runtime they live in.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::object_model::ObjectModel;
use crate::value::Value;

/// Raw identifier of an object owned by a foreign runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandleId(u64);

impl HandleId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The boundary to the runtime that owns the real objects.
///
/// Each operation is one named call with a fixed arity. Implementations
/// reject malformed calls with [`crate::Error::ForeignCall`] and must not
/// create an object when a factory call fails.
pub trait ForeignRuntime {
    /// Runs the named factory and returns the id of the new object.
    fn create(&self, factory: &str, args: &[Value]) -> Result<HandleId>;

    /// Invokes `method` on the object `target`.
    fn invoke(&self, target: HandleId, method: &str, args: &[Value]) -> Result<Value>;

    /// Name of the class of `target`, e.g. `"Control.Layers"`.
    fn class_of(&self, target: HandleId) -> Result<String>;
}

/// A reference to one foreign object for its whole life.
///
/// Dropping a handle releases nothing on the foreign side; detach layers and
/// controls explicitly.
#[derive(Clone)]
pub struct Handle {
    id: HandleId,
    runtime: Rc<dyn ForeignRuntime>,
}

impl Handle {
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Returns true if both handles refer to the same foreign object.
    pub fn same_object(&self, other: &Handle) -> bool {
        self.id == other.id && std::ptr::addr_eq(Rc::as_ptr(&self.runtime), Rc::as_ptr(&other.runtime))
    }

    pub fn class(&self) -> Result<String> {
        self.runtime.class_of(self.id)
    }

    /// Invokes `method` on the referenced object.
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        log::trace!("{}.{}({} args)", self.id, method, args.len());
        self.runtime.invoke(self.id, method, args)
    }

    /// Wraps an id returned by a call on this handle. The id lives in the same
    /// runtime.
    pub fn adopt(&self, id: HandleId) -> Handle {
        Handle {
            id,
            runtime: Rc::clone(&self.runtime),
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.id.0).finish()
    }
}

/// The library namespace (Leaflet's `L`). Every wrapper is created through it.
#[derive(Clone)]
pub struct Leaflet {
    runtime: Rc<dyn ForeignRuntime>,
}

impl Leaflet {
    pub fn new(runtime: Rc<dyn ForeignRuntime>) -> Self {
        Self { runtime }
    }

    /// Namespace backed by a fresh [`ObjectModel`].
    pub fn in_process() -> Self {
        Self::new(Rc::new(ObjectModel::new()))
    }

    /// Runs a factory call and returns a handle to the new object.
    pub fn create(&self, factory: &str, args: &[Value]) -> Result<Handle> {
        let id = self.runtime.create(factory, args)?;
        log::debug!("created {} with {}", id, factory);
        Ok(Handle {
            id,
            runtime: Rc::clone(&self.runtime),
        })
    }

    /// Wraps an existing object id.
    pub fn handle(&self, id: HandleId) -> Handle {
        Handle {
            id,
            runtime: Rc::clone(&self.runtime),
        }
    }
}

impl fmt::Debug for Leaflet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaflet").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_from_different_runtimes_differ() {
        let a = Leaflet::in_process();
        let b = Leaflet::in_process();
        let ha = a.create("crs", &["EPSG3857".into()]).unwrap();
        let hb = b.create("crs", &["EPSG3857".into()]).unwrap();
        assert_eq!(ha.id(), hb.id());
        assert!(!ha.same_object(&hb));
        assert!(ha.same_object(&ha.clone()));
    }

    #[test]
    fn failed_factory_yields_error() {
        let l = Leaflet::in_process();
        let err = l.create("crs", &["EPSG9999".into()]).unwrap_err();
        assert!(matches!(err, crate::Error::ForeignCall { .. }));
    }
}
