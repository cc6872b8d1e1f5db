//! Base capabilities shared by every typed wrapper.

use crate::error::{Error, Result};
use crate::runtime::Handle;

/// Anything backed by a foreign object.
pub trait JsObject {
    /// The handle obtained when the wrapper was built. It never changes.
    fn handle(&self) -> &Handle;
}

/// Typed wrappers that can be rebuilt from an existing handle.
pub trait FromHandle: Sized {
    /// Foreign class name the handle must refer to.
    const CLASS: &'static str;

    /// Wraps `handle` without checking its class.
    fn from_handle_unchecked(handle: Handle) -> Self;

    /// Wraps `handle`, failing if the foreign object is of another class.
    fn from_handle(handle: Handle) -> Result<Self> {
        let class = handle.class()?;
        if class != Self::CLASS {
            return Err(Error::foreign(
                "cast",
                format!("{} is a {}, not a {}", handle.id(), class, Self::CLASS),
            ));
        }
        Ok(Self::from_handle_unchecked(handle))
    }
}

/// Implements [`JsObject`] and [`FromHandle`] for a struct with a `handle`
/// field.
macro_rules! js_wrapper {
    ($ty:ident, $class:literal) => {
        impl $crate::wrapper::JsObject for $ty {
            fn handle(&self) -> &$crate::runtime::Handle {
                &self.handle
            }
        }

        impl $crate::wrapper::FromHandle for $ty {
            const CLASS: &'static str = $class;

            fn from_handle_unchecked(handle: $crate::runtime::Handle) -> Self {
                Self { handle }
            }
        }
    };
}

pub(crate) use js_wrapper;
