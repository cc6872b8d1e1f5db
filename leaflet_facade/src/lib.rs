//! Typed bindings over Leaflet's object model.
//!
//! Every wrapper holds one [`Handle`] to an object living in a
//! [`ForeignRuntime`] and forwards each method to a single named call on it.
//! [`ObjectModel`] is the in-process runtime shipped with the crate.

pub mod controls;
pub mod crs;
pub mod error;
pub mod geometry;
pub mod layers;
pub mod map;
pub mod marker;
pub mod object_model;
pub mod options;
pub mod runtime;
pub mod value;
pub mod wrapper;

pub use controls::{Control, LayersControl, LayersOptions, Position, Scale, Search, Zoom};
pub use crs::{Crs, CrsKind};
pub use error::{Error, Result};
pub use geometry::{LatLng, LatLngBounds};
pub use layers::{Circle, Layer, LayerGroup, Polygon, Polyline, Rectangle, TileLayer, WmsLayer};
pub use map::{Map, MapOptions};
pub use marker::{Marker, MarkerOptions};
pub use object_model::ObjectModel;
pub use options::Options;
pub use runtime::{ForeignRuntime, Handle, HandleId, Leaflet};
pub use value::Value;
pub use wrapper::{FromHandle, JsObject};
