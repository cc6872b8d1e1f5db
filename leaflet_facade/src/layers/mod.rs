//! Renderable map content.

use crate::error::Result;
use crate::map::Map;
use crate::wrapper::JsObject;

pub mod group;
pub mod raster;
pub mod vector;

pub use group::LayerGroup;
pub use raster::{TileLayer, WmsLayer};
pub use vector::{Circle, Polygon, Polyline, Rectangle};

/// Anything that can be shown on a map.
pub trait Layer: JsObject {
    fn add_to(&self, map: &Map) -> Result<&Self>
    where
        Self: Sized,
    {
        self.handle().call("addTo", &[map.handle().into()])?;
        Ok(self)
    }

    /// Detaches the layer. A layer not on `map` is left alone.
    fn remove_from(&self, map: &Map) -> Result<&Self>
    where
        Self: Sized,
    {
        self.handle().call("removeFrom", &[map.handle().into()])?;
        Ok(self)
    }
}
