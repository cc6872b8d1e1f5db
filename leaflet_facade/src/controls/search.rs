use crate::controls::{Control, Position};
use crate::error::{Error, Result};
use crate::geometry::LatLng;
use crate::layers::LayerGroup;
use crate::options::Options;
use crate::runtime::{Handle, Leaflet};
use crate::value::Value;
use crate::wrapper::{js_wrapper, FromHandle, JsObject};

/// Configuration of the search box.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Group whose markers are searched by title. Required.
    pub search_layer: Option<LayerGroup>,
    /// Zoom applied when a match is found; the current zoom is kept if unset.
    pub zoom: Option<f64>,
    pub text: String,
    pub text_err: String,
    pub position: Position,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            search_layer: None,
            zoom: None,
            text: "Search...".to_string(),
            text_err: "Location not found".to_string(),
            position: Position::TopLeft,
        }
    }
}

impl SearchOptions {
    pub fn to_options(&self) -> Result<Options> {
        let layer = self
            .search_layer
            .as_ref()
            .ok_or_else(|| Error::config("layer", "a search layer is required"))?;
        let mut options = Options::new()
            .with("layer", layer.handle())
            .with("text", self.text.as_str())
            .with("textErr", self.text_err.as_str())
            .with("position", self.position);
        if let Some(zoom) = self.zoom {
            options.set("zoom", zoom);
        }
        Ok(options)
    }
}

/// Search box locating markers by title.
#[derive(Debug, Clone)]
pub struct Search {
    handle: Handle,
}

js_wrapper!(Search, "Control.Search");

impl Control for Search {}

impl Search {
    pub fn new(leaflet: &Leaflet, options: &SearchOptions) -> Result<Self> {
        let options = options.to_options()?;
        let handle = leaflet.create("control.search", &[options.into()])?;
        Ok(Self { handle })
    }

    /// Looks `text` up among the marker titles of the search layer,
    /// ignoring case. On a match while on a map, the map is centered on it.
    pub fn search(&self, text: &str) -> Result<Option<LatLng>> {
        match self.handle.call("search", &[text.into()])? {
            Value::Null => Ok(None),
            other => other
                .extract("Control.Search.search", Value::as_lat_lng)
                .map(Some),
        }
    }

    pub fn search_layer(&self) -> Result<LayerGroup> {
        let id = self
            .handle
            .call("getLayer", &[])?
            .extract("Control.Search.getLayer", Value::as_handle)?;
        LayerGroup::from_handle(self.handle.adopt(id))
    }
}
