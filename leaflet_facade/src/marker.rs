//! Point markers with optional popups.

use crate::error::{Error, Result};
use crate::geometry::LatLng;
use crate::layers::Layer;
use crate::options::Options;
use crate::runtime::{Handle, Leaflet};
use crate::value::Value;
use crate::wrapper::js_wrapper;

/// Options applied when a marker is created.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    /// Tooltip text, also what a search control matches against.
    pub title: Option<String>,
    pub clickable: bool,
    pub draggable: bool,
    pub opacity: f64,
    pub z_index_offset: i32,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            title: None,
            clickable: true,
            draggable: false,
            opacity: 1.0,
            z_index_offset: 0,
        }
    }
}

impl MarkerOptions {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    pub fn to_options(&self) -> Result<Options> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(Error::config(
                "opacity",
                format!("{} is outside 0..=1", self.opacity),
            ));
        }
        let mut options = Options::new()
            .with("clickable", self.clickable)
            .with("draggable", self.draggable)
            .with("opacity", self.opacity)
            .with("zIndexOffset", self.z_index_offset);
        if let Some(title) = &self.title {
            options.set("title", title.as_str());
        }
        Ok(options)
    }
}

/// A marker. Maps keep markers apart from their other layers.
#[derive(Debug, Clone)]
pub struct Marker {
    handle: Handle,
}

js_wrapper!(Marker, "Marker");

impl Layer for Marker {}

impl Marker {
    pub fn new(leaflet: &Leaflet, latlng: LatLng, options: &MarkerOptions) -> Result<Self> {
        let options = options.to_options()?;
        let handle = leaflet.create("marker", &[latlng.into(), options.into()])?;
        Ok(Self { handle })
    }

    /// Binds a popup with HTML `content`, replacing any previous one.
    pub fn bind_popup(&self, content: &str) -> Result<&Self> {
        self.handle.call("bindPopup", &[content.into()])?;
        Ok(self)
    }

    pub fn unbind_popup(&self) -> Result<&Self> {
        self.handle.call("unbindPopup", &[])?;
        Ok(self)
    }

    /// Opens the bound popup, closing any other popup on the same map. Does
    /// nothing without a popup or while the marker is not on a map.
    pub fn open_popup(&self) -> Result<&Self> {
        self.handle.call("openPopup", &[])?;
        Ok(self)
    }

    pub fn close_popup(&self) -> Result<&Self> {
        self.handle.call("closePopup", &[])?;
        Ok(self)
    }

    pub fn is_popup_open(&self) -> Result<bool> {
        self.handle
            .call("isPopupOpen", &[])?
            .extract("Marker.isPopupOpen", Value::as_bool)
    }

    pub fn popup_content(&self) -> Result<Option<String>> {
        Ok(self
            .handle
            .call("getPopupContent", &[])?
            .as_str()
            .map(str::to_string))
    }

    pub fn set_lat_lng(&self, latlng: LatLng) -> Result<&Self> {
        self.handle.call("setLatLng", &[latlng.into()])?;
        Ok(self)
    }

    pub fn lat_lng(&self) -> Result<LatLng> {
        self.handle
            .call("getLatLng", &[])?
            .extract("Marker.getLatLng", Value::as_lat_lng)
    }

    pub fn set_opacity(&self, opacity: f64) -> Result<&Self> {
        self.handle.call("setOpacity", &[opacity.into()])?;
        Ok(self)
    }
}
