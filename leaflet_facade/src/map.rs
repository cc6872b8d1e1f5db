//! The root object every layer and control is attached to.

use crate::controls::Control;
use crate::crs::Crs;
use crate::error::{Error, Result};
use crate::geometry::{LatLng, LatLngBounds};
use crate::layers::Layer;
use crate::options::Options;
use crate::runtime::{Handle, Leaflet};
use crate::value::Value;
use crate::wrapper::{js_wrapper, FromHandle, JsObject};

pub(crate) const DEFAULT_MIN_ZOOM: f64 = 0.0;
pub(crate) const DEFAULT_MAX_ZOOM: f64 = 18.0;

/// Options applied when a map is created.
#[derive(Debug, Clone)]
pub struct MapOptions {
    pub center: Option<LatLng>,
    pub zoom: Option<f64>,
    pub crs: Option<Crs>,
    pub zoom_control: bool,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
    /// Keys passed through untouched.
    pub extra: Options,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: None,
            zoom: None,
            crs: None,
            zoom_control: true,
            min_zoom: None,
            max_zoom: None,
            extra: Options::new(),
        }
    }
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(mut self, center: LatLng) -> Self {
        self.center = Some(center);
        self
    }

    pub fn zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn crs(mut self, crs: &Crs) -> Self {
        self.crs = Some(crs.clone());
        self
    }

    /// Checks zoom limits and converts to the native options object. An unset
    /// limit is checked as its default.
    pub fn to_options(&self) -> Result<Options> {
        for (key, limit) in [("minZoom", self.min_zoom), ("maxZoom", self.max_zoom)] {
            if limit.is_some_and(f64::is_nan) {
                return Err(Error::config(key, "zoom limit is NaN"));
            }
        }
        let min = self.min_zoom.unwrap_or(DEFAULT_MIN_ZOOM);
        let max = self.max_zoom.unwrap_or(DEFAULT_MAX_ZOOM);
        if min > max {
            let key = if self.min_zoom.is_some() { "minZoom" } else { "maxZoom" };
            return Err(Error::config(
                key,
                format!("minimum zoom {} exceeds maximum zoom {}", min, max),
            ));
        }
        let mut options = self.extra.clone();
        options.set("zoomControl", self.zoom_control);
        if let Some(center) = self.center {
            options.set("center", center);
        }
        if let Some(zoom) = self.zoom {
            options.set("zoom", zoom);
        }
        if let Some(crs) = &self.crs {
            options.set("crs", crs.handle());
        }
        if let Some(min) = self.min_zoom {
            options.set("minZoom", min);
        }
        if let Some(max) = self.max_zoom {
            options.set("maxZoom", max);
        }
        Ok(options)
    }
}

/// An interactive map bound to a container element.
#[derive(Debug, Clone)]
pub struct Map {
    handle: Handle,
}

js_wrapper!(Map, "Map");

impl Map {
    /// Creates a map inside the container with the given id.
    pub fn new(leaflet: &Leaflet, container: &str, options: &MapOptions) -> Result<Self> {
        let options = options.to_options()?;
        let handle = leaflet.create("map", &[container.into(), options.into()])?;
        Ok(Self { handle })
    }

    /// Sets center and zoom. With `reset` the view is applied without
    /// animation.
    pub fn set_view(&self, center: LatLng, zoom: f64, reset: bool) -> Result<&Self> {
        let opts = Options::new().with("reset", reset);
        self.handle
            .call("setView", &[center.into(), zoom.into(), opts.into()])?;
        Ok(self)
    }

    pub fn set_zoom(&self, zoom: f64) -> Result<&Self> {
        self.handle.call("setZoom", &[zoom.into()])?;
        Ok(self)
    }

    pub fn center(&self) -> Result<LatLng> {
        self.handle
            .call("getCenter", &[])?
            .extract("Map.getCenter", Value::as_lat_lng)
    }

    pub fn zoom(&self) -> Result<f64> {
        self.handle
            .call("getZoom", &[])?
            .extract("Map.getZoom", Value::as_f64)
    }

    /// Centers the map on `bounds` at the highest zoom that shows all of it.
    pub fn fit_bounds(&self, bounds: LatLngBounds) -> Result<&Self> {
        self.handle.call("fitBounds", &[bounds.into()])?;
        Ok(self)
    }

    pub fn add_layer<L: Layer>(&self, layer: &L) -> Result<&Self> {
        self.handle.call("addLayer", &[layer.handle().into()])?;
        Ok(self)
    }

    /// Detaches `layer`. Layers not on this map are ignored.
    pub fn remove_layer<L: Layer>(&self, layer: &L) -> Result<&Self> {
        self.handle.call("removeLayer", &[layer.handle().into()])?;
        Ok(self)
    }

    pub fn has_layer<L: Layer>(&self, layer: &L) -> Result<bool> {
        self.handle
            .call("hasLayer", &[layer.handle().into()])?
            .extract("Map.hasLayer", Value::as_bool)
    }

    pub fn add_control<C: Control>(&self, control: &C) -> Result<&Self> {
        self.handle.call("addControl", &[control.handle().into()])?;
        Ok(self)
    }

    pub fn remove_control<C: Control>(&self, control: &C) -> Result<&Self> {
        self.handle
            .call("removeControl", &[control.handle().into()])?;
        Ok(self)
    }

    /// Closes any open popup on this map.
    pub fn close_popup(&self) -> Result<&Self> {
        self.handle.call("closePopup", &[])?;
        Ok(self)
    }

    /// Layers attached to the map, markers excluded.
    pub fn layers(&self) -> Result<Vec<Handle>> {
        self.handles("getLayers")
    }

    pub fn markers(&self) -> Result<Vec<Handle>> {
        self.handles("getMarkers")
    }

    pub fn controls(&self) -> Result<Vec<Handle>> {
        self.handles("getControls")
    }

    pub fn layer_count(&self) -> Result<usize> {
        Ok(self.layers()?.len())
    }

    pub fn marker_count(&self) -> Result<usize> {
        Ok(self.markers()?.len())
    }

    pub fn control_count(&self) -> Result<usize> {
        Ok(self.controls()?.len())
    }

    /// The reference system the map was created with.
    pub fn crs(&self) -> Result<Crs> {
        let id = self
            .handle
            .call("getCrs", &[])?
            .extract("Map.getCrs", Value::as_handle)?;
        Crs::from_handle(self.handle.adopt(id))
    }

    fn handles(&self, method: &str) -> Result<Vec<Handle>> {
        let ids = self.handle.call(method, &[])?.extract(method, |v| {
            v.as_list()?.iter().map(Value::as_handle).collect::<Option<Vec<_>>>()
        })?;
        Ok(ids.into_iter().map(|id| self.handle.adopt(id)).collect())
    }
}
