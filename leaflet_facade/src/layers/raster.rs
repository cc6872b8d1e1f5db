//! Tiled raster layers.

use crate::error::Result;
use crate::layers::Layer;
use crate::options::Options;
use crate::runtime::{Handle, Leaflet};
use crate::wrapper::js_wrapper;

/// Tile layer loading images from a URL template such as
/// `http://{s}.tile.example.org/{z}/{x}/{y}.png`.
#[derive(Debug, Clone)]
pub struct TileLayer {
    handle: Handle,
}

js_wrapper!(TileLayer, "TileLayer");

impl Layer for TileLayer {}

impl TileLayer {
    pub fn new(leaflet: &Leaflet, url_template: &str, options: &Options) -> Result<Self> {
        let handle = leaflet.create("tileLayer", &[url_template.into(), options.clone().into()])?;
        Ok(Self { handle })
    }

    pub fn set_url(&self, url_template: &str) -> Result<&Self> {
        self.handle.call("setUrl", &[url_template.into()])?;
        Ok(self)
    }

    pub fn url(&self) -> Result<String> {
        url_of(&self.handle, "TileLayer.getUrl")
    }

    pub fn set_opacity(&self, opacity: f64) -> Result<&Self> {
        self.handle.call("setOpacity", &[opacity.into()])?;
        Ok(self)
    }

    pub fn set_z_index(&self, z_index: i32) -> Result<&Self> {
        self.handle.call("setZIndex", &[z_index.into()])?;
        Ok(self)
    }

    /// Explicit z-index, if one was set or assigned by a layer switcher.
    pub fn z_index(&self) -> Result<Option<f64>> {
        Ok(self.handle.call("getZIndex", &[])?.as_f64())
    }
}

/// WMS imagery. Recognized keys besides the tile options: `layers`,
/// `styles`, `format`, `transparent`, `version` and `crs` (a CRS handle).
#[derive(Debug, Clone)]
pub struct WmsLayer {
    handle: Handle,
}

js_wrapper!(WmsLayer, "TileLayer.WMS");

impl Layer for WmsLayer {}

impl WmsLayer {
    pub fn new(leaflet: &Leaflet, base_url: &str, options: &Options) -> Result<Self> {
        let handle = leaflet.create("tileLayer.wms", &[base_url.into(), options.clone().into()])?;
        Ok(Self { handle })
    }

    /// Merges `params` into the request parameters.
    pub fn set_params(&self, params: &Options) -> Result<&Self> {
        self.handle.call("setParams", &[params.clone().into()])?;
        Ok(self)
    }

    pub fn url(&self) -> Result<String> {
        url_of(&self.handle, "TileLayer.WMS.getUrl")
    }

    pub fn set_opacity(&self, opacity: f64) -> Result<&Self> {
        self.handle.call("setOpacity", &[opacity.into()])?;
        Ok(self)
    }

    pub fn z_index(&self) -> Result<Option<f64>> {
        Ok(self.handle.call("getZIndex", &[])?.as_f64())
    }

    /// Current request parameters.
    pub fn params(&self) -> Result<Options> {
        self.handle
            .call("getOptions", &[])?
            .extract("TileLayer.WMS.getOptions", |v| v.as_options().cloned())
    }
}

fn url_of(handle: &Handle, operation: &str) -> Result<String> {
    handle
        .call("getUrl", &[])?
        .extract(operation, |v| v.as_str().map(str::to_string))
}
