//! Vector shapes.

use crate::error::Result;
use crate::geometry::{LatLng, LatLngBounds};
use crate::layers::Layer;
use crate::options::Options;
use crate::runtime::{Handle, Leaflet};
use crate::value::Value;
use crate::wrapper::js_wrapper;

/// Open line through a list of points.
#[derive(Debug, Clone)]
pub struct Polyline {
    handle: Handle,
}

js_wrapper!(Polyline, "Polyline");

impl Layer for Polyline {}

impl Polyline {
    pub fn new(leaflet: &Leaflet, latlngs: &[LatLng], options: &Options) -> Result<Self> {
        let handle = leaflet.create("polyline", &[latlngs.into(), options.clone().into()])?;
        Ok(Self { handle })
    }

    pub fn add_lat_lng(&self, latlng: LatLng) -> Result<&Self> {
        self.handle.call("addLatLng", &[latlng.into()])?;
        Ok(self)
    }

    pub fn set_lat_lngs(&self, latlngs: &[LatLng]) -> Result<&Self> {
        self.handle.call("setLatLngs", &[latlngs.into()])?;
        Ok(self)
    }

    pub fn lat_lngs(&self) -> Result<Vec<LatLng>> {
        lat_lngs_of(&self.handle)
    }

    pub fn bounds(&self) -> Result<LatLngBounds> {
        bounds_of(&self.handle)
    }

    /// Merges path style keys (`color`, `weight`, `opacity`, ...).
    pub fn set_style(&self, style: &Options) -> Result<&Self> {
        self.handle.call("setStyle", &[style.clone().into()])?;
        Ok(self)
    }
}

/// Closed ring. The first point is not repeated at the end.
#[derive(Debug, Clone)]
pub struct Polygon {
    handle: Handle,
}

js_wrapper!(Polygon, "Polygon");

impl Layer for Polygon {}

impl Polygon {
    pub fn new(leaflet: &Leaflet, latlngs: &[LatLng], options: &Options) -> Result<Self> {
        let handle = leaflet.create("polygon", &[latlngs.into(), options.clone().into()])?;
        Ok(Self { handle })
    }

    pub fn add_lat_lng(&self, latlng: LatLng) -> Result<&Self> {
        self.handle.call("addLatLng", &[latlng.into()])?;
        Ok(self)
    }

    pub fn lat_lngs(&self) -> Result<Vec<LatLng>> {
        lat_lngs_of(&self.handle)
    }

    pub fn bounds(&self) -> Result<LatLngBounds> {
        bounds_of(&self.handle)
    }

    pub fn set_style(&self, style: &Options) -> Result<&Self> {
        self.handle.call("setStyle", &[style.clone().into()])?;
        Ok(self)
    }
}

/// Circle with a radius in meters.
#[derive(Debug, Clone)]
pub struct Circle {
    handle: Handle,
}

js_wrapper!(Circle, "Circle");

impl Layer for Circle {}

impl Circle {
    pub fn new(leaflet: &Leaflet, center: LatLng, radius: f64, options: &Options) -> Result<Self> {
        let handle = leaflet.create(
            "circle",
            &[center.into(), radius.into(), options.clone().into()],
        )?;
        Ok(Self { handle })
    }

    pub fn set_radius(&self, radius: f64) -> Result<&Self> {
        self.handle.call("setRadius", &[radius.into()])?;
        Ok(self)
    }

    pub fn radius(&self) -> Result<f64> {
        self.handle
            .call("getRadius", &[])?
            .extract("Circle.getRadius", Value::as_f64)
    }

    pub fn set_lat_lng(&self, center: LatLng) -> Result<&Self> {
        self.handle.call("setLatLng", &[center.into()])?;
        Ok(self)
    }

    pub fn lat_lng(&self) -> Result<LatLng> {
        self.handle
            .call("getLatLng", &[])?
            .extract("Circle.getLatLng", Value::as_lat_lng)
    }

    pub fn set_style(&self, style: &Options) -> Result<&Self> {
        self.handle.call("setStyle", &[style.clone().into()])?;
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct Rectangle {
    handle: Handle,
}

js_wrapper!(Rectangle, "Rectangle");

impl Layer for Rectangle {}

impl Rectangle {
    pub fn new(leaflet: &Leaflet, bounds: LatLngBounds, options: &Options) -> Result<Self> {
        let handle = leaflet.create("rectangle", &[bounds.into(), options.clone().into()])?;
        Ok(Self { handle })
    }

    pub fn set_bounds(&self, bounds: LatLngBounds) -> Result<&Self> {
        self.handle.call("setBounds", &[bounds.into()])?;
        Ok(self)
    }

    pub fn bounds(&self) -> Result<LatLngBounds> {
        bounds_of(&self.handle)
    }

    pub fn set_style(&self, style: &Options) -> Result<&Self> {
        self.handle.call("setStyle", &[style.clone().into()])?;
        Ok(self)
    }
}

fn lat_lngs_of(handle: &Handle) -> Result<Vec<LatLng>> {
    handle.call("getLatLngs", &[])?.extract("getLatLngs", |v| {
        v.as_list()?.iter().map(Value::as_lat_lng).collect::<Option<Vec<_>>>()
    })
}

fn bounds_of(handle: &Handle) -> Result<LatLngBounds> {
    handle
        .call("getBounds", &[])?
        .extract("getBounds", Value::as_bounds)
}
