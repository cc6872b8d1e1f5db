//! Coordinate reference systems.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::LatLng;
use crate::runtime::{Handle, Leaflet};
use crate::value::Value;
use crate::wrapper::js_wrapper;

/// The reference systems known to the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrsKind {
    /// Spherical Mercator, the default for web maps.
    Epsg3857,
    /// Plate carrée in degrees (WGS84).
    Epsg4326,
    /// Ellipsoidal Mercator.
    Epsg3395,
    /// Planar coordinates, for non-geographic maps.
    Simple,
}

impl CrsKind {
    /// Identifier passed to the `crs` factory.
    pub fn name(self) -> &'static str {
        match self {
            CrsKind::Epsg3857 => "EPSG3857",
            CrsKind::Epsg4326 => "EPSG4326",
            CrsKind::Epsg3395 => "EPSG3395",
            CrsKind::Simple => "Simple",
        }
    }

    /// Code reported by the CRS object.
    pub fn code(self) -> &'static str {
        match self {
            CrsKind::Epsg3857 => "EPSG:3857",
            CrsKind::Epsg4326 => "EPSG:4326",
            CrsKind::Epsg3395 => "EPSG:3395",
            CrsKind::Simple => "SIMPLE",
        }
    }
}

impl fmt::Display for CrsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CrsKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "EPSG3857" | "EPSG:3857" => Ok(CrsKind::Epsg3857),
            "EPSG4326" | "EPSG:4326" => Ok(CrsKind::Epsg4326),
            "EPSG3395" | "EPSG:3395" => Ok(CrsKind::Epsg3395),
            "Simple" | "SIMPLE" => Ok(CrsKind::Simple),
            other => Err(Error::config("crs", format!("unknown reference system `{}`", other))),
        }
    }
}

/// Handle to a CRS object.
#[derive(Debug, Clone)]
pub struct Crs {
    handle: Handle,
}

js_wrapper!(Crs, "CRS");

impl Crs {
    pub fn new(leaflet: &Leaflet, kind: CrsKind) -> Result<Self> {
        let handle = leaflet.create("crs", &[kind.name().into()])?;
        Ok(Self { handle })
    }

    pub fn code(&self) -> Result<String> {
        self.handle
            .call("getCode", &[])?
            .extract("CRS.getCode", |v| v.as_str().map(str::to_string))
    }

    pub fn kind(&self) -> Result<CrsKind> {
        self.code()?.parse()
    }

    /// Projects a geographical point into the CRS's planar coordinates.
    pub fn project(&self, latlng: LatLng) -> Result<geo_types::Point<f64>> {
        self.handle
            .call("project", &[latlng.into()])?
            .extract("CRS.project", point_from_value)
    }

    /// Inverse of [`Crs::project`].
    pub fn unproject(&self, point: geo_types::Point<f64>) -> Result<LatLng> {
        let arg = Value::List(vec![point.x().into(), point.y().into()]);
        self.handle
            .call("unproject", &[arg])?
            .extract("CRS.unproject", Value::as_lat_lng)
    }
}

fn point_from_value(v: &Value) -> Option<geo_types::Point<f64>> {
    match v.as_list()? {
        [x, y] => Some(geo_types::Point::new(x.as_f64()?, y.as_f64()?)),
        _ => None,
    }
}
