//! Geographic value types.
//!
//! These are plain coordinates, not foreign objects. They are converted to the
//! runtime representation only when passed to a call.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean earth radius used by Leaflet for distances, in meters.
pub const EARTH_RADIUS: f64 = 6378137.0;

/// A geographical point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great circle distance to `other` in meters (haversine).
    pub fn distance_to(&self, other: LatLng) -> f64 {
        let rad = std::f64::consts::PI / 180.0;
        let lat1 = self.lat * rad;
        let lat2 = other.lat * rad;
        let sin_dlat = ((other.lat - self.lat) * rad / 2.0).sin();
        let sin_dlng = ((other.lng - self.lng) * rad / 2.0).sin();
        let a = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS * c
    }

    /// Returns the point with its longitude wrapped into `[-180, 180)`.
    pub fn wrap(&self) -> Self {
        let lng = (self.lng + 180.0).rem_euclid(360.0) - 180.0;
        Self { lat: self.lat, lng }
    }
}

impl From<LatLng> for geo_types::Point<f64> {
    fn from(ll: LatLng) -> Self {
        geo_types::Point::new(ll.lng, ll.lat)
    }
}

impl From<geo_types::Point<f64>> for LatLng {
    fn from(p: geo_types::Point<f64>) -> Self {
        LatLng::new(p.y(), p.x())
    }
}

/// Rectangular geographical area. The south-west corner never lies north or
/// east of the north-east corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    south_west: LatLng,
    north_east: LatLng,
}

impl LatLngBounds {
    /// Creates bounds from two opposite corners in any order.
    pub fn new(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// Smallest bounds containing all `points`.
    pub fn from_points(points: &[LatLng]) -> Result<Self> {
        let (first, rest) = points
            .split_first()
            .ok_or_else(|| Error::config("bounds", "at least one point is required"))?;
        let mut bounds = Self::new(*first, *first);
        for p in rest {
            bounds.extend(*p);
        }
        Ok(bounds)
    }

    pub fn south_west(&self) -> LatLng {
        self.south_west
    }

    pub fn north_east(&self) -> LatLng {
        self.north_east
    }

    /// Grows the bounds to include `point`.
    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Returns true if the two areas share at least one point.
    pub fn intersects(&self, other: &LatLngBounds) -> bool {
        other.north_east.lat >= self.south_west.lat
            && other.south_west.lat <= self.north_east.lat
            && other.north_east.lng >= self.south_west.lng
            && other.south_west.lng <= self.north_east.lng
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}
