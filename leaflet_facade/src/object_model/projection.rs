use std::f64::consts::{FRAC_PI_2, PI};

use crate::crs::CrsKind;
use crate::error::{Error, Result};
use crate::geometry::{LatLng, EARTH_RADIUS};
use crate::runtime::HandleId;
use crate::value::Value;

use super::args::Args;
use super::{not_a_function, Registry, State};

const MAX_LATITUDE: f64 = 85.0511287798;
const R_MINOR: f64 = 6356752.314245179;

impl Registry {
    pub(super) fn crs_method(&mut self, id: HandleId, method: &str, a: &Args<'_>) -> Result<Value> {
        let op = a.operation();
        let State::Crs(kind) = self.get(id, op)?.state else {
            return Err(Error::foreign(op, format!("{} is not a CRS", id)));
        };
        match method {
            "getCode" => {
                a.arity(0, 0)?;
                Ok(kind.code().into())
            }
            "project" => {
                a.arity(1, 1)?;
                let (x, y) = project(kind, a.lat_lng(0)?);
                Ok(Value::List(vec![x.into(), y.into()]))
            }
            "unproject" => {
                a.arity(1, 1)?;
                let (x, y) = a.point(0)?;
                Ok(Value::LatLng(unproject(kind, x, y)))
            }
            _ => Err(not_a_function(op)),
        }
    }
}

/// Projects to the CRS's plane, in meters for the Mercator systems and in
/// degrees otherwise.
pub(super) fn project(kind: CrsKind, ll: LatLng) -> (f64, f64) {
    match kind {
        CrsKind::Epsg3857 => {
            let lat = ll.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
            let sin = lat.to_radians().sin();
            let y = EARTH_RADIUS * ((1.0 + sin) / (1.0 - sin)).ln() / 2.0;
            (EARTH_RADIUS * ll.lng.to_radians(), y)
        }
        CrsKind::Epsg3395 => {
            let e = eccentricity();
            let lat = ll.lat.to_radians();
            let con = e * lat.sin();
            let ts = (PI / 4.0 - lat / 2.0).tan() / ((1.0 - con) / (1.0 + con)).powf(e / 2.0);
            let y = -EARTH_RADIUS * ts.max(1e-10).ln();
            (EARTH_RADIUS * ll.lng.to_radians(), y)
        }
        CrsKind::Epsg4326 | CrsKind::Simple => (ll.lng, ll.lat),
    }
}

pub(super) fn unproject(kind: CrsKind, x: f64, y: f64) -> LatLng {
    match kind {
        CrsKind::Epsg3857 => {
            let lat = 2.0 * (y / EARTH_RADIUS).exp().atan() - FRAC_PI_2;
            LatLng::new(lat.to_degrees(), (x / EARTH_RADIUS).to_degrees())
        }
        CrsKind::Epsg3395 => {
            let e = eccentricity();
            let ts = (-y / EARTH_RADIUS).exp();
            let mut phi = FRAC_PI_2 - 2.0 * ts.atan();
            for _ in 0..15 {
                let con = e * phi.sin();
                let con = ((1.0 - con) / (1.0 + con)).powf(e / 2.0);
                let dphi = FRAC_PI_2 - 2.0 * (ts * con).atan() - phi;
                phi += dphi;
                if dphi.abs() <= 1e-7 {
                    break;
                }
            }
            LatLng::new(phi.to_degrees(), (x / EARTH_RADIUS).to_degrees())
        }
        CrsKind::Epsg4326 | CrsKind::Simple => LatLng::new(y, x),
    }
}

fn eccentricity() -> f64 {
    (1.0 - (R_MINOR / EARTH_RADIUS).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn spherical_mercator_origin_and_edge() {
        assert_eq!(project(CrsKind::Epsg3857, LatLng::new(0.0, 0.0)), (0.0, 0.0));
        let (x, y) = project(CrsKind::Epsg3857, LatLng::new(90.0, 180.0));
        assert!(close(x, 20037508.342789244, 1e-6));
        assert!(close(y, 20037508.342789244, 1.0));
    }

    #[test]
    fn mercator_inverse_recovers_latitude() {
        for kind in [CrsKind::Epsg3857, CrsKind::Epsg3395] {
            let ll = LatLng::new(59.915, 10.754);
            let (x, y) = project(kind, ll);
            let back = unproject(kind, x, y);
            assert!(close(back.lat, ll.lat, 1e-6), "{:?}: {}", kind, back.lat);
            assert!(close(back.lng, ll.lng, 1e-9));
        }
    }

    #[test]
    fn ellipsoidal_is_south_of_spherical() {
        let ll = LatLng::new(60.0, 0.0);
        let (_, spherical) = project(CrsKind::Epsg3857, ll);
        let (_, ellipsoidal) = project(CrsKind::Epsg3395, ll);
        assert!(ellipsoidal < spherical);
    }

    #[test]
    fn plate_carree_is_identity() {
        assert_eq!(project(CrsKind::Simple, LatLng::new(3.0, 4.0)), (4.0, 3.0));
        assert_eq!(unproject(CrsKind::Epsg4326, 4.0, 3.0), LatLng::new(3.0, 4.0));
    }
}
