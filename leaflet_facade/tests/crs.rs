use geo_types::Point;
use leaflet_facade::{Crs, CrsKind, Error, LatLng, Leaflet, Map, MapOptions};

fn close(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

#[test]
fn codes_match_kinds() {
    let l = Leaflet::in_process();
    for (kind, code) in [
        (CrsKind::Epsg3857, "EPSG:3857"),
        (CrsKind::Epsg4326, "EPSG:4326"),
        (CrsKind::Epsg3395, "EPSG:3395"),
        (CrsKind::Simple, "SIMPLE"),
    ] {
        let crs = Crs::new(&l, kind).unwrap();
        assert_eq!(crs.code().unwrap(), code);
        assert_eq!(crs.kind().unwrap(), kind);
    }
}

#[test]
fn unknown_code_is_a_configuration_error() {
    assert!(matches!(
        "EPSG:27700".parse::<CrsKind>(),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn spherical_mercator_projects_oslo() {
    let l = Leaflet::in_process();
    let crs = Crs::new(&l, CrsKind::Epsg3857).unwrap();
    let p = crs.project(LatLng::new(59.915, 10.754)).unwrap();
    assert!(close(p.x(), 1_197_129.8, 1.0), "x = {}", p.x());
    assert!(close(p.y(), 8_380_837.8, 1.0), "y = {}", p.y());
}

#[test]
fn world_mercator_unprojects_what_it_projects() {
    let l = Leaflet::in_process();
    let crs = Crs::new(&l, CrsKind::Epsg3395).unwrap();
    let oslo = LatLng::new(59.915, 10.754);
    let back = crs.unproject(crs.project(oslo).unwrap()).unwrap();
    assert!(close(back.lat, oslo.lat, 1e-6));
    assert!(close(back.lng, oslo.lng, 1e-9));
}

#[test]
fn geographic_systems_use_degrees() {
    let l = Leaflet::in_process();
    let crs = Crs::new(&l, CrsKind::Epsg4326).unwrap();
    assert_eq!(crs.project(LatLng::new(10.0, 20.0)).unwrap(), Point::new(20.0, 10.0));
    assert_eq!(crs.unproject(Point::new(20.0, 10.0)).unwrap(), LatLng::new(10.0, 20.0));
}

#[test]
fn default_map_crs_is_spherical_mercator() {
    let l = Leaflet::in_process();
    let map = Map::new(&l, "map", &MapOptions::new()).unwrap();
    assert_eq!(map.crs().unwrap().kind().unwrap(), CrsKind::Epsg3857);
}
