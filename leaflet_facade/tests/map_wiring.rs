use leaflet_facade::{
    Circle, Error, JsObject, LatLng, LatLngBounds, Layer, LayerGroup, Leaflet, Map, MapOptions,
    Marker, MarkerOptions, Options, Polyline, Rectangle, TileLayer,
};

const OSM: &str = "http://{s}.tile.osm.org/{z}/{x}/{y}.png";

fn map(l: &Leaflet) -> Map {
    let _ = env_logger::builder().is_test(true).try_init();
    Map::new(
        l,
        "map",
        &MapOptions::new().center(LatLng::new(0.0, 0.0)).zoom(13.0),
    )
    .unwrap()
}

#[test]
fn marker_is_tracked_apart_from_layers() {
    let l = Leaflet::in_process();
    let map = map(&l);
    let tile = TileLayer::new(&l, OSM, &Options::new()).unwrap();
    let marker = Marker::new(&l, LatLng::new(59.915, 10.754), &MarkerOptions::default()).unwrap();
    marker.bind_popup("<b>Hello world!</b><br>I am a popup.").unwrap();

    tile.add_to(&map).unwrap();
    marker.add_to(&map).unwrap();

    assert_eq!(map.layer_count().unwrap(), 1);
    assert_eq!(map.marker_count().unwrap(), 1);
    assert!(map.markers().unwrap()[0].same_object(marker.handle()));
}

#[test]
fn set_view_then_read_back() {
    let l = Leaflet::in_process();
    let map = map(&l);
    map.set_view(LatLng::new(59.915, 10.754), 13.0, true).unwrap();
    assert_eq!(map.center().unwrap(), LatLng::new(59.915, 10.754));
    assert_eq!(map.zoom().unwrap(), 13.0);
}

#[test]
fn zoom_is_clamped_to_the_map_limits() {
    let l = Leaflet::in_process();
    let opts = MapOptions {
        min_zoom: Some(3.0),
        max_zoom: Some(10.0),
        ..MapOptions::new()
    };
    let map = Map::new(&l, "map", &opts).unwrap();
    map.set_zoom(14.0).unwrap();
    assert_eq!(map.zoom().unwrap(), 10.0);
    map.set_zoom(1.0).unwrap();
    assert_eq!(map.zoom().unwrap(), 3.0);
}

#[test]
fn inverted_zoom_limits_are_a_configuration_error() {
    let l = Leaflet::in_process();
    let opts = MapOptions {
        min_zoom: Some(12.0),
        max_zoom: Some(4.0),
        ..MapOptions::new()
    };
    assert!(matches!(
        Map::new(&l, "map", &opts),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn fit_bounds_centers_on_the_bounds() {
    let l = Leaflet::in_process();
    let map = map(&l);
    let bounds = LatLngBounds::new(LatLng::new(59.0, 10.0), LatLng::new(60.0, 11.0));
    map.fit_bounds(bounds).unwrap();
    assert_eq!(map.center().unwrap(), LatLng::new(59.5, 10.5));
    // span 2 degrees: floor(log2(180))
    assert_eq!(map.zoom().unwrap(), 7.0);
}

#[test]
fn one_popup_open_per_map() {
    let l = Leaflet::in_process();
    let map = map(&l);
    let a = Marker::new(&l, LatLng::new(0.0, 0.0), &MarkerOptions::default()).unwrap();
    let b = Marker::new(&l, LatLng::new(1.0, 1.0), &MarkerOptions::default()).unwrap();
    a.bind_popup("a").unwrap().add_to(&map).unwrap();
    b.bind_popup("b").unwrap().add_to(&map).unwrap();

    a.open_popup().unwrap();
    b.open_popup().unwrap();
    assert!(!a.is_popup_open().unwrap());
    assert!(b.is_popup_open().unwrap());

    map.close_popup().unwrap();
    assert!(!b.is_popup_open().unwrap());
}

#[test]
fn popup_stays_closed_off_the_map() {
    let l = Leaflet::in_process();
    let marker = Marker::new(&l, LatLng::new(0.0, 0.0), &MarkerOptions::default()).unwrap();
    marker.bind_popup("x").unwrap().open_popup().unwrap();
    assert!(!marker.is_popup_open().unwrap());
}

#[test]
fn removing_a_marker_closes_its_popup() {
    let l = Leaflet::in_process();
    let map = map(&l);
    let marker = Marker::new(&l, LatLng::new(0.0, 0.0), &MarkerOptions::default()).unwrap();
    marker.bind_popup("x").unwrap().add_to(&map).unwrap();
    marker.open_popup().unwrap();
    marker.remove_from(&map).unwrap();
    assert!(!marker.is_popup_open().unwrap());
    assert_eq!(map.marker_count().unwrap(), 0);
}

#[test]
fn a_layer_lives_on_one_map_at_a_time() {
    let l = Leaflet::in_process();
    let first = map(&l);
    let second = Map::new(&l, "other", &MapOptions::new()).unwrap();
    let tile = TileLayer::new(&l, OSM, &Options::new()).unwrap();
    tile.add_to(&first).unwrap();
    second.add_layer(&tile).unwrap();
    assert!(!first.has_layer(&tile).unwrap());
    assert!(second.has_layer(&tile).unwrap());
}

#[test]
fn vector_layers_count_as_layers() {
    let l = Leaflet::in_process();
    let map = map(&l);
    let line = Polyline::new(
        &l,
        &[LatLng::new(59.91, 10.75), LatLng::new(59.92, 10.76)],
        &Options::new(),
    )
    .unwrap();
    let circle = Circle::new(
        &l,
        LatLng::new(59.915, 10.754),
        500.0,
        &Options::new().with("color", "red"),
    )
    .unwrap();
    let rect = Rectangle::new(
        &l,
        LatLngBounds::new(LatLng::new(59.9, 10.7), LatLng::new(59.93, 10.8)),
        &Options::new(),
    )
    .unwrap();
    line.add_to(&map).unwrap();
    circle.add_to(&map).unwrap();
    rect.add_to(&map).unwrap();
    assert_eq!(map.layer_count().unwrap(), 3);
    assert_eq!(map.marker_count().unwrap(), 0);
}

#[test]
fn path_bounds_follow_added_points() {
    let l = Leaflet::in_process();
    let line = Polyline::new(&l, &[], &Options::new()).unwrap();
    assert!(line.bounds().is_err());
    line.add_lat_lng(LatLng::new(1.0, 2.0))
        .unwrap()
        .add_lat_lng(LatLng::new(-1.0, 4.0))
        .unwrap();
    let b = line.bounds().unwrap();
    assert_eq!(b.south_west(), LatLng::new(-1.0, 2.0));
    assert_eq!(b.north_east(), LatLng::new(1.0, 4.0));
}

#[test]
fn negative_radius_is_rejected() {
    let l = Leaflet::in_process();
    let circle = Circle::new(&l, LatLng::new(0.0, 0.0), 10.0, &Options::new()).unwrap();
    assert!(circle.set_radius(-1.0).is_err());
    assert_eq!(circle.radius().unwrap(), 10.0);
}

#[test]
fn a_control_is_not_a_layer() {
    let l = Leaflet::in_process();
    let map = map(&l);
    let zoom = leaflet_facade::Zoom::new(&l, &Default::default()).unwrap();
    let err = map.handle().call("addLayer", &[zoom.handle().into()]).unwrap_err();
    assert!(matches!(err, Error::ForeignCall { .. }));
}

#[test]
fn min_zoom_above_default_max_fails_before_the_call() {
    let l = Leaflet::in_process();
    let opts = MapOptions {
        min_zoom: Some(20.0),
        ..MapOptions::new()
    };
    assert!(matches!(
        Map::new(&l, "map", &opts),
        Err(Error::Configuration { ref key, .. }) if key == "minZoom"
    ));
    let opts = MapOptions {
        max_zoom: Some(f64::NAN),
        ..MapOptions::new()
    };
    assert!(matches!(
        Map::new(&l, "map", &opts),
        Err(Error::Configuration { ref key, .. }) if key == "maxZoom"
    ));
    Map::new(&l, "map", &MapOptions::new()).unwrap();
}

#[test]
fn initial_zoom_is_clamped_to_the_limits() {
    let l = Leaflet::in_process();
    let map = Map::new(
        &l,
        "map",
        &MapOptions::new().center(LatLng::new(59.915, 10.754)).zoom(25.0),
    )
    .unwrap();
    assert_eq!(map.zoom().unwrap(), 18.0);

    let opts = MapOptions {
        min_zoom: Some(5.0),
        ..MapOptions::new().zoom(2.0)
    };
    let other = Map::new(&l, "other", &opts).unwrap();
    assert_eq!(other.zoom().unwrap(), 5.0);
}

#[test]
fn nan_center_is_rejected_and_frees_the_container() {
    let l = Leaflet::in_process();
    let opts = MapOptions::new().center(LatLng::new(f64::NAN, 10.754)).zoom(13.0);
    assert!(matches!(
        Map::new(&l, "map", &opts),
        Err(Error::ForeignCall { .. })
    ));
    map(&l);
}

#[test]
fn group_members_follow_the_group_onto_the_map() {
    let l = Leaflet::in_process();
    let map = map(&l);
    let m1 = Marker::new(&l, LatLng::new(59.920, 10.754), &MarkerOptions::titled("marker1")).unwrap();
    let m2 = Marker::new(&l, LatLng::new(59.922, 10.750), &MarkerOptions::titled("marker2")).unwrap();
    let group = LayerGroup::new(&l, &[&m1]).unwrap();

    group.add_to(&map).unwrap();
    assert!(map.has_layer(&m1).unwrap());
    assert_eq!(map.marker_count().unwrap(), 1);
    assert_eq!(map.layer_count().unwrap(), 1);

    group.add_layer(&m2).unwrap();
    assert!(map.has_layer(&m2).unwrap());
    group.remove_layer(&m1).unwrap();
    assert!(!map.has_layer(&m1).unwrap());
    assert_eq!(map.marker_count().unwrap(), 1);

    map.remove_layer(&group).unwrap();
    assert!(!map.has_layer(&m2).unwrap());
    assert_eq!(map.marker_count().unwrap(), 0);
    assert_eq!(map.layer_count().unwrap(), 0);
}

#[test]
fn clearing_a_group_on_the_map_removes_its_members() {
    let l = Leaflet::in_process();
    let map = map(&l);
    let tile = TileLayer::new(&l, OSM, &Options::new()).unwrap();
    let marker = Marker::new(&l, LatLng::new(59.915, 10.754), &MarkerOptions::default()).unwrap();
    let group = LayerGroup::new(&l, &[&tile, &marker]).unwrap();
    group.add_to(&map).unwrap();
    assert_eq!(map.layer_count().unwrap(), 2);

    group.clear_layers().unwrap();
    assert!(map.has_layer(&group).unwrap());
    assert!(!map.has_layer(&tile).unwrap());
    assert_eq!(map.marker_count().unwrap(), 0);
}
