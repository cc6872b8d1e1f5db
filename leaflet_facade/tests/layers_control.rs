use leaflet_facade::{
    Control, Error, JsObject, LatLng, Layer, LayerGroup, LayersControl, LayersOptions, Leaflet,
    Map, MapOptions, Marker, MarkerOptions, Options, Position, TileLayer, WmsLayer,
};

const OSM: &str = "http://{s}.tile.osm.org/{z}/{x}/{y}.png";
const WMS: &str = "http://wms.geonorge.no/skwms1/wms.topo2";

struct Fixture {
    l: Leaflet,
    tile: TileLayer,
    wms: WmsLayer,
    group: LayerGroup,
    control: LayersControl,
}

fn fixture(options: &LayersOptions) -> Fixture {
    let _ = env_logger::builder().is_test(true).try_init();
    let l = Leaflet::in_process();
    let tile = TileLayer::new(&l, OSM, &Options::new()).unwrap();
    let wms = WmsLayer::new(&l, WMS, &Options::new().with("layers", "topo2_WMS")).unwrap();
    let marker = Marker::new(&l, LatLng::new(59.9, 10.7), &MarkerOptions::titled("Oslo")).unwrap();
    let group = LayerGroup::new(&l, &[&marker]).unwrap();
    let bases = Options::new()
        .with("Tile", tile.handle())
        .with("WMS", wms.handle());
    let overlays = Options::new().with("Markers", group.handle());
    let control = LayersControl::new(&l, &bases, &overlays, options).unwrap();
    Fixture {
        l,
        tile,
        wms,
        group,
        control,
    }
}

#[test]
fn entries_keep_registration_order() {
    let f = fixture(&LayersOptions::default());
    assert_eq!(f.control.base_layers().unwrap(), vec!["Tile", "WMS"]);
    assert_eq!(f.control.overlays().unwrap(), vec!["Markers"]);
    assert!(f.control.selected().unwrap().is_empty());
}

#[test]
fn add_then_remove_by_name() {
    let f = fixture(&LayersOptions::default());
    let extra = TileLayer::new(&f.l, OSM, &Options::new()).unwrap();
    f.control.add_overlay(&extra, "Extra").unwrap();
    assert!(f.control.overlays().unwrap().contains(&"Extra".to_string()));

    f.control.remove_layer("Extra").unwrap();
    assert!(!f.control.overlays().unwrap().contains(&"Extra".to_string()));
    assert!(!f.control.base_layers().unwrap().contains(&"Extra".to_string()));
}

#[test]
fn removing_an_unknown_name_is_a_no_op() {
    let f = fixture(&LayersOptions::default());
    f.control.remove_layer("Nope").unwrap();
    f.control.remove_layer("Nope").unwrap();
    assert_eq!(f.control.base_layers().unwrap(), vec!["Tile", "WMS"]);
    assert_eq!(f.control.overlays().unwrap(), vec!["Markers"]);
}

#[test]
fn reusing_a_name_replaces_the_entry() {
    let f = fixture(&LayersOptions::default());
    let other = TileLayer::new(&f.l, OSM, &Options::new()).unwrap();
    f.control.add_base_layer(&other, "Tile").unwrap();
    assert_eq!(f.control.base_layers().unwrap(), vec!["Tile", "WMS"]);
}

#[test]
fn selecting_a_base_deselects_only_the_previous_base() {
    let f = fixture(&LayersOptions::default());
    f.control.select("Tile").unwrap().select("Markers").unwrap();
    assert_eq!(f.control.selected().unwrap(), vec!["Tile", "Markers"]);

    f.control.select("WMS").unwrap();
    assert_eq!(f.control.selected().unwrap(), vec!["WMS", "Markers"]);
}

#[test]
fn base_layers_cannot_be_unchecked() {
    let f = fixture(&LayersOptions::default());
    f.control.select("Tile").unwrap();
    let err = f.control.deselect("Tile").unwrap_err();
    assert!(matches!(err, Error::ForeignCall { .. }));
    assert_eq!(f.control.selected().unwrap(), vec!["Tile"]);

    f.control.select("Markers").unwrap().deselect("Markers").unwrap();
    assert_eq!(f.control.selected().unwrap(), vec!["Tile"]);
}

#[test]
fn selecting_an_unknown_name_fails() {
    let f = fixture(&LayersOptions::default());
    assert!(f.control.select("Nope").is_err());
}

#[test]
fn default_options() {
    let f = fixture(&LayersOptions::default());
    let opts = f.control.options().unwrap();
    assert_eq!(opts.position, Position::TopRight);
    assert!(opts.collapsed);
    assert!(opts.auto_z_index);
    assert_eq!(f.control.position().unwrap(), Position::TopRight);
}

#[test]
fn overriding_position_changes_only_position() {
    let f = fixture(&LayersOptions::default());
    f.control
        .set_options(&Options::new().with("position", "bottomright"))
        .unwrap();
    assert_eq!(
        f.control.options().unwrap(),
        LayersOptions {
            position: Position::BottomRight,
            ..LayersOptions::default()
        }
    );
}

#[test]
fn invalid_position_is_rejected_before_the_call() {
    let f = fixture(&LayersOptions::default());
    let err = f
        .control
        .set_options(&Options::new().with("position", "center"))
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert_eq!(f.control.position().unwrap(), Position::TopRight);
}

#[test]
fn set_collapsed_is_visible_in_options() {
    let f = fixture(&LayersOptions::default());
    f.control.set_collapsed(false).unwrap();
    assert!(!f.control.options().unwrap().collapsed);
}

#[test]
fn attaching_syncs_from_map_membership() {
    let f = fixture(&LayersOptions::default());
    let map = Map::new(&f.l, "map", &MapOptions::new()).unwrap();
    f.tile.add_to(&map).unwrap();
    f.control.add_to(&map).unwrap();
    assert_eq!(f.control.selected().unwrap(), vec!["Tile"]);
}

#[test]
fn selection_moves_layers_on_the_map() {
    let f = fixture(&LayersOptions::default());
    let map = Map::new(&f.l, "map", &MapOptions::new()).unwrap();
    f.tile.add_to(&map).unwrap();
    f.control.add_to(&map).unwrap();

    f.control.select("WMS").unwrap();
    assert!(!map.has_layer(&f.tile).unwrap());
    assert!(map.has_layer(&f.wms).unwrap());

    f.control.select("Markers").unwrap();
    assert!(map.has_layer(&f.group).unwrap());
    assert_eq!(map.marker_count().unwrap(), 1);
    f.control.deselect("Markers").unwrap();
    assert!(!map.has_layer(&f.group).unwrap());
    assert_eq!(map.marker_count().unwrap(), 0);
    assert_eq!(f.control.selected().unwrap(), vec!["WMS"]);
}

#[test]
fn removing_a_layer_from_the_map_unchecks_it() {
    let f = fixture(&LayersOptions::default());
    let map = Map::new(&f.l, "map", &MapOptions::new()).unwrap();
    f.control.add_to(&map).unwrap();
    f.control.select("Tile").unwrap().select("Markers").unwrap();

    map.remove_layer(&f.group).unwrap();
    assert_eq!(f.control.selected().unwrap(), vec!["Tile"]);
}

#[test]
fn auto_z_index_follows_registration_order() {
    let f = fixture(&LayersOptions::default());
    assert_eq!(f.tile.z_index().unwrap(), Some(1.0));
    assert_eq!(f.wms.z_index().unwrap(), Some(2.0));

    let late = TileLayer::new(&f.l, OSM, &Options::new()).unwrap();
    f.control.add_overlay(&late, "Late").unwrap();
    assert_eq!(late.z_index().unwrap(), Some(4.0));
}

#[test]
fn auto_z_index_can_be_turned_off() {
    let f = fixture(&LayersOptions {
        auto_z_index: false,
        ..LayersOptions::default()
    });
    assert_eq!(f.tile.z_index().unwrap(), None);
    assert_eq!(f.wms.z_index().unwrap(), None);
}
