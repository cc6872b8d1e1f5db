//! The demo page: a map over Oslo with two base layers, marker groups, vector
//! shapes and every control.

use std::rc::Rc;

use leaflet_facade::controls::{ScaleOptions, SearchOptions, ZoomOptions};
use leaflet_facade::{
    Circle, Control, Crs, CrsKind, JsObject, LatLng, LatLngBounds, Layer, LayerGroup,
    LayersControl, LayersOptions, Leaflet, Map, MapOptions, Marker, MarkerOptions, ObjectModel,
    Options, Polyline, Position, Rectangle, Scale, Search, TileLayer, WmsLayer, Zoom,
};
use serde::{Deserialize, Serialize};

const ATTRIBUTION: &str =
    "Map data &copy; 2011 OpenStreetMap contributors, Imagery &copy; 2011 CloudMade";

/// Settings of the demo page, read from JSON. Missing keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleConfig {
    pub container: String,
    pub tile_url: String,
    pub wms_url: String,
    pub wms_layers: String,
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for ExampleConfig {
    fn default() -> Self {
        Self {
            container: "map".to_string(),
            tile_url: "http://{s}.tile.cloudmade.com/BC9A493B41014CAABB98F0471D759707/997/256/{z}/{x}/{y}.png"
                .to_string(),
            wms_url: "http://wms.latlon.org".to_string(),
            wms_layers: "osm".to_string(),
            center: LatLng::new(59.915, 10.754),
            zoom: 13.0,
        }
    }
}

pub fn read_config(path: &str) -> std::io::Result<ExampleConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config: ExampleConfig = serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(config)
}

/// Everything the demo page created. Dropping it releases nothing in the
/// object model.
#[derive(Debug)]
pub struct Example {
    pub model: Rc<ObjectModel>,
    pub map: Map,
    pub tile: TileLayer,
    pub wms: WmsLayer,
    pub groups: [LayerGroup; 2],
    pub layers: LayersControl,
    pub marker: Marker,
    pub polyline: Polyline,
    pub circle: Circle,
    pub rectangle: Rectangle,
    pub scale: Scale,
    pub zoom: Zoom,
    pub search: Search,
}

/// What ended up on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub layers: usize,
    pub markers: usize,
    pub controls: usize,
    pub selected: Vec<String>,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Layers: {}", self.layers)?;
        writeln!(f, "Markers: {}", self.markers)?;
        writeln!(f, "Controls: {}", self.controls)?;
        write!(f, "Selected: {}", self.selected.join(", "))
    }
}

pub fn bootstrap() -> leaflet_facade::Result<Example> {
    bootstrap_with(&ExampleConfig::default())
}

pub fn bootstrap_with(config: &ExampleConfig) -> leaflet_facade::Result<Example> {
    let model = Rc::new(ObjectModel::new());
    let l = Leaflet::new(model.clone());

    let map = Map::new(
        &l,
        &config.container,
        &MapOptions::new().center(LatLng::new(0.0, 0.0)).zoom(13.0),
    )?;

    let tile = TileLayer::new(
        &l,
        &config.tile_url,
        &Options::new().with("attribution", ATTRIBUTION),
    )?;
    let world_mercator = Crs::new(&l, CrsKind::Epsg3395)?;
    let wms = WmsLayer::new(
        &l,
        &config.wms_url,
        &Options::new()
            .with("layers", config.wms_layers.as_str())
            .with("attribution", ATTRIBUTION)
            .with("crs", world_mercator.handle()),
    )?;

    let titled = |lat, lng, title| Marker::new(&l, LatLng::new(lat, lng), &MarkerOptions::titled(title));
    let m1 = titled(59.920, 10.754, "marker1")?;
    let m2 = titled(59.922, 10.750, "marker2")?;
    let m3 = titled(59.924, 10.752, "marker3")?;
    let m4 = titled(59.926, 10.756, "marker4")?;
    let groups = [
        LayerGroup::new(&l, &[&m1, &m2])?,
        LayerGroup::new(&l, &[&m3, &m4])?,
    ];

    let bases = Options::new()
        .with("WMS", wms.handle())
        .with("Tile", tile.handle());
    let overlays = Options::new()
        .with("Group marker 1", groups[0].handle())
        .with("Group marker 2", groups[1].handle());
    let layers = LayersControl::new(
        &l,
        &bases,
        &overlays,
        &LayersOptions {
            position: Position::BottomRight,
            ..LayersOptions::default()
        },
    )?;
    layers.add_to(&map)?;

    let marker = Marker::new(&l, config.center, &MarkerOptions::default())?;
    marker.add_to(&map)?;
    marker.bind_popup("<b>Here is a simple popup<b>")?;
    map.set_view(config.center, config.zoom, false)?;
    map.add_layer(&tile)?;

    let polyline = Polyline::new(
        &l,
        &[
            LatLng::new(59.915, 10.759),
            LatLng::new(59.900, 10.800),
            LatLng::new(59.990, 10.800),
        ],
        &Options::new(),
    )?;
    polyline.add_to(&map)?;

    let circle = Circle::new(&l, config.center, 200.0, &Options::new().with("color", "red"))?;
    circle.add_to(&map)?;

    let bounds = LatLngBounds::from_points(&[LatLng::new(59.900, 10.705), LatLng::new(59.910, 10.710)])?;
    let rectangle = Rectangle::new(&l, bounds, &Options::new())?;
    rectangle.add_to(&map)?;

    let scale = Scale::new(&l, &ScaleOptions::default())?;
    scale.add_to(&map)?;

    let zoom = Zoom::new(
        &l,
        &ZoomOptions {
            position: Position::TopRight,
            ..ZoomOptions::default()
        },
    )?;
    zoom.add_to(&map)?;

    let search = Search::new(
        &l,
        &SearchOptions {
            search_layer: Some(groups[0].clone()),
            zoom: Some(15.0),
            text: "Search Area".to_string(),
            text_err: "Not found".to_string(),
            position: Position::TopRight,
        },
    )?;
    search.add_to(&map)?;

    log::info!("example page ready with {} objects", model.object_count());
    Ok(Example {
        model,
        map,
        tile,
        wms,
        groups,
        layers,
        marker,
        polyline,
        circle,
        rectangle,
        scale,
        zoom,
        search,
    })
}

impl Example {
    pub fn summary(&self) -> leaflet_facade::Result<Summary> {
        Ok(Summary {
            layers: self.map.layer_count()?,
            markers: self.map.marker_count()?,
            controls: self.map.control_count()?,
            selected: self.layers.selected()?,
        })
    }
}
