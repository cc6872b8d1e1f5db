//! In-process implementation of the foreign runtime.
//!
//! Reproduces the part of Leaflet's object semantics the wrappers depend on:
//! containment of layers and controls in maps, layer switcher selection,
//! popups and CRS projections. Nothing is rendered.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::crs::CrsKind;
use crate::error::{Error, Result};
use crate::geometry::{LatLng, LatLngBounds};
use crate::options::Options;
use crate::runtime::{ForeignRuntime, HandleId};
use crate::value::Value;

mod args;
mod controls;
mod layers;
mod map;
mod projection;

use args::Args;

/// Foreign classes known to the object model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
enum Class {
    Map,
    TileLayer,
    WmsLayer,
    Marker,
    LayerGroup,
    Polyline,
    Polygon,
    Circle,
    Rectangle,
    LayersControl,
    ZoomControl,
    ScaleControl,
    SearchControl,
    Crs,
}

impl Class {
    fn name(self) -> &'static str {
        match self {
            Class::Map => "Map",
            Class::TileLayer => "TileLayer",
            Class::WmsLayer => "TileLayer.WMS",
            Class::Marker => "Marker",
            Class::LayerGroup => "LayerGroup",
            Class::Polyline => "Polyline",
            Class::Polygon => "Polygon",
            Class::Circle => "Circle",
            Class::Rectangle => "Rectangle",
            Class::LayersControl => "Control.Layers",
            Class::ZoomControl => "Control.Zoom",
            Class::ScaleControl => "Control.Scale",
            Class::SearchControl => "Control.Search",
            Class::Crs => "CRS",
        }
    }

    fn is_layer(self) -> bool {
        matches!(
            self,
            Class::TileLayer
                | Class::WmsLayer
                | Class::Marker
                | Class::LayerGroup
                | Class::Polyline
                | Class::Polygon
                | Class::Circle
                | Class::Rectangle
        )
    }

    fn is_control(self) -> bool {
        matches!(
            self,
            Class::LayersControl | Class::ZoomControl | Class::ScaleControl | Class::SearchControl
        )
    }

    /// Corner used when no `position` option was given.
    fn default_position(self) -> &'static str {
        match self {
            Class::ZoomControl | Class::SearchControl => "topleft",
            Class::ScaleControl => "bottomleft",
            _ => "topright",
        }
    }
}

#[derive(Debug, Serialize)]
struct MapState {
    container: String,
    center: Option<LatLng>,
    zoom: Option<f64>,
    crs: HandleId,
    layers: Vec<HandleId>,
    markers: Vec<HandleId>,
    controls: Vec<HandleId>,
}

#[derive(Debug, Serialize)]
struct MarkerState {
    lat_lng: LatLng,
    popup: Option<String>,
    popup_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum EntryKind {
    Base,
    Overlay,
}

#[derive(Debug, Serialize)]
struct SwitcherEntry {
    name: String,
    layer: HandleId,
    kind: EntryKind,
    selected: bool,
}

#[derive(Debug, Default, Serialize)]
struct SwitcherState {
    entries: Vec<SwitcherEntry>,
    last_z_index: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum State {
    Map(MapState),
    Tile { url: String },
    Marker(MarkerState),
    Path { lat_lngs: Vec<LatLng> },
    Circle { center: LatLng, radius: f64 },
    Rectangle { bounds: LatLngBounds },
    Group { members: Vec<HandleId> },
    Switcher(SwitcherState),
    Control,
    Crs(CrsKind),
}

#[derive(Debug, Serialize)]
struct Object {
    id: HandleId,
    class: Class,
    options: Options,
    /// Map the layer or control is attached to.
    map: Option<HandleId>,
    state: State,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    objects: BTreeMap<HandleId, Object>,
    containers: BTreeSet<String>,
}

/// Single-threaded object model implementing [`ForeignRuntime`].
///
/// Objects are never reclaimed; the model lives as long as the pages it
/// stands in for.
#[derive(Debug, Default)]
pub struct ObjectModel {
    registry: RefCell<Registry>,
}

impl ObjectModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_count(&self) -> usize {
        self.registry.borrow().objects.len()
    }

    /// The whole object graph as JSON, ordered by id.
    pub fn snapshot(&self) -> serde_json::Value {
        let registry = self.registry.borrow();
        let objects: Vec<&Object> = registry.objects.values().collect();
        serde_json::to_value(objects).unwrap_or(serde_json::Value::Null)
    }
}

impl ForeignRuntime for ObjectModel {
    fn create(&self, factory: &str, args: &[Value]) -> Result<HandleId> {
        self.registry
            .borrow_mut()
            .create(factory, Args::new(factory, args))
    }

    fn invoke(&self, target: HandleId, method: &str, args: &[Value]) -> Result<Value> {
        self.registry.borrow_mut().invoke(target, method, args)
    }

    fn class_of(&self, target: HandleId) -> Result<String> {
        let registry = self.registry.borrow();
        Ok(registry.get(target, "class")?.class.name().to_string())
    }
}

fn not_a_function(operation: &str) -> Error {
    Error::foreign(operation, "is not a function")
}

impl Registry {
    fn insert(&mut self, class: Class, options: Options, state: State) -> HandleId {
        self.next_id += 1;
        let id = HandleId::new(self.next_id);
        self.objects.insert(
            id,
            Object {
                id,
                class,
                options,
                map: None,
                state,
            },
        );
        id
    }

    fn get(&self, id: HandleId, operation: &str) -> Result<&Object> {
        self.objects
            .get(&id)
            .ok_or_else(|| Error::foreign(operation, format!("{} is not a live object", id)))
    }

    fn get_mut(&mut self, id: HandleId, operation: &str) -> Result<&mut Object> {
        self.objects
            .get_mut(&id)
            .ok_or_else(|| Error::foreign(operation, format!("{} is not a live object", id)))
    }

    /// Checks that `id` is alive and its class satisfies `accept`.
    fn expect_class(
        &self,
        id: HandleId,
        operation: &str,
        what: &str,
        accept: impl Fn(Class) -> bool,
    ) -> Result<Class> {
        let class = self.get(id, operation)?.class;
        if accept(class) {
            Ok(class)
        } else {
            Err(Error::foreign(
                operation,
                format!("{} is a {}, expected {}", id, class.name(), what),
            ))
        }
    }

    fn expect_layer(&self, id: HandleId, operation: &str) -> Result<Class> {
        self.expect_class(id, operation, "a layer", Class::is_layer)
    }

    fn expect_map(&self, id: HandleId, operation: &str) -> Result<()> {
        self.expect_class(id, operation, "a map", |c| c == Class::Map)
            .map(|_| ())
    }

    fn create(&mut self, factory: &str, a: Args<'_>) -> Result<HandleId> {
        match factory {
            "map" => self.create_map(a),
            "tileLayer" | "tileLayer.wms" => {
                a.arity(1, 2)?;
                let url = a.str(0)?;
                if url.is_empty() {
                    return Err(Error::foreign(factory, "URL template is empty"));
                }
                let options = a.options(1)?;
                let class = if factory == "tileLayer" {
                    Class::TileLayer
                } else {
                    if let Some(crs) = options.get("crs") {
                        let id = crs.as_handle().ok_or_else(|| {
                            Error::foreign(factory, "option `crs` must be a CRS object")
                        })?;
                        self.expect_class(id, factory, "a CRS", |c| c == Class::Crs)?;
                    }
                    Class::WmsLayer
                };
                let state = State::Tile {
                    url: url.to_string(),
                };
                Ok(self.insert(class, options, state))
            }
            "marker" => {
                a.arity(1, 2)?;
                let lat_lng = a.lat_lng(0)?;
                let options = a.options(1)?;
                let state = State::Marker(MarkerState {
                    lat_lng,
                    popup: None,
                    popup_open: false,
                });
                Ok(self.insert(Class::Marker, options, state))
            }
            "layerGroup" => {
                a.arity(0, 1)?;
                let members = a.handles(0)?;
                for id in &members {
                    self.expect_layer(*id, factory)?;
                }
                Ok(self.insert(Class::LayerGroup, Options::new(), State::Group { members }))
            }
            "polyline" | "polygon" => {
                a.arity(1, 2)?;
                let lat_lngs = a.lat_lngs(0)?;
                let options = a.options(1)?;
                let class = if factory == "polyline" {
                    Class::Polyline
                } else {
                    Class::Polygon
                };
                Ok(self.insert(class, options, State::Path { lat_lngs }))
            }
            "circle" => {
                a.arity(2, 3)?;
                let center = a.lat_lng(0)?;
                let radius = a.f64(1)?;
                if !radius.is_finite() || radius < 0.0 {
                    return Err(Error::foreign(factory, format!("invalid radius {}", radius)));
                }
                let options = a.options(2)?;
                Ok(self.insert(Class::Circle, options, State::Circle { center, radius }))
            }
            "rectangle" => {
                a.arity(1, 2)?;
                let bounds = a.bounds(0)?;
                let options = a.options(1)?;
                Ok(self.insert(Class::Rectangle, options, State::Rectangle { bounds }))
            }
            "control.layers" => self.create_switcher(a),
            "control.zoom" | "control.scale" => {
                a.arity(0, 1)?;
                let options = a.options(0)?;
                check_position(&options, factory)?;
                let class = if factory == "control.zoom" {
                    Class::ZoomControl
                } else {
                    Class::ScaleControl
                };
                Ok(self.insert(class, options, State::Control))
            }
            "control.search" => {
                a.arity(1, 1)?;
                let options = a.options(0)?;
                check_position(&options, factory)?;
                let layer = options
                    .get("layer")
                    .and_then(Value::as_handle)
                    .ok_or_else(|| Error::foreign(factory, "option `layer` must be a layer group"))?;
                self.expect_class(layer, factory, "a layer group", |c| c == Class::LayerGroup)?;
                Ok(self.insert(Class::SearchControl, options, State::Control))
            }
            "crs" => {
                a.arity(1, 1)?;
                let kind: CrsKind = a
                    .str(0)?
                    .parse()
                    .map_err(|e: Error| Error::foreign(factory, e.to_string()))?;
                Ok(self.insert(Class::Crs, Options::new(), State::Crs(kind)))
            }
            _ => Err(Error::foreign(factory, "unknown factory")),
        }
    }

    fn invoke(&mut self, target: HandleId, method: &str, args: &[Value]) -> Result<Value> {
        let class = self.get(target, method)?.class;
        let operation = format!("{}.{}", class.name(), method);
        let a = Args::new(&operation, args);
        match method {
            "getOptions" => {
                a.arity(0, 0)?;
                return Ok(Value::Options(self.get(target, &operation)?.options.clone()));
            }
            "addTo" | "removeFrom" if class.is_layer() || class.is_control() => {
                a.arity(1, 1)?;
                let map = a.handle(0)?;
                self.expect_map(map, &operation)?;
                match (method, class.is_layer()) {
                    ("addTo", true) => self.attach_layer(map, target)?,
                    ("addTo", false) => self.attach_control(map, target)?,
                    (_, true) => self.detach_layer(map, target)?,
                    (_, false) => self.detach_control(map, target)?,
                }
                return Ok(Value::Null);
            }
            "setPosition" if class.is_control() => {
                a.arity(1, 1)?;
                let position = a.str(0)?.to_string();
                let options = Options::new().with("position", position);
                check_position(&options, &operation)?;
                self.get_mut(target, &operation)?.options.merge(&options);
                return Ok(Value::Null);
            }
            "getPosition" if class.is_control() => {
                a.arity(0, 0)?;
                let obj = self.get(target, &operation)?;
                let position = obj.options.get_str_or("position", class.default_position());
                return Ok(position.into());
            }
            _ => {}
        }
        match class {
            Class::Map => self.map_method(target, method, &a),
            Class::Marker => self.marker_method(target, method, &a),
            Class::TileLayer | Class::WmsLayer => self.tile_method(target, class, method, &a),
            Class::Polyline | Class::Polygon | Class::Circle | Class::Rectangle => {
                self.vector_method(target, method, &a)
            }
            Class::LayerGroup => self.group_method(target, method, &a),
            Class::LayersControl => self.switcher_method(target, method, &a),
            Class::ZoomControl | Class::ScaleControl | Class::SearchControl => {
                self.control_method(target, class, method, &a)
            }
            Class::Crs => self.crs_method(target, method, &a),
        }
    }
}

/// Rejects a `position` option that is not a map corner.
fn check_position(options: &Options, operation: &str) -> Result<()> {
    match options.get("position") {
        None => Ok(()),
        Some(Value::String(p))
            if matches!(p.as_str(), "topleft" | "topright" | "bottomleft" | "bottomright") =>
        {
            Ok(())
        }
        Some(other) => Err(Error::foreign(
            operation,
            format!("invalid control position {:?}", other),
        )),
    }
}
