use crate::crs::CrsKind;
use crate::error::{Error, Result};
use crate::geometry::LatLngBounds;
use crate::map::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
use crate::options::Options;
use crate::runtime::HandleId;
use crate::value::Value;

use super::args::{check_lat_lng, Args};
use super::{not_a_function, Class, MapState, Registry, State};

impl Registry {
    pub(super) fn create_map(&mut self, a: Args<'_>) -> Result<HandleId> {
        let op = a.operation();
        a.arity(1, 2)?;
        let container = a.str(0)?;
        if container.is_empty() {
            return Err(Error::foreign(op, "Map container not found."));
        }
        if self.containers.contains(container) {
            return Err(Error::foreign(op, "Map container is already initialized."));
        }
        let options = a.options(1)?;
        let crs = match options.get("crs") {
            None | Some(Value::Null) => None,
            Some(Value::Handle(id)) => {
                self.expect_class(*id, op, "a CRS", |c| c == Class::Crs)?;
                Some(*id)
            }
            Some(other) => {
                return Err(Error::foreign(
                    op,
                    format!("option `crs` must be a CRS object, got {}", other.type_name()),
                ))
            }
        };
        let center = match options.get("center") {
            None | Some(Value::Null) => None,
            Some(Value::LatLng(ll)) => {
                check_lat_lng(op, *ll)?;
                Some(*ll)
            }
            Some(other) => {
                return Err(Error::foreign(
                    op,
                    format!("option `center` must be a latlng, got {}", other.type_name()),
                ))
            }
        };
        let zoom = options
            .f64("zoom")
            .map_err(|e| Error::foreign(op, e.to_string()))?;
        if zoom.is_some_and(f64::is_nan) {
            return Err(Error::foreign(op, "option `zoom` is NaN"));
        }
        let min_zoom = options.get_f64_or("minZoom", DEFAULT_MIN_ZOOM);
        let max_zoom = options.get_f64_or("maxZoom", DEFAULT_MAX_ZOOM);
        if !(min_zoom <= max_zoom) {
            return Err(Error::foreign(
                op,
                format!("invalid zoom range {}..{}", min_zoom, max_zoom),
            ));
        }
        let zoom = zoom.map(|z| z.clamp(min_zoom, max_zoom));

        let crs = match crs {
            Some(id) => id,
            None => self.insert(Class::Crs, Options::new(), State::Crs(CrsKind::Epsg3857)),
        };
        self.containers.insert(container.to_string());
        let state = State::Map(MapState {
            container: container.to_string(),
            center,
            zoom,
            crs,
            layers: Vec::new(),
            markers: Vec::new(),
            controls: Vec::new(),
        });
        Ok(self.insert(Class::Map, options, state))
    }

    pub(super) fn map_state(&self, id: HandleId, op: &str) -> Result<&MapState> {
        match &self.get(id, op)?.state {
            State::Map(m) => Ok(m),
            _ => Err(Error::foreign(op, format!("{} is not a map", id))),
        }
    }

    pub(super) fn map_state_mut(&mut self, id: HandleId, op: &str) -> Result<&mut MapState> {
        match &mut self.get_mut(id, op)?.state {
            State::Map(m) => Ok(m),
            _ => Err(Error::foreign(op, format!("{} is not a map", id))),
        }
    }

    /// Zoom limits from the map options.
    pub(super) fn zoom_limits(&self, map: HandleId, op: &str) -> Result<(f64, f64)> {
        let options = &self.get(map, op)?.options;
        Ok((
            options.get_f64_or("minZoom", DEFAULT_MIN_ZOOM),
            options.get_f64_or("maxZoom", DEFAULT_MAX_ZOOM),
        ))
    }

    pub(super) fn set_zoom(&mut self, map: HandleId, zoom: f64, op: &str) -> Result<()> {
        let (min, max) = self.zoom_limits(map, op)?;
        self.map_state_mut(map, op)?.zoom = Some(zoom.clamp(min, max));
        Ok(())
    }

    pub(super) fn map_method(&mut self, id: HandleId, method: &str, a: &Args<'_>) -> Result<Value> {
        let op = a.operation();
        match method {
            "addLayer" | "removeLayer" | "hasLayer" => {
                a.arity(1, 1)?;
                let layer = a.handle(0)?;
                self.expect_layer(layer, op)?;
                match method {
                    "addLayer" => self.attach_layer(id, layer)?,
                    "removeLayer" => self.detach_layer(id, layer)?,
                    _ => return Ok(Value::Bool(self.get(layer, op)?.map == Some(id))),
                }
                Ok(Value::Null)
            }
            "addControl" | "removeControl" => {
                a.arity(1, 1)?;
                let control = a.handle(0)?;
                self.expect_class(control, op, "a control", Class::is_control)?;
                if method == "addControl" {
                    self.attach_control(id, control)?;
                } else {
                    self.detach_control(id, control)?;
                }
                Ok(Value::Null)
            }
            "setView" => {
                a.arity(2, 3)?;
                let center = a.lat_lng(0)?;
                let zoom = a.f64(1)?;
                a.options(2)?;
                self.map_state_mut(id, op)?.center = Some(center);
                self.set_zoom(id, zoom, op)?;
                Ok(Value::Null)
            }
            "setZoom" => {
                a.arity(1, 1)?;
                let zoom = a.f64(0)?;
                self.set_zoom(id, zoom, op)?;
                Ok(Value::Null)
            }
            "getCenter" => {
                a.arity(0, 0)?;
                let map = self.map_state(id, op)?;
                map.center
                    .map(Value::LatLng)
                    .ok_or_else(|| Error::foreign(op, "Set map center and zoom first."))
            }
            "getZoom" => {
                a.arity(0, 0)?;
                let map = self.map_state(id, op)?;
                map.zoom
                    .map(Value::Number)
                    .ok_or_else(|| Error::foreign(op, "Set map center and zoom first."))
            }
            "fitBounds" => {
                a.arity(1, 2)?;
                let bounds = a.bounds(0)?;
                let (_, max) = self.zoom_limits(id, op)?;
                self.map_state_mut(id, op)?.center = Some(bounds.center());
                self.set_zoom(id, bounds_zoom(&bounds, max), op)?;
                Ok(Value::Null)
            }
            "closePopup" => {
                a.arity(0, 0)?;
                self.close_popups(id, op)?;
                Ok(Value::Null)
            }
            "getLayers" | "getMarkers" | "getControls" => {
                a.arity(0, 0)?;
                let map = self.map_state(id, op)?;
                let ids = match method {
                    "getLayers" => &map.layers,
                    "getMarkers" => &map.markers,
                    _ => &map.controls,
                };
                Ok(Value::List(ids.iter().copied().map(Value::Handle).collect()))
            }
            "getCrs" => {
                a.arity(0, 0)?;
                Ok(Value::Handle(self.map_state(id, op)?.crs))
            }
            "getContainer" => {
                a.arity(0, 0)?;
                Ok(self.map_state(id, op)?.container.as_str().into())
            }
            _ => Err(not_a_function(op)),
        }
    }

    /// Puts `layer` on `map`, taking it off any other map first. The members
    /// of a group go with it.
    pub(super) fn attach_layer(&mut self, map: HandleId, layer: HandleId) -> Result<()> {
        let op = "addLayer";
        let obj = self.get(layer, op)?;
        let (class, current_map) = (obj.class, obj.map);
        match current_map {
            Some(current) if current == map => return Ok(()),
            Some(other) => self.detach_layer(other, layer)?,
            None => {}
        }
        let state = self.map_state_mut(map, op)?;
        if class == Class::Marker {
            state.markers.push(layer);
        } else {
            state.layers.push(layer);
        }
        self.get_mut(layer, op)?.map = Some(map);
        for member in self.group_members(layer) {
            self.attach_layer(map, member)?;
        }
        self.refresh_switchers(map)
    }

    /// Takes `layer` off `map`. Layers that are not on it are left alone.
    pub(super) fn detach_layer(&mut self, map: HandleId, layer: HandleId) -> Result<()> {
        let op = "removeLayer";
        if self.get(layer, op)?.map != Some(map) {
            return Ok(());
        }
        let state = self.map_state_mut(map, op)?;
        state.layers.retain(|id| *id != layer);
        state.markers.retain(|id| *id != layer);
        let obj = self.get_mut(layer, op)?;
        obj.map = None;
        if let State::Marker(marker) = &mut obj.state {
            marker.popup_open = false;
        }
        for member in self.group_members(layer) {
            self.detach_layer(map, member)?;
        }
        self.refresh_switchers(map)
    }

    fn group_members(&self, layer: HandleId) -> Vec<HandleId> {
        match self.objects.get(&layer).map(|o| &o.state) {
            Some(State::Group { members }) => members.clone(),
            _ => Vec::new(),
        }
    }

    pub(super) fn attach_control(&mut self, map: HandleId, control: HandleId) -> Result<()> {
        let op = "addControl";
        let current_map = self.get(control, op)?.map;
        match current_map {
            Some(current) if current == map => return Ok(()),
            Some(other) => self.detach_control(other, control)?,
            None => {}
        }
        self.map_state_mut(map, op)?.controls.push(control);
        self.get_mut(control, op)?.map = Some(map);
        if self.get(control, op)?.class == Class::LayersControl {
            self.sync_switcher(control)?;
        }
        Ok(())
    }

    pub(super) fn detach_control(&mut self, map: HandleId, control: HandleId) -> Result<()> {
        let op = "removeControl";
        if self.get(control, op)?.map != Some(map) {
            return Ok(());
        }
        self.map_state_mut(map, op)?
            .controls
            .retain(|id| *id != control);
        self.get_mut(control, op)?.map = None;
        Ok(())
    }

    /// Re-reads the checkbox state of every layer switcher on `map`.
    fn refresh_switchers(&mut self, map: HandleId) -> Result<()> {
        let switchers: Vec<HandleId> = self
            .map_state(map, "refresh")?
            .controls
            .iter()
            .copied()
            .filter(|id| {
                self.objects
                    .get(id)
                    .is_some_and(|o| o.class == Class::LayersControl)
            })
            .collect();
        for id in switchers {
            self.sync_switcher(id)?;
        }
        Ok(())
    }

    pub(super) fn close_popups(&mut self, map: HandleId, op: &str) -> Result<()> {
        let markers = self.map_state(map, op)?.markers.clone();
        for id in markers {
            if let State::Marker(marker) = &mut self.get_mut(id, op)?.state {
                marker.popup_open = false;
            }
        }
        Ok(())
    }
}

/// Highest zoom at which `bounds` fits a 256 pixel world tile.
fn bounds_zoom(bounds: &LatLngBounds, max_zoom: f64) -> f64 {
    let sw = bounds.south_west();
    let ne = bounds.north_east();
    let span = (ne.lng - sw.lng).max(2.0 * (ne.lat - sw.lat));
    if span <= 0.0 {
        return max_zoom;
    }
    (360.0 / span).log2().floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LatLng;

    #[test]
    fn whole_world_fits_at_zoom_zero() {
        let b = LatLngBounds::new(LatLng::new(-90.0, -180.0), LatLng::new(90.0, 180.0));
        assert_eq!(bounds_zoom(&b, 18.0), 0.0);
    }

    #[test]
    fn point_bounds_use_max_zoom() {
        let p = LatLng::new(59.9, 10.7);
        assert_eq!(bounds_zoom(&LatLngBounds::new(p, p), 17.0), 17.0);
    }
}
