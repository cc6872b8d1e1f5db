use crate::error::{Error, Result};
use crate::geometry::LatLngBounds;
use crate::runtime::HandleId;
use crate::value::Value;

use super::args::Args;
use super::{not_a_function, Class, Registry, State};

impl Registry {
    pub(super) fn marker_method(&mut self, id: HandleId, method: &str, a: &Args<'_>) -> Result<Value> {
        let op = a.operation();
        if method == "openPopup" {
            a.arity(0, 0)?;
            let obj = self.get(id, op)?;
            let map = obj.map;
            let has_popup = matches!(&obj.state, State::Marker(m) if m.popup.is_some());
            if let (Some(map), true) = (map, has_popup) {
                self.close_popups(map, op)?;
                if let State::Marker(m) = &mut self.get_mut(id, op)?.state {
                    m.popup_open = true;
                }
            }
            return Ok(Value::Null);
        }
        let obj = self.get_mut(id, op)?;
        let State::Marker(marker) = &mut obj.state else {
            return Err(not_a_function(op));
        };
        match method {
            "bindPopup" => {
                a.arity(1, 1)?;
                marker.popup = Some(a.str(0)?.to_string());
                Ok(Value::Null)
            }
            "unbindPopup" => {
                a.arity(0, 0)?;
                marker.popup = None;
                marker.popup_open = false;
                Ok(Value::Null)
            }
            "closePopup" => {
                a.arity(0, 0)?;
                marker.popup_open = false;
                Ok(Value::Null)
            }
            "isPopupOpen" => {
                a.arity(0, 0)?;
                Ok(Value::Bool(marker.popup_open))
            }
            "getPopupContent" => {
                a.arity(0, 0)?;
                Ok(marker.popup.clone().into())
            }
            "setLatLng" => {
                a.arity(1, 1)?;
                marker.lat_lng = a.lat_lng(0)?;
                Ok(Value::Null)
            }
            "getLatLng" => {
                a.arity(0, 0)?;
                Ok(Value::LatLng(marker.lat_lng))
            }
            "setOpacity" | "setZIndexOffset" => {
                a.arity(1, 1)?;
                let n = a.f64(0)?;
                let key = if method == "setOpacity" {
                    "opacity"
                } else {
                    "zIndexOffset"
                };
                obj.options.set(key, n);
                Ok(Value::Null)
            }
            _ => Err(not_a_function(op)),
        }
    }

    pub(super) fn tile_method(
        &mut self,
        id: HandleId,
        class: Class,
        method: &str,
        a: &Args<'_>,
    ) -> Result<Value> {
        let op = a.operation();
        let obj = self.get_mut(id, op)?;
        let State::Tile { url } = &mut obj.state else {
            return Err(not_a_function(op));
        };
        match method {
            "setUrl" => {
                a.arity(1, 1)?;
                let new_url = a.str(0)?;
                if new_url.is_empty() {
                    return Err(Error::foreign(op, "URL template is empty"));
                }
                *url = new_url.to_string();
                Ok(Value::Null)
            }
            "getUrl" => {
                a.arity(0, 0)?;
                Ok(url.as_str().into())
            }
            "setOpacity" => {
                a.arity(1, 1)?;
                let opacity = a.f64(0)?;
                obj.options.set("opacity", opacity);
                Ok(Value::Null)
            }
            "setZIndex" => {
                a.arity(1, 1)?;
                let z = a.f64(0)?;
                obj.options.set("zIndex", z);
                Ok(Value::Null)
            }
            "getZIndex" => {
                a.arity(0, 0)?;
                Ok(obj.options.get("zIndex").cloned().unwrap_or_default())
            }
            "setParams" if class == Class::WmsLayer => {
                a.arity(1, 1)?;
                let params = a.options(0)?;
                obj.options.merge(&params);
                Ok(Value::Null)
            }
            _ => Err(not_a_function(op)),
        }
    }

    pub(super) fn vector_method(&mut self, id: HandleId, method: &str, a: &Args<'_>) -> Result<Value> {
        let op = a.operation();
        let obj = self.get_mut(id, op)?;
        if method == "setStyle" {
            a.arity(1, 1)?;
            let style = a.options(0)?;
            obj.options.merge(&style);
            return Ok(Value::Null);
        }
        match (&mut obj.state, method) {
            (State::Path { lat_lngs }, "addLatLng") => {
                a.arity(1, 1)?;
                lat_lngs.push(a.lat_lng(0)?);
                Ok(Value::Null)
            }
            (State::Path { lat_lngs }, "setLatLngs") => {
                a.arity(1, 1)?;
                *lat_lngs = a.lat_lngs(0)?;
                Ok(Value::Null)
            }
            (State::Path { lat_lngs }, "getLatLngs") => {
                a.arity(0, 0)?;
                Ok(lat_lngs.as_slice().into())
            }
            (State::Path { lat_lngs }, "getBounds") => {
                a.arity(0, 0)?;
                let bounds = LatLngBounds::from_points(lat_lngs)
                    .map_err(|_| Error::foreign(op, "path has no points"))?;
                Ok(bounds.into())
            }
            (State::Circle { radius, .. }, "setRadius") => {
                a.arity(1, 1)?;
                let r = a.f64(0)?;
                if !r.is_finite() || r < 0.0 {
                    return Err(Error::foreign(op, format!("invalid radius {}", r)));
                }
                *radius = r;
                Ok(Value::Null)
            }
            (State::Circle { radius, .. }, "getRadius") => {
                a.arity(0, 0)?;
                Ok(Value::Number(*radius))
            }
            (State::Circle { center, .. }, "setLatLng") => {
                a.arity(1, 1)?;
                *center = a.lat_lng(0)?;
                Ok(Value::Null)
            }
            (State::Circle { center, .. }, "getLatLng") => {
                a.arity(0, 0)?;
                Ok(Value::LatLng(*center))
            }
            (State::Rectangle { bounds }, "setBounds") => {
                a.arity(1, 1)?;
                *bounds = a.bounds(0)?;
                Ok(Value::Null)
            }
            (State::Rectangle { bounds }, "getBounds") => {
                a.arity(0, 0)?;
                Ok(Value::Bounds(*bounds))
            }
            _ => Err(not_a_function(op)),
        }
    }

    pub(super) fn group_method(&mut self, id: HandleId, method: &str, a: &Args<'_>) -> Result<Value> {
        let op = a.operation();
        let layer = match method {
            "addLayer" | "removeLayer" | "hasLayer" => {
                a.arity(1, 1)?;
                let layer = a.handle(0)?;
                self.expect_layer(layer, op)?;
                if layer == id {
                    return Err(Error::foreign(op, "a group cannot contain itself"));
                }
                Some(layer)
            }
            _ => None,
        };
        let obj = self.get_mut(id, op)?;
        let on_map = obj.map;
        let State::Group { members } = &mut obj.state else {
            return Err(not_a_function(op));
        };
        let (joined, left) = match (method, layer) {
            ("addLayer", Some(layer)) => {
                if !members.contains(&layer) {
                    members.push(layer);
                }
                (vec![layer], Vec::new())
            }
            ("removeLayer", Some(layer)) => {
                if !members.contains(&layer) {
                    return Ok(Value::Null);
                }
                members.retain(|m| *m != layer);
                (Vec::new(), vec![layer])
            }
            ("hasLayer", Some(layer)) => return Ok(Value::Bool(members.contains(&layer))),
            ("clearLayers", _) => {
                a.arity(0, 0)?;
                (Vec::new(), std::mem::take(members))
            }
            ("getLayers", _) => {
                a.arity(0, 0)?;
                return Ok(Value::List(members.iter().copied().map(Value::Handle).collect()));
            }
            _ => return Err(not_a_function(op)),
        };
        // Members of a group on a map are on that map too.
        if let Some(map) = on_map {
            for layer in joined {
                self.attach_layer(map, layer)?;
            }
            for layer in left {
                self.detach_layer(map, layer)?;
            }
        }
        Ok(Value::Null)
    }
}
