use crate::error::{Error, Result};
use crate::geometry::EARTH_RADIUS;
use crate::runtime::HandleId;
use crate::value::Value;

use super::args::Args;
use super::{
    check_position, not_a_function, Class, EntryKind, Registry, State, SwitcherEntry,
    SwitcherState,
};

const FEET_PER_METER: f64 = 3.2808399;
const FEET_PER_MILE: f64 = 5280.0;

impl Registry {
    pub(super) fn create_switcher(&mut self, a: Args<'_>) -> Result<HandleId> {
        let op = a.operation();
        a.arity(0, 3)?;
        let bases = a.options(0)?;
        let overlays = a.options(1)?;
        let mut options = a.options(2)?;
        check_position(&options, op)?;
        for key in ["collapsed", "autoZIndex"] {
            options
                .bool(key)
                .map_err(|e| Error::foreign(op, e.to_string()))?;
        }

        let mut entries = Vec::new();
        for (kind, set) in [(EntryKind::Base, &bases), (EntryKind::Overlay, &overlays)] {
            for (name, value) in set.iter() {
                let layer = value.as_handle().ok_or_else(|| {
                    Error::foreign(op, format!("entry `{}` is not a layer", name))
                })?;
                self.expect_layer(layer, op)?;
                entries.push((name.to_string(), layer, kind));
            }
        }

        for (key, default) in [
            ("position", Value::from("topright")),
            ("collapsed", Value::Bool(true)),
            ("autoZIndex", Value::Bool(true)),
        ] {
            if !options.contains_key(key) {
                options.set(key, default);
            }
        }
        let id = self.insert(
            Class::LayersControl,
            options,
            State::Switcher(SwitcherState::default()),
        );
        for (name, layer, kind) in entries {
            self.register(id, name, layer, kind, op)?;
        }
        Ok(id)
    }

    fn switcher_state_mut(&mut self, id: HandleId, op: &str) -> Result<&mut SwitcherState> {
        match &mut self.get_mut(id, op)?.state {
            State::Switcher(s) => Ok(s),
            _ => Err(Error::foreign(op, format!("{} is not a layer switcher", id))),
        }
    }

    fn switcher_state(&self, id: HandleId, op: &str) -> Result<&SwitcherState> {
        match &self.get(id, op)?.state {
            State::Switcher(s) => Ok(s),
            _ => Err(Error::foreign(op, format!("{} is not a layer switcher", id))),
        }
    }

    /// Adds an entry, replacing any entry with the same name.
    fn register(
        &mut self,
        id: HandleId,
        name: String,
        layer: HandleId,
        kind: EntryKind,
        op: &str,
    ) -> Result<()> {
        if self.get(id, op)?.options.get_bool_or("autoZIndex", true) {
            let state = self.switcher_state_mut(id, op)?;
            state.last_z_index += 1;
            let z = state.last_z_index;
            let target = self.get_mut(layer, op)?;
            if matches!(target.class, Class::TileLayer | Class::WmsLayer) {
                target.options.set("zIndex", z);
            }
        }
        let entry = SwitcherEntry {
            name,
            layer,
            kind,
            selected: false,
        };
        let state = self.switcher_state_mut(id, op)?;
        match state.entries.iter().position(|e| e.name == entry.name) {
            Some(i) => state.entries[i] = entry,
            None => state.entries.push(entry),
        }
        self.sync_switcher(id)
    }

    /// Derives the checkbox state from what is on the switcher's map. At most
    /// one base layer stays selected, preferring the current one.
    pub(super) fn sync_switcher(&mut self, id: HandleId) -> Result<()> {
        let op = "sync";
        let Some(map) = self.get(id, op)?.map else {
            return Ok(());
        };
        let on_map: Vec<bool> = self
            .switcher_state(id, op)?
            .entries
            .iter()
            .map(|e| self.objects.get(&e.layer).is_some_and(|o| o.map == Some(map)))
            .collect();
        let state = self.switcher_state_mut(id, op)?;
        let is_base = |i: usize| state.entries[i].kind == EntryKind::Base;
        let current = (0..on_map.len()).find(|&i| is_base(i) && state.entries[i].selected);
        let chosen = match current {
            Some(i) if on_map[i] => Some(i),
            _ => (0..on_map.len()).find(|&i| is_base(i) && on_map[i]),
        };
        for (i, entry) in state.entries.iter_mut().enumerate() {
            entry.selected = match entry.kind {
                EntryKind::Base => Some(i) == chosen,
                EntryKind::Overlay => on_map[i],
            };
        }
        Ok(())
    }

    pub(super) fn switcher_method(&mut self, id: HandleId, method: &str, a: &Args<'_>) -> Result<Value> {
        let op = a.operation();
        match method {
            "addBaseLayer" | "addOverlay" => {
                a.arity(2, 2)?;
                let layer = a.handle(0)?;
                self.expect_layer(layer, op)?;
                let name = a.str(1)?.to_string();
                let kind = if method == "addBaseLayer" {
                    EntryKind::Base
                } else {
                    EntryKind::Overlay
                };
                self.register(id, name, layer, kind, op)?;
                Ok(Value::Null)
            }
            "removeLayer" => {
                a.arity(1, 1)?;
                let name = a.str(0)?;
                let state = self.switcher_state_mut(id, op)?;
                let before = state.entries.len();
                state.entries.retain(|e| e.name != name);
                Ok(Value::Bool(state.entries.len() != before))
            }
            "select" => {
                a.arity(1, 1)?;
                self.select(id, a.str(0)?, op)?;
                Ok(Value::Null)
            }
            "deselect" => {
                a.arity(1, 1)?;
                self.deselect(id, a.str(0)?, op)?;
                Ok(Value::Null)
            }
            "setCollapsed" => {
                a.arity(1, 1)?;
                let collapsed = a.bool(0)?;
                self.get_mut(id, op)?.options.set("collapsed", collapsed);
                Ok(Value::Null)
            }
            "setOptions" => {
                a.arity(1, 1)?;
                let options = a.options(0)?;
                check_position(&options, op)?;
                self.get_mut(id, op)?.options.merge(&options);
                Ok(Value::Null)
            }
            "getSelected" | "getBaseLayers" | "getOverlays" => {
                a.arity(0, 0)?;
                let state = self.switcher_state(id, op)?;
                let names = |kind: EntryKind, only_selected: bool| {
                    state
                        .entries
                        .iter()
                        .filter(move |e| e.kind == kind && (!only_selected || e.selected))
                        .map(|e| Value::from(e.name.as_str()))
                };
                let list: Vec<Value> = match method {
                    "getSelected" => names(EntryKind::Base, true)
                        .chain(names(EntryKind::Overlay, true))
                        .collect(),
                    "getBaseLayers" => names(EntryKind::Base, false).collect(),
                    _ => names(EntryKind::Overlay, false).collect(),
                };
                Ok(Value::List(list))
            }
            _ => Err(not_a_function(op)),
        }
    }

    fn find_entry(&self, id: HandleId, name: &str, op: &str) -> Result<(usize, EntryKind, HandleId)> {
        self.switcher_state(id, op)?
            .entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.name == name)
            .map(|(i, e)| (i, e.kind, e.layer))
            .ok_or_else(|| Error::foreign(op, format!("no layer named `{}`", name)))
    }

    fn select(&mut self, id: HandleId, name: &str, op: &str) -> Result<()> {
        let (index, kind, layer) = self.find_entry(id, name, op)?;
        let map = self.get(id, op)?.map;
        if kind == EntryKind::Base {
            if let Some(map) = map {
                let others: Vec<HandleId> = self
                    .switcher_state(id, op)?
                    .entries
                    .iter()
                    .filter(|e| e.kind == EntryKind::Base && e.layer != layer)
                    .map(|e| e.layer)
                    .collect();
                for other in others {
                    self.detach_layer(map, other)?;
                }
                self.attach_layer(map, layer)?;
            }
            for (i, entry) in self.switcher_state_mut(id, op)?.entries.iter_mut().enumerate() {
                if entry.kind == EntryKind::Base {
                    entry.selected = i == index;
                }
            }
        } else {
            if let Some(map) = map {
                self.attach_layer(map, layer)?;
            }
            self.switcher_state_mut(id, op)?.entries[index].selected = true;
        }
        Ok(())
    }

    fn deselect(&mut self, id: HandleId, name: &str, op: &str) -> Result<()> {
        let (index, kind, layer) = self.find_entry(id, name, op)?;
        if kind == EntryKind::Base {
            return Err(Error::foreign(op, "base layers cannot be unchecked"));
        }
        if let Some(map) = self.get(id, op)?.map {
            self.detach_layer(map, layer)?;
        }
        self.switcher_state_mut(id, op)?.entries[index].selected = false;
        Ok(())
    }

    pub(super) fn control_method(
        &mut self,
        id: HandleId,
        class: Class,
        method: &str,
        a: &Args<'_>,
    ) -> Result<Value> {
        let op = a.operation();
        match (class, method) {
            (Class::ZoomControl, "zoomIn" | "zoomOut") => {
                a.arity(0, 0)?;
                let map = self.attached_map(id, op)?;
                let zoom = self
                    .map_state(map, op)?
                    .zoom
                    .ok_or_else(|| Error::foreign(op, "Set map center and zoom first."))?;
                let delta = if method == "zoomIn" { 1.0 } else { -1.0 };
                self.set_zoom(map, zoom + delta, op)?;
                Ok(Value::Null)
            }
            (Class::ScaleControl, "getMetricLabel" | "getImperialLabel") => {
                a.arity(0, 0)?;
                let options = &self.get(id, op)?.options;
                let metric = method == "getMetricLabel";
                let enabled = options.get_bool_or(if metric { "metric" } else { "imperial" }, true);
                if !enabled {
                    return Ok(Value::Null);
                }
                let max_width = options.get_f64_or("maxWidth", 100.0);
                let map = self.attached_map(id, op)?;
                let state = self.map_state(map, op)?;
                let (center, zoom) = state
                    .center
                    .zip(state.zoom)
                    .ok_or_else(|| Error::foreign(op, "Set map center and zoom first."))?;
                let circumference = 2.0 * std::f64::consts::PI * EARTH_RADIUS;
                let meters_per_pixel = circumference * center.lat.to_radians().cos() / 2f64.powf(zoom + 8.0);
                let max_meters = meters_per_pixel * max_width;
                let label = if metric {
                    metric_label(max_meters)
                } else {
                    imperial_label(max_meters)
                };
                Ok(label.into())
            }
            (Class::SearchControl, "search") => {
                a.arity(1, 1)?;
                let text = a.str(0)?;
                self.search(id, text, op)
            }
            (Class::SearchControl, "getLayer") => {
                a.arity(0, 0)?;
                let options = &self.get(id, op)?.options;
                Ok(options.get("layer").cloned().unwrap_or_default())
            }
            _ => Err(not_a_function(op)),
        }
    }

    fn attached_map(&self, id: HandleId, op: &str) -> Result<HandleId> {
        self.get(id, op)?
            .map
            .ok_or_else(|| Error::foreign(op, "control is not on a map"))
    }

    fn search(&mut self, id: HandleId, text: &str, op: &str) -> Result<Value> {
        let obj = self.get(id, op)?;
        let (map, zoom) = (obj.map, obj.options.get("zoom").and_then(Value::as_f64));
        let group = obj
            .options
            .get("layer")
            .and_then(Value::as_handle)
            .ok_or_else(|| Error::foreign(op, "search layer is missing"))?;
        let State::Group { members } = &self.get(group, op)?.state else {
            return Err(Error::foreign(op, "search layer is not a layer group"));
        };
        let found = members.iter().find_map(|m| {
            let obj = self.objects.get(m)?;
            let State::Marker(marker) = &obj.state else {
                return None;
            };
            let title = obj.options.get("title").and_then(Value::as_str)?;
            title.eq_ignore_ascii_case(text).then_some(marker.lat_lng)
        });
        let Some(lat_lng) = found else {
            log::debug!("{}: no marker titled `{}`", op, text);
            return Ok(Value::Null);
        };
        if let Some(map) = map {
            self.map_state_mut(map, op)?.center = Some(lat_lng);
            if let Some(zoom) = zoom {
                self.set_zoom(map, zoom, op)?;
            }
        }
        Ok(Value::LatLng(lat_lng))
    }
}

/// Rounds down to 1, 2, 3 or 5 times a power of ten.
fn round_num(num: f64) -> f64 {
    let digits = (num.max(0.0).floor() as u64).to_string().len() as i32;
    let pow10 = 10f64.powi(digits - 1);
    let d = num / pow10;
    let d = if d >= 10.0 {
        10.0
    } else if d >= 5.0 {
        5.0
    } else if d >= 3.0 {
        3.0
    } else if d >= 2.0 {
        2.0
    } else {
        1.0
    };
    pow10 * d
}

fn metric_label(max_meters: f64) -> String {
    let meters = round_num(max_meters);
    if meters < 1000.0 {
        format!("{} m", meters)
    } else {
        format!("{} km", meters / 1000.0)
    }
}

fn imperial_label(max_meters: f64) -> String {
    let max_feet = max_meters * FEET_PER_METER;
    if max_feet > FEET_PER_MILE {
        format!("{} mi", round_num(max_feet / FEET_PER_MILE))
    } else {
        format!("{} ft", round_num(max_feet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_numbers() {
        assert_eq!(round_num(957.9), 500.0);
        assert_eq!(round_num(3142.7), 3000.0);
        assert_eq!(round_num(0.4), 1.0);
        assert_eq!(round_num(27.0), 20.0);
    }

    #[test]
    fn labels() {
        assert_eq!(metric_label(957.9), "500 m");
        assert_eq!(metric_label(2500.0), "2 km");
        assert_eq!(imperial_label(957.9), "3000 ft");
        assert_eq!(imperial_label(20000.0), "10 mi");
    }
}
