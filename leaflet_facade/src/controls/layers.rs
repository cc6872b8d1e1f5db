//! Layer switcher control.
//!
//! Lets users pick one base layer (radio entries) and toggle overlays
//! (checkbox entries). Entries are identified by name.

use crate::controls::{Control, Position};
use crate::error::Result;
use crate::layers::Layer;
use crate::options::Options;
use crate::runtime::{Handle, Leaflet};
use crate::value::Value;
use crate::wrapper::js_wrapper;

pub const POSITION: &str = "position";
pub const COLLAPSED: &str = "collapsed";
pub const AUTO_Z_INDEX: &str = "autoZIndex";

/// Configuration of a [`LayersControl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayersOptions {
    pub position: Position,
    /// Collapse into an icon, expanding on hover.
    pub collapsed: bool,
    /// Assign increasing z-indexes to layers in registration order.
    pub auto_z_index: bool,
}

impl Default for LayersOptions {
    fn default() -> Self {
        Self {
            position: Position::TopRight,
            collapsed: true,
            auto_z_index: true,
        }
    }
}

impl LayersOptions {
    /// Defaults overridden by the recognized keys of `options`.
    pub fn from_options(options: &Options) -> Result<Self> {
        Self::default().apply(options)
    }

    /// Returns a copy with the recognized keys of `options` applied. Unknown
    /// keys are ignored; recognized keys of the wrong type fail.
    pub fn apply(mut self, options: &Options) -> Result<Self> {
        if let Some(position) = options.str(POSITION)? {
            self.position = position.parse()?;
        }
        if let Some(collapsed) = options.bool(COLLAPSED)? {
            self.collapsed = collapsed;
        }
        if let Some(auto) = options.bool(AUTO_Z_INDEX)? {
            self.auto_z_index = auto;
        }
        Ok(self)
    }

    pub fn to_options(&self) -> Options {
        Options::new()
            .with(POSITION, self.position)
            .with(COLLAPSED, self.collapsed)
            .with(AUTO_Z_INDEX, self.auto_z_index)
    }
}

/// The layer switcher.
#[derive(Debug, Clone)]
pub struct LayersControl {
    handle: Handle,
}

js_wrapper!(LayersControl, "Control.Layers");

impl Control for LayersControl {}

impl LayersControl {
    /// Creates the switcher from base layers and overlays, each given as
    /// name -> layer handle.
    pub fn new(
        leaflet: &Leaflet,
        base_layers: &Options,
        overlays: &Options,
        options: &LayersOptions,
    ) -> Result<Self> {
        let handle = leaflet.create(
            "control.layers",
            &[
                base_layers.clone().into(),
                overlays.clone().into(),
                options.to_options().into(),
            ],
        )?;
        Ok(Self { handle })
    }

    /// Adds a radio entry. Re-using a name replaces that entry.
    pub fn add_base_layer<L: Layer>(&self, layer: &L, name: &str) -> Result<&Self> {
        self.handle
            .call("addBaseLayer", &[layer.handle().into(), name.into()])?;
        Ok(self)
    }

    /// Adds a checkbox entry. Re-using a name replaces that entry.
    pub fn add_overlay<L: Layer>(&self, layer: &L, name: &str) -> Result<&Self> {
        self.handle
            .call("addOverlay", &[layer.handle().into(), name.into()])?;
        Ok(self)
    }

    /// Removes the entry called `name`. Unknown names are ignored.
    pub fn remove_layer(&self, name: &str) -> Result<&Self> {
        let removed = self
            .handle
            .call("removeLayer", &[name.into()])?
            .extract("Control.Layers.removeLayer", Value::as_bool)?;
        if !removed {
            log::debug!("layer switcher {} has no entry `{}`", self.handle.id(), name);
        }
        Ok(self)
    }

    pub fn set_collapsed(&self, collapsed: bool) -> Result<&Self> {
        self.handle.call("setCollapsed", &[collapsed.into()])?;
        Ok(self)
    }

    /// Applies the recognized keys of `options` to the live control.
    pub fn set_options(&self, options: &Options) -> Result<&Self> {
        let merged = self.options()?.apply(options)?;
        self.handle
            .call("setOptions", &[merged.to_options().into()])?;
        Ok(self)
    }

    pub fn options(&self) -> Result<LayersOptions> {
        let options = self
            .handle
            .call("getOptions", &[])?
            .extract("Control.Layers.getOptions", |v| v.as_options().cloned())?;
        LayersOptions::from_options(&options)
    }

    /// Checks the entry called `name`. For a base layer this unchecks the
    /// previously selected base layer.
    pub fn select(&self, name: &str) -> Result<&Self> {
        self.handle.call("select", &[name.into()])?;
        Ok(self)
    }

    /// Unchecks an overlay. Base layers cannot be unchecked.
    pub fn deselect(&self, name: &str) -> Result<&Self> {
        self.handle.call("deselect", &[name.into()])?;
        Ok(self)
    }

    /// Names of all checked entries, base layer first.
    pub fn selected(&self) -> Result<Vec<String>> {
        self.names("getSelected")
    }

    pub fn base_layers(&self) -> Result<Vec<String>> {
        self.names("getBaseLayers")
    }

    pub fn overlays(&self) -> Result<Vec<String>> {
        self.names("getOverlays")
    }

    fn names(&self, method: &str) -> Result<Vec<String>> {
        self.handle.call(method, &[])?.extract(method, |v| {
            v.as_list()?
                .iter()
                .map(|n| n.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults() {
        let opts = LayersOptions::default();
        assert_eq!(opts.position, Position::TopRight);
        assert!(opts.collapsed);
        assert!(opts.auto_z_index);
    }

    #[test]
    fn override_only_position() {
        let over = Options::new().with(POSITION, "bottomright");
        let opts = LayersOptions::from_options(&over).unwrap();
        assert_eq!(
            opts,
            LayersOptions {
                position: Position::BottomRight,
                ..LayersOptions::default()
            }
        );
    }

    #[test]
    fn unknown_corner_is_rejected() {
        let over = Options::new().with(POSITION, "middle");
        assert!(matches!(
            LayersOptions::from_options(&over),
            Err(Error::Configuration { .. })
        ));
    }
}
