use crate::controls::{Control, Position};
use crate::error::Result;
use crate::options::Options;
use crate::runtime::{Handle, Leaflet};
use crate::wrapper::js_wrapper;

/// Configuration of the zoom buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomOptions {
    pub position: Position,
    pub zoom_in_text: String,
    pub zoom_out_text: String,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            position: Position::TopLeft,
            zoom_in_text: "+".to_string(),
            zoom_out_text: "-".to_string(),
        }
    }
}

impl ZoomOptions {
    pub fn to_options(&self) -> Options {
        Options::new()
            .with("position", self.position)
            .with("zoomInText", self.zoom_in_text.as_str())
            .with("zoomOutText", self.zoom_out_text.as_str())
    }
}

/// Zoom in / zoom out buttons.
#[derive(Debug, Clone)]
pub struct Zoom {
    handle: Handle,
}

js_wrapper!(Zoom, "Control.Zoom");

impl Control for Zoom {}

impl Zoom {
    pub fn new(leaflet: &Leaflet, options: &ZoomOptions) -> Result<Self> {
        let handle = leaflet.create("control.zoom", &[options.to_options().into()])?;
        Ok(Self { handle })
    }

    /// Same as pressing `+`. The control must be on a map with a view.
    pub fn zoom_in(&self) -> Result<&Self> {
        self.handle.call("zoomIn", &[])?;
        Ok(self)
    }

    pub fn zoom_out(&self) -> Result<&Self> {
        self.handle.call("zoomOut", &[])?;
        Ok(self)
    }
}
