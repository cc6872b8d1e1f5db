use crate::controls::{Control, Position};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::runtime::{Handle, Leaflet};
use crate::value::Value;
use crate::wrapper::js_wrapper;

/// Configuration of the scale bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleOptions {
    pub position: Position,
    /// Maximum width of the bar in pixels.
    pub max_width: f64,
    pub metric: bool,
    pub imperial: bool,
    pub update_when_idle: bool,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            position: Position::BottomLeft,
            max_width: 100.0,
            metric: true,
            imperial: true,
            update_when_idle: false,
        }
    }
}

impl ScaleOptions {
    pub fn to_options(&self) -> Result<Options> {
        if self.max_width <= 0.0 {
            return Err(Error::config("maxWidth", "must be positive"));
        }
        if !self.metric && !self.imperial {
            return Err(Error::config("metric", "at least one unit system must be shown"));
        }
        Ok(Options::new()
            .with("position", self.position)
            .with("maxWidth", self.max_width)
            .with("metric", self.metric)
            .with("imperial", self.imperial)
            .with("updateWhenIdle", self.update_when_idle))
    }
}

/// Scale bar showing the distance covered by `max_width` pixels.
#[derive(Debug, Clone)]
pub struct Scale {
    handle: Handle,
}

js_wrapper!(Scale, "Control.Scale");

impl Control for Scale {}

impl Scale {
    pub fn new(leaflet: &Leaflet, options: &ScaleOptions) -> Result<Self> {
        let options = options.to_options()?;
        let handle = leaflet.create("control.scale", &[options.into()])?;
        Ok(Self { handle })
    }

    /// Label of the metric bar, e.g. `"500 m"`. `None` when disabled.
    pub fn metric_label(&self) -> Result<Option<String>> {
        self.label("getMetricLabel")
    }

    /// Label of the imperial bar, e.g. `"2 mi"`. `None` when disabled.
    pub fn imperial_label(&self) -> Result<Option<String>> {
        self.label("getImperialLabel")
    }

    fn label(&self, method: &str) -> Result<Option<String>> {
        match self.handle.call(method, &[])? {
            Value::Null => Ok(None),
            other => other.extract(method, |v| v.as_str().map(|s| Some(s.to_string()))),
        }
    }
}
