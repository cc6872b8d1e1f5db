//! Fixed UI elements placed in a map corner.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::map::Map;
use crate::value::Value;
use crate::wrapper::JsObject;

pub mod layers;
pub mod scale;
pub mod search;
pub mod zoom;

pub use layers::{LayersControl, LayersOptions};
pub use scale::{Scale, ScaleOptions};
pub use search::{Search, SearchOptions};
pub use zoom::{Zoom, ZoomOptions};

/// Map corner a control is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Position {
    /// Literal understood by the runtime.
    pub fn literal(self) -> &'static str {
        match self {
            Position::TopLeft => "topleft",
            Position::TopRight => "topright",
            Position::BottomLeft => "bottomleft",
            Position::BottomRight => "bottomright",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "topleft" => Ok(Position::TopLeft),
            "topright" => Ok(Position::TopRight),
            "bottomleft" => Ok(Position::BottomLeft),
            "bottomright" => Ok(Position::BottomRight),
            other => Err(Error::config(
                "position",
                format!("`{}` is not a map corner", other),
            )),
        }
    }
}

impl From<Position> for Value {
    fn from(p: Position) -> Self {
        Value::String(p.literal().to_string())
    }
}

/// Anything placed on a map as a control.
pub trait Control: JsObject {
    fn add_to(&self, map: &Map) -> Result<&Self>
    where
        Self: Sized,
    {
        self.handle().call("addTo", &[map.handle().into()])?;
        Ok(self)
    }

    fn remove_from(&self, map: &Map) -> Result<&Self>
    where
        Self: Sized,
    {
        self.handle().call("removeFrom", &[map.handle().into()])?;
        Ok(self)
    }

    fn set_position(&self, position: Position) -> Result<&Self>
    where
        Self: Sized,
    {
        self.handle().call("setPosition", &[position.into()])?;
        Ok(self)
    }

    fn position(&self) -> Result<Position> {
        self.handle()
            .call("getPosition", &[])?
            .extract("Control.getPosition", |v| v.as_str().map(str::to_string))?
            .parse()
    }
}
