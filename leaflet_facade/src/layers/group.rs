use std::cell::RefCell;

use crate::error::Result;
use crate::layers::Layer;
use crate::runtime::{Handle, Leaflet};
use crate::value::Value;
use crate::wrapper::{FromHandle, JsObject};

/// Groups several layers so they can be handled as one.
///
/// The foreign group is the authority on membership. The wrapper also keeps
/// the handles of the layers added through it, in order, for the caller.
#[derive(Debug, Clone)]
pub struct LayerGroup {
    handle: Handle,
    tracked: RefCell<Vec<Handle>>,
}

impl JsObject for LayerGroup {
    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl FromHandle for LayerGroup {
    const CLASS: &'static str = "LayerGroup";

    fn from_handle_unchecked(handle: Handle) -> Self {
        Self {
            handle,
            tracked: RefCell::new(Vec::new()),
        }
    }
}

impl Layer for LayerGroup {}

impl LayerGroup {
    pub fn new(leaflet: &Leaflet, layers: &[&dyn Layer]) -> Result<Self> {
        let ids = layers.iter().map(|l| l.handle().into()).collect::<Vec<Value>>();
        let handle = leaflet.create("layerGroup", &[Value::List(ids)])?;
        let tracked = layers.iter().map(|l| l.handle().clone()).collect();
        Ok(Self {
            handle,
            tracked: RefCell::new(tracked),
        })
    }

    pub fn add_layer<L: Layer>(&self, layer: &L) -> Result<&Self> {
        self.handle.call("addLayer", &[layer.handle().into()])?;
        let mut tracked = self.tracked.borrow_mut();
        if !tracked.iter().any(|h| h.same_object(layer.handle())) {
            tracked.push(layer.handle().clone());
        }
        Ok(self)
    }

    pub fn remove_layer<L: Layer>(&self, layer: &L) -> Result<&Self> {
        self.handle.call("removeLayer", &[layer.handle().into()])?;
        self.tracked
            .borrow_mut()
            .retain(|h| !h.same_object(layer.handle()));
        Ok(self)
    }

    pub fn has_layer<L: Layer>(&self, layer: &L) -> Result<bool> {
        self.handle
            .call("hasLayer", &[layer.handle().into()])?
            .extract("LayerGroup.hasLayer", Value::as_bool)
    }

    pub fn clear_layers(&self) -> Result<&Self> {
        self.handle.call("clearLayers", &[])?;
        self.tracked.borrow_mut().clear();
        Ok(self)
    }

    /// Members according to the foreign group.
    pub fn layers(&self) -> Result<Vec<Handle>> {
        let ids = self.handle.call("getLayers", &[])?.extract("LayerGroup.getLayers", |v| {
            v.as_list()?.iter().map(Value::as_handle).collect::<Option<Vec<_>>>()
        })?;
        Ok(ids.into_iter().map(|id| self.handle.adopt(id)).collect())
    }

    /// Layers added through this wrapper, in insertion order.
    pub fn tracked(&self) -> Vec<Handle> {
        self.tracked.borrow().clone()
    }
}
