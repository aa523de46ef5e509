use std::rc::Rc;

use crate::core::SurfaceSize;
use crate::error::{GridError, GridResult};

use super::{CanvasLayerKind, CirclePrimitive, LayerPrimitives};

/// Backend-agnostic scene for one composited draw pass.
///
/// Layers are shared handles: a caller rebuilds one layer and reuses the
/// others without copying their primitives. Backends paint them in `layers`
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub surface: SurfaceSize,
    pub layers: Vec<Rc<LayerPrimitives>>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            layers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_layer(mut self, layer: LayerPrimitives) -> Self {
        self.layers.push(Rc::new(layer));
        self
    }

    #[must_use]
    pub fn with_shared_layer(mut self, layer: Rc<LayerPrimitives>) -> Self {
        self.layers.push(layer);
        self
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers
            .iter()
            .find(|layer| layer.kind == kind)
            .map(Rc::as_ref)
    }

    /// Circles across all layers in paint order.
    pub fn circles_in_paint_order(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.layers.iter().flat_map(|layer| layer.circles.iter())
    }

    pub fn validate(&self) -> GridResult<()> {
        if !self.surface.is_valid() {
            return Err(GridError::InvalidSurface {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.is_empty())
    }
}
