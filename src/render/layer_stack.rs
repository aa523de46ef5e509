use serde::{Deserialize, Serialize};

use crate::core::GridBounds;
use crate::error::GridResult;

use super::{CirclePrimitive, LinePrimitive, RectPrimitive, TextPrimitive};

/// Independently repainted layers composited onto the same surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    /// Gridlines, axes and tick labels. Repainted only on re-layout.
    Grid,
    /// Circle overlays. Repainted on every refresh.
    Shapes,
    /// Transient coordinate tooltip.
    Overlay,
}

impl CanvasLayerKind {
    /// Bottom-to-top composition order.
    pub const CANONICAL_ORDER: [Self; 3] = [Self::Grid, Self::Shapes, Self::Overlay];
}

/// Primitives of one layer, painted lines → rects → circles → texts.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    /// Pixel rectangle outside of which nothing in this layer is visible.
    pub clip: Option<GridBounds>,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn new(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            clip: None,
            lines: Vec::new(),
            rects: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clip(mut self, clip: GridBounds) -> Self {
        self.clip = Some(clip);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.circles.is_empty() && self.texts.is_empty()
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.rects.len() + self.circles.len() + self.texts.len()
    }

    pub fn validate(&self) -> GridResult<()> {
        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}
