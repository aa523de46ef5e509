use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{GridError, GridResult};
use crate::render::Color;

/// Alternating on/off dash lengths in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashPattern(SmallVec<[f64; 2]>);

impl DashPattern {
    #[must_use]
    pub fn new(on: f64, off: f64) -> Self {
        Self(SmallVec::from_buf([on, off]))
    }

    #[must_use]
    pub fn segments(&self) -> &[f64] {
        &self.0
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.0.is_empty() {
            return Err(GridError::InvalidData(
                "dash pattern must not be empty".to_owned(),
            ));
        }
        if self.0.iter().any(|segment| !segment.is_finite() || *segment < 0.0) {
            return Err(GridError::InvalidData(
                "dash segments must be finite and >= 0".to_owned(),
            ));
        }
        if self.0.iter().all(|segment| *segment == 0.0) {
            return Err(GridError::InvalidData(
                "dash pattern must contain a positive segment".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Stroke pattern for lines and circle outlines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed(DashPattern),
}

impl StrokeStyle {
    #[must_use]
    pub fn dashed(on: f64, off: f64) -> Self {
        Self::Dashed(DashPattern::new(on, off))
    }

    #[must_use]
    pub fn is_dashed(&self) -> bool {
        matches!(self, Self::Dashed(_))
    }

    pub fn validate(&self) -> GridResult<()> {
        match self {
            Self::Solid => Ok(()),
            Self::Dashed(pattern) => pattern.validate(),
        }
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: StrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: StrokeStyle::Solid,
        }
    }

    #[must_use]
    pub fn with_stroke_style(mut self, stroke_style: StrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(&self) -> GridResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(GridError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(GridError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.stroke_style.validate()?;
        self.color.validate()
    }
}

/// Draw command for one circle in pixel space.
///
/// Backends fill first (when `fill_color` is set) and stroke the outline
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub stroke_width: f64,
    pub stroke_color: Color,
    pub stroke_style: StrokeStyle,
    pub fill_color: Option<Color>,
}

impl CirclePrimitive {
    pub fn validate(&self) -> GridResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(GridError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GridError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(GridError::InvalidData(
                "circle stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.stroke_style.validate()?;
        if let Some(fill) = self.fill_color {
            fill.validate()?;
        }
        self.stroke_color.validate()
    }
}

/// Draw command for one filled rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
        }
    }

    pub fn validate(self) -> GridResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(GridError::InvalidData(
                "rect origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(GridError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Draw command for one label in pixel space.
///
/// Text starts at `x` and is vertically centered on `y`, both measured along
/// the rotated baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    /// Clockwise rotation in radians around `(x, y)`; negative values turn
    /// the text counter-clockwise on screen.
    pub rotation_rad: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            rotation_rad: 0.0,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_rad: f64) -> Self {
        self.rotation_rad = rotation_rad;
        self
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.text.is_empty() {
            return Err(GridError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_rad.is_finite() {
            return Err(GridError::InvalidData(
                "text coordinates and rotation must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(GridError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
