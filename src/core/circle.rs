use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::types::DataPoint;
use crate::error::{GridError, GridResult};
use crate::render::Color;

/// One annotated circle positioned in data coordinates.
///
/// Circles are validated on construction and never mutated afterwards; a new
/// input replaces the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircleRecord")]
pub struct Circle {
    x: f64,
    y: f64,
    radius: f64,
    color: Color,
    fill: Option<Color>,
    dashed: bool,
    z_index: i32,
}

impl Circle {
    /// Creates a stroke-only, solid circle with z-index 0.
    pub fn new(x: f64, y: f64, radius: f64, color: Color) -> GridResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(GridError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GridError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        color.validate()?;
        Ok(Self {
            x,
            y,
            radius,
            color,
            fill: None,
            dashed: false,
            z_index: 0,
        })
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn with_dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    #[must_use]
    pub fn center(&self) -> DataPoint {
        DataPoint::new(self.x, self.y)
    }

    /// Radius in data units.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    #[must_use]
    pub fn is_dashed(&self) -> bool {
        self.dashed
    }

    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }
}

/// Wire shape of one circle record.
#[derive(Debug, Deserialize)]
struct CircleRecord {
    x: f64,
    y: f64,
    #[serde(alias = "r")]
    radius: f64,
    #[serde(alias = "outline", alias = "stroke")]
    color: Color,
    #[serde(default)]
    fill: Option<FillRepr>,
    #[serde(default)]
    dashed: bool,
    #[serde(default, alias = "z", alias = "zIndex")]
    z_index: i32,
}

/// Fill is either a color or an explicit "no fill" keyword.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FillRepr {
    Color(Color),
    Keyword(String),
}

impl TryFrom<CircleRecord> for Circle {
    type Error = GridError;

    fn try_from(record: CircleRecord) -> GridResult<Self> {
        let circle = Circle::new(record.x, record.y, record.radius, record.color)?
            .with_dashed(record.dashed)
            .with_z_index(record.z_index);
        match record.fill {
            None => Ok(circle),
            Some(FillRepr::Color(fill)) => Ok(circle.with_fill(fill)),
            Some(FillRepr::Keyword(keyword)) => match keyword.trim() {
                "" | "none" => Ok(circle),
                other => Err(GridError::InvalidData(format!(
                    "unrecognized fill `{other}`"
                ))),
            },
        }
    }
}

/// Order in which a circle set is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaintOrder {
    /// Ascending z-index; equal z-indices keep input order.
    #[default]
    ZIndex,
    /// Input order as declared.
    Declaration,
}

/// Returns `circles` in the order they must be painted (last one on top).
#[must_use]
pub fn paint_order(circles: &[Circle], order: PaintOrder) -> Vec<&Circle> {
    let mut ordered: Vec<&Circle> = circles.iter().collect();
    if order == PaintOrder::ZIndex {
        // `sort_by_key` is stable, which keeps ties in input order.
        ordered.sort_by_key(|circle| circle.z_index);
    }
    ordered
}

/// Strictly decodes a JSON array of circle records.
pub fn try_decode_circles(input: &str) -> GridResult<Vec<Circle>> {
    serde_json::from_str(input).map_err(|err| GridError::Decode(err.to_string()))
}

/// Decodes a JSON array of circle records, recovering to an empty set.
///
/// Any decode or validation failure is logged and yields no circles; it is
/// never surfaced to the caller. Blank input is treated as "no circles".
#[must_use]
pub fn decode_circles(input: &str) -> Vec<Circle> {
    if input.trim().is_empty() {
        debug!("blank circle input, rendering empty set");
        return Vec::new();
    }
    match try_decode_circles(input) {
        Ok(circles) => {
            debug!(count = circles.len(), "decoded circle input");
            circles
        }
        Err(err) => {
            warn!(
                error = %err,
                input_len = input.len(),
                "malformed circle input, rendering empty set"
            );
            Vec::new()
        }
    }
}

/// Compiled-in circle set drawn by the static variant.
#[must_use]
pub fn builtin_circle_set() -> Vec<Circle> {
    let specs: [(f64, f64, f64, Color, Option<Color>, bool); 4] = [
        (0.0, 0.0, 1.0, Color::rgb8(0, 0, 255), None, true),
        (
            0.5,
            0.5,
            0.25,
            Color::rgb8(255, 0, 0),
            Some(Color::rgb8(255, 0, 0).with_alpha(0.2)),
            false,
        ),
        (-0.5, -0.25, 0.3, Color::rgb8(0, 128, 0), None, false),
        (0.25, -0.5, 0.15, Color::rgb8(255, 165, 0), None, true),
    ];
    specs
        .into_iter()
        .filter_map(|(x, y, radius, color, fill, dashed)| {
            let circle = Circle::new(x, y, radius, color).ok()?.with_dashed(dashed);
            Some(match fill {
                Some(fill) => circle.with_fill(fill),
                None => circle,
            })
        })
        .collect()
}
