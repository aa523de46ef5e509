use serde::{Deserialize, Serialize};

use crate::core::types::{AxisLimits, GridBounds, PixelPoint, SurfaceSize};

/// Smallest allowed pixel size of one data unit. Unit sizes are always a
/// multiple of this value.
pub const UNIT_QUANTUM_PX: u32 = 10;

/// Number of minor grid lines per data unit.
pub const MINOR_DIVISIONS: u32 = 10;

/// Inputs of one layout pass.
///
/// Two refreshes with equal keys produce identical metrics, so the grid layer
/// only needs repainting when the key changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutKey {
    pub surface: SurfaceSize,
    pub axis_limits: AxisLimits,
}

/// Pixel layout of the grid inside the drawing surface.
///
/// The grid is centered in the surface interior. Its unit size is floored to
/// a multiple of [`UNIT_QUANTUM_PX`] and never drops below it, so gridlines
/// land on round pixel offsets even when that leaves part of the usable area
/// empty (or, for very large limits, lets the grid overflow the surface).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    surface: SurfaceSize,
    margin: u32,
    axis_limits: AxisLimits,
    unit_size: u32,
    bounds: GridBounds,
    center: PixelPoint,
    minor_step: f64,
}

impl GridMetrics {
    /// Computes the layout for `surface` and `axis_limits`.
    ///
    /// The surface is clamped up to `min_surface` and limits are sanitized
    /// before any arithmetic, so this never fails and never sees a negative
    /// usable span as long as `2 * margin < min_surface`.
    #[must_use]
    pub fn compute(
        surface: SurfaceSize,
        axis_limits: AxisLimits,
        margin: u32,
        min_surface: u32,
    ) -> Self {
        let surface = surface.clamped_to(min_surface);
        let axis_limits = axis_limits.sanitized();

        let usable_width = usable_span(surface.width, margin);
        let usable_height = usable_span(surface.height, margin);
        let raw_unit_x = usable_width / (2.0 * axis_limits.x);
        let raw_unit_y = usable_height / (2.0 * axis_limits.y);
        let unit_size = quantize_unit_size(raw_unit_x.min(raw_unit_y));

        let unit = f64::from(unit_size);
        let span_x = unit * axis_limits.x * 2.0;
        let span_y = unit * axis_limits.y * 2.0;
        let left = (f64::from(surface.width) - span_x) / 2.0;
        let top = (f64::from(surface.height) - span_y) / 2.0;

        Self {
            surface,
            margin,
            axis_limits,
            unit_size,
            bounds: GridBounds::new(left, top, left + span_x, top + span_y),
            center: PixelPoint::new(left + span_x / 2.0, top + span_y / 2.0),
            minor_step: unit / f64::from(MINOR_DIVISIONS),
        }
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    #[must_use]
    pub fn margin(&self) -> u32 {
        self.margin
    }

    #[must_use]
    pub fn axis_limits(&self) -> AxisLimits {
        self.axis_limits
    }

    /// Pixels per data unit.
    #[must_use]
    pub fn unit_size(&self) -> u32 {
        self.unit_size
    }

    #[must_use]
    pub fn unit_size_px(&self) -> f64 {
        f64::from(self.unit_size)
    }

    #[must_use]
    pub fn half_unit_px(&self) -> f64 {
        self.unit_size_px() / 2.0
    }

    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Pixel position of data coordinate `(0, 0)`.
    #[must_use]
    pub fn center(&self) -> PixelPoint {
        self.center
    }

    #[must_use]
    pub fn minor_step(&self) -> f64 {
        self.minor_step
    }

    #[must_use]
    pub fn layout_key(&self) -> LayoutKey {
        LayoutKey {
            surface: self.surface,
            axis_limits: self.axis_limits,
        }
    }
}

fn usable_span(dimension: u32, margin: u32) -> f64 {
    f64::from(dimension.saturating_sub(margin.saturating_mul(2)))
}

/// Floors to a multiple of 10 first, then clamps to at least 10.
fn quantize_unit_size(raw_unit: f64) -> u32 {
    let quantum = f64::from(UNIT_QUANTUM_PX);
    let floored = (raw_unit / quantum).floor() * quantum;
    if !floored.is_finite() || floored < quantum {
        return UNIT_QUANTUM_PX;
    }
    // Bounded by the usable span of a u32 surface, so this cannot truncate.
    floored as u32
}
