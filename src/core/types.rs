use serde::{Deserialize, Serialize};

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Raises each side to at least `minimum`.
    #[must_use]
    pub fn clamped_to(self, minimum: u32) -> Self {
        Self::new(self.width.max(minimum), self.height.max(minimum))
    }
}

/// Largest absolute data value shown on each axis.
///
/// The visible range is always symmetric: `-x..=x` horizontally and
/// `-y..=y` vertically. Equal values give the square single-limit layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    pub x: f64,
    pub y: f64,
}

impl AxisLimits {
    pub const DEFAULT_LIMIT: f64 = 1.0;

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn symmetric(limit: f64) -> Self {
        Self::new(limit, limit)
    }

    /// Replaces zero, negative or non-finite limits with the default of 1.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new(sanitize_limit(self.x), sanitize_limit(self.y))
    }
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self::symmetric(Self::DEFAULT_LIMIT)
    }
}

fn sanitize_limit(limit: f64) -> f64 {
    if limit.is_finite() && limit > 0.0 {
        limit
    } else {
        AxisLimits::DEFAULT_LIMIT
    }
}

/// Point in data space (Y grows upwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Point in surface pixel space (Y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl GridBounds {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    /// Inclusive hit test.
    #[must_use]
    pub fn contains(self, point: PixelPoint) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}
