pub mod circle;
pub mod grid_metrics;
pub mod transform;
pub mod types;

pub use circle::{
    Circle, PaintOrder, builtin_circle_set, decode_circles, paint_order, try_decode_circles,
};
pub use grid_metrics::{GridMetrics, LayoutKey, MINOR_DIVISIONS, UNIT_QUANTUM_PX};
pub use transform::CoordinateTransform;
pub use types::{AxisLimits, DataPoint, GridBounds, PixelPoint, SurfaceSize};
