use crate::core::grid_metrics::GridMetrics;
use crate::core::types::{DataPoint, PixelPoint};

/// Bidirectional mapping between data space and pixel space for one layout.
///
/// Data Y grows upwards while pixel Y grows downwards, so the vertical axis
/// is inverted around the grid center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    center: PixelPoint,
    unit_size: f64,
}

impl CoordinateTransform {
    #[must_use]
    pub fn new(metrics: &GridMetrics) -> Self {
        Self {
            center: metrics.center(),
            unit_size: metrics.unit_size_px(),
        }
    }

    #[must_use]
    pub fn unit_size(self) -> f64 {
        self.unit_size
    }

    #[must_use]
    pub fn to_pixel(self, point: DataPoint) -> PixelPoint {
        PixelPoint::new(
            self.center.x + point.x * self.unit_size,
            self.center.y - point.y * self.unit_size,
        )
    }

    #[must_use]
    pub fn to_data(self, point: PixelPoint) -> DataPoint {
        DataPoint::new(
            (point.x - self.center.x) / self.unit_size,
            (self.center.y - point.y) / self.unit_size,
        )
    }

    /// Converts a length in data units to pixels.
    #[must_use]
    pub fn length_to_pixels(self, length: f64) -> f64 {
        length * self.unit_size
    }
}

impl From<&GridMetrics> for CoordinateTransform {
    fn from(metrics: &GridMetrics) -> Self {
        Self::new(metrics)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::CoordinateTransform;
    use crate::core::{AxisLimits, DataPoint, GridMetrics, PixelPoint, SurfaceSize};

    fn default_transform() -> CoordinateTransform {
        let metrics = GridMetrics::compute(SurfaceSize::square(400), AxisLimits::default(), 30, 200);
        CoordinateTransform::new(&metrics)
    }

    #[test]
    fn data_y_axis_points_up() {
        let transform = default_transform();
        let up = transform.to_pixel(DataPoint::new(0.0, 1.0));
        assert_eq!(up, PixelPoint::new(200.0, 30.0));
        let right = transform.to_pixel(DataPoint::new(0.5, 0.0));
        assert_eq!(right, PixelPoint::new(285.0, 200.0));
    }

    #[test]
    fn center_pixel_maps_to_origin() {
        let data = default_transform().to_data(PixelPoint::new(200.0, 200.0));
        assert_eq!(data, DataPoint::new(0.0, 0.0));
    }

    #[test]
    fn pixel_round_trip_is_stable() {
        let transform = default_transform();
        let pixel = PixelPoint::new(37.25, 311.5);
        let back = transform.to_pixel(transform.to_data(pixel));
        assert_abs_diff_eq!(back.x, pixel.x, epsilon = 1e-9);
        assert_abs_diff_eq!(back.y, pixel.y, epsilon = 1e-9);
    }
}
