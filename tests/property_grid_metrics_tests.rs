use circle_grid::core::{AxisLimits, CoordinateTransform, DataPoint, GridMetrics, SurfaceSize};
use proptest::prelude::*;

const MARGIN: u32 = 30;
const MIN_SURFACE: u32 = 200;

fn compute(width: u32, height: u32, limit_x: f64, limit_y: f64) -> GridMetrics {
    GridMetrics::compute(
        SurfaceSize::new(width, height),
        AxisLimits::new(limit_x, limit_y),
        MARGIN,
        MIN_SURFACE,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn unit_size_is_quantized_and_fits_usable_span(
        side in 200u32..2400u32,
        limit_ratio in 0.0f64..1.0,
    ) {
        // Limits up to the point where the raw unit size reaches the 10 px floor.
        let max_limit = f64::from(side - 60) / 20.0;
        let limit = 0.05 + limit_ratio * (max_limit - 0.05);
        let metrics = compute(side, side, limit, limit);

        prop_assert_eq!(metrics.unit_size() % 10, 0);
        prop_assert!(metrics.unit_size() >= 10);
        let span = metrics.unit_size_px() * limit * 2.0;
        prop_assert!(span <= f64::from(side - 60) + 1e-9);
    }

    #[test]
    fn grid_is_centered_for_any_positive_limits(
        width in 0u32..3000u32,
        height in 0u32..3000u32,
        limit_x in 0.01f64..500.0,
        limit_y in 0.01f64..500.0,
    ) {
        let metrics = compute(width, height, limit_x, limit_y);
        let surface = metrics.surface();
        let bounds = metrics.bounds();

        prop_assert!(surface.width >= MIN_SURFACE && surface.height >= MIN_SURFACE);
        prop_assert_eq!(metrics.unit_size() % 10, 0);
        prop_assert!(metrics.unit_size() >= 10);
        prop_assert!((bounds.left + bounds.right - f64::from(surface.width)).abs() <= 1e-6);
        prop_assert!((bounds.top + bounds.bottom - f64::from(surface.height)).abs() <= 1e-6);
        prop_assert!((metrics.center().x - (bounds.left + bounds.right) / 2.0).abs() <= 1e-6);
        prop_assert_eq!(metrics.minor_step(), metrics.unit_size_px() / 10.0);
    }

    #[test]
    fn recomputation_is_idempotent(
        width in 0u32..3000u32,
        height in 0u32..3000u32,
        limit_x in -10.0f64..100.0,
        limit_y in -10.0f64..100.0,
    ) {
        prop_assert_eq!(
            compute(width, height, limit_x, limit_y),
            compute(width, height, limit_x, limit_y)
        );
    }

    #[test]
    fn data_pixel_round_trip_stays_within_tolerance(
        side in 200u32..2400u32,
        limit in 0.1f64..20.0,
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
    ) {
        let transform = CoordinateTransform::new(&compute(side, side, limit, limit));
        let back = transform.to_data(transform.to_pixel(DataPoint::new(x, y)));
        prop_assert!((back.x - x).abs() <= 1e-9);
        prop_assert!((back.y - y).abs() <= 1e-9);
    }
}

#[test]
fn reference_layout_for_default_surface() {
    let metrics = compute(400, 400, 1.0, 1.0);
    assert_eq!(metrics.unit_size(), 170);
    let bounds = metrics.bounds();
    assert_eq!(
        (bounds.left, bounds.top, bounds.right, bounds.bottom),
        (30.0, 30.0, 370.0, 370.0)
    );
    assert_eq!((metrics.center().x, metrics.center().y), (200.0, 200.0));
}

#[test]
fn non_round_usable_span_floors_unit_size() {
    // usable 437 -> raw 218.5 -> floor to 210, grid 420 centered in 497.
    let metrics = compute(497, 497, 1.0, 1.0);
    assert_eq!(metrics.unit_size(), 210);
    assert_eq!(metrics.bounds().left, 38.5);
    assert_eq!(metrics.center().x, 248.5);
}
