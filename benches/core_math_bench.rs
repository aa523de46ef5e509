use circle_grid::api::{
    GridOverlayConfig, GridOverlayEngine, GridStyle, HostContext, HostWidget, paint_grid_layer,
};
use circle_grid::core::{AxisLimits, CoordinateTransform, DataPoint, GridMetrics, SurfaceSize};
use circle_grid::interaction::ManualTaskScheduler;
use circle_grid::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_grid_metrics_compute(c: &mut Criterion) {
    c.bench_function("grid_metrics_compute", |b| {
        b.iter(|| {
            GridMetrics::compute(
                black_box(SurfaceSize::new(1920, 1080)),
                black_box(AxisLimits::new(3.5, 2.0)),
                30,
                200,
            )
        })
    });
}

fn bench_transform_round_trip(c: &mut Criterion) {
    let metrics = GridMetrics::compute(SurfaceSize::square(800), AxisLimits::default(), 30, 200);
    let transform = CoordinateTransform::new(&metrics);

    c.bench_function("transform_round_trip", |b| {
        b.iter(|| {
            let pixel = transform.to_pixel(black_box(DataPoint::new(0.4321, -0.1234)));
            transform.to_data(pixel)
        })
    });
}

fn bench_paint_grid_layer_dense(c: &mut Criterion) {
    let metrics = GridMetrics::compute(SurfaceSize::square(2000), AxisLimits::symmetric(20.0), 30, 200);
    let style = GridStyle::default();

    c.bench_function("paint_grid_layer_dense", |b| {
        b.iter(|| paint_grid_layer(black_box(&metrics), black_box(&style)))
    });
}

fn bench_refresh_500_circles(c: &mut Criterion) {
    let mut engine = GridOverlayEngine::new(
        NullRenderer::default(),
        ManualTaskScheduler::new(),
        GridOverlayConfig::default(),
    )
    .expect("engine init");
    let records: Vec<String> = (0..500)
        .map(|i| {
            let t = f64::from(i) / 500.0;
            format!(
                r#"{{"x": {:.3}, "y": {:.3}, "r": 0.05, "color": "blue", "z": {}}}"#,
                t * 2.0 - 1.0,
                1.0 - t * 2.0,
                i % 7
            )
        })
        .collect();
    let context = HostContext::square(800, 1.0).with_circles_json(format!("[{}]", records.join(",")));

    c.bench_function("refresh_500_circles", |b| {
        b.iter(|| {
            engine
                .refresh(black_box(&context))
                .expect("refresh should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_grid_metrics_compute,
    bench_transform_round_trip,
    bench_paint_grid_layer_dense,
    bench_refresh_500_circles
);
criterion_main!(benches);
