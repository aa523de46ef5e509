use circle_grid::api::{GridOverlayConfig, GridOverlayEngine, HostContext, HostWidget};
use circle_grid::core::{Circle, builtin_circle_set};
use circle_grid::interaction::ManualTaskScheduler;
use circle_grid::render::{CanvasLayerKind, CirclePrimitive, Color, NullRenderer};

fn build_engine(config: GridOverlayConfig) -> GridOverlayEngine<NullRenderer, ManualTaskScheduler> {
    GridOverlayEngine::new(NullRenderer::default(), ManualTaskScheduler::new(), config)
        .expect("engine init")
}

fn painted_circles(engine: &GridOverlayEngine<NullRenderer, ManualTaskScheduler>) -> Vec<CirclePrimitive> {
    engine
        .renderer()
        .last_frame
        .as_ref()
        .expect("rendered frame")
        .circles_in_paint_order()
        .cloned()
        .collect()
}

#[test]
fn highest_z_index_paints_last() {
    let mut engine = build_engine(GridOverlayConfig::default());
    let context = HostContext::square(400, 1.0).with_circles_json(
        r#"[
            {"x": 0.0, "y": 0.0, "r": 0.5, "color": "red", "z": 3},
            {"x": 0.1, "y": 0.0, "r": 0.5, "color": "green", "z": 1},
            {"x": 0.0, "y": 0.1, "r": 0.5, "color": "blue", "z": 2}
        ]"#,
    );
    engine.refresh(&context).expect("refresh");

    let colors: Vec<Color> = painted_circles(&engine)
        .iter()
        .map(|circle| circle.stroke_color)
        .collect();
    assert_eq!(
        colors,
        vec![
            Color::rgb8(0, 128, 0),
            Color::rgb8(0, 0, 255),
            Color::rgb8(255, 0, 0),
        ]
    );
}

#[test]
fn equal_z_indices_keep_input_order() {
    let mut engine = build_engine(GridOverlayConfig::default());
    let circles: Vec<Circle> = (0..5)
        .map(|index| {
            Circle::new(f64::from(index) * 0.1, 0.0, 0.2, Color::BLACK)
                .expect("valid circle")
                .with_z_index(7)
        })
        .collect();
    engine
        .refresh(&HostContext::square(400, 1.0).with_circles(circles))
        .expect("refresh");

    let centers: Vec<f64> = painted_circles(&engine).iter().map(|c| c.cx).collect();
    let mut sorted = centers.clone();
    sorted.sort_by(f64::total_cmp);
    assert_eq!(centers, sorted);
}

#[test]
fn malformed_circle_json_renders_empty_shape_layer() {
    let mut engine = build_engine(GridOverlayConfig::default());
    for input in ["not json", "{broken", r#"[{"x": "a"}]"#] {
        engine
            .refresh(&HostContext::square(400, 1.0).with_circles_json(input))
            .expect("malformed input must not fail refresh");
        assert!(engine.circles().is_empty());
        let frame = engine.renderer().last_frame.as_ref().expect("frame");
        let shapes = frame.layer(CanvasLayerKind::Shapes).expect("shape layer");
        assert!(shapes.is_empty());
        assert!(!frame.layer(CanvasLayerKind::Grid).expect("grid").is_empty());
    }
}

#[test]
fn new_input_replaces_the_whole_set() {
    let mut engine = build_engine(GridOverlayConfig::default());
    engine
        .refresh(&HostContext::square(400, 1.0).with_circles_json(
            r#"[{"x": 0, "y": 0, "r": 0.5, "color": "red"}, {"x": 0.5, "y": 0, "r": 0.2, "color": "red"}]"#,
        ))
        .expect("first refresh");
    engine
        .refresh(&HostContext::square(400, 1.0).with_circles_json(
            r#"[{"x": -0.5, "y": 0, "r": 0.2, "color": "blue"}]"#,
        ))
        .expect("second refresh");
    assert_eq!(engine.circles().len(), 1);
    assert_eq!(painted_circles(&engine).len(), 1);
}

#[test]
fn static_variant_paints_builtin_set_with_pivots_in_declaration_order() {
    let mut engine = build_engine(GridOverlayConfig::static_variant());
    engine
        .refresh(
            &HostContext::default()
                .with_surface(600, 400)
                .with_axis_limits(1.5, 1.0)
                .with_builtin_circles(),
        )
        .expect("refresh");

    let builtin = builtin_circle_set();
    let painted = painted_circles(&engine);
    assert_eq!(painted.len(), builtin.len() * 2);

    let transform = engine.transform().expect("transform");
    for (circle, pair) in builtin.iter().zip(painted.chunks(2)) {
        let center = transform.to_pixel(circle.center());
        let (outline, pivot) = (&pair[0], &pair[1]);
        assert_eq!((outline.cx, outline.cy), (center.x, center.y));
        assert_eq!((pivot.cx, pivot.cy), (center.x, center.y));
        assert!((pivot.radius - outline.radius * 0.06).abs() <= 1e-9);
        assert_eq!(pivot.fill_color.is_none(), circle.is_dashed());
        assert_eq!(pivot.stroke_style.is_dashed(), circle.is_dashed());
    }
}

#[test]
fn shape_layer_is_clipped_to_grid_bounds() {
    let mut engine = build_engine(GridOverlayConfig::default());
    engine
        .refresh(&HostContext::square(400, 1.0).with_circles_json(
            r#"[{"x": 0.9, "y": 0.9, "r": 0.5, "color": "red", "fill": "pink"}]"#,
        ))
        .expect("refresh");
    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    let shapes = frame.layer(CanvasLayerKind::Shapes).expect("shape layer");
    assert_eq!(shapes.clip, engine.metrics().map(|m| m.bounds()));
    assert_eq!(shapes.circles[0].fill_color, Some(Color::rgb8(255, 192, 203)));
}
