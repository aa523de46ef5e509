use tracing::warn;

use crate::core::{Circle, CoordinateTransform, GridMetrics, paint_order};
use crate::render::{CanvasLayerKind, CirclePrimitive, LayerPrimitives, StrokeStyle};

use super::{ShapeStyle, ShapeVariant};

/// Builds the shape layer, clipped to the grid bounds.
///
/// Circles are emitted in paint order (dynamic: ascending z-index, stable;
/// static: declaration order). In the static variant each circle is followed
/// by its pivot marker.
#[must_use]
pub fn paint_shape_layer(
    circles: &[Circle],
    metrics: &GridMetrics,
    style: &ShapeStyle,
    variant: ShapeVariant,
) -> LayerPrimitives {
    let transform = CoordinateTransform::new(metrics);
    let mut layer = LayerPrimitives::new(CanvasLayerKind::Shapes).with_clip(metrics.bounds());

    for circle in paint_order(circles, variant.paint_order()) {
        let outline = circle_primitive(circle, transform, style);
        if outline.validate().is_err() {
            // Finite data can still overflow pixel space.
            warn!(x = circle.center().x, y = circle.center().y, "circle outside pixel range skipped");
            continue;
        }
        let pivot = variant
            .draws_pivot_markers()
            .then(|| pivot_primitive(circle, &outline, style));
        layer.circles.push(outline);
        layer.circles.extend(pivot);
    }
    layer
}

fn circle_primitive(
    circle: &Circle,
    transform: CoordinateTransform,
    style: &ShapeStyle,
) -> CirclePrimitive {
    let center = transform.to_pixel(circle.center());
    CirclePrimitive {
        cx: center.x,
        cy: center.y,
        radius: transform.length_to_pixels(circle.radius()),
        stroke_width: style.stroke_width,
        stroke_color: circle.color(),
        stroke_style: if circle.is_dashed() {
            StrokeStyle::Dashed(style.dash.clone())
        } else {
            StrokeStyle::Solid
        },
        fill_color: circle.fill(),
    }
}

/// Small concentric marker; filled gray unless the parent is dashed.
fn pivot_primitive(circle: &Circle, parent: &CirclePrimitive, style: &ShapeStyle) -> CirclePrimitive {
    let dashed = circle.is_dashed();
    CirclePrimitive {
        cx: parent.cx,
        cy: parent.cy,
        radius: parent.radius * style.pivot_radius_ratio,
        stroke_width: style.pivot_stroke_width,
        stroke_color: circle.color(),
        stroke_style: if dashed {
            StrokeStyle::Dashed(style.pivot_dash.clone())
        } else {
            StrokeStyle::Solid
        },
        fill_color: (!dashed).then_some(style.pivot_fill),
    }
}
