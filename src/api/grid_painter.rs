use std::f64::consts::FRAC_PI_2;

use crate::core::GridMetrics;
use crate::render::{
    CanvasLayerKind, LayerPrimitives, LinePrimitive, StrokeStyle, TextPrimitive,
};

use super::GridStyle;

/// Data distance between two tick labels.
pub const LABEL_STEP: f64 = 0.5;

/// Builds the grid layer: minor lines, then axes, then tick labels.
///
/// The layer is not clipped; labels sit outside the grid bounds.
#[must_use]
pub fn paint_grid_layer(metrics: &GridMetrics, style: &GridStyle) -> LayerPrimitives {
    let mut layer = LayerPrimitives::new(CanvasLayerKind::Grid);
    push_minor_lines(&mut layer, metrics, style);
    push_axes(&mut layer, metrics, style);
    push_labels(&mut layer, metrics, style);
    layer
}

fn push_minor_lines(layer: &mut LayerPrimitives, metrics: &GridMetrics, style: &GridStyle) {
    let bounds = metrics.bounds();
    let surface = metrics.surface();
    let (width, height) = (f64::from(surface.width), f64::from(surface.height));
    let step = metrics.minor_step();
    let half_unit = metrics.half_unit_px();

    // A line is solid only when its offset from the grid edge is an exact
    // multiple of half a unit. Unit sizes are multiples of 10, so offsets
    // `index * step` are integral for every reachable layout.
    let (top, bottom) = (bounds.top.max(0.0), bounds.bottom.min(height));
    for offset in visible_offsets(bounds.left, bounds.width(), step, width) {
        let x = bounds.left + offset;
        layer
            .lines
            .push(minor_line(x, top, x, bottom, offset, half_unit, style));
    }

    let (left, right) = (bounds.left.max(0.0), bounds.right.min(width));
    for offset in visible_offsets(bounds.top, bounds.height(), step, height) {
        let y = bounds.top + offset;
        layer
            .lines
            .push(minor_line(left, y, right, y, offset, half_unit, style));
    }
}

/// Offsets `0, step, 2 * step, ..` up to `span`, restricted to those whose
/// position `start + offset` lands on `0..=extent`.
///
/// Grids that overflow the surface only yield their on-surface lines, so the
/// count is bounded by the surface size whatever the axis limit.
fn visible_offsets(start: f64, span: f64, step: f64, extent: f64) -> impl Iterator<Item = f64> {
    let first_index = ((-start).max(0.0) / step).ceil();
    let last_index = (span.min(extent - start) / step).floor();
    let count = if first_index.is_finite() && last_index.is_finite() && last_index >= first_index {
        (last_index - first_index) as u64 + 1
    } else {
        0
    };
    (0..count).map(move |index| (first_index + index as f64) * step)
}

fn minor_line(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    offset: f64,
    half_unit: f64,
    style: &GridStyle,
) -> LinePrimitive {
    let line = LinePrimitive::new(x1, y1, x2, y2, style.minor_line_width, style.minor_line_color);
    if offset % half_unit == 0.0 {
        line
    } else {
        LinePrimitive {
            color: style
                .minor_line_color
                .with_alpha(style.minor_line_color.alpha * style.dashed_minor_line_alpha),
            ..line
        }
        .with_stroke_style(StrokeStyle::Dashed(style.minor_line_dash.clone()))
    }
}

fn push_axes(layer: &mut LayerPrimitives, metrics: &GridMetrics, style: &GridStyle) {
    let bounds = metrics.bounds();
    let center = metrics.center();
    if !center.x.is_finite() || !center.y.is_finite() {
        return;
    }
    let surface = metrics.surface();
    let (width, height) = (f64::from(surface.width), f64::from(surface.height));
    layer.lines.push(LinePrimitive::new(
        bounds.left.max(0.0),
        center.y,
        bounds.right.min(width),
        center.y,
        style.axis_width,
        style.axis_color,
    ));
    layer.lines.push(LinePrimitive::new(
        center.x,
        bounds.top.max(0.0),
        center.x,
        bounds.bottom.min(height),
        style.axis_width,
        style.axis_color,
    ));
}

fn push_labels(layer: &mut LayerPrimitives, metrics: &GridMetrics, style: &GridStyle) {
    let bounds = metrics.bounds();
    let center = metrics.center();
    let unit = metrics.unit_size_px();
    if !center.x.is_finite() || !center.y.is_finite() {
        return;
    }
    let limits = metrics.axis_limits();
    let surface = metrics.surface();
    let (width, height) = (f64::from(surface.width), f64::from(surface.height));

    let label_row = bounds.top - style.label_gap_px;
    if (0.0..=height).contains(&label_row) {
        let low = -center.x / unit;
        let high = (width - center.x) / unit;
        for value in ticks_within(limits.x, low, high) {
            layer.texts.push(
                TextPrimitive::new(
                    format_tick(value),
                    center.x + value * unit,
                    label_row,
                    style.label_font_size_px,
                    style.label_color,
                )
                .with_rotation(-FRAC_PI_2),
            );
        }
    }

    let label_column = bounds.right + style.label_gap_px;
    if (0.0..=width).contains(&label_column) {
        let low = (center.y - height) / unit;
        let high = center.y / unit;
        for value in ticks_within(limits.y, low, high) {
            layer.texts.push(TextPrimitive::new(
                format_tick(value),
                label_column,
                center.y - value * unit,
                style.label_font_size_px,
                style.label_color,
            ));
        }
    }
}

/// Tick values `-limit, -limit + 0.5, ...` up to `+limit`.
#[must_use]
pub fn tick_values(limit: f64) -> Vec<f64> {
    ticks_within(limit, -limit, limit)
}

/// The values of `tick_values(limit)` that fall inside `low..=high`.
fn ticks_within(limit: f64, low: f64, high: f64) -> Vec<f64> {
    let last = ((2.0 * limit) / LABEL_STEP + 1e-9).floor();
    let first_visible = ((low + limit) / LABEL_STEP - 1e-9).ceil().max(0.0);
    let last_visible = ((high + limit) / LABEL_STEP + 1e-9).floor().min(last);
    if !first_visible.is_finite() || !last_visible.is_finite() || last_visible < first_visible {
        return Vec::new();
    }
    let count = (last_visible - first_visible) as u64 + 1;
    (0..count)
        .map(|index| -limit + (first_visible + index as f64) * LABEL_STEP)
        .collect()
}

/// Formats a tick with exactly two decimals, without a `-0.00`.
#[must_use]
pub fn format_tick(value: f64) -> String {
    let text = format!("{value:.2}");
    if text == "-0.00" {
        "0.00".to_owned()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::{format_tick, paint_grid_layer, tick_values, ticks_within};
    use crate::api::GridStyle;
    use crate::core::{AxisLimits, GridMetrics, SurfaceSize};
    use crate::render::StrokeStyle;

    fn default_metrics() -> GridMetrics {
        GridMetrics::compute(SurfaceSize::square(400), AxisLimits::default(), 30, 200)
    }

    #[test]
    fn ticks_cover_symmetric_range_in_half_steps() {
        assert_eq!(tick_values(1.0), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(tick_values(0.75), vec![-0.75, -0.25, 0.25, 0.75]);
    }

    #[test]
    fn tick_labels_use_two_decimals() {
        assert_eq!(format_tick(-1.0), "-1.00");
        assert_eq!(format_tick(0.5), "0.50");
        assert_eq!(format_tick(-0.0), "0.00");
    }

    #[test]
    fn default_layout_draws_expected_line_counts() {
        let layer = paint_grid_layer(&default_metrics(), &GridStyle::default());
        // 21 minor lines per axis (offsets 0..=340 step 17) plus two axes.
        assert_eq!(layer.lines.len(), 21 * 2 + 2);
        // Five labels per axis.
        assert_eq!(layer.texts.len(), 10);
        assert!(layer.clip.is_none());
    }

    #[test]
    fn half_unit_lines_are_solid_and_others_dashed() {
        let layer = paint_grid_layer(&default_metrics(), &GridStyle::default());
        let vertical: Vec<_> = layer.lines.iter().take(21).collect();
        let solid_offsets: Vec<f64> = vertical
            .iter()
            .filter(|line| line.stroke_style == StrokeStyle::Solid)
            .map(|line| line.x1 - 30.0)
            .collect();
        assert_eq!(solid_offsets, vec![0.0, 85.0, 170.0, 255.0, 340.0]);
        assert!(
            vertical
                .iter()
                .filter(|line| line.stroke_style.is_dashed())
                .all(|line| line.color.alpha < 1.0)
        );
    }

    #[test]
    fn axes_are_bold_and_cross_at_center() {
        let layer = paint_grid_layer(&default_metrics(), &GridStyle::default());
        let axes = &layer.lines[42..44];
        assert_eq!((axes[0].y1, axes[0].y2, axes[0].stroke_width), (200.0, 200.0, 2.0));
        assert_eq!((axes[1].x1, axes[1].x2), (200.0, 200.0));
        assert_eq!((axes[0].x1, axes[0].x2), (30.0, 370.0));
    }

    #[test]
    fn x_labels_rotate_above_grid_and_y_labels_sit_right() {
        let layer = paint_grid_layer(&default_metrics(), &GridStyle::default());
        let first_x = &layer.texts[0];
        assert_eq!(first_x.text, "-1.00");
        assert_eq!((first_x.x, first_x.y), (30.0, 25.0));
        assert!(first_x.rotation_rad < 0.0);

        let first_y = &layer.texts[5];
        assert_eq!(first_y.text, "-1.00");
        assert_eq!((first_y.x, first_y.y), (375.0, 370.0));
        assert_eq!(first_y.rotation_rad, 0.0);
    }

    #[test]
    fn visible_ticks_are_clipped_to_the_requested_range() {
        assert_eq!(ticks_within(25.0, -1.2, 0.7), vec![-1.0, -0.5, 0.0, 0.5]);
        assert!(ticks_within(1.0, 2.0, 3.0).is_empty());
    }

    #[test]
    fn overflowing_grid_only_paints_on_surface_lines() {
        // usable 340 / 50 -> unit floored to the 10 px minimum, grid 500 px wide.
        let metrics =
            GridMetrics::compute(SurfaceSize::square(400), AxisLimits::symmetric(25.0), 30, 200);
        assert_eq!(metrics.bounds().left, -50.0);
        let layer = paint_grid_layer(&metrics, &GridStyle::default());

        assert_eq!(layer.lines.len(), 401 * 2 + 2);
        let vertical = &layer.lines[..401];
        assert_eq!((vertical[0].x1, vertical[400].x1), (0.0, 400.0));
        assert_eq!((vertical[0].y1, vertical[0].y2), (0.0, 400.0));
        // Offsets are still measured from the grid edge at -50.
        assert_eq!(vertical[0].stroke_style, StrokeStyle::Solid);
        assert!(vertical[1].stroke_style.is_dashed());
        assert_eq!(vertical[200].stroke_style, StrokeStyle::Solid);

        let axes = &layer.lines[802..];
        assert_eq!((axes[0].x1, axes[0].x2), (0.0, 400.0));
        assert_eq!((axes[1].y1, axes[1].y2), (0.0, 400.0));
        // Both label rows sit beyond the surface edge.
        assert!(layer.texts.is_empty());
    }

    #[test]
    fn non_finite_layout_paints_nothing() {
        let metrics = GridMetrics::compute(
            SurfaceSize::square(400),
            AxisLimits::symmetric(f64::MAX),
            30,
            200,
        );
        let layer = paint_grid_layer(&metrics, &GridStyle::default());
        assert!(layer.is_empty());
        assert!(layer.validate().is_ok());
    }
}
