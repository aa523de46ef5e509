use crate::interaction::TooltipState;
use crate::render::{CanvasLayerKind, LayerPrimitives, RectPrimitive, TextPrimitive};

use super::TooltipStyle;

/// Average glyph advance relative to font size, used to size the background
/// without a text shaper.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Builds the overlay layer holding the coordinate tooltip, if any.
#[must_use]
pub fn paint_overlay_layer(tooltip: Option<&TooltipState>, style: &TooltipStyle) -> LayerPrimitives {
    let mut layer = LayerPrimitives::new(CanvasLayerKind::Overlay);
    let Some(tooltip) = tooltip else {
        return layer;
    };

    let text_width = tooltip.text.chars().count() as f64 * style.font_size_px * GLYPH_WIDTH_RATIO;
    let width = text_width + 2.0 * style.padding_px;
    let height = style.font_size_px + 2.0 * style.padding_px;
    layer.rects.push(RectPrimitive::new(
        tooltip.anchor.x,
        tooltip.anchor.y,
        width,
        height,
        style.background,
    ));
    layer.texts.push(TextPrimitive::new(
        tooltip.text.clone(),
        tooltip.anchor.x + style.padding_px,
        tooltip.anchor.y + height / 2.0,
        style.font_size_px,
        style.text_color,
    ));
    layer
}

#[cfg(test)]
mod tests {
    use super::paint_overlay_layer;
    use crate::api::TooltipStyle;
    use crate::core::{DataPoint, PixelPoint};
    use crate::interaction::TooltipState;

    #[test]
    fn hidden_tooltip_paints_nothing() {
        assert!(paint_overlay_layer(None, &TooltipStyle::default()).is_empty());
    }

    #[test]
    fn tooltip_box_starts_at_anchor() {
        let tooltip = TooltipState {
            anchor: PixelPoint::new(210.0, 210.0),
            data: DataPoint::new(0.0, 0.0),
            text: "(x: 0.00, y: 0.00)".to_owned(),
        };
        let layer = paint_overlay_layer(Some(&tooltip), &TooltipStyle::default());
        assert_eq!(layer.rects.len(), 1);
        assert_eq!((layer.rects[0].x, layer.rects[0].y), (210.0, 210.0));
        assert_eq!(layer.texts[0].text, "(x: 0.00, y: 0.00)");
        assert_eq!(layer.texts[0].x, 214.0);
    }
}
