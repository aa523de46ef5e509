use serde::{Deserialize, Serialize};

use crate::core::PaintOrder;
use crate::error::{GridError, GridResult};
use crate::interaction::TooltipConfig;
use crate::render::{Color, DashPattern};

/// Selects how the circle set is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeVariant {
    /// Circles come from host JSON and paint by ascending z-index.
    #[default]
    Dynamic,
    /// Circles paint in declaration order, each with a concentric pivot marker.
    Static,
}

impl ShapeVariant {
    #[must_use]
    pub fn paint_order(self) -> PaintOrder {
        match self {
            Self::Dynamic => PaintOrder::ZIndex,
            Self::Static => PaintOrder::Declaration,
        }
    }

    #[must_use]
    pub fn draws_pivot_markers(self) -> bool {
        self == Self::Static
    }
}

/// Colors and strokes of the grid layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    pub minor_line_color: Color,
    pub minor_line_width: f64,
    /// Dash used for minor lines that are not on a half-unit boundary.
    pub minor_line_dash: DashPattern,
    /// Opacity of dashed minor lines. Half-unit lines are fully opaque.
    pub dashed_minor_line_alpha: f64,
    pub axis_color: Color,
    pub axis_width: f64,
    pub label_color: Color,
    pub label_font_size_px: f64,
    /// Distance between the grid edge and tick labels.
    pub label_gap_px: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            minor_line_color: Color::rgb8(204, 204, 204),
            minor_line_width: 1.0,
            minor_line_dash: DashPattern::new(1.0, 1.0),
            dashed_minor_line_alpha: 0.5,
            axis_color: Color::BLACK,
            axis_width: 2.0,
            label_color: Color::BLACK,
            label_font_size_px: 10.0,
            label_gap_px: 5.0,
        }
    }
}

/// Strokes of circle overlays and static-variant pivot markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub stroke_width: f64,
    pub dash: DashPattern,
    /// Pivot radius as a fraction of the parent circle's radius.
    pub pivot_radius_ratio: f64,
    pub pivot_fill: Color,
    pub pivot_stroke_width: f64,
    /// Dash of pivots whose parent is dashed; slightly wider than `dash`.
    pub pivot_dash: DashPattern,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            dash: DashPattern::new(4.0, 4.0),
            pivot_radius_ratio: 0.06,
            pivot_fill: Color::NEUTRAL_GRAY,
            pivot_stroke_width: 1.0,
            pivot_dash: DashPattern::new(5.0, 5.0),
        }
    }
}

/// Look of the tooltip drawn into the overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipStyle {
    pub text_color: Color,
    pub background: Color,
    pub font_size_px: f64,
    pub padding_px: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            text_color: Color::WHITE,
            background: Color::rgba(0.0, 0.0, 0.0, 0.75),
            font_size_px: 12.0,
            padding_px: 4.0,
        }
    }
}

/// Public engine configuration.
///
/// Every constant the layout and painters rely on lives here with a named
/// default, so hosts can persist/load a setup as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOverlayConfig {
    /// Fixed inset between the surface edge and the usable grid area.
    pub margin_px: u32,
    /// Surfaces smaller than this are clamped up before layout.
    pub min_surface_px: u32,
    /// Surface side used when the host supplies no size.
    pub default_surface_px: u32,
    pub variant: ShapeVariant,
    pub grid_style: GridStyle,
    pub shape_style: ShapeStyle,
    pub tooltip: TooltipConfig,
    pub tooltip_style: TooltipStyle,
}

impl Default for GridOverlayConfig {
    fn default() -> Self {
        Self {
            margin_px: 30,
            min_surface_px: 200,
            default_surface_px: 400,
            variant: ShapeVariant::default(),
            grid_style: GridStyle::default(),
            shape_style: ShapeStyle::default(),
            tooltip: TooltipConfig::default(),
            tooltip_style: TooltipStyle::default(),
        }
    }
}

impl GridOverlayConfig {
    /// Preset for the static variant: declaration order plus pivot markers.
    #[must_use]
    pub fn static_variant() -> Self {
        Self::default().with_variant(ShapeVariant::Static)
    }

    #[must_use]
    pub fn with_variant(mut self, variant: ShapeVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn with_margin_px(mut self, margin_px: u32) -> Self {
        self.margin_px = margin_px;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    #[must_use]
    pub fn with_grid_style(mut self, grid_style: GridStyle) -> Self {
        self.grid_style = grid_style;
        self
    }

    #[must_use]
    pub fn with_shape_style(mut self, shape_style: ShapeStyle) -> Self {
        self.shape_style = shape_style;
        self
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.min_surface_px == 0 {
            return Err(GridError::InvalidConfig(
                "minimum surface size must be > 0".to_owned(),
            ));
        }
        if u64::from(self.margin_px) * 2 >= u64::from(self.min_surface_px) {
            return Err(GridError::InvalidConfig(format!(
                "margin {} leaves no usable span on a {} px surface",
                self.margin_px, self.min_surface_px
            )));
        }
        if self.default_surface_px == 0 {
            return Err(GridError::InvalidConfig(
                "default surface size must be > 0".to_owned(),
            ));
        }

        let grid = &self.grid_style;
        require_positive("minor line width", grid.minor_line_width)?;
        require_positive("axis width", grid.axis_width)?;
        require_positive("label font size", grid.label_font_size_px)?;
        require_non_negative("label gap", grid.label_gap_px)?;
        if !(0.0..=1.0).contains(&grid.dashed_minor_line_alpha) {
            return Err(GridError::InvalidConfig(
                "dashed minor line alpha must be in [0, 1]".to_owned(),
            ));
        }
        grid.minor_line_dash.validate()?;
        grid.minor_line_color.validate()?;
        grid.axis_color.validate()?;
        grid.label_color.validate()?;

        let shape = &self.shape_style;
        require_positive("shape stroke width", shape.stroke_width)?;
        require_positive("pivot stroke width", shape.pivot_stroke_width)?;
        if !shape.pivot_radius_ratio.is_finite()
            || shape.pivot_radius_ratio <= 0.0
            || shape.pivot_radius_ratio > 1.0
        {
            return Err(GridError::InvalidConfig(
                "pivot radius ratio must be in (0, 1]".to_owned(),
            ));
        }
        shape.dash.validate()?;
        shape.pivot_dash.validate()?;
        shape.pivot_fill.validate()?;

        if self.tooltip.timeout_ms == 0 {
            return Err(GridError::InvalidConfig(
                "tooltip timeout must be > 0".to_owned(),
            ));
        }
        if !self.tooltip.offset_px.is_finite() {
            return Err(GridError::InvalidConfig(
                "tooltip offset must be finite".to_owned(),
            ));
        }
        require_positive("tooltip font size", self.tooltip_style.font_size_px)?;
        require_non_negative("tooltip padding", self.tooltip_style.padding_px)?;
        self.tooltip_style.text_color.validate()?;
        self.tooltip_style.background.validate()
    }

    pub fn from_json_str(input: &str) -> GridResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| GridError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> GridResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GridError::InvalidConfig(format!("failed to serialize config: {e}")))
    }
}

fn require_positive(name: &str, value: f64) -> GridResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GridError::InvalidConfig(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

fn require_non_negative(name: &str, value: f64) -> GridResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GridError::InvalidConfig(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{GridOverlayConfig, ShapeVariant};
    use crate::core::PaintOrder;

    #[test]
    fn defaults_are_valid() {
        let config = GridOverlayConfig::default();
        config.validate().expect("default config");
        assert_eq!(config.margin_px, 30);
        assert_eq!(config.tooltip.timeout_ms, 2_000);
    }

    #[test]
    fn margin_must_leave_usable_span() {
        let config = GridOverlayConfig::default().with_margin_px(100);
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = GridOverlayConfig::from_json_str(r#"{"variant": "Static", "margin_px": 20}"#)
            .expect("partial config");
        assert_eq!(config.variant, ShapeVariant::Static);
        assert_eq!(config.margin_px, 20);
        assert_eq!(config.min_surface_px, 200);
        assert_eq!(config.variant.paint_order(), PaintOrder::Declaration);
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let config = GridOverlayConfig::static_variant();
        let json = config.to_json_pretty().expect("serialize");
        let restored = GridOverlayConfig::from_json_str(&json).expect("parse");
        assert_eq!(restored, config);
    }
}
