mod engine;
mod engine_config;
mod grid_painter;
mod host;
mod shape_renderer;
mod tooltip_painter;

pub use engine::{GridOverlayEngine, RepaintStats};
pub use engine_config::{GridOverlayConfig, GridStyle, ShapeStyle, ShapeVariant, TooltipStyle};
pub use grid_painter::{LABEL_STEP, format_tick, paint_grid_layer, tick_values};
pub use host::{
    CircleInput, HostContext, HostOutputs, HostWidget, LifecycleState, MountPoint, PointerEvent,
    RerenderCallback,
};
pub use shape_renderer::paint_shape_layer;
pub use tooltip_painter::paint_overlay_layer;
