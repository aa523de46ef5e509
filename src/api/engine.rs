use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    AxisLimits, Circle, CoordinateTransform, GridMetrics, LayoutKey, PixelPoint, SurfaceSize,
    builtin_circle_set, decode_circles,
};
use crate::error::GridResult;
use crate::interaction::{
    ClickOutcome, DelayedTaskScheduler, InteractionController, TaskId, TooltipState,
};
use crate::render::{CanvasLayerKind, LayerPrimitives, RenderFrame, Renderer};

use super::grid_painter::paint_grid_layer;
use super::shape_renderer::paint_shape_layer;
use super::tooltip_painter::paint_overlay_layer;
use super::{
    CircleInput, GridOverlayConfig, HostContext, HostOutputs, HostWidget, LifecycleState,
    MountPoint, PointerEvent, RerenderCallback,
};

/// Counters describing how much work refreshes actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepaintStats {
    pub layout_recomputations: usize,
    pub grid_repaints: usize,
    pub shape_repaints: usize,
    pub frames_rendered: usize,
}

/// Grid + circle overlay engine driven by a host.
///
/// The grid layer is rebuilt only when the resolved (surface size, axis
/// limits) pair changes; the shape layer is rebuilt on every refresh; the
/// overlay layer follows the tooltip. All three are composited into one
/// `RenderFrame` per draw.
pub struct GridOverlayEngine<R: Renderer, S: DelayedTaskScheduler> {
    renderer: R,
    config: GridOverlayConfig,
    interaction: InteractionController<S>,
    metrics: Option<GridMetrics>,
    grid_layer: Option<Rc<LayerPrimitives>>,
    shape_layer: Option<Rc<LayerPrimitives>>,
    circles: Vec<Circle>,
    surface_origin: PixelPoint,
    rerender: Option<RerenderCallback>,
    stats: RepaintStats,
    lifecycle: LifecycleState,
}

impl<R: Renderer, S: DelayedTaskScheduler> GridOverlayEngine<R, S> {
    pub fn new(renderer: R, scheduler: S, config: GridOverlayConfig) -> GridResult<Self> {
        config.validate()?;
        let interaction = InteractionController::new(scheduler, config.tooltip);
        Ok(Self {
            renderer,
            config,
            interaction,
            metrics: None,
            grid_layer: None,
            shape_layer: None,
            circles: Vec::new(),
            surface_origin: PixelPoint::default(),
            rerender: None,
            stats: RepaintStats::default(),
            lifecycle: LifecycleState::Created,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GridOverlayConfig {
        &self.config
    }

    /// Layout of the last refresh, if any.
    #[must_use]
    pub fn metrics(&self) -> Option<&GridMetrics> {
        self.metrics.as_ref()
    }

    #[must_use]
    pub fn transform(&self) -> Option<CoordinateTransform> {
        self.metrics.as_ref().map(CoordinateTransform::new)
    }

    #[must_use]
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    #[must_use]
    pub fn stats(&self) -> RepaintStats {
        self.stats
    }

    #[must_use]
    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.interaction.tooltip()
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionController<S> {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionController<S> {
        &mut self.interaction
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Applies configured defaults, clamping and sanitizing to host inputs.
    #[must_use]
    pub fn resolve_layout_key(&self, context: &HostContext) -> LayoutKey {
        let width = context
            .surface_width
            .unwrap_or(self.config.default_surface_px);
        let height = context.surface_height.unwrap_or(width);
        let limit_x = context.axis_limit_x.unwrap_or(AxisLimits::DEFAULT_LIMIT);
        let limit_y = context.axis_limit_y.unwrap_or(limit_x);
        LayoutKey {
            surface: SurfaceSize::new(width, height).clamped_to(self.config.min_surface_px),
            axis_limits: AxisLimits::new(limit_x, limit_y).sanitized(),
        }
    }

    /// Re-reads host inputs, repaints what changed and draws one frame.
    pub fn refresh_from(&mut self, context: &HostContext) -> GridResult<()> {
        if self.lifecycle == LifecycleState::TornDown {
            warn!("refresh after teardown ignored");
            return Ok(());
        }

        let key = self.resolve_layout_key(context);
        let layout_changed = self.metrics.map(|metrics| metrics.layout_key()) != Some(key);
        if layout_changed {
            let metrics = GridMetrics::compute(
                key.surface,
                key.axis_limits,
                self.config.margin_px,
                self.config.min_surface_px,
            );
            debug!(
                width = key.surface.width,
                height = key.surface.height,
                limit_x = key.axis_limits.x,
                limit_y = key.axis_limits.y,
                unit_size = metrics.unit_size(),
                "grid layout recomputed"
            );
            self.stats.layout_recomputations += 1;
            self.grid_layer = Some(Rc::new(paint_grid_layer(&metrics, &self.config.grid_style)));
            self.stats.grid_repaints += 1;
            self.metrics = Some(metrics);
            if self.interaction.hide() {
                trace!("tooltip hidden by re-layout");
            }
        }
        self.surface_origin = context.surface_origin;

        self.circles = match &context.circles {
            CircleInput::Json(text) => decode_circles(text),
            CircleInput::Records(circles) => circles.clone(),
            CircleInput::Builtin => builtin_circle_set(),
        };
        if let Some(metrics) = &self.metrics {
            self.shape_layer = Some(Rc::new(paint_shape_layer(
                &self.circles,
                metrics,
                &self.config.shape_style,
                self.config.variant,
            )));
            self.stats.shape_repaints += 1;
        }
        trace!(
            circles = self.circles.len(),
            layout_changed, "shape layer repainted"
        );

        self.render()
    }

    /// Handles a click in host coordinates and redraws the overlay.
    pub fn pointer_click(&mut self, event: PointerEvent) -> GridResult<ClickOutcome> {
        if self.lifecycle == LifecycleState::TornDown {
            return Ok(ClickOutcome::OutsideGrid);
        }
        let Some(metrics) = self.metrics else {
            return Ok(ClickOutcome::OutsideGrid);
        };
        let outcome = self
            .interaction
            .on_click(event.local_to(self.surface_origin), &metrics);
        self.render()?;
        Ok(outcome)
    }

    /// Handles pointer movement. Returns `true` when a tooltip was hidden.
    pub fn pointer_move(&mut self, _event: PointerEvent) -> GridResult<bool> {
        if !self.interaction.on_pointer_move() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Delivers a due delayed task from the host scheduler.
    ///
    /// Returns `true` when it hid the tooltip; the host's rerender callback
    /// is invoked in that case.
    pub fn timer_expired(&mut self, task: TaskId) -> GridResult<bool> {
        if !self.interaction.on_timer_expired(task) {
            return Ok(false);
        }
        self.render()?;
        if let Some(rerender) = self.rerender.as_mut() {
            rerender();
        }
        Ok(true)
    }

    /// Composites the cached grid layer, the current shape layer and the
    /// tooltip overlay. Cached layers are shared with the frame, not copied.
    #[must_use]
    pub fn build_frame(&self) -> RenderFrame {
        let surface = self
            .metrics
            .map(|metrics| metrics.surface())
            .unwrap_or_else(|| SurfaceSize::square(self.config.default_surface_px));
        RenderFrame::new(surface)
            .with_shared_layer(cached_or_empty(&self.grid_layer, CanvasLayerKind::Grid))
            .with_shared_layer(cached_or_empty(&self.shape_layer, CanvasLayerKind::Shapes))
            .with_layer(paint_overlay_layer(
                self.interaction.tooltip(),
                &self.config.tooltip_style,
            ))
    }

    pub fn render(&mut self) -> GridResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)?;
        self.stats.frames_rendered += 1;
        Ok(())
    }
}

fn cached_or_empty(
    layer: &Option<Rc<LayerPrimitives>>,
    kind: CanvasLayerKind,
) -> Rc<LayerPrimitives> {
    layer
        .clone()
        .unwrap_or_else(|| Rc::new(LayerPrimitives::new(kind)))
}

impl<R: Renderer, S: DelayedTaskScheduler> HostWidget for GridOverlayEngine<R, S> {
    fn initialize(
        &mut self,
        context: &HostContext,
        rerender: RerenderCallback,
        persisted_state: Option<&serde_json::Value>,
        mount_point: &MountPoint,
    ) -> GridResult<()> {
        debug!(
            mount_point = %mount_point.id,
            has_persisted_state = persisted_state.is_some(),
            variant = ?self.config.variant,
            "initialize grid overlay"
        );
        self.rerender = Some(rerender);
        self.lifecycle = LifecycleState::Initialized;
        self.refresh_from(context)
    }

    fn refresh(&mut self, context: &HostContext) -> GridResult<()> {
        self.refresh_from(context)
    }

    fn get_outputs(&self) -> HostOutputs {
        HostOutputs::default()
    }

    fn teardown(&mut self) {
        debug!("teardown grid overlay");
        self.interaction.teardown();
        self.rerender = None;
        self.lifecycle = LifecycleState::TornDown;
    }
}
