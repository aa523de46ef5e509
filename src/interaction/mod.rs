mod scheduler;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{CoordinateTransform, DataPoint, GridMetrics, PixelPoint};

pub use scheduler::{DelayedTaskScheduler, ManualTaskScheduler, TaskId};

/// Tuning for the click read-out tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Offset of the tooltip anchor from the click point, on both axes.
    pub offset_px: f64,
    /// Delay before an untouched tooltip hides itself.
    pub timeout_ms: u64,
}

impl TooltipConfig {
    #[must_use]
    pub fn timeout(self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset_px: 10.0,
            timeout_ms: 2_000,
        }
    }
}

/// Currently displayed coordinate read-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    /// Pixel position of the tooltip's top-left corner.
    pub anchor: PixelPoint,
    pub data: DataPoint,
    pub text: String,
}

/// Result of a click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The click missed the grid; any tooltip was hidden.
    OutsideGrid,
    Shown(TooltipState),
}

/// Formats a data coordinate as `(x: 0.00, y: 0.00)`.
#[must_use]
pub fn format_coordinates(point: DataPoint) -> String {
    format!("(x: {:.2}, y: {:.2})", point.x, point.y)
}

/// Click-to-read-coordinates state machine.
///
/// Owns the delayed-task scheduler used for tooltip expiry and guarantees at
/// most one pending expiry at a time: showing, hiding and teardown always
/// cancel the previous task before doing anything else.
#[derive(Debug)]
pub struct InteractionController<S: DelayedTaskScheduler> {
    scheduler: S,
    config: TooltipConfig,
    tooltip: Option<TooltipState>,
    pending_expiry: Option<TaskId>,
    move_listener_armed: bool,
}

impl<S: DelayedTaskScheduler> InteractionController<S> {
    #[must_use]
    pub fn new(scheduler: S, config: TooltipConfig) -> Self {
        Self {
            scheduler,
            config,
            tooltip: None,
            pending_expiry: None,
            move_listener_armed: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> TooltipConfig {
        self.config
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.as_ref()
    }

    #[must_use]
    pub fn pending_expiry(&self) -> Option<TaskId> {
        self.pending_expiry
    }

    #[must_use]
    pub fn is_move_listener_armed(&self) -> bool {
        self.move_listener_armed
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Handles a click at `local`, given in surface pixel coordinates.
    pub fn on_click(&mut self, local: PixelPoint, metrics: &GridMetrics) -> ClickOutcome {
        if !metrics.bounds().contains(local) {
            trace!(x = local.x, y = local.y, "click outside grid bounds");
            self.hide();
            return ClickOutcome::OutsideGrid;
        }

        let data = CoordinateTransform::new(metrics).to_data(local);
        let tooltip = TooltipState {
            anchor: PixelPoint::new(
                local.x + self.config.offset_px,
                local.y + self.config.offset_px,
            ),
            data,
            text: format_coordinates(data),
        };
        trace!(text = %tooltip.text, "show coordinate tooltip");

        self.cancel_pending_expiry();
        self.pending_expiry = Some(self.scheduler.arm(self.config.timeout()));
        self.tooltip = Some(tooltip.clone());
        self.move_listener_armed = true;
        ClickOutcome::Shown(tooltip)
    }

    /// Handles pointer movement. Returns `true` when a tooltip was hidden.
    ///
    /// The move listener is one-shot: it is armed by a shown tooltip and
    /// disarmed by the first movement.
    pub fn on_pointer_move(&mut self) -> bool {
        if !self.move_listener_armed {
            return false;
        }
        self.hide()
    }

    /// Handles a due expiry task. Stale ids are ignored.
    pub fn on_timer_expired(&mut self, task: TaskId) -> bool {
        if self.pending_expiry != Some(task) {
            trace!(task = task.raw(), "ignoring stale tooltip expiry");
            return false;
        }
        self.pending_expiry = None;
        self.hide()
    }

    /// Hides the tooltip and releases its timer and move listener.
    ///
    /// Returns `true` when a tooltip was visible.
    pub fn hide(&mut self) -> bool {
        self.cancel_pending_expiry();
        self.move_listener_armed = false;
        self.tooltip.take().is_some()
    }

    pub fn teardown(&mut self) {
        self.hide();
    }

    fn cancel_pending_expiry(&mut self) {
        if let Some(task) = self.pending_expiry.take() {
            self.scheduler.cancel(task);
        }
    }
}
