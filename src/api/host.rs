use serde::{Deserialize, Serialize};

use crate::core::{Circle, PixelPoint};
use crate::error::GridResult;

/// Callback the host provides to be asked for a repaint outside of `refresh`.
pub type RerenderCallback = Box<dyn FnMut()>;

/// Where circle data comes from on a refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum CircleInput {
    /// Raw JSON text. Malformed text renders no circles.
    Json(String),
    /// Already decoded records.
    Records(Vec<Circle>),
    /// The compiled-in static set.
    Builtin,
}

impl Default for CircleInput {
    fn default() -> Self {
        Self::Json(String::new())
    }
}

/// Boundary inputs read on every refresh.
///
/// Absent values fall back to the configured defaults: surface side 400,
/// square when only a width is given, axis limit 1, and a Y limit equal to
/// the X limit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostContext {
    pub surface_width: Option<u32>,
    pub surface_height: Option<u32>,
    pub axis_limit_x: Option<f64>,
    pub axis_limit_y: Option<f64>,
    /// Surface origin in the coordinate space of incoming pointer events.
    pub surface_origin: PixelPoint,
    pub circles: CircleInput,
}

impl HostContext {
    /// Square surface with one symmetric axis limit.
    #[must_use]
    pub fn square(size: u32, axis_limit: f64) -> Self {
        Self {
            surface_width: Some(size),
            surface_height: Some(size),
            axis_limit_x: Some(axis_limit),
            axis_limit_y: Some(axis_limit),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_surface(mut self, width: u32, height: u32) -> Self {
        self.surface_width = Some(width);
        self.surface_height = Some(height);
        self
    }

    #[must_use]
    pub fn with_axis_limits(mut self, x: f64, y: f64) -> Self {
        self.axis_limit_x = Some(x);
        self.axis_limit_y = Some(y);
        self
    }

    #[must_use]
    pub fn with_surface_origin(mut self, x: f64, y: f64) -> Self {
        self.surface_origin = PixelPoint::new(x, y);
        self
    }

    #[must_use]
    pub fn with_circles_json(mut self, json: impl Into<String>) -> Self {
        self.circles = CircleInput::Json(json.into());
        self
    }

    #[must_use]
    pub fn with_circles(mut self, circles: Vec<Circle>) -> Self {
        self.circles = CircleInput::Records(circles);
        self
    }

    #[must_use]
    pub fn with_builtin_circles(mut self) -> Self {
        self.circles = CircleInput::Builtin;
        self
    }
}

/// Host element the widget is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MountPoint {
    pub id: String,
}

impl MountPoint {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Values reported back to the host. The engine has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostOutputs {}

/// Pointer event in host coordinates (see `HostContext::surface_origin`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position relative to the surface's top-left corner.
    #[must_use]
    pub fn local_to(self, surface_origin: PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x - surface_origin.x, self.y - surface_origin.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    #[default]
    Created,
    Initialized,
    TornDown,
}

/// Capability interface a hosting component drives.
pub trait HostWidget {
    fn initialize(
        &mut self,
        context: &HostContext,
        rerender: RerenderCallback,
        persisted_state: Option<&serde_json::Value>,
        mount_point: &MountPoint,
    ) -> GridResult<()>;

    /// Re-reads boundary inputs and repaints.
    fn refresh(&mut self, context: &HostContext) -> GridResult<()>;

    fn get_outputs(&self) -> HostOutputs;

    /// Releases the pending tooltip timer and pointer listeners.
    fn teardown(&mut self);
}
