//! circle-grid: quantized Cartesian grid with circle overlays.
//!
//! The crate lays out a symmetric data range inside a fixed pixel surface,
//! maps between data and pixel coordinates, paints gridlines, axes, labels
//! and z-ordered circles into backend-agnostic layers, and turns clicks into
//! a transient coordinate read-out.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{GridOverlayConfig, GridOverlayEngine, HostContext, HostWidget};
pub use error::{GridError, GridResult};
