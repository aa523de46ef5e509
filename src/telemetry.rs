//! Log output for hosts that have no `tracing` subscriber of their own.
//!
//! Events emitted under the `circle_grid` target:
//! - `debug`: grid layout recomputed (surface, limits, unit size), widget
//!   initialize and teardown, circle input decoded.
//! - `warn`: malformed circle input replaced by an empty set, circles whose
//!   pixel projection overflows, refresh after teardown.
//! - `trace`: shape layer repaints, clicks outside the grid, tooltip shown,
//!   hidden or expired by a stale timer.

/// Filter used when `RUST_LOG` is unset.
#[cfg(feature = "telemetry")]
const DEFAULT_FILTER: &str = "circle_grid=info";

/// Installs a compact `fmt` subscriber honoring `RUST_LOG`.
///
/// Returns `false` without the `telemetry` feature or when the host already
/// installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
