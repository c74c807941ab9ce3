//! Opt-in `tracing` setup for hosts embedding `chart-grid-sync`.
//!
//! Registry and bridge code only emits events. Isolated listener failures are
//! logged at `warn` under the `chart_grid_sync::events` target, directory
//! mutations at `debug`.

/// Filter used when `RUST_LOG` is unset: listener failures stay visible while
/// per-mutation chatter is suppressed.
pub const DEFAULT_TRACING_FILTER: &str = "info,chart_grid_sync=warn";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_TRACING_FILTER)
}

/// Like [`init_default_tracing`] with a caller-chosen fallback filter,
/// e.g. `"chart_grid_sync=debug"` to follow every registry mutation.
#[must_use]
pub fn init_tracing(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACING_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
