//! Telemetry helpers for applications embedding `chart-motion`.
//!
//! Tracing setup stays opt-in. Hosts either call one of the initializers below
//! or install their own `tracing` subscriber. Export phases log at `debug`,
//! swallowed live draw failures at `warn`.

/// Initializes a `tracing` subscriber honoring `RUST_LOG`, defaulting to `info`.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber was already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Initializes a compact `tracing` subscriber with an explicit filter
/// directive such as `"chart_motion=debug"`.
#[must_use]
pub fn init_tracing_with_filter(filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let Ok(filter) = tracing_subscriber::EnvFilter::try_new(filter) else {
            return false;
        };
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = filter;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
