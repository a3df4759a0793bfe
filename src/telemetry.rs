//! Telemetry helpers for hosts embedding `chart-editor`.
//!
//! Tracing setup stays opt-in: hosts either call `init_default_tracing` or
//! install their own `tracing` subscriber. Drag steps log at `trace`, mount
//! and swap at `debug`, ignored configuration at `warn`.

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "chart_editor=info";

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER)),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
