//! Optional log output for applications that embed the plot engine.
//!
//! Range widening, navigation and autoscale report through `tracing`. An
//! application with its own subscriber can ignore this module entirely.

/// Filter used when `RUST_LOG` is unset: engine events at `info` and above.
#[cfg(feature = "telemetry")]
const DEFAULT_FILTER: &str = "plotline=info";

/// Installs a compact fmt subscriber for engine events.
///
/// `RUST_LOG` overrides `plotline=info`. The result is `false` when another
/// global subscriber is already set.
#[cfg(feature = "telemetry")]
#[must_use]
pub fn init_default_tracing() -> bool {
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

/// Without the `telemetry` feature no subscriber is available; always `false`.
#[cfg(not(feature = "telemetry"))]
#[must_use]
pub fn init_default_tracing() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::init_default_tracing;

    #[test]
    fn second_install_is_refused() {
        let _ = init_default_tracing();
        assert!(!init_default_tracing());
    }
}
