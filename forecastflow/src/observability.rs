//! Logging bootstrap.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info` for this crate. Safe
/// to call more than once: later calls leave the existing subscriber in
/// place, which is what re-entrant driver runtimes need.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("forecastflow=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
