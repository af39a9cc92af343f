//! Test support: an in-memory provisioning service.

mod mocks;

pub use mocks::FakeForecast;

use chrono::{DateTime, TimeZone, Utc};

/// Builds a creation timestamp from seconds since the epoch.
#[must_use]
pub fn creation_time(epoch_seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(epoch_seconds, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
