//! Envelope age window.

use crate::domain::entities::SenderFailure;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// How far in the future an envelope timestamp may be.
pub const MAX_FUTURE_SKEW: Duration = Duration::from_secs(30);

/// Accept `signed_at` if `now - max_age <= signed_at <= now + MAX_FUTURE_SKEW`.
pub fn check_freshness(
    signed_at: DateTime<Utc>,
    now: DateTime<Utc>,
    max_age: Duration,
) -> Result<(), SenderFailure> {
    let age_ms = (now - signed_at).num_milliseconds();

    if age_ms > to_millis(max_age) {
        return Err(SenderFailure::Stale);
    }
    if age_ms < -to_millis(MAX_FUTURE_SKEW) {
        return Err(SenderFailure::FromFuture);
    }
    Ok(())
}

fn to_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
