//! # Time Sources
//!
//! Enables deterministic testing by injecting controllable time sources.
//! Production code uses [`SystemTimeSource`]; tests use `FixedTimeSource`.

use chrono::{DateTime, Utc};

/// Abstract interface for reading the current time.
pub trait TimeSource: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Current time as whole unix seconds.
    fn unix_seconds(&self) -> i64 {
        self.now().timestamp()
    }
}

/// Production time source using the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    /// Create a new system time source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A time source that returns a fixed instant.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    now: DateTime<Utc>,
}

#[cfg(any(test, feature = "test-utils"))]
impl FixedTimeSource {
    /// Fixed at the given instant.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Fixed at the given unix second.
    pub fn at_unix(seconds: i64) -> Self {
        Self {
            now: DateTime::from_timestamp(seconds, 0).unwrap_or_default(),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
