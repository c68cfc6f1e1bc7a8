//! Monotonic uptime source for event timestamps.

use std::sync::OnceLock;
use std::time::Instant;

/// Monotonic milliseconds since an arbitrary fixed origin.
pub trait Clock: Send + Sync {
    fn uptime_millis(&self) -> u64;
}

/// [`Clock`] backed by [`Instant`], measured from the first read in this
/// process.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn uptime_millis(&self) -> u64 {
        static ORIGIN: OnceLock<Instant> = OnceLock::new();
        let elapsed = ORIGIN.get_or_init(Instant::now).elapsed();
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}
