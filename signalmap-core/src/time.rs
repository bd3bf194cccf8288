//! Time sources for reading timestamps
//!
//! Estimators stamp every accepted reading with the time it arrived. Where
//! that time comes from depends on the platform:
//! - System clock (phones, gateways)
//! - Monotonic tick counter (bare-metal scanners without an RTC)
//! - Fixed time (tests)

use core::cell::Cell;

/// Timestamp in milliseconds since epoch (or since boot for monotonic sources)
pub type Timestamp = u64;

/// Source of time for reading history
pub trait TimeSource {
    /// Current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Whether this source provides wall clock time (vs monotonic)
    fn is_wall_clock(&self) -> bool;
}

/// Clock used by estimators constructed without an explicit time source
#[cfg(feature = "std")]
pub type DefaultClock = SystemClock;

/// Clock used by estimators constructed without an explicit time source
#[cfg(not(feature = "std"))]
pub type DefaultClock = MonotonicClock;

/// Wall clock time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

/// Monotonic tick source
///
/// Advances by one tick on every read, so readings keep their arrival order
/// even without a hardware timer.
#[derive(Debug, Clone, Default)]
pub struct MonotonicClock {
    ticks: Cell<Timestamp>,
}

impl MonotonicClock {
    /// Start counting from `start`
    pub fn starting_at(start: Timestamp) -> Self {
        Self { ticks: Cell::new(start) }
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        let current = self.ticks.get();
        self.ticks.set(current.saturating_add(1));
        current
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to `timestamp`
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms` milliseconds
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let mut time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);

        time.set(10);
        assert_eq!(time.now(), 10);
    }

    #[test]
    fn monotonic_clock_ticks() {
        let clock = MonotonicClock::starting_at(7);
        assert_eq!(clock.now(), 7);
        assert_eq!(clock.now(), 8);
        assert!(!clock.is_wall_clock());
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_clock_is_wall_clock() {
        let clock = SystemClock;
        assert!(clock.is_wall_clock());
        assert!(clock.now() > 1_600_000_000_000);
    }
}
