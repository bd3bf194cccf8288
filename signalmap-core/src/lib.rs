//! RSSI ranging engine for signalmap
//!
//! Turns raw RSSI readings into smoothed, confidence-scored distance
//! estimates, per radio technology, with calibration and multi-radio fusion.
//!
//! Key constraints:
//! - Runs on scanner firmware as well as on phones (`no_std` without `std`)
//! - No heap allocation in the reading path
//! - Identical numbers with and without `std` (all math through `libm`)
//!
//! ```no_run
//! use signalmap_core::{RadioType, RssiEstimator};
//!
//! let mut estimator = RssiEstimator::new(&RadioType::Ble);
//!
//! // Feed readings from the scan callback
//! let estimate = estimator.estimate_distance(-63.0, true);
//! match estimate.distance {
//!     Some(meters) => {} // Place marker
//!     None => {}         // Reading rejected, see estimate.error
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Logging compiles away without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod buffer;
pub mod constants;
pub mod errors;
pub mod estimator;
pub mod fusion;
pub mod models;
pub mod stats;
pub mod time;
pub mod traits;

// Public API
pub use errors::{RangingError, RangingResult};
pub use estimator::{DistanceEstimate, EstimatorConfig, RssiEstimator};
pub use fusion::{
    FilterConfig, FusedEstimate, FusionConfig, FusionWeights, KalmanFilter,
    MultiRadioEstimator, SourceContribution,
};
pub use models::{lookup, RadioType, SignalModel, SignalModelPatch};
pub use stats::{RssiStats, RssiSummary};
pub use time::{DefaultClock, FixedTime, MonotonicClock, TimeSource, Timestamp};
pub use traits::RssiReading;

#[cfg(feature = "std")]
pub use time::SystemClock;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
