//! Error Types for Ranging Failures
//!
//! ## Design Philosophy
//!
//! Expected conditions in the ranging pipeline are values, not panics:
//!
//! 1. **Attached to Results**: an out-of-range RSSI still produces a
//!    [`DistanceEstimate`](crate::estimator::DistanceEstimate), with
//!    `distance: None` and the error stored next to it. Callers rendering a
//!    map marker check the estimate, not a `Result`.
//!
//! 2. **No Heap Allocation**: all error data is inline, so errors can be
//!    copied into estimates and fused results on `no_std` targets.
//!
//! 3. **Copy Semantics**: errors implement `Copy` and travel with the
//!    estimate that carries them.
//!
//! ## Error Categories
//!
//! ### Input Rejections
//! - `RssiOutOfRange`: reading outside the model's valid window (or NaN)
//! - `InvalidDistance`: calibration distance that is not a positive number
//!
//! ### Insufficient Data
//! - `InsufficientSamples`: calibration with fewer than five samples
//! - `NoValidEstimates`: fusion with no radio contributing a distance
//!
//! ### Capacity
//! - `SourceCapacityExceeded`: the fixed-size radio table is full
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use signalmap_core::{RadioType, RangingError, RssiEstimator};
//!
//! let mut estimator = RssiEstimator::new(&RadioType::Ble);
//! let estimate = estimator.estimate_distance(-140.0, true);
//!
//! match estimate.error {
//!     None => { /* place marker at estimate.distance */ }
//!     Some(RangingError::RssiOutOfRange { .. }) => {
//!         // Bogus report from the scanner - drop it
//!     }
//!     Some(_) => {}
//! }
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Result type for ranging operations
pub type RangingResult<T> = Result<T, RangingError>;

/// Ranging errors - kept small so they fit inside estimates
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RangingError {
    /// RSSI outside the signal model's valid window
    #[error("RSSI out of valid range")]
    RssiOutOfRange {
        /// The rejected reading (dBm)
        rssi: f32,
        /// Weakest accepted reading (dBm)
        min: i16,
        /// Strongest accepted reading (dBm)
        max: i16,
    },

    /// Not enough samples to perform the operation
    #[error("Insufficient samples: need {required}, have {available}")]
    InsufficientSamples {
        /// Minimum number of samples needed
        required: usize,
        /// Samples actually supplied
        available: usize,
    },

    /// Distance must be finite and strictly positive
    #[error("Invalid distance: {distance} m")]
    InvalidDistance {
        /// The rejected distance (m)
        distance: f32,
    },

    /// No radio source produced a usable distance
    #[error("No valid estimates available")]
    NoValidEstimates,

    /// The fixed-size radio source table is full
    #[error("Radio source table full ({capacity} sources)")]
    SourceCapacityExceeded {
        /// Number of radio types the table holds
        capacity: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for RangingError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::RssiOutOfRange { rssi, min, max } =>
                defmt::write!(fmt, "RSSI {} outside [{}, {}]", rssi, min, max),
            Self::InsufficientSamples { required, available } =>
                defmt::write!(fmt, "Need {} samples, have {}", required, available),
            Self::InvalidDistance { distance } =>
                defmt::write!(fmt, "Invalid distance {} m", distance),
            Self::NoValidEstimates =>
                defmt::write!(fmt, "No valid estimates"),
            Self::SourceCapacityExceeded { capacity } =>
                defmt::write!(fmt, "Source table full ({})", capacity),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message() {
        let err = RangingError::RssiOutOfRange { rssi: 5.0, min: -100, max: -20 };
        assert_eq!(err.to_string(), "RSSI out of valid range");
    }

    #[test]
    fn no_sources_message() {
        assert_eq!(
            RangingError::NoValidEstimates.to_string(),
            "No valid estimates available"
        );
    }

    #[test]
    fn insufficient_samples_message() {
        let err = RangingError::InsufficientSamples { required: 5, available: 2 };
        assert_eq!(err.to_string(), "Insufficient samples: need 5, have 2");
    }
}
