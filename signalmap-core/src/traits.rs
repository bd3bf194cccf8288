//! Core types and traits shared across the ranging pipeline
//!
//! Keep them simple - the estimator is called from scan callbacks at
//! advertising rate and must not allocate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Single RSSI reading with its arrival time
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RssiReading {
    /// Raw RSSI as reported by the radio (dBm)
    pub rssi: f32,
    /// When the estimator accepted the reading
    pub timestamp: Timestamp,
}

/// Trait for values that can be checked before entering the pipeline
pub trait Validatable {
    /// Check if the value is a usable number (not NaN, infinity)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

/// Rounds to `decimals` places, halves toward positive infinity
pub(crate) fn round_to(value: f32, decimals: u32) -> f32 {
    let scale = (0..decimals).fold(1.0f32, |scale, _| scale * 10.0);
    libm::floorf(value * scale + 0.5) / scale
}
