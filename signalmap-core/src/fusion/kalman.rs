//! Scalar Kalman Filter for RSSI Smoothing
//!
//! ## Overview
//!
//! A single RSSI report scatters by several dB around the true value. The
//! filter tracks one state, the RSSI, under a stationary model (the
//! transmitter is assumed not to move between readings) and weighs each new
//! report against its current estimate by their relative uncertainty.
//!
//! ## Filter Equations
//!
//! ### 1. Prediction Step
//! ```text
//! State prediction:      x̂⁻ = x̂
//! Covariance prediction: P⁻ = P + Q
//! ```
//!
//! ### 2. Update Step
//! ```text
//! Kalman gain:     K  = P⁻ / (P⁻ + R)
//! State update:    x̂  = x̂⁻ + K·(z - x̂⁻)
//! Covariance:      P  = (1 - K)·P⁻
//! ```
//!
//! With the default tuning (Q = 0.01, R = 8.0) the gain settles around 0.035,
//! so one outlier of 20 dB moves the estimate by less than 1 dB.
//!
//! ## Usage Example
//!
//! ```rust
//! use signalmap_core::fusion::{FilterConfig, KalmanFilter};
//!
//! let config = FilterConfig::default()
//!     .with_process_noise(0.01)
//!     .with_measurement_noise(8.0);
//!
//! let mut kf = KalmanFilter::new(config, -59.0);
//! let smoothed = kf.update(-65.0);
//!
//! // Moves toward the measurement, but not all the way
//! assert!(smoothed < -59.0 && smoothed > -65.0);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_INITIAL_COVARIANCE, DEFAULT_MAX_ERROR, DEFAULT_MEASUREMENT_NOISE,
    DEFAULT_PROCESS_NOISE,
};

/// Filter tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterConfig {
    /// Process noise variance Q (dBm²)
    pub process_noise: f32,
    /// Measurement noise variance R (dBm²)
    pub measurement_noise: f32,
    /// Error covariance after construction and reset
    pub initial_covariance: f32,
    /// Covariance mapped to zero confidence
    pub max_error: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            process_noise: DEFAULT_PROCESS_NOISE,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
            initial_covariance: DEFAULT_INITIAL_COVARIANCE,
            max_error: DEFAULT_MAX_ERROR,
        }
    }
}

impl FilterConfig {
    /// Set process noise (higher = follows changes faster)
    pub fn with_process_noise(mut self, noise: f32) -> Self {
        self.process_noise = noise;
        self
    }

    /// Set measurement noise (higher = smoother, slower)
    pub fn with_measurement_noise(mut self, noise: f32) -> Self {
        self.measurement_noise = noise;
        self
    }

    /// Set the covariance the filter starts from
    pub fn with_initial_covariance(mut self, covariance: f32) -> Self {
        self.initial_covariance = covariance;
        self
    }

    /// Set the covariance at which confidence reaches zero
    pub fn with_max_error(mut self, max_error: f32) -> Self {
        self.max_error = max_error;
        self
    }
}

/// One-dimensional Kalman filter over RSSI
#[derive(Debug, Clone, PartialEq)]
pub struct KalmanFilter {
    /// Current RSSI estimate (dBm)
    estimate: f32,
    /// Estimation error covariance, never negative
    error_covariance: f32,
    config: FilterConfig,
    /// Updates since construction or the last reset
    sample_count: u32,
}

impl KalmanFilter {
    /// Create a filter starting at `initial_estimate`
    pub fn new(config: FilterConfig, initial_estimate: f32) -> Self {
        Self {
            estimate: initial_estimate,
            error_covariance: config.initial_covariance,
            config,
            sample_count: 0,
        }
    }

    /// Fold one measurement into the estimate and return the new estimate
    pub fn update(&mut self, measurement: f32) -> f32 {
        // Predict
        let predicted_estimate = self.estimate;
        let predicted_covariance = self.error_covariance + self.config.process_noise;

        // Correct
        let gain = predicted_covariance / (predicted_covariance + self.config.measurement_noise);
        self.estimate = predicted_estimate + gain * (measurement - predicted_estimate);
        self.error_covariance = ((1.0 - gain) * predicted_covariance).max(0.0);
        self.sample_count = self.sample_count.saturating_add(1);

        self.estimate
    }

    /// Restart from `initial_estimate` with the configured initial covariance
    pub fn reset(&mut self, initial_estimate: f32) {
        self.estimate = initial_estimate;
        self.error_covariance = self.config.initial_covariance;
        self.sample_count = 0;
    }

    /// Confidence in [0, 1], falling linearly as covariance approaches `max_error`
    pub fn confidence(&self) -> f32 {
        let normalized = (self.error_covariance / self.config.max_error).min(1.0);
        (1.0 - normalized).max(0.0)
    }

    /// Current RSSI estimate (dBm)
    pub fn estimate(&self) -> f32 {
        self.estimate
    }

    /// Current error covariance P
    pub fn error_covariance(&self) -> f32 {
        self.error_covariance
    }

    /// Measurements since the last reset
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Filter tuning
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new(FilterConfig::default(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_matches_hand_computation() {
        let mut kf = KalmanFilter::new(FilterConfig::default(), -59.0);
        let estimate = kf.update(-55.0);

        // P⁻ = 1.01, K = 1.01 / 9.01
        let gain = 1.01f32 / 9.01;
        assert!((estimate - (-59.0 + gain * 4.0)).abs() < 1e-5);
        assert!((kf.error_covariance() - (1.0 - gain) * 1.01).abs() < 1e-5);
        assert_eq!(kf.sample_count(), 1);
    }

    #[test]
    fn converges_to_constant_measurement() {
        let mut kf = KalmanFilter::new(FilterConfig::default(), -59.0);
        for _ in 0..30 {
            kf.update(-70.0);
        }
        assert!((kf.estimate() - -70.0).abs() < 2.0);
    }

    #[test]
    fn confidence_grows_with_samples() {
        let mut kf = KalmanFilter::new(FilterConfig::default(), -59.0);
        kf.update(-60.0);
        let after_one = kf.confidence();

        for _ in 1..10 {
            kf.update(-60.0);
        }
        assert!(kf.confidence() > after_one);
        assert!(kf.confidence() <= 1.0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let config = FilterConfig::default().with_initial_covariance(2.0);
        let mut kf = KalmanFilter::new(config, -59.0);
        for _ in 0..5 {
            kf.update(-80.0);
        }

        kf.reset(-50.0);
        assert_eq!(kf.estimate(), -50.0);
        assert_eq!(kf.error_covariance(), 2.0);
        assert_eq!(kf.sample_count(), 0);
    }

    #[test]
    fn confidence_floor_at_max_error() {
        let config = FilterConfig::default().with_initial_covariance(25.0);
        let kf = KalmanFilter::new(config, 0.0);
        assert_eq!(kf.confidence(), 0.0);
    }

    #[test]
    fn builder_sets_fields() {
        let config = FilterConfig::default()
            .with_process_noise(0.02)
            .with_measurement_noise(6.0)
            .with_max_error(5.0);
        assert_eq!(config.process_noise, 0.02);
        assert_eq!(config.measurement_noise, 6.0);
        assert_eq!(config.max_error, 5.0);
        assert_eq!(config.initial_covariance, DEFAULT_INITIAL_COVARIANCE);
    }
}
