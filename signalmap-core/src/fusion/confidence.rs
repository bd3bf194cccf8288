//! Confidence Scoring for Distance Estimates
//!
//! ## Overview
//!
//! A distance estimate's confidence combines four factors, each in [0, 1]:
//!
//! 1. **Filter**: the Kalman filter's own confidence (falls with covariance)
//! 2. **Sample Count**: how much history backs the estimate
//! 3. **Stability**: how little the raw RSSI scatters
//! 4. **Distance**: path loss models degrade with range
//!
//! ```text
//! confidence = round₂(0.25·filter + 0.25·samples + 0.30·stability + 0.20·distance)
//! ```
//!
//! ### Sample Count
//! ```text
//! samples = min(history_len / 10, 1)
//! ```
//!
//! ### Stability
//! ```text
//! stability = 1 - min(σ(raw RSSI) / 10 dB, 1)     (0.5 with fewer than 3 readings)
//! ```
//!
//! ### Distance
//! ```text
//! distance = 1 - (d / d_reliable)·0.5   if d ≤ d_reliable
//!            0.1                        otherwise
//! ```
//!
//! ## Implementation Notes
//!
//! - All factors and the combined score are in [0, 1]
//! - No heap allocation
//! - Pure functions, the estimator supplies its own state

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::confidence::{
    DISTANCE_FALLOFF, INSUFFICIENT_DATA_STABILITY, MIN_STABILITY_SAMPLES,
    SAMPLE_COUNT_SATURATION, STABILITY_MAX_STD_DEV_DBM, UNRELIABLE_DISTANCE_FLOOR,
    WEIGHT_DISTANCE, WEIGHT_FILTER, WEIGHT_SAMPLE_COUNT, WEIGHT_STABILITY,
};
use crate::stats::mean_and_std_dev;
use crate::traits::round_to;

/// The four inputs of a confidence score
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfidenceFactors {
    /// Kalman filter confidence
    pub filter: f32,
    /// History size factor
    pub sample_count: f32,
    /// RSSI stability factor
    pub stability: f32,
    /// Distance reliability factor
    pub distance: f32,
}

impl ConfidenceFactors {
    /// Weighted sum rounded to two decimals
    pub fn score(&self) -> f32 {
        let weighted = WEIGHT_FILTER * self.filter
            + WEIGHT_SAMPLE_COUNT * self.sample_count
            + WEIGHT_STABILITY * self.stability
            + WEIGHT_DISTANCE * self.distance;

        round_to(weighted, 2)
    }
}

/// Factor for the amount of history, saturating at 10 readings
pub fn sample_count_factor(history_len: usize) -> f32 {
    (history_len as f32 / SAMPLE_COUNT_SATURATION).min(1.0)
}

/// Factor for the scatter of raw readings
pub fn stability_factor<I>(values: I) -> f32
where
    I: Iterator<Item = f32> + Clone,
{
    if values.clone().count() < MIN_STABILITY_SAMPLES {
        return INSUFFICIENT_DATA_STABILITY;
    }

    match mean_and_std_dev(values) {
        Some((_, std_dev)) => 1.0 - (std_dev / STABILITY_MAX_STD_DEV_DBM).min(1.0),
        None => INSUFFICIENT_DATA_STABILITY,
    }
}

/// Factor for how far into the model's reliable range a distance lies
pub fn distance_factor(distance: f32, max_reliable_distance: f32) -> f32 {
    if distance <= max_reliable_distance {
        1.0 - (distance / max_reliable_distance) * DISTANCE_FALLOFF
    } else {
        UNRELIABLE_DISTANCE_FLOOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_saturates() {
        assert_eq!(sample_count_factor(0), 0.0);
        assert!((sample_count_factor(5) - 0.5).abs() < 1e-6);
        assert_eq!(sample_count_factor(10), 1.0);
        assert_eq!(sample_count_factor(50), 1.0);
    }

    #[test]
    fn stability_needs_three_samples() {
        let two = [-60.0f32, -80.0];
        assert_eq!(stability_factor(two.iter().copied()), 0.5);

        let steady = [-60.0f32; 3];
        assert_eq!(stability_factor(steady.iter().copied()), 1.0);
    }

    #[test]
    fn wild_readings_have_zero_stability() {
        let wild = [-40.0f32, -90.0, -40.0, -90.0];
        assert_eq!(stability_factor(wild.iter().copied()), 0.0);
    }

    #[test]
    fn distance_factor_falls_off() {
        assert_eq!(distance_factor(0.0, 20.0), 1.0);
        assert!((distance_factor(10.0, 20.0) - 0.75).abs() < 1e-6);
        assert!((distance_factor(20.0, 20.0) - 0.5).abs() < 1e-6);
        assert!((distance_factor(20.01, 20.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn perfect_factors_score_one() {
        let factors = ConfidenceFactors {
            filter: 1.0,
            sample_count: 1.0,
            stability: 1.0,
            distance: 1.0,
        };
        assert_eq!(factors.score(), 1.0);
    }

    #[test]
    fn score_is_rounded() {
        let factors = ConfidenceFactors {
            filter: 0.9,
            sample_count: 0.1,
            stability: 0.5,
            distance: 0.975,
        };
        // 0.225 + 0.025 + 0.15 + 0.195 = 0.595
        let score = factors.score();
        assert!((score - 0.6).abs() < 1e-6 || (score - 0.59).abs() < 1e-6);
        assert_eq!(round_to(score, 2), score);
    }
}
