//! Confidence Heuristic Parameters
//!
//! A distance estimate's confidence is a weighted sum of four independent
//! factors. The weights sum to 1.0 so the result stays in [0, 1]:
//!
//! ```text
//! confidence = 0.25·filter + 0.25·samples + 0.30·stability + 0.20·distance
//! ```
//!
//! The weights are fixed so that two deployments fed the same readings report
//! exactly the same confidence.

/// Weight of the Kalman filter's own convergence confidence.
pub const WEIGHT_FILTER: f32 = 0.25;

/// Weight of the sample-count factor.
pub const WEIGHT_SAMPLE_COUNT: f32 = 0.25;

/// Weight of the RSSI stability factor.
pub const WEIGHT_STABILITY: f32 = 0.30;

/// Weight of the distance reliability factor.
pub const WEIGHT_DISTANCE: f32 = 0.20;

/// History length at which the sample-count factor saturates.
pub const SAMPLE_COUNT_SATURATION: f32 = 10.0;

/// Standard deviation (dBm) mapped to zero stability.
pub const STABILITY_MAX_STD_DEV_DBM: f32 = 10.0;

/// Samples needed before stability is measured at all.
pub const MIN_STABILITY_SAMPLES: usize = 3;

/// Stability reported while fewer than `MIN_STABILITY_SAMPLES` exist.
pub const INSUFFICIENT_DATA_STABILITY: f32 = 0.5;

/// Share of the distance factor lost at exactly the reliable distance.
pub const DISTANCE_FALLOFF: f32 = 0.5;

/// Distance factor for estimates beyond the reliable distance.
///
/// Non-zero so confidence does not jump to zero when an estimate crosses the
/// threshold.
pub const UNRELIABLE_DISTANCE_FLOOR: f32 = 0.1;

/// Samples required by calibration.
pub const MIN_CALIBRATION_SAMPLES: usize = 5;
