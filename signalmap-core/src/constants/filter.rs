//! Scalar Kalman Filter Tuning
//!
//! The RSSI filter assumes a stationary transmitter between readings, so the
//! only tuning knobs are the process noise (how much the true RSSI may wander
//! per step) and the measurement noise (how noisy a single report is).

/// Process noise variance Q (dBm² per update).
///
/// Small: the transmitter is assumed not to move between scans, only
/// multipath slowly changes the mean.
///
/// Source: Tuned against BLE scan logs at 1-10 Hz advertising rates
pub const DEFAULT_PROCESS_NOISE: f32 = 0.01;

/// Measurement noise variance R (dBm²).
///
/// Single BLE RSSI reports scatter with a standard deviation of roughly
/// 2.8 dBm on handsets.
///
/// Source: Same scan logs as `DEFAULT_PROCESS_NOISE`
pub const DEFAULT_MEASUREMENT_NOISE: f32 = 8.0;

/// Error covariance after construction or reset.
pub const DEFAULT_INITIAL_COVARIANCE: f32 = 1.0;

/// Error covariance mapped to zero filter confidence.
pub const DEFAULT_MAX_ERROR: f32 = 10.0;
