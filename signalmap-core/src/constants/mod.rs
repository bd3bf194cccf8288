//! Constants for signalmap Core
//!
//! Every tuning value used by the ranging pipeline lives here, next to a note
//! on where it comes from. Estimators, filters and the fusion combiner read
//! these instead of embedding magic numbers.
//!
//! ## Organization
//!
//! - **Radio**: built-in signal model parameters per radio technology
//! - **Filter**: scalar Kalman filter tuning
//! - **Confidence**: weights and thresholds of the confidence heuristic
//! - **Fusion**: per-radio trust weights and the agreement divisor
//! - **Buffers**: history and source table capacities
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Keep units in the constant name (`_DBM`, `_M`)
//! 3. Changing a value here changes reproducible output, update tests with it

/// Built-in signal model parameters for BLE, WiFi and LoRa.
pub mod radio;

/// Scalar Kalman filter tuning.
pub mod filter;

/// Confidence heuristic weights and thresholds.
pub mod confidence;

/// Multi-radio fusion weights.
pub mod fusion;

/// History and source table capacities.
pub mod buffers;

pub use buffers::{HISTORY_CAPACITY, MAX_RADIO_SOURCES};

pub use filter::{
    DEFAULT_INITIAL_COVARIANCE, DEFAULT_MAX_ERROR, DEFAULT_MEASUREMENT_NOISE,
    DEFAULT_PROCESS_NOISE,
};

pub use confidence::{
    MIN_CALIBRATION_SAMPLES, MIN_STABILITY_SAMPLES, WEIGHT_DISTANCE, WEIGHT_FILTER,
    WEIGHT_SAMPLE_COUNT, WEIGHT_STABILITY,
};

pub use fusion::{
    FUSION_AGREEMENT_DIVISOR, FUSION_WEIGHT_BLE, FUSION_WEIGHT_DEFAULT, FUSION_WEIGHT_LORA,
    FUSION_WEIGHT_WIFI_2G, FUSION_WEIGHT_WIFI_5G,
};
