//! Smoothing, Confidence and Multi-Radio Fusion
//!
//! ## Overview
//!
//! Individual RSSI readings suffer from:
//! - **Noise**: multipath and body shadowing move single reports by several dB
//! - **Bias**: every transmitter has its own output power
//! - **Range limits**: path loss models lose accuracy with distance
//!
//! This module holds the pieces that turn readings into trustworthy
//! distances:
//!
//! ```text
//! RSSI ─→ KalmanFilter ─→ distance ─→ ConfidenceFactors ─→ estimate
//!                                                            │
//! estimates from several radios ─→ MultiRadioEstimator ─→ FusedEstimate
//! ```
//!
//! 1. **[`kalman`]**: scalar Kalman filter over RSSI
//! 2. **[`confidence`]**: four-factor confidence heuristic
//! 3. **[`multi`]**: weighted fusion across radio technologies
//!
//! ## Memory Model
//!
//! No heap allocation. A filter is four floats and a counter; fusion keeps
//! at most [`MAX_RADIO_SOURCES`](crate::constants::MAX_RADIO_SOURCES)
//! estimators inline.

pub mod confidence;
pub mod kalman;
pub mod multi;

pub use confidence::ConfidenceFactors;
pub use kalman::{FilterConfig, KalmanFilter};
pub use multi::{
    Breakdown, FusedEstimate, FusionConfig, FusionWeights, MultiRadioEstimator,
    SourceContribution,
};
