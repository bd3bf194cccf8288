//! Single-Radio Distance Estimator
//!
//! ## Overview
//!
//! One estimator tracks one transmitter over one radio technology. It owns
//! a copy of the radio's [`SignalModel`], a [`KalmanFilter`] over RSSI and a
//! bounded history of accepted readings:
//!
//! ```text
//! raw RSSI ─→ range check ─→ history ─→ Kalman filter ─→ path loss inversion
//!                 │                                              │
//!                 └─→ rejected estimate            confidence scoring ─→ estimate
//! ```
//!
//! Out-of-range readings produce an estimate with `distance: None` and the
//! error attached. They touch neither the history nor the filter.
//!
//! ## Calibration
//!
//! Placing the transmitter at a known distance and collecting a handful of
//! readings fixes the model's reference RSSI for this particular device:
//!
//! ```text
//! RSSI(d₀) = round(mean + 10·n·log10(d_known))
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use signalmap_core::{RadioType, RssiEstimator};
//!
//! let mut estimator = RssiEstimator::new(&RadioType::Ble);
//!
//! for rssi in [-55.0, -56.0, -54.0, -55.0, -57.0] {
//!     estimator.estimate_distance(rssi, true);
//! }
//!
//! let estimate = estimator.estimate_distance(-55.0, true);
//! let distance = estimate.distance.unwrap();
//! assert!(distance > 0.8 && distance < 1.3);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::CircularBuffer;
use crate::constants::radio::REFERENCE_DISTANCE_TOLERANCE_M;
use crate::constants::{HISTORY_CAPACITY, MIN_CALIBRATION_SAMPLES};
use crate::errors::{RangingError, RangingResult};
use crate::fusion::confidence::{
    distance_factor, sample_count_factor, stability_factor, ConfidenceFactors,
};
use crate::fusion::kalman::{FilterConfig, KalmanFilter};
use crate::models::{lookup, RadioType, SignalModel, SignalModelPatch};
use crate::stats::RssiStats;
use crate::time::{DefaultClock, TimeSource};
use crate::traits::{round_to, RssiReading, Validatable};

/// Reading history held by every estimator
pub type ReadingHistory = CircularBuffer<HISTORY_CAPACITY>;

/// Estimator configuration
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimatorConfig {
    /// Kalman filter tuning
    pub filter: FilterConfig,
}

impl EstimatorConfig {
    /// Replace the filter tuning
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }
}

/// Result of estimating distance from one reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistanceEstimate {
    /// Distance in meters, rounded to two decimals; `None` when rejected
    pub distance: Option<f32>,
    /// Confidence in [0, 1], rounded to two decimals
    pub confidence: f32,
    /// RSSI the distance was derived from (dBm)
    pub filtered_rssi: f32,
    /// RSSI as reported (dBm)
    pub raw_rssi: f32,
    /// Whether the distance is within the model's reliable range
    pub reliable: bool,
    /// Why no distance was produced
    pub error: Option<RangingError>,
}

impl DistanceEstimate {
    /// Estimate for a reading that produced no distance
    pub fn rejected(rssi: f32, error: RangingError) -> Self {
        Self {
            distance: None,
            confidence: 0.0,
            filtered_rssi: rssi,
            raw_rssi: rssi,
            reliable: false,
            error: Some(error),
        }
    }

    /// Whether a distance was produced
    pub fn is_valid(&self) -> bool {
        self.distance.is_some()
    }
}

/// Distance estimator for one transmitter on one radio
///
/// Generic over the clock stamping history entries. Estimators built with
/// [`RssiEstimator::new`] use [`DefaultClock`].
#[derive(Debug, Clone)]
pub struct RssiEstimator<C: TimeSource = DefaultClock> {
    model: SignalModel,
    filter: KalmanFilter,
    history: ReadingHistory,
    clock: C,
}

impl RssiEstimator<DefaultClock> {
    /// Estimator with the built-in model for `radio`
    pub fn new(radio: &RadioType) -> Self {
        Self::with_config(radio, EstimatorConfig::default())
    }

    /// Built-in model for `radio` with custom tuning
    pub fn with_config(radio: &RadioType, config: EstimatorConfig) -> Self {
        Self::with_model(lookup(radio), config)
    }

    /// Estimator using a custom model
    pub fn with_model(model: SignalModel, config: EstimatorConfig) -> Self {
        Self::with_clock(model, config, DefaultClock::default())
    }
}

impl<C: TimeSource> RssiEstimator<C> {
    /// Estimator using a custom model and time source
    pub fn with_clock(model: SignalModel, config: EstimatorConfig, clock: C) -> Self {
        let filter = KalmanFilter::new(config.filter, f32::from(model.reference_rssi));
        Self {
            model,
            filter,
            history: ReadingHistory::new(),
            clock,
        }
    }

    /// Estimate distance from one reading
    ///
    /// With `use_filter` the reading goes through the Kalman filter first;
    /// without it the raw value is used and the filter is left alone. Either
    /// way an accepted reading is appended to history.
    pub fn estimate_distance(&mut self, rssi: f32, use_filter: bool) -> DistanceEstimate {
        if let Err(error) = self.model.check_rssi(rssi) {
            log_debug!(
                "{}: rejected RSSI {} outside [{}, {}]",
                self.model.name,
                rssi,
                self.model.min_rssi,
                self.model.max_rssi
            );
            return DistanceEstimate::rejected(rssi, error);
        }

        self.history.push(RssiReading {
            rssi,
            timestamp: self.clock.now(),
        });

        let filtered = if use_filter { self.filter.update(rssi) } else { rssi };
        self.derive(filtered, rssi)
    }

    /// Estimate from the current filter state without recording anything
    pub fn current_estimate(&self) -> DistanceEstimate {
        let filtered = self.filter.estimate();
        if let Err(error) = self.model.check_rssi(filtered) {
            return DistanceEstimate::rejected(filtered, error);
        }
        self.derive(filtered, filtered)
    }

    fn derive(&self, filtered: f32, raw: f32) -> DistanceEstimate {
        let distance = round_to(self.model.distance_for(filtered), 2);
        if !distance.is_valid() {
            return DistanceEstimate {
                filtered_rssi: filtered,
                ..DistanceEstimate::rejected(raw, RangingError::InvalidDistance { distance })
            };
        }

        DistanceEstimate {
            distance: Some(distance),
            confidence: self.calculate_confidence(distance),
            filtered_rssi: filtered,
            raw_rssi: raw,
            reliable: self.model.is_reliable(distance),
            error: None,
        }
    }

    /// Confidence factors for a distance given the current state
    pub fn confidence_factors(&self, distance: f32) -> ConfidenceFactors {
        ConfidenceFactors {
            filter: self.filter.confidence(),
            sample_count: sample_count_factor(self.history.len()),
            stability: stability_factor(self.history.rssi_values()),
            distance: distance_factor(distance, self.model.max_reliable_distance),
        }
    }

    /// Confidence in [0, 1] for a distance given the current state
    pub fn calculate_confidence(&self, distance: f32) -> f32 {
        self.confidence_factors(distance).score()
    }

    /// Fix the reference RSSI from readings taken at a known distance
    ///
    /// Needs at least five finite samples. On failure nothing changes. On
    /// success the filter restarts at the sample mean.
    pub fn calibrate(&mut self, known_distance: f32, samples: &[f32]) -> RangingResult<()> {
        if !known_distance.is_valid() || known_distance <= 0.0 {
            log_warn!("{}: calibration rejected distance {}", self.model.name, known_distance);
            return Err(RangingError::InvalidDistance { distance: known_distance });
        }

        let usable = samples.iter().copied().filter(|s| s.is_valid());
        let available = usable.clone().count();
        if available < MIN_CALIBRATION_SAMPLES {
            log_warn!(
                "{}: calibration needs {} samples, got {}",
                self.model.name,
                MIN_CALIBRATION_SAMPLES,
                available
            );
            return Err(RangingError::InsufficientSamples {
                required: MIN_CALIBRATION_SAMPLES,
                available,
            });
        }

        let mean = usable.sum::<f32>() / available as f32;
        let at_reference =
            libm::fabsf(known_distance - self.model.reference_distance)
                <= REFERENCE_DISTANCE_TOLERANCE_M;

        let reference = if at_reference {
            mean
        } else {
            mean + 10.0 * self.model.path_loss_exponent * libm::log10f(known_distance)
        };

        // Saturating cast, i16 covers every physical RSSI
        self.model.reference_rssi = round_to(reference, 0) as i16;
        self.filter.reset(mean);

        log_debug!(
            "{}: calibrated at {} m, reference RSSI {} dBm",
            self.model.name,
            known_distance,
            self.model.reference_rssi
        );
        Ok(())
    }

    /// Statistics over the current history
    pub fn stats(&self) -> RssiStats {
        RssiStats::from_values(
            self.history.rssi_values(),
            self.filter.estimate(),
            self.filter.confidence(),
        )
    }

    /// Drop history and restart the filter at the reference RSSI
    pub fn reset(&mut self) {
        self.history.clear();
        self.filter.reset(f32::from(self.model.reference_rssi));
    }

    /// Merge a partial model into the current one
    pub fn update_model(&mut self, patch: &SignalModelPatch) {
        self.model.apply(patch);
        log_debug!("{}: model updated", self.model.name);
    }

    /// Signal model in use, including calibration and patches
    pub fn model(&self) -> &SignalModel {
        &self.model
    }

    /// Kalman filter state
    pub fn filter(&self) -> &KalmanFilter {
        &self.filter
    }

    /// Accepted readings, oldest first
    pub fn history(&self) -> &ReadingHistory {
        &self.history
    }

    /// Readings currently held in history
    pub fn sample_count(&self) -> usize {
        self.history.len()
    }

    /// Current filter estimate (dBm)
    pub fn filtered_rssi(&self) -> f32 {
        self.filter.estimate()
    }

    /// Time source stamping readings
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable time source, for advancing test clocks
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
