//! Multi-Radio Fusion Estimator
//!
//! ## Overview
//!
//! A device seen over several radios (BLE advertisements, WiFi probes, LoRa
//! beacons) yields one distance per radio. The fusion estimator keeps one
//! [`RssiEstimator`] per radio type, created on the first reading for that
//! type, and combines their current estimates:
//!
//! ```text
//! BLE     ──→ RssiEstimator ──┐
//! WIFI_2G ──→ RssiEstimator ──┼─→ weighted average ─→ FusedEstimate
//! LORA    ──→ RssiEstimator ──┘
//! ```
//!
//! ## Weighting
//!
//! Each source is re-read by feeding its filtered RSSI back through
//! [`RssiEstimator::estimate_distance`] unfiltered, so every fusion adds one
//! reading to each contributing source's history. Its effective weight is
//! the radio trust weight times that estimate's confidence:
//!
//! ```text
//! wᵢ         = trust(radioᵢ) · confidenceᵢ
//! distance   = round₂(Σ wᵢ·dᵢ / Σ wᵢ)
//! confidence = round₂(max(confidenceᵢ) · sources / 3)
//! ```
//!
//! Fused confidence rewards agreement across radios and is not clamped: with
//! more than three confident sources it exceeds 1.0.
//!
//! ## Memory Model
//!
//! Sources live in a `heapless::FnvIndexMap` with room for
//! [`MAX_RADIO_SOURCES`] radio types, iterated in first-seen order. A reading
//! for a radio type beyond that returns an estimate carrying
//! [`RangingError::SourceCapacityExceeded`].
//!
//! ## Usage Example
//!
//! ```rust
//! use signalmap_core::{MultiRadioEstimator, RadioType};
//!
//! let mut fusion = MultiRadioEstimator::new();
//! fusion.add_reading(&RadioType::Ble, -62.0);
//! fusion.add_reading(&RadioType::Wifi2G, -48.0);
//!
//! let fused = fusion.fused_estimate();
//! assert_eq!(fused.sources, 2);
//! assert_eq!(fused.breakdown[0].radio, RadioType::Ble);
//! ```

use heapless::{FnvIndexMap, Vec};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{
    FUSION_AGREEMENT_DIVISOR, FUSION_WEIGHT_BLE, FUSION_WEIGHT_DEFAULT, FUSION_WEIGHT_LORA,
    FUSION_WEIGHT_WIFI_2G, FUSION_WEIGHT_WIFI_5G, MAX_RADIO_SOURCES,
};
use crate::errors::RangingError;
use crate::estimator::{DistanceEstimate, EstimatorConfig, RssiEstimator};
use crate::models::{lookup, RadioType, SignalModel, SignalModelPatch};
use crate::time::{DefaultClock, TimeSource};
use crate::traits::round_to;

/// Per-source breakdown of a fused estimate
pub type Breakdown = Vec<SourceContribution, MAX_RADIO_SOURCES>;

/// Trust weight per radio technology
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FusionWeights {
    /// BLE trust
    pub ble: f32,
    /// WiFi 2.4 GHz trust
    pub wifi_2g: f32,
    /// WiFi 5 GHz trust
    pub wifi_5g: f32,
    /// LoRa trust
    pub lora: f32,
    /// Trust for other radio types without their own weight
    pub unknown: f32,
    /// Weights of individual custom radio types
    pub custom: FnvIndexMap<RadioType, f32, MAX_RADIO_SOURCES>,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            ble: FUSION_WEIGHT_BLE,
            wifi_2g: FUSION_WEIGHT_WIFI_2G,
            wifi_5g: FUSION_WEIGHT_WIFI_5G,
            lora: FUSION_WEIGHT_LORA,
            unknown: FUSION_WEIGHT_DEFAULT,
            custom: FnvIndexMap::new(),
        }
    }
}

impl FusionWeights {
    /// Trust weight for a radio
    pub fn weight_for(&self, radio: &RadioType) -> f32 {
        match radio {
            RadioType::Ble => self.ble,
            RadioType::Wifi2G => self.wifi_2g,
            RadioType::Wifi5G => self.wifi_5g,
            RadioType::Lora => self.lora,
            RadioType::Other(_) => self.custom.get(radio).copied().unwrap_or(self.unknown),
        }
    }

    /// Set the trust weight for a radio
    ///
    /// Custom radio types get their own entry. Once eight custom weights
    /// exist further ones are ignored with a warning.
    pub fn set(&mut self, radio: &RadioType, weight: f32) {
        let slot = match radio {
            RadioType::Ble => &mut self.ble,
            RadioType::Wifi2G => &mut self.wifi_2g,
            RadioType::Wifi5G => &mut self.wifi_5g,
            RadioType::Lora => &mut self.lora,
            RadioType::Other(_) => {
                if self.custom.insert(radio.clone(), weight).is_err() {
                    log_warn!("custom weight table full, dropping weight for {}", radio);
                }
                return;
            }
        };
        *slot = weight;
    }
}

/// Fusion configuration
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FusionConfig {
    /// Radio trust weights
    pub weights: FusionWeights,
    /// Configuration of every lazily created estimator
    pub estimator: EstimatorConfig,
    /// Model overrides applied to the built-in model of a radio
    pub models: FnvIndexMap<RadioType, SignalModelPatch, MAX_RADIO_SOURCES>,
}

impl FusionConfig {
    /// Set the trust weight for a radio
    pub fn with_weight(mut self, radio: &RadioType, weight: f32) -> Self {
        self.weights.set(radio, weight);
        self
    }

    /// Set the configuration of created estimators
    pub fn with_estimator(mut self, estimator: EstimatorConfig) -> Self {
        self.estimator = estimator;
        self
    }

    /// Override parts of a radio's model
    ///
    /// Ignored (with a warning) once overrides for eight radio types exist.
    pub fn with_model_patch(mut self, radio: &RadioType, patch: SignalModelPatch) -> Self {
        if self.models.insert(radio.clone(), patch).is_err() {
            log_warn!("model override table full, dropping patch for {}", radio);
        }
        self
    }

    /// Trust weight for a radio
    pub fn weight_for(&self, radio: &RadioType) -> f32 {
        self.weights.weight_for(radio)
    }

    /// Model new estimators for `radio` start from
    pub fn model_for(&self, radio: &RadioType) -> SignalModel {
        let model = lookup(radio);
        match self.models.get(radio) {
            Some(patch) => model.patched(patch),
            None => model,
        }
    }
}

/// One radio's share of a fused estimate
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceContribution {
    /// Radio the estimate came from
    pub radio: RadioType,
    /// Source distance (m)
    pub distance: f32,
    /// Source confidence
    pub confidence: f32,
    /// Effective weight (trust · confidence)
    pub weight: f32,
}

/// Distance fused across radios
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FusedEstimate {
    /// Weighted distance (m), `None` without usable weight
    pub distance: Option<f32>,
    /// Agreement-scaled confidence, may exceed 1.0
    pub confidence: f32,
    /// Number of radios that contributed a distance
    pub sources: usize,
    /// Contributions in first-seen order
    pub breakdown: Breakdown,
    /// Set when no radio contributed
    pub error: Option<RangingError>,
}

impl FusedEstimate {
    /// Result when no radio produced a distance
    pub fn no_sources() -> Self {
        Self {
            distance: None,
            confidence: 0.0,
            sources: 0,
            breakdown: Vec::new(),
            error: Some(RangingError::NoValidEstimates),
        }
    }
}

/// Distance estimator fusing several radio technologies
#[derive(Debug, Clone)]
pub struct MultiRadioEstimator<C: TimeSource + Clone = DefaultClock> {
    config: FusionConfig,
    estimators: FnvIndexMap<RadioType, RssiEstimator<C>, MAX_RADIO_SOURCES>,
    /// Cloned into every created estimator
    clock: C,
}

impl MultiRadioEstimator<DefaultClock> {
    /// Fusion with default weights and tuning
    pub fn new() -> Self {
        Self::with_config(FusionConfig::default())
    }

    /// Fusion with custom weights and tuning
    pub fn with_config(config: FusionConfig) -> Self {
        Self::with_clock(config, DefaultClock::default())
    }
}

impl Default for MultiRadioEstimator<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TimeSource + Clone> MultiRadioEstimator<C> {
    /// Fusion whose estimators stamp readings with clones of `clock`
    pub fn with_clock(config: FusionConfig, clock: C) -> Self {
        Self {
            config,
            estimators: FnvIndexMap::new(),
            clock,
        }
    }

    /// Feed one reading to the estimator for its radio, creating it if needed
    pub fn add_reading(&mut self, radio: &RadioType, rssi: f32) -> DistanceEstimate {
        if !self.estimators.contains_key(radio) {
            let estimator = RssiEstimator::with_clock(
                self.config.model_for(radio),
                self.config.estimator,
                self.clock.clone(),
            );

            if self.estimators.insert(radio.clone(), estimator).is_err() {
                log_warn!("source table full, dropping {} reading", radio);
                return DistanceEstimate::rejected(rssi, Self::capacity_error());
            }
            log_debug!("tracking new radio source {}", radio);
        }

        match self.estimators.get_mut(radio) {
            Some(estimator) => estimator.estimate_distance(rssi, true),
            None => DistanceEstimate::rejected(rssi, Self::capacity_error()),
        }
    }

    /// Combine the current estimate of every radio with at least one reading
    ///
    /// Each source is re-estimated from its filtered RSSI with the filter
    /// bypassed, which appends that value to the source's history.
    pub fn fused_estimate(&mut self) -> FusedEstimate {
        let mut breakdown = Breakdown::new();
        let mut weighted_sum = 0.0f32;
        let mut weight_sum = 0.0f32;
        let mut best_confidence = 0.0f32;

        for (radio, estimator) in self.estimators.iter_mut() {
            if estimator.sample_count() == 0 {
                continue;
            }

            let filtered = estimator.filtered_rssi();
            let estimate = estimator.estimate_distance(filtered, false);
            let Some(distance) = estimate.distance else {
                continue;
            };

            let weight = self.config.weight_for(radio) * estimate.confidence;
            weighted_sum += distance * weight;
            weight_sum += weight;
            best_confidence = best_confidence.max(estimate.confidence);

            // Same capacity as the source table
            let _ = breakdown.push(SourceContribution {
                radio: radio.clone(),
                distance,
                confidence: estimate.confidence,
                weight,
            });
        }

        if breakdown.is_empty() {
            log_debug!("fusion without sources");
            return FusedEstimate::no_sources();
        }

        let sources = breakdown.len();
        let distance = if weight_sum > 0.0 {
            Some(round_to(weighted_sum / weight_sum, 2))
        } else {
            None
        };

        FusedEstimate {
            distance,
            confidence: round_to(
                best_confidence * sources as f32 / FUSION_AGREEMENT_DIVISOR,
                2,
            ),
            sources,
            breakdown,
            error: None,
        }
    }

    /// Reset every source; sources stay registered
    pub fn reset(&mut self) {
        for (_, estimator) in self.estimators.iter_mut() {
            estimator.reset();
        }
    }

    /// Estimator for a radio, if one has been created
    pub fn estimator(&self, radio: &RadioType) -> Option<&RssiEstimator<C>> {
        self.estimators.get(radio)
    }

    /// Mutable estimator for a radio (calibration, model patches)
    pub fn estimator_mut(&mut self, radio: &RadioType) -> Option<&mut RssiEstimator<C>> {
        self.estimators.get_mut(radio)
    }

    /// Radio types in first-seen order
    pub fn radios(&self) -> impl Iterator<Item = &RadioType> + '_ {
        self.estimators.keys()
    }

    /// Number of tracked radio types
    pub fn len(&self) -> usize {
        self.estimators.len()
    }

    /// Whether no radio has been seen yet
    pub fn is_empty(&self) -> bool {
        self.estimators.is_empty()
    }

    /// Fusion configuration
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    fn capacity_error() -> RangingError {
        RangingError::SourceCapacityExceeded {
            capacity: MAX_RADIO_SOURCES,
        }
    }
}
