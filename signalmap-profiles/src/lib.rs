//! Deployment Profiles for signalmap
//!
//! ## Overview
//!
//! The built-in signal models assume typical conditions. A warehouse full of
//! metal racks, an open field and a carpeted office each bend RSSI
//! differently. A deployment profile captures those differences in a JSON
//! document that ships next to the application instead of inside it:
//!
//! ```json
//! {
//!   "name": "indoor_office",
//!   "description": "Drywall offices, people moving around",
//!   "models": {
//!     "BLE": { "path_loss_exponent": 3.0, "max_reliable_distance": 15.0 }
//!   },
//!   "fusion_weights": { "LORA": 0.2 },
//!   "filter": { "measurement_noise": 10.0 }
//! }
//! ```
//!
//! ## Profile Semantics
//!
//! - **models**: partial overrides merged over the built-in model of each
//!   radio type (keys are radio names, case-insensitive)
//! - **fusion_weights**: trust weights replacing the defaults
//! - **filter**: Kalman tuning shared by every estimator the profile builds
//!
//! Anything a profile leaves out keeps its built-in value, so an empty
//! profile behaves exactly like no profile.
//!
//! ## Validation
//!
//! Profiles are checked when parsed or registered. A profile that would
//! produce a model with a non-positive path-loss exponent, an empty RSSI
//! window or a negative fusion weight is rejected with
//! [`ProfileError::Invalid`].
//!
//! ## Usage Example
//!
//! ```rust
//! use signalmap_core::RadioType;
//! use signalmap_profiles::ProfileRegistry;
//!
//! let registry = ProfileRegistry::new();
//! registry.load_defaults()?;
//!
//! let office = registry.get("indoor_office")?;
//! let mut estimator = office.estimator(&RadioType::Ble);
//! let estimate = estimator.estimate_distance(-70.0, true);
//! assert!(estimate.distance.is_some());
//! # Ok::<(), signalmap_profiles::ProfileError>(())
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use signalmap_core::{
    lookup, EstimatorConfig, FilterConfig, FusionConfig, MultiRadioEstimator, RadioType,
    RssiEstimator, SignalModel, SignalModelPatch,
};

pub mod defaults;
pub mod registry;
mod validation;

pub use registry::ProfileRegistry;

/// Profile-related errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum ProfileError {
    #[error("Failed to parse profile: {0}")]
    Parse(String),

    #[error("Failed to read profile: {0}")]
    Io(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Invalid profile {profile}: {reason}")]
    Invalid { profile: String, reason: String },
}

/// Kalman tuning overrides, unset fields keep the defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterTuning {
    pub process_noise: Option<f32>,
    pub measurement_noise: Option<f32>,
    pub initial_covariance: Option<f32>,
    pub max_error: Option<f32>,
}

impl FilterTuning {
    /// Apply the overrides to a filter configuration
    pub fn apply(&self, mut config: FilterConfig) -> FilterConfig {
        if let Some(q) = self.process_noise {
            config = config.with_process_noise(q);
        }
        if let Some(r) = self.measurement_noise {
            config = config.with_measurement_noise(r);
        }
        if let Some(p0) = self.initial_covariance {
            config = config.with_initial_covariance(p0);
        }
        if let Some(max_error) = self.max_error {
            config = config.with_max_error(max_error);
        }
        config
    }
}

/// Named deployment profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Registry key
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Model overrides per radio type
    #[serde(default)]
    pub models: HashMap<RadioType, SignalModelPatch>,

    /// Fusion trust weights per radio type
    #[serde(default)]
    pub fusion_weights: HashMap<RadioType, f32>,

    #[serde(default)]
    pub filter: FilterTuning,
}

impl Profile {
    /// Empty profile, built-in behavior
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON profile
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profile: Profile =
            serde_json::from_str(json).map_err(|e| ProfileError::Parse(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ProfileError> {
        serde_json::to_string_pretty(self).map_err(|e| ProfileError::Parse(e.to_string()))
    }

    /// Check every value the profile sets
    pub fn validate(&self) -> Result<(), ProfileError> {
        validation::validate(self)
    }

    /// Built-in model for `radio` with this profile's overrides
    pub fn model_for(&self, radio: &RadioType) -> SignalModel {
        let model = lookup(radio);
        match self.models.get(radio) {
            Some(patch) => model.patched(patch),
            None => model,
        }
    }

    pub fn filter_config(&self) -> FilterConfig {
        self.filter.apply(FilterConfig::default())
    }

    pub fn estimator_config(&self) -> EstimatorConfig {
        EstimatorConfig::default().with_filter(self.filter_config())
    }

    /// Fusion configuration carrying weights, tuning and model overrides
    pub fn fusion_config(&self) -> FusionConfig {
        let mut config = FusionConfig::default().with_estimator(self.estimator_config());
        for (radio, weight) in &self.fusion_weights {
            config = config.with_weight(radio, *weight);
        }
        for (radio, patch) in &self.models {
            config = config.with_model_patch(radio, patch.clone());
        }
        config
    }

    /// Ready-to-use estimator for one radio
    pub fn estimator(&self, radio: &RadioType) -> RssiEstimator {
        RssiEstimator::with_model(self.model_for(radio), self.estimator_config())
    }

    /// Ready-to-use fusion estimator
    pub fn multi_estimator(&self) -> MultiRadioEstimator {
        MultiRadioEstimator::with_config(self.fusion_config())
    }

    /// Override one radio's model
    pub fn with_model(mut self, radio: RadioType, patch: SignalModelPatch) -> Self {
        self.models.insert(radio, patch);
        self
    }

    /// Override one radio's fusion weight
    pub fn with_weight(mut self, radio: RadioType, weight: f32) -> Self {
        self.fusion_weights.insert(radio, weight);
        self
    }
}
