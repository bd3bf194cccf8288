//! Profile Validation
//!
//! Checks the models a profile would produce, not just the fields it sets:
//! a patch that lowers `max_rssi` below the built-in `min_rssi` is as broken
//! as one that sets both wrong.

use signalmap_core::constants::MAX_RADIO_SOURCES;
use signalmap_core::{RadioType, SignalModel};

use crate::{Profile, ProfileError};

/// Validate every model override, fusion weight and filter setting
pub(crate) fn validate(profile: &Profile) -> Result<(), ProfileError> {
    if profile.name.trim().is_empty() {
        return Err(invalid(profile, "name must not be empty".to_string()));
    }

    if profile.models.len() > MAX_RADIO_SOURCES {
        return Err(invalid(
            profile,
            format!(
                "{} model overrides, at most {} radio types fit",
                profile.models.len(),
                MAX_RADIO_SOURCES
            ),
        ));
    }

    let custom_weights = profile
        .fusion_weights
        .keys()
        .filter(|radio| !radio.is_known())
        .count();
    if custom_weights > MAX_RADIO_SOURCES {
        return Err(invalid(
            profile,
            format!(
                "{} custom radio weights, at most {} fit",
                custom_weights, MAX_RADIO_SOURCES
            ),
        ));
    }

    for radio in profile.models.keys() {
        check_model(radio, &profile.model_for(radio)).map_err(|reason| invalid(profile, reason))?;
    }

    for (radio, weight) in &profile.fusion_weights {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(invalid(
                profile,
                format!("fusion weight for {} must be a non-negative number, got {}", radio, weight),
            ));
        }
    }

    let filter = &profile.filter;
    let positive = [
        ("process_noise", filter.process_noise),
        ("measurement_noise", filter.measurement_noise),
        ("initial_covariance", filter.initial_covariance),
        ("max_error", filter.max_error),
    ];
    for (field, value) in positive {
        if let Some(value) = value {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(
                    profile,
                    format!("filter {} must be positive, got {}", field, value),
                ));
            }
        }
    }

    Ok(())
}

fn check_model(radio: &RadioType, model: &SignalModel) -> Result<(), String> {
    if !model.path_loss_exponent.is_finite() || model.path_loss_exponent <= 0.0 {
        return Err(format!(
            "{} path_loss_exponent must be positive, got {}",
            radio, model.path_loss_exponent
        ));
    }
    if !model.reference_distance.is_finite() || model.reference_distance <= 0.0 {
        return Err(format!(
            "{} reference_distance must be positive, got {}",
            radio, model.reference_distance
        ));
    }
    if model.min_rssi > model.max_rssi {
        return Err(format!(
            "{} min_rssi {} is above max_rssi {}",
            radio, model.min_rssi, model.max_rssi
        ));
    }
    if !model.max_reliable_distance.is_finite() || model.max_reliable_distance <= 0.0 {
        return Err(format!(
            "{} max_reliable_distance must be positive, got {}",
            radio, model.max_reliable_distance
        ));
    }
    Ok(())
}

fn invalid(profile: &Profile, reason: String) -> ProfileError {
    ProfileError::Invalid {
        profile: profile.name.clone(),
        reason,
    }
}
