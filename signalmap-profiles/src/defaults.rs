//! Built-in deployment profiles
//!
//! Each profile is written as the JSON a deployment would ship, so the
//! built-ins double as documentation of the format.

use serde_json::{json, Value};

use crate::{Profile, ProfileError};

/// Names of the built-in profiles
pub const BUILTIN_PROFILES: [&str; 3] = ["default", "indoor_office", "open_field"];

/// Built-in models and weights, no overrides
pub fn default_profile() -> Value {
    json!({
        "name": "default",
        "description": "Built-in signal models, fusion weights and filter tuning"
    })
}

/// Offices with drywall partitions and people walking between desks
pub fn indoor_office() -> Value {
    json!({
        "name": "indoor_office",
        "description": "Drywall offices: steeper path loss, noisier readings, short reliable range",
        "models": {
            "BLE": {
                "path_loss_exponent": 3.0,
                "max_reliable_distance": 15.0
            },
            "WIFI_2G": {
                "path_loss_exponent": 3.5,
                "max_reliable_distance": 30.0
            },
            "WIFI_5G": {
                "path_loss_exponent": 4.0,
                "max_reliable_distance": 20.0
            }
        },
        "fusion_weights": {
            "LORA": 0.2
        },
        "filter": {
            "measurement_noise": 10.0
        }
    })
}

/// Line of sight outdoors, few reflections
pub fn open_field() -> Value {
    json!({
        "name": "open_field",
        "description": "Line of sight outdoors: near free-space path loss, long reliable range",
        "models": {
            "BLE": {
                "path_loss_exponent": 2.0,
                "max_reliable_distance": 40.0
            },
            "WIFI_2G": {
                "path_loss_exponent": 2.2,
                "max_reliable_distance": 100.0
            },
            "LORA": {
                "path_loss_exponent": 2.1,
                "max_reliable_distance": 5000.0
            }
        },
        "fusion_weights": {
            "LORA": 0.8
        },
        "filter": {
            "process_noise": 0.02,
            "measurement_noise": 6.0
        }
    })
}

/// Parse and validate one built-in profile
pub fn parse(value: Value) -> Result<Profile, ProfileError> {
    let profile: Profile =
        serde_json::from_value(value).map_err(|e| ProfileError::Parse(e.to_string()))?;
    profile.validate()?;
    Ok(profile)
}

/// Every built-in profile
pub fn builtin_profiles() -> Result<Vec<Profile>, ProfileError> {
    [default_profile(), indoor_office(), open_field()]
        .into_iter()
        .map(parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use signalmap_core::{RadioType, SignalModel};

    use super::*;

    #[test]
    fn all_builtins_parse() {
        let profiles = builtin_profiles().unwrap();
        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, BUILTIN_PROFILES);
    }

    #[test]
    fn default_profile_changes_nothing() {
        let profile = parse(default_profile()).unwrap();
        for radio in RadioType::KNOWN.iter() {
            assert_eq!(profile.model_for(radio), signalmap_core::lookup(radio));
        }
    }

    #[test]
    fn open_field_reaches_farther() {
        let profile = parse(open_field()).unwrap();
        let ble = profile.model_for(&RadioType::Ble);
        let builtin = SignalModel::ble();

        // Same reading, gentler decay: farther estimate
        assert!(ble.distance_for(-80.0) > builtin.distance_for(-80.0));
        assert_eq!(profile.fusion_config().weight_for(&RadioType::Lora), 0.8);
    }
}
