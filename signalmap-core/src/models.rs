//! Signal Model Registry
//!
//! ## Overview
//!
//! A signal model holds the physical parameters of the log-distance path loss
//! model for one radio technology. Inverting the model turns an RSSI reading
//! into a distance:
//!
//! ```text
//! d = d₀ · 10^((RSSI(d₀) - RSSI) / (10·n))
//! ```
//!
//! The registry is static: [`lookup`] hands out a fresh copy for a radio type
//! and estimators own and modify their copy (calibration, patches) without
//! affecting anyone else.
//!
//! ## Built-in Models
//!
//! | Radio   | ref RSSI | n   | valid RSSI     | reliable to |
//! |---------|----------|-----|----------------|-------------|
//! | BLE     | -59 dBm  | 2.5 | -100..=-20 dBm | 20 m        |
//! | WIFI_2G | -40 dBm  | 3.0 | -100..=-10 dBm | 50 m        |
//! | WIFI_5G | -45 dBm  | 3.5 | -100..=-10 dBm | 30 m        |
//! | LORA    | -30 dBm  | 2.7 | -140..=-10 dBm | 2000 m      |
//!
//! Radio types without a built-in model get the BLE model.
//!
//! ## Usage Example
//!
//! ```rust
//! use signalmap_core::models::{lookup, RadioType};
//!
//! let model = lookup(&RadioType::from_name("wifi_5g"));
//! assert_eq!(model.reference_rssi, -45);
//!
//! // Unknown radios fall back to BLE
//! let zigbee = lookup(&RadioType::from_name("ZIGBEE"));
//! assert_eq!(zigbee.reference_rssi, -59);
//! ```

use core::fmt;

use heapless::String;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::radio::*;
use crate::errors::{RangingError, RangingResult};

/// Fixed-capacity radio type name
pub type RadioName = String<RADIO_NAME_CAPACITY>;

/// Fixed-capacity model name
pub type ModelName = String<MODEL_NAME_CAPACITY>;

/// Radio technology a reading came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RadioType {
    /// Bluetooth Low Energy
    Ble,
    /// WiFi in the 2.4 GHz band
    Wifi2G,
    /// WiFi in the 5 GHz band
    Wifi5G,
    /// LoRa
    Lora,
    /// Any other radio, by name (truncated to 16 bytes)
    Other(RadioName),
}

impl RadioType {
    /// Built-in radio types in registry order
    pub const KNOWN: [RadioType; 4] = [
        RadioType::Ble,
        RadioType::Wifi2G,
        RadioType::Wifi5G,
        RadioType::Lora,
    ];

    /// Parse a radio type name, case-insensitive
    ///
    /// Accepts `BLE`, `WIFI_2G`, `WIFI_5G` and `LORA`. Anything else becomes
    /// [`RadioType::Other`].
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("BLE") {
            RadioType::Ble
        } else if name.eq_ignore_ascii_case("WIFI_2G") {
            RadioType::Wifi2G
        } else if name.eq_ignore_ascii_case("WIFI_5G") {
            RadioType::Wifi5G
        } else if name.eq_ignore_ascii_case("LORA") {
            RadioType::Lora
        } else {
            RadioType::Other(truncated(name))
        }
    }

    /// Canonical name
    pub fn as_str(&self) -> &str {
        match self {
            RadioType::Ble => "BLE",
            RadioType::Wifi2G => "WIFI_2G",
            RadioType::Wifi5G => "WIFI_5G",
            RadioType::Lora => "LORA",
            RadioType::Other(name) => name.as_str(),
        }
    }

    /// Whether the registry has a dedicated model for this radio
    pub fn is_known(&self) -> bool {
        !matches!(self, RadioType::Other(_))
    }
}

impl fmt::Display for RadioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RadioType {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.as_str())
    }
}

// Radio types travel as their canonical names ("BLE", "LORA", ...)
#[cfg(feature = "serde")]
impl Serialize for RadioType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RadioType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RadioTypeVisitor;

        impl<'de> serde::de::Visitor<'de> for RadioTypeVisitor {
            type Value = RadioType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a radio type name")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<RadioType, E> {
                Ok(RadioType::from_name(value))
            }
        }

        deserializer.deserialize_str(RadioTypeVisitor)
    }
}

/// Copy `value` into a fixed-capacity string, dropping what does not fit
pub(crate) fn truncated<const N: usize>(value: &str) -> String<N> {
    let mut out = String::new();
    for c in value.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Log-distance path loss parameters for one radio technology
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalModel {
    /// Human readable label
    pub name: ModelName,
    /// Expected RSSI at `reference_distance` (dBm)
    pub reference_rssi: i16,
    /// Distance the reference RSSI was measured at (m)
    pub reference_distance: f32,
    /// Path-loss exponent n (> 0)
    pub path_loss_exponent: f32,
    /// Weakest accepted reading (dBm, inclusive)
    pub min_rssi: i16,
    /// Strongest accepted reading (dBm, inclusive)
    pub max_rssi: i16,
    /// Distance beyond which estimates are flagged unreliable (m)
    pub max_reliable_distance: f32,
}

impl SignalModel {
    /// Bluetooth Low Energy
    pub fn ble() -> Self {
        Self {
            name: truncated("Bluetooth Low Energy"),
            reference_rssi: BLE_REFERENCE_RSSI_DBM,
            reference_distance: DEFAULT_REFERENCE_DISTANCE_M,
            path_loss_exponent: BLE_PATH_LOSS_EXPONENT,
            min_rssi: BLE_MIN_RSSI_DBM,
            max_rssi: BLE_MAX_RSSI_DBM,
            max_reliable_distance: BLE_MAX_RELIABLE_DISTANCE_M,
        }
    }

    /// WiFi 2.4 GHz
    pub fn wifi_2g() -> Self {
        Self {
            name: truncated("WiFi 2.4 GHz"),
            reference_rssi: WIFI_2G_REFERENCE_RSSI_DBM,
            reference_distance: DEFAULT_REFERENCE_DISTANCE_M,
            path_loss_exponent: WIFI_2G_PATH_LOSS_EXPONENT,
            min_rssi: WIFI_2G_MIN_RSSI_DBM,
            max_rssi: WIFI_2G_MAX_RSSI_DBM,
            max_reliable_distance: WIFI_2G_MAX_RELIABLE_DISTANCE_M,
        }
    }

    /// WiFi 5 GHz
    pub fn wifi_5g() -> Self {
        Self {
            name: truncated("WiFi 5 GHz"),
            reference_rssi: WIFI_5G_REFERENCE_RSSI_DBM,
            reference_distance: DEFAULT_REFERENCE_DISTANCE_M,
            path_loss_exponent: WIFI_5G_PATH_LOSS_EXPONENT,
            min_rssi: WIFI_5G_MIN_RSSI_DBM,
            max_rssi: WIFI_5G_MAX_RSSI_DBM,
            max_reliable_distance: WIFI_5G_MAX_RELIABLE_DISTANCE_M,
        }
    }

    /// LoRa
    pub fn lora() -> Self {
        Self {
            name: truncated("LoRa"),
            reference_rssi: LORA_REFERENCE_RSSI_DBM,
            reference_distance: DEFAULT_REFERENCE_DISTANCE_M,
            path_loss_exponent: LORA_PATH_LOSS_EXPONENT,
            min_rssi: LORA_MIN_RSSI_DBM,
            max_rssi: LORA_MAX_RSSI_DBM,
            max_reliable_distance: LORA_MAX_RELIABLE_DISTANCE_M,
        }
    }

    /// Whether `rssi` lies in the inclusive valid window
    ///
    /// NaN is never in range.
    pub fn accepts(&self, rssi: f32) -> bool {
        rssi >= f32::from(self.min_rssi) && rssi <= f32::from(self.max_rssi)
    }

    /// Reject readings outside the valid window
    pub fn check_rssi(&self, rssi: f32) -> RangingResult<()> {
        if self.accepts(rssi) {
            Ok(())
        } else {
            Err(RangingError::RssiOutOfRange {
                rssi,
                min: self.min_rssi,
                max: self.max_rssi,
            })
        }
    }

    /// Unrounded distance (m) for a reading
    pub fn distance_for(&self, rssi: f32) -> f32 {
        let exponent =
            (f32::from(self.reference_rssi) - rssi) / (10.0 * self.path_loss_exponent);
        self.reference_distance * libm::powf(10.0, exponent)
    }

    /// Expected RSSI (dBm) at `distance`
    pub fn rssi_at(&self, distance: f32) -> f32 {
        f32::from(self.reference_rssi)
            - 10.0 * self.path_loss_exponent * libm::log10f(distance / self.reference_distance)
    }

    /// Whether a distance is within the model's reliable range
    pub fn is_reliable(&self, distance: f32) -> bool {
        distance <= self.max_reliable_distance
    }

    /// Shallow-merge every field the patch sets
    pub fn apply(&mut self, patch: &SignalModelPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(reference_rssi) = patch.reference_rssi {
            self.reference_rssi = reference_rssi;
        }
        if let Some(reference_distance) = patch.reference_distance {
            self.reference_distance = reference_distance;
        }
        if let Some(exponent) = patch.path_loss_exponent {
            self.path_loss_exponent = exponent;
        }
        if let Some(min_rssi) = patch.min_rssi {
            self.min_rssi = min_rssi;
        }
        if let Some(max_rssi) = patch.max_rssi {
            self.max_rssi = max_rssi;
        }
        if let Some(max_reliable) = patch.max_reliable_distance {
            self.max_reliable_distance = max_reliable;
        }
    }

    /// Copy with the patch applied
    pub fn patched(mut self, patch: &SignalModelPatch) -> Self {
        self.apply(patch);
        self
    }
}

impl Default for SignalModel {
    fn default() -> Self {
        Self::ble()
    }
}

/// Partial signal model, every field optional
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SignalModelPatch {
    /// New label
    pub name: Option<ModelName>,
    /// New reference RSSI (dBm)
    pub reference_rssi: Option<i16>,
    /// New reference distance (m)
    pub reference_distance: Option<f32>,
    /// New path-loss exponent
    pub path_loss_exponent: Option<f32>,
    /// New weakest accepted reading (dBm)
    pub min_rssi: Option<i16>,
    /// New strongest accepted reading (dBm)
    pub max_rssi: Option<i16>,
    /// New reliable distance (m)
    pub max_reliable_distance: Option<f32>,
}

impl SignalModelPatch {
    /// Patch that sets only the reference RSSI
    pub fn reference_rssi(rssi: i16) -> Self {
        Self {
            reference_rssi: Some(rssi),
            ..Self::default()
        }
    }

    /// Patch that sets only the path-loss exponent
    pub fn path_loss_exponent(exponent: f32) -> Self {
        Self {
            path_loss_exponent: Some(exponent),
            ..Self::default()
        }
    }

    /// Whether applying the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Model for a radio type, BLE for radios without a built-in entry
pub fn lookup(radio: &RadioType) -> SignalModel {
    match radio {
        RadioType::Ble => SignalModel::ble(),
        RadioType::Wifi2G => SignalModel::wifi_2g(),
        RadioType::Wifi5G => SignalModel::wifi_5g(),
        RadioType::Lora => SignalModel::lora(),
        RadioType::Other(_) => SignalModel::ble(),
    }
}
