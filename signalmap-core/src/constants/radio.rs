//! Radio Signal Model Parameters
//!
//! Parameters of the log-distance path loss model for each built-in radio
//! technology:
//!
//! ```text
//! RSSI(d) = RSSI(d₀) - 10·n·log10(d / d₀)
//! ```
//!
//! `RSSI(d₀)` is the reference RSSI measured at the reference distance `d₀`
//! and `n` is the path-loss exponent of the environment (2.0 in free space,
//! 2.5-4.0 indoors).

// ===== BLUETOOTH LOW ENERGY =====

/// Expected BLE RSSI at one meter (dBm).
///
/// Matches the iBeacon "measured power" most tags advertise at 0 dBm
/// transmit power.
///
/// Source: Apple iBeacon proximity guidelines
pub const BLE_REFERENCE_RSSI_DBM: i16 = -59;

/// BLE path-loss exponent.
///
/// Indoor line-of-sight with a handset held at chest height.
///
/// Source: Empirical indoor BLE ranging surveys
pub const BLE_PATH_LOSS_EXPONENT: f32 = 2.5;

/// Weakest BLE RSSI accepted (dBm). Below this receivers report noise.
pub const BLE_MIN_RSSI_DBM: i16 = -100;

/// Strongest BLE RSSI accepted (dBm). Stronger values indicate a saturated
/// front end or a bogus report.
pub const BLE_MAX_RSSI_DBM: i16 = -20;

/// Distance beyond which BLE estimates are flagged unreliable (m).
pub const BLE_MAX_RELIABLE_DISTANCE_M: f32 = 20.0;

// ===== WIFI 2.4 GHZ =====

/// Expected 2.4 GHz WiFi RSSI at one meter (dBm).
///
/// Access points transmit at roughly 20 dBm, about 40 dB of free space loss
/// at one meter.
pub const WIFI_2G_REFERENCE_RSSI_DBM: i16 = -40;

/// 2.4 GHz path-loss exponent (office with drywall partitions).
pub const WIFI_2G_PATH_LOSS_EXPONENT: f32 = 3.0;

/// Weakest 2.4 GHz RSSI accepted (dBm).
pub const WIFI_2G_MIN_RSSI_DBM: i16 = -100;

/// Strongest 2.4 GHz RSSI accepted (dBm).
pub const WIFI_2G_MAX_RSSI_DBM: i16 = -10;

/// Distance beyond which 2.4 GHz estimates are flagged unreliable (m).
pub const WIFI_2G_MAX_RELIABLE_DISTANCE_M: f32 = 50.0;

// ===== WIFI 5 GHZ =====

/// Expected 5 GHz WiFi RSSI at one meter (dBm).
///
/// Free space loss at 5 GHz is ~6 dB higher than at 2.4 GHz, partially
/// offset by higher antenna gain.
pub const WIFI_5G_REFERENCE_RSSI_DBM: i16 = -45;

/// 5 GHz path-loss exponent. Walls attenuate 5 GHz harder than 2.4 GHz.
pub const WIFI_5G_PATH_LOSS_EXPONENT: f32 = 3.5;

/// Weakest 5 GHz RSSI accepted (dBm).
pub const WIFI_5G_MIN_RSSI_DBM: i16 = -100;

/// Strongest 5 GHz RSSI accepted (dBm).
pub const WIFI_5G_MAX_RSSI_DBM: i16 = -10;

/// Distance beyond which 5 GHz estimates are flagged unreliable (m).
pub const WIFI_5G_MAX_RELIABLE_DISTANCE_M: f32 = 30.0;

// ===== LORA =====

/// Expected LoRa RSSI at one meter (dBm).
pub const LORA_REFERENCE_RSSI_DBM: i16 = -30;

/// LoRa path-loss exponent (suburban, elevated gateway).
///
/// Source: LoRaWAN coverage field measurements
pub const LORA_PATH_LOSS_EXPONENT: f32 = 2.7;

/// Weakest LoRa RSSI accepted (dBm). SF12 demodulates well below -130 dBm.
pub const LORA_MIN_RSSI_DBM: i16 = -140;

/// Strongest LoRa RSSI accepted (dBm).
pub const LORA_MAX_RSSI_DBM: i16 = -10;

/// Distance beyond which LoRa estimates are flagged unreliable (m).
pub const LORA_MAX_RELIABLE_DISTANCE_M: f32 = 2000.0;

// ===== SHARED =====

/// Reference distance used by every built-in model (m).
pub const DEFAULT_REFERENCE_DISTANCE_M: f32 = 1.0;

/// Calibration distances within this tolerance of the reference distance
/// set the reference RSSI directly (m).
pub const REFERENCE_DISTANCE_TOLERANCE_M: f32 = 0.1;

/// Longest radio type name kept for unknown radios (bytes).
pub const RADIO_NAME_CAPACITY: usize = 16;

/// Longest signal model label (bytes).
pub const MODEL_NAME_CAPACITY: usize = 32;
