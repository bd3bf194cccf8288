//! Multi-Radio Fusion Constants
//!
//! Trust weights per radio technology. A source's effective weight in the
//! fused distance is its trust weight multiplied by its own confidence.

/// Trust weight for BLE estimates.
///
/// BLE is the primary ranging radio of the application and the only one
/// typically calibrated per device.
pub const FUSION_WEIGHT_BLE: f32 = 1.0;

/// Trust weight for 2.4 GHz WiFi estimates.
pub const FUSION_WEIGHT_WIFI_2G: f32 = 0.8;

/// Trust weight for 5 GHz WiFi estimates.
///
/// Lower than 2.4 GHz: wall attenuation varies more at 5 GHz.
pub const FUSION_WEIGHT_WIFI_5G: f32 = 0.7;

/// Trust weight for LoRa estimates.
///
/// LoRa RSSI is coarse at short range and the model is tuned for kilometers.
pub const FUSION_WEIGHT_LORA: f32 = 0.5;

/// Trust weight for radio types without a dedicated entry.
pub const FUSION_WEIGHT_DEFAULT: f32 = 0.5;

/// Number of agreeing sources at which fused confidence equals the best
/// single-source confidence.
///
/// Fused confidence is `max(confidence) · sources / FUSION_AGREEMENT_DIVISOR`
/// and is not clamped, so it exceeds 1.0 with more sources than this.
pub const FUSION_AGREEMENT_DIVISOR: f32 = 3.0;
