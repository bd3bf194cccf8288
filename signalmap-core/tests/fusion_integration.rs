//! Integration tests for multi-radio fusion
//!
//! Tests cover:
//! - Lazy source creation and first-seen ordering
//! - Weighted distance and agreement-scaled confidence
//! - Reset, capacity limits and custom configuration

#![cfg(test)]

#[macro_use]
mod common;

use signalmap_core::{
    FixedTime, FusionConfig, MultiRadioEstimator, RadioType, RangingError, SignalModel,
    SignalModelPatch,
};

use common::RssiGenerator;

fn fusion() -> MultiRadioEstimator<FixedTime> {
    MultiRadioEstimator::with_clock(FusionConfig::default(), FixedTime::new(0))
}

#[test]
fn test_source_counting() {
    let mut fusion = fusion();
    fusion.add_reading(&RadioType::Ble, -60.0);
    fusion.add_reading(&RadioType::Wifi2G, -50.0);
    fusion.add_reading(&RadioType::Ble, -61.0);

    let fused = fusion.fused_estimate();
    assert_eq!(fused.sources, 2);
    assert_eq!(fused.breakdown.len(), 2);
    assert!(fused.distance.is_some());
}

#[test]
fn test_no_readings_no_estimate() {
    let fused = fusion().fused_estimate();
    assert_eq!(fused.distance, None);
    assert_eq!(fused.confidence, 0.0);
    assert_eq!(fused.sources, 0);
    assert_eq!(
        fused.error.map(|e| e.to_string()),
        Some("No valid estimates available".to_string())
    );
}

#[test]
fn test_radios_agree_on_distance() {
    let mut generator = RssiGenerator::new(21);
    let mut fusion = fusion();
    let truth = 6.0;

    let ble = generator.at_distance(&SignalModel::ble(), truth, 1.0, 40);
    let wifi = generator.at_distance(&SignalModel::wifi_2g(), truth, 1.0, 40);
    let lora = generator.at_distance(&SignalModel::lora(), truth, 1.0, 40);

    for i in 0..40 {
        fusion.add_reading(&RadioType::Ble, ble[i]);
        fusion.add_reading(&RadioType::Wifi2G, wifi[i]);
        fusion.add_reading(&RadioType::Lora, lora[i]);
    }

    let fused = fusion.fused_estimate();
    assert_eq!(fused.sources, 3);

    let distance = fused.distance.unwrap();
    let lo = fused.breakdown.iter().map(|s| s.distance).fold(f32::INFINITY, f32::min);
    let hi = fused.breakdown.iter().map(|s| s.distance).fold(f32::NEG_INFINITY, f32::max);
    assert!(distance >= lo - 0.01 && distance <= hi + 0.01);

    // Three sources: fused confidence equals the best source confidence
    let best = fused.breakdown.iter().map(|s| s.confidence).fold(0.0, f32::max);
    assert_close!(fused.confidence, best, 0.011);
}

#[test]
fn test_effective_weights_follow_trust() {
    let mut fusion = fusion();
    for _ in 0..10 {
        fusion.add_reading(&RadioType::Ble, -59.0);
        fusion.add_reading(&RadioType::Lora, -30.0);
    }

    let fused = fusion.fused_estimate();
    let ble = &fused.breakdown[0];
    let lora = &fused.breakdown[1];
    assert_eq!(ble.radio, RadioType::Ble);
    assert_eq!(lora.radio, RadioType::Lora);

    assert_close!(ble.weight, ble.confidence * 1.0, 1e-6);
    assert_close!(lora.weight, lora.confidence * 0.5, 1e-6);
    assert!(ble.weight > lora.weight);
}

#[test]
fn test_zero_weight_radio_cannot_move_distance() {
    let config = FusionConfig::default().with_weight(&RadioType::Lora, 0.0);
    let mut fusion = MultiRadioEstimator::with_clock(config, FixedTime::new(0));

    for _ in 0..10 {
        fusion.add_reading(&RadioType::Ble, -69.0);
        fusion.add_reading(&RadioType::Lora, -100.0);
    }

    let fused = fusion.fused_estimate();
    assert_eq!(fused.sources, 2);
    assert_eq!(fused.breakdown[1].weight, 0.0);
    assert_eq!(fused.distance, Some(fused.breakdown[0].distance));
}

#[test]
fn test_only_zero_weights_yield_no_distance() {
    let config = FusionConfig::default().with_weight(&RadioType::Ble, 0.0);
    let mut fusion = MultiRadioEstimator::with_clock(config, FixedTime::new(0));
    fusion.add_reading(&RadioType::Ble, -60.0);

    let fused = fusion.fused_estimate();
    assert_eq!(fused.sources, 1);
    assert_eq!(fused.distance, None);
    assert!(fused.error.is_none());
}

#[test]
fn test_four_radios_confidence_exceeds_one() {
    let mut fusion = fusion();
    for _ in 0..25 {
        fusion.add_reading(&RadioType::Ble, -59.0);
        fusion.add_reading(&RadioType::Wifi2G, -40.0);
        fusion.add_reading(&RadioType::Wifi5G, -45.0);
        fusion.add_reading(&RadioType::from_name("UWB"), -59.0);
    }

    // Not clamped: four agreeing radios score above 1.0
    let fused = fusion.fused_estimate();
    assert_eq!(fused.sources, 4);
    assert!(fused.confidence > 1.0);
}

#[test]
fn test_reset_then_resume() {
    let mut fusion = fusion();
    for _ in 0..5 {
        fusion.add_reading(&RadioType::Ble, -70.0);
        fusion.add_reading(&RadioType::Wifi5G, -60.0);
    }

    fusion.reset();
    let fused = fusion.fused_estimate();
    assert_eq!(fused.error, Some(RangingError::NoValidEstimates));
    assert_eq!(fusion.radios().count(), 2);

    fusion.add_reading(&RadioType::Wifi5G, -60.0);
    let fused = fusion.fused_estimate();
    assert_eq!(fused.sources, 1);
    assert_eq!(fused.breakdown[0].radio, RadioType::Wifi5G);
}

#[test]
fn test_per_source_calibration() {
    let mut fusion = fusion();
    fusion.add_reading(&RadioType::Ble, -65.0);

    let estimator = fusion.estimator_mut(&RadioType::Ble).unwrap();
    estimator.calibrate(1.0, &[-65.0; 5]).unwrap();
    assert_eq!(estimator.model().reference_rssi, -65);

    let estimate = fusion.add_reading(&RadioType::Ble, -65.0);
    assert_close!(estimate.distance.unwrap(), 1.0, 0.1);
}

#[test]
fn test_model_patch_reaches_new_sources() {
    let config = FusionConfig::default()
        .with_model_patch(&RadioType::Wifi2G, SignalModelPatch::path_loss_exponent(2.0));
    let mut fusion = MultiRadioEstimator::with_clock(config, FixedTime::new(0));

    fusion.add_reading(&RadioType::Wifi2G, -60.0);
    let estimator = fusion.estimator_mut(&RadioType::Wifi2G).unwrap();
    assert_eq!(estimator.model().path_loss_exponent, 2.0);
    assert_eq!(estimator.model().reference_rssi, -40);

    // 10^((−40 + 60) / 20) = 10 m
    let estimate = estimator.estimate_distance(-60.0, false);
    assert_close!(estimate.distance.unwrap(), 10.0, 0.01);
}

#[test]
fn test_capacity_exceeded() {
    let mut fusion = fusion();
    for i in 0..8 {
        let radio = RadioType::from_name(&format!("CUSTOM_{}", i));
        fusion.add_reading(&radio, -60.0);
    }

    let estimate = fusion.add_reading(&RadioType::Ble, -60.0);
    assert!(matches!(
        estimate.error,
        Some(RangingError::SourceCapacityExceeded { capacity: 8 })
    ));
    assert!(fusion.estimator(&RadioType::Ble).is_none());
    assert_eq!(fusion.fused_estimate().sources, 8);
}
