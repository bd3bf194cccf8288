//! Property tests for ranging invariants
//!
//! Tests cover:
//! - Rejected readings never change estimator state
//! - Stronger signals never estimate farther
//! - Confidence stays in [0, 1] for single radios
//! - History never exceeds its capacity
//! - Calibration at the reference distance is exact

use proptest::prelude::*;

use signalmap_core::{
    EstimatorConfig, FilterConfig, FixedTime, KalmanFilter, MultiRadioEstimator, RadioType,
    RssiEstimator, SignalModel, FusionConfig,
};

fn radio() -> impl Strategy<Value = RadioType> {
    prop_oneof![
        Just(RadioType::Ble),
        Just(RadioType::Wifi2G),
        Just(RadioType::Wifi5G),
        Just(RadioType::Lora),
    ]
}

fn estimator(radio: &RadioType) -> RssiEstimator<FixedTime> {
    RssiEstimator::with_clock(
        signalmap_core::lookup(radio),
        EstimatorConfig::default(),
        FixedTime::new(0),
    )
}

proptest! {
    #[test]
    fn prop_out_of_range_is_rejected(
        radio in radio(),
        below in -300.0f32..-140.5,
        above in -9.5f32..100.0,
        warmup in prop::collection::vec(-95.0f32..-30.0, 0..10)
    ) {
        let mut estimator = estimator(&radio);
        for rssi in warmup {
            estimator.estimate_distance(rssi, true);
        }
        let before = estimator.stats();

        for rssi in [below, above] {
            let estimate = estimator.estimate_distance(rssi, true);
            prop_assert!(estimate.distance.is_none());
            prop_assert!(estimate.error.is_some());
            prop_assert_eq!(estimate.confidence, 0.0);
        }
        prop_assert_eq!(estimator.stats(), before);
    }

    #[test]
    fn prop_stronger_is_never_farther(
        radio in radio(),
        a in -100.0f32..-20.0,
        b in -100.0f32..-20.0
    ) {
        let (weak, strong) = if a <= b { (a, b) } else { (b, a) };
        let mut estimator = estimator(&radio);

        let far = estimator.estimate_distance(weak, false).distance.unwrap();
        let near = estimator.estimate_distance(strong, false).distance.unwrap();
        prop_assert!(near <= far, "{} dBm -> {} m, {} dBm -> {} m", strong, near, weak, far);
    }

    #[test]
    fn prop_confidence_in_unit_interval(
        radio in radio(),
        readings in prop::collection::vec(-100.0f32..-20.0, 1..80),
        use_filter in any::<bool>()
    ) {
        let mut estimator = estimator(&radio);
        for rssi in readings {
            let estimate = estimator.estimate_distance(rssi, use_filter);
            prop_assert!((0.0..=1.0).contains(&estimate.confidence));
        }
    }

    #[test]
    fn prop_history_is_bounded(count in 0usize..200) {
        let mut estimator = estimator(&RadioType::Ble);
        for i in 0..count {
            estimator.estimate_distance(-60.0 - (i % 20) as f32, true);
        }
        prop_assert_eq!(estimator.stats().samples, count.min(50));
    }

    #[test]
    fn prop_calibration_at_reference_is_exact(
        mean in -95.0f32..-25.0,
        count in 5usize..30
    ) {
        let mut estimator = estimator(&RadioType::Ble);
        let samples = vec![mean; count];

        prop_assert!(estimator.calibrate(1.0, &samples).is_ok());
        prop_assert!((f32::from(estimator.model().reference_rssi) - mean).abs() <= 0.5 + 1e-3);

        let rounded = f32::from(estimator.model().reference_rssi);
        let distance = estimator.estimate_distance(rounded, false).distance.unwrap();
        prop_assert!((distance - 1.0).abs() < 0.01);
    }

    #[test]
    fn prop_filter_stays_within_inputs(
        initial in -100.0f32..-20.0,
        readings in prop::collection::vec(-100.0f32..-20.0, 1..50),
        noise in 0.5f32..20.0
    ) {
        let config = FilterConfig::default().with_measurement_noise(noise);
        let mut kf = KalmanFilter::new(config, initial);

        let lo = readings.iter().copied().fold(initial, f32::min);
        let hi = readings.iter().copied().fold(initial, f32::max);
        for z in readings {
            let estimate = kf.update(z);
            prop_assert!(estimate >= lo - 1e-3 && estimate <= hi + 1e-3);
            prop_assert!(kf.error_covariance() >= 0.0);
        }
    }

    #[test]
    fn prop_fused_distance_within_sources(
        readings in prop::collection::vec((radio(), -95.0f32..-25.0), 1..60)
    ) {
        let mut fusion = MultiRadioEstimator::with_clock(FusionConfig::default(), FixedTime::new(0));
        for (radio, rssi) in &readings {
            fusion.add_reading(radio, *rssi);
        }

        let fused = fusion.fused_estimate();
        prop_assert!(fused.sources >= 1);
        prop_assert!(fused.confidence >= 0.0);
        prop_assert!(fused.confidence <= fused.sources as f32 / 3.0 + 0.01);

        if let Some(distance) = fused.distance {
            let lo = fused.breakdown.iter().map(|s| s.distance).fold(f32::INFINITY, f32::min);
            let hi = fused.breakdown.iter().map(|s| s.distance).fold(f32::NEG_INFINITY, f32::max);
            prop_assert!(distance >= lo - 0.01 && distance <= hi + 0.01);
        }
    }
}

#[test]
fn reference_point_holds_for_builtin_models() {
    let mut estimator = RssiEstimator::with_clock(
        SignalModel::ble(),
        EstimatorConfig::default(),
        FixedTime::new(0),
    );
    let distance = estimator.estimate_distance(-59.0, false).distance.unwrap();
    assert!((distance - 1.0).abs() <= 0.1);
}
