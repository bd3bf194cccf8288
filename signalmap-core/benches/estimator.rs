//! Estimator Throughput Benchmark
//!
//! Run with:
//!
//! ```bash
//! cargo bench -p signalmap-core --bench estimator
//! ```
//!
//! This benchmark measures:
//! - One filtered estimate on a warm estimator (the scan callback path)
//! - Statistics over a full history
//! - Fused estimate across several radios

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use signalmap_core::{
    EstimatorConfig, FixedTime, FusionConfig, MultiRadioEstimator, RadioType, RssiEstimator,
    SignalModel,
};

fn warm_estimator() -> RssiEstimator<FixedTime> {
    let mut estimator =
        RssiEstimator::with_clock(SignalModel::ble(), EstimatorConfig::default(), FixedTime::new(0));
    for i in 0..50 {
        estimator.estimate_distance(-60.0 - (i % 7) as f32, true);
    }
    estimator
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimator");

    group.bench_function("estimate_filtered", |b| {
        let mut estimator = warm_estimator();
        let mut rssi = -60.0f32;
        b.iter(|| {
            rssi = if rssi < -70.0 { -60.0 } else { rssi - 1.0 };
            black_box(estimator.estimate_distance(black_box(rssi), true))
        });
    });

    group.bench_function("estimate_rejected", |b| {
        let mut estimator = warm_estimator();
        b.iter(|| black_box(estimator.estimate_distance(black_box(5.0), true)));
    });

    group.bench_function("stats_full_history", |b| {
        let estimator = warm_estimator();
        b.iter(|| black_box(estimator.stats()));
    });

    group.finish();
}

fn bench_fusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("fusion");
    let radios = [
        RadioType::Ble,
        RadioType::Wifi2G,
        RadioType::Wifi5G,
        RadioType::Lora,
    ];

    for sources in 1..=radios.len() {
        let mut fusion =
            MultiRadioEstimator::with_clock(FusionConfig::default(), FixedTime::new(0));
        for _ in 0..20 {
            for radio in &radios[..sources] {
                fusion.add_reading(radio, -60.0);
            }
        }

        group.bench_function(BenchmarkId::new("fused_estimate", sources), |b| {
            b.iter(|| black_box(fusion.fused_estimate()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_estimate, bench_fusion);
criterion_main!(benches);
