//! Common test utilities and RSSI generators for integration tests
//!
//! This module provides:
//! - Seeded, reproducible RSSI noise around a model's expected value
//! - Movement scenarios (walking toward / away from a transmitter)
//! - Small assertion helpers for estimates

#![allow(dead_code)]

use signalmap_core::{DistanceEstimate, SignalModel};

/// Deterministic RSSI generator
///
/// Linear congruential generator, so every run sees the same readings.
pub struct RssiGenerator {
    seed: u32,
}

impl RssiGenerator {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Uniform value in [0, 1)
    pub fn random_float(&mut self) -> f32 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.seed >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform noise in [-spread, spread)
    pub fn noise(&mut self, spread: f32) -> f32 {
        (self.random_float() - 0.5) * 2.0 * spread
    }

    /// `count` readings scattered around `mean`, whole dBm like real scanners
    pub fn series(&mut self, mean: f32, spread: f32, count: usize) -> Vec<f32> {
        (0..count)
            .map(|_| (mean + self.noise(spread)).round())
            .collect()
    }

    /// Readings a model predicts at `distance`, with noise
    pub fn at_distance(
        &mut self,
        model: &SignalModel,
        distance: f32,
        spread: f32,
        count: usize,
    ) -> Vec<f32> {
        self.series(model.rssi_at(distance), spread, count)
    }

    /// Readings while moving linearly from `start` to `end` meters
    pub fn walk(
        &mut self,
        model: &SignalModel,
        start: f32,
        end: f32,
        steps: usize,
        spread: f32,
    ) -> Vec<f32> {
        (0..steps)
            .map(|i| {
                let t = i as f32 / (steps.max(2) - 1) as f32;
                let distance = start + (end - start) * t;
                (model.rssi_at(distance) + self.noise(spread)).round()
            })
            .collect()
    }
}

/// Distance of an estimate that must have one
pub fn distance_of(estimate: &DistanceEstimate) -> f32 {
    match estimate.distance {
        Some(distance) => distance,
        None => panic!("expected a distance, got {:?}", estimate.error),
    }
}

/// Assert two floats are within `tolerance`
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let (actual, expected, tolerance) = ($actual, $expected, $tolerance);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} ± {}, got {}",
            expected,
            tolerance,
            actual
        );
    };
}
