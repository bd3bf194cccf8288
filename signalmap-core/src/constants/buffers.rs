//! Buffer Sizes and Memory Constraints
//!
//! Fixed capacities for the per-estimator reading history and the
//! multi-radio source table. Both live inline, no heap allocation.

/// Readings kept per estimator for statistics and confidence.
///
/// 50 readings × 16 bytes = 800 bytes per estimator. At typical 1-10 Hz
/// advertising rates this covers the last 5-50 seconds.
pub const HISTORY_CAPACITY: usize = 50;

/// Distinct radio types tracked by one multi-radio estimator.
///
/// Must be a power of two (`heapless::FnvIndexMap` requirement). Four
/// built-in radios leave room for four custom ones.
pub const MAX_RADIO_SOURCES: usize = 8;
