//! Statistics over an estimator's reading history
//!
//! Population statistics (divide by N) over the raw RSSI values the
//! estimator accepted. Values are computed in two passes over the fixed-size
//! history, so there is no running state to drift or to reset.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::round_to;

/// Summary of an estimator's history
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RssiStats {
    /// Readings currently held in history
    pub samples: usize,
    /// Statistics, `None` while the history is empty
    pub summary: Option<RssiSummary>,
}

/// Statistics over a non-empty history
///
/// `mean`, `std_dev` and `filtered_rssi` are rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RssiSummary {
    /// Mean raw RSSI (dBm)
    pub mean: f32,
    /// Weakest raw RSSI (dBm)
    pub min: f32,
    /// Strongest raw RSSI (dBm)
    pub max: f32,
    /// `max - min` (dB)
    pub range: f32,
    /// Population standard deviation (dB)
    pub std_dev: f32,
    /// Current filter estimate (dBm)
    pub filtered_rssi: f32,
    /// Current filter confidence in [0, 1]
    pub filter_confidence: f32,
}

impl RssiStats {
    /// Statistics of an empty history
    pub const fn empty() -> Self {
        Self { samples: 0, summary: None }
    }

    /// Build statistics from raw history values
    pub fn from_values<I>(values: I, filtered_rssi: f32, filter_confidence: f32) -> Self
    where
        I: Iterator<Item = f32> + Clone,
    {
        let samples = values.clone().count();
        let Some((mean, std_dev)) = mean_and_std_dev(values.clone()) else {
            return Self::empty();
        };

        let (min, max) = values.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        Self {
            samples,
            summary: Some(RssiSummary {
                mean: round_to(mean, 2),
                min,
                max,
                range: max - min,
                std_dev: round_to(std_dev, 2),
                filtered_rssi: round_to(filtered_rssi, 2),
                filter_confidence,
            }),
        }
    }

    /// Whether the history was empty
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}

/// Mean and population standard deviation, `None` for no values
pub(crate) fn mean_and_std_dev<I>(values: I) -> Option<(f32, f32)>
where
    I: Iterator<Item = f32> + Clone,
{
    let (count, sum) = values.clone().fold((0usize, 0.0f32), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        return None;
    }

    let n = count as f32;
    let mean = sum / n;
    let variance = values.map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;

    Some((mean, libm::sqrtf(variance.max(0.0))))
}
