//! Single Radio Ranging Example
//!
//! This example shows how signalmap turns a stream of noisy BLE RSSI
//! readings into a smoothed distance with a confidence score.
//!
//! ## What You'll Learn
//!
//! - Creating an estimator for a radio type
//! - Filtered vs unfiltered estimates
//! - How out-of-range readings are reported
//! - Reading history statistics
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_single_radio
//! ```

use signalmap_core::{RadioType, RssiEstimator};

fn main() {
    println!("signalmap Single Radio Example");
    println!("==============================\n");

    println!("Scenario: BLE tag about 2 m away, handset scanning at 1 Hz");
    println!("Expected RSSI at 2 m: ≈ -66.5 dBm (n = 2.5)\n");

    let mut estimator = RssiEstimator::new(&RadioType::Ble);

    // Readings as a scanner would report them, with one bogus value
    let readings = [
        -67.0, -64.0, -70.0, -66.0, -65.0, -69.0, -63.0, 12.0, -68.0, -66.0, -67.0, -65.0,
    ];

    println!("{:>6} | {:>9} | {:>8} | {:>10} | reliable", "raw", "filtered", "distance", "confidence");
    println!("{}", "-".repeat(56));

    for rssi in readings {
        let estimate = estimator.estimate_distance(rssi, true);
        match estimate.distance {
            Some(distance) => println!(
                "{:>6.1} | {:>9.2} | {:>6.2} m | {:>10.2} | {}",
                estimate.raw_rssi, estimate.filtered_rssi, distance, estimate.confidence, estimate.reliable
            ),
            None => println!(
                "{:>6.1} | rejected: {}",
                estimate.raw_rssi,
                estimate.error.map(|e| e.to_string()).unwrap_or_default()
            ),
        }
    }

    // Without the filter every reading stands on its own
    println!("\nUnfiltered estimate of the last reading:");
    let raw = estimator.estimate_distance(-65.0, false);
    println!("  -65 dBm -> {:?} m", raw.distance);

    let stats = estimator.stats();
    println!("\nHistory: {} samples", stats.samples);
    if let Some(summary) = stats.summary {
        println!("  mean      {:.2} dBm", summary.mean);
        println!("  min / max {:.0} / {:.0} dBm", summary.min, summary.max);
        println!("  std dev   {:.2} dB", summary.std_dev);
        println!("  filter    {:.2} dBm (confidence {:.2})", summary.filtered_rssi, summary.filter_confidence);
    }
}
