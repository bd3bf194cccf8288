//! Per-Device Calibration Example
//!
//! Transmit power differs between tags. A tag that is 6 dB weaker than the
//! built-in BLE model assumes looks twice as far away as it is. Calibration
//! fixes the model's reference RSSI from readings taken at a known distance.
//!
//! ## What You'll Learn
//!
//! - Calibrating at the reference distance and at other distances
//! - What happens with too few samples
//! - Patching a model by hand
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_calibration
//! ```

use signalmap_core::{RadioType, RssiEstimator, SignalModelPatch};

fn main() {
    println!("signalmap Calibration Example");
    println!("=============================\n");

    let mut estimator = RssiEstimator::new(&RadioType::Ble);

    // Tag at 3 m, transmitting weaker than the model expects
    let at_three_meters = [-77.0, -78.0, -76.0, -77.0, -79.0, -77.0, -78.0];

    let before = estimator.estimate_distance(-77.0, false);
    println!("Before calibration: -77 dBm -> {:?} m", before.distance);
    println!("  reference RSSI {} dBm\n", estimator.model().reference_rssi);

    // Too few samples is reported, nothing changes
    match estimator.calibrate(3.0, &at_three_meters[..3]) {
        Ok(()) => println!("Calibrated with 3 samples?"),
        Err(e) => println!("Calibration with 3 samples failed: {}", e),
    }

    match estimator.calibrate(3.0, &at_three_meters) {
        Ok(()) => println!("Calibrated with {} samples at 3 m", at_three_meters.len()),
        Err(e) => println!("Calibration failed: {}", e),
    }
    println!("  reference RSSI {} dBm", estimator.model().reference_rssi);

    let after = estimator.estimate_distance(-77.0, false);
    println!("After calibration: -77 dBm -> {:?} m\n", after.distance);

    // Environments with more obstruction need a larger exponent
    estimator.update_model(&SignalModelPatch::path_loss_exponent(3.2));
    let walls = estimator.estimate_distance(-77.0, false);
    println!("With n = 3.2 (through walls): -77 dBm -> {:?} m", walls.distance);
}
