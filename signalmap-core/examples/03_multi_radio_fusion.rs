//! Multi-Radio Fusion Example
//!
//! A gateway hears the same device over BLE, 2.4 GHz WiFi and LoRa. Each
//! radio alone gives a rough distance; fusion weights them by how much each
//! radio is trusted and how confident each estimate is.
//!
//! ## What You'll Learn
//!
//! - Feeding readings from several radios
//! - Reading the fused estimate and its per-radio breakdown
//! - Adjusting fusion weights
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 03_multi_radio_fusion
//! ```

use signalmap_core::{FusedEstimate, FusionConfig, MultiRadioEstimator, RadioType};

fn print_fused(label: &str, fused: &FusedEstimate) {
    println!("{}", label);
    match fused.distance {
        Some(distance) => println!(
            "  fused distance {:.2} m, confidence {:.2}, {} sources",
            distance, fused.confidence, fused.sources
        ),
        None => println!(
            "  no fused distance ({})",
            fused.error.map(|e| e.to_string()).unwrap_or_else(|| "zero weight".into())
        ),
    }
    for source in fused.breakdown.iter() {
        println!(
            "  {:<8} {:>7.2} m  confidence {:.2}  weight {:.3}",
            source.radio, source.distance, source.confidence, source.weight
        );
    }
    println!();
}

fn main() {
    println!("signalmap Multi-Radio Fusion Example");
    println!("====================================\n");

    let mut fusion = MultiRadioEstimator::new();
    print_fused("Before any reading:", &fusion.fused_estimate());

    // Device about 5 m away
    let ble = [-76.0, -77.0, -75.0, -78.0, -76.0, -77.0, -76.0, -75.0];
    let wifi = [-61.0, -60.0, -62.0, -61.0, -59.0, -61.0, -60.0, -62.0];
    let lora = [-49.0, -48.0, -50.0, -47.0, -49.0, -51.0, -48.0, -49.0];

    for i in 0..ble.len() {
        fusion.add_reading(&RadioType::Ble, ble[i]);
        fusion.add_reading(&RadioType::Wifi2G, wifi[i]);
        fusion.add_reading(&RadioType::Lora, lora[i]);
    }
    print_fused("Default weights:", &fusion.fused_estimate());

    // Trust LoRa less indoors
    let config = FusionConfig::default().with_weight(&RadioType::Lora, 0.1);
    let mut indoor = MultiRadioEstimator::with_config(config);
    for i in 0..ble.len() {
        indoor.add_reading(&RadioType::Ble, ble[i]);
        indoor.add_reading(&RadioType::Wifi2G, wifi[i]);
        indoor.add_reading(&RadioType::Lora, lora[i]);
    }
    print_fused("LoRa weight 0.1:", &indoor.fused_estimate());

    fusion.reset();
    print_fused("After reset:", &fusion.fused_estimate());
}
