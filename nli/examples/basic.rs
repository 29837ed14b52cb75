//! Basic example demonstrating nli library usage.
//!
//! Run with: cargo run --example basic

use nli::{common_prefix_len, decode, encode, NliError};

fn main() -> Result<(), NliError> {
    // Some famous peaks, elevations above mean sea level
    let locations = [
        ("Mount Fuji, Japan", 35.3606, 138.7274, 3776),
        ("Mount Everest, Nepal", 27.9881, 86.9250, 8849),
        ("Denali, Alaska", 63.0695, -151.0074, 6190),
    ];

    println!("Encoded peaks:");
    println!("{:-<50}", "");

    for (name, lat, lon, elevation) in &locations {
        let code = encode(*lat, *lon, *elevation, "sea_level")?;
        let (dlat, dlon, delev, dtype) = decode(&code)?;
        println!("{}: {}", name, code);
        println!("  decoded: {:.7}, {:.7} @ {}m ({})", dlat, dlon, delev, dtype);
    }

    // Nearby points share leading symbols
    let a = encode(35.3606, 138.7274, 0, "ground_level")?;
    let b = encode(35.3607, 138.7275, 0, "ground_level")?;
    println!("\n{} vs {}: {} shared symbols", a, b, common_prefix_len(&a, &b));

    // Errors name the offending field
    match encode(91.0, 0.0, 0, "ground_level") {
        Err(e) => println!("\nRejected: {}", e),
        Ok(code) => println!("\nUnexpected code: {}", code),
    }

    Ok(())
}
