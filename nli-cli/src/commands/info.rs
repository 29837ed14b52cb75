use anyhow::Result;
use nli::codec::{SYMBOL_BITS, TOTAL_BITS};
use nli::quantize::{Axis, COORD_BITS, ELEVATION_BITS};
use nli::{ElevationType, ALPHABET, CODE_LENGTH, ELEVATION_MAX, ELEVATION_MIN};

/// Meters per degree of latitude, and of longitude at the equator.
const METERS_PER_DEGREE: f64 = 111_320.0;

pub fn run() -> Result<()> {
    let alphabet = std::str::from_utf8(ALPHABET)?;

    println!("Code length: {} symbols", CODE_LENGTH);
    println!("Alphabet: {} ({} bits/symbol)", alphabet, SYMBOL_BITS);
    println!("Total bits: {}", TOTAL_BITS);
    println!();

    for axis in [Axis::Latitude, Axis::Longitude] {
        let (min, max) = axis.range();
        let width = axis.bucket_width();
        println!(
            "{:<10} {} bits, {} to {}, bucket {:.3e}° (~{:.1} cm at the equator)",
            axis.name(),
            COORD_BITS,
            min,
            max,
            width,
            width * METERS_PER_DEGREE * 100.0
        );
    }
    println!(
        "{:<10} {} bits, {}m to {}m, 1 m steps",
        "elevation", ELEVATION_BITS, ELEVATION_MIN, ELEVATION_MAX
    );
    println!();

    println!("Elevation types:");
    for t in ElevationType::ALL {
        println!("  {:>2}  {}", t.tag(), t);
    }

    Ok(())
}
