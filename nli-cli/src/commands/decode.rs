use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct DecodeResponse {
    latitude: f64,
    longitude: f64,
    elevation: i32,
    elevation_type: &'static str,
}

pub fn run(code: &str, json: bool) -> Result<()> {
    tracing::debug!(code, "Decoding point");

    let (latitude, longitude, elevation, elevation_type) =
        nli::decode(code.trim()).with_context(|| format!("Failed to decode '{}'", code))?;

    if json {
        let response = DecodeResponse {
            latitude,
            longitude,
            elevation,
            elevation_type: elevation_type.as_str(),
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!(
            "{:.7} {:.7} {} {}",
            latitude, longitude, elevation, elevation_type
        );
    }

    Ok(())
}
