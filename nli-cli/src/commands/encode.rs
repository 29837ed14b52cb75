use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct EncodeResponse {
    encoded_point: String,
}

pub fn run(lat: f64, lon: f64, elevation: i32, elevation_type: &str, json: bool) -> Result<()> {
    tracing::debug!(lat, lon, elevation, elevation_type, "Encoding point");

    let encoded_point = nli::encode(lat, lon, elevation, elevation_type)
        .context("Failed to encode point")?;

    if json {
        let response = EncodeResponse { encoded_point };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("{}", encoded_point);
    }

    Ok(())
}
