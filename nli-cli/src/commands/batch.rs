use anyhow::{bail, Context, Result};
use geojson::{Feature, GeoJson};
use indicatif::{ProgressBar, ProgressStyle};
use nli::geojson::{code_to_feature, encode_feature, ELEVATION_TYPE_PROPERTY};
use nli::ElevationType;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Column (or GeoJSON property) names used by the batch command.
pub struct Columns {
    pub lat: String,
    pub lon: String,
    pub elevation: String,
    pub elevation_type: String,
    pub code: String,
}

/// Counts reported at the end of a batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: u64,
    pub failed: u64,
}

impl BatchSummary {
    fn record<T, E: std::fmt::Display>(&mut self, row: u64, result: &std::result::Result<T, E>) {
        self.processed += 1;
        if let Err(e) = result {
            self.failed += 1;
            tracing::warn!(row, error = %e, "Skipping point");
        }
    }
}

pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    decode: bool,
    columns: Columns,
    default_type: &str,
) -> Result<()> {
    let default_type: ElevationType = default_type
        .parse()
        .context("Invalid default elevation type")?;

    // Detect file format
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let suffix = if decode { "decoded" } else { "encoded" };
    let output_path = match output {
        Some(path) => path,
        None => default_output_path(&input, suffix, &extension)?,
    };

    let summary = match extension.as_str() {
        "csv" if decode => decode_csv(&input, &output_path, &columns)?,
        "csv" => encode_csv(&input, &output_path, &columns, default_type)?,
        "geojson" | "json" => {
            process_geojson(&input, &output_path, decode, &columns.code, default_type)?
        }
        _ => bail!(
            "Unsupported file format: {}. Use .csv or .geojson",
            extension
        ),
    };

    tracing::info!(
        processed = summary.processed,
        failed = summary.failed,
        output = %output_path.display(),
        "Batch complete"
    );

    println!("Output written to: {}", output_path.display());
    if summary.failed > 0 {
        println!(
            "{} of {} points failed (see the error column)",
            summary.failed, summary.processed
        );
    }
    Ok(())
}

fn default_output_path(input: &Path, suffix: &str, extension: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .with_context(|| format!("Invalid input path: {}", input.display()))?
        .to_string_lossy();
    Ok(input.with_file_name(format!("{}_{}.{}", stem, suffix, extension)))
}

fn progress_bar(len: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn read_csv(input: &Path) -> Result<(csv::StringRecord, Vec<csv::StringRecord>)> {
    let file = File::open(input).context("Failed to open input file")?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let headers = reader.headers()?.clone();
    let records: Vec<_> = reader.records().collect::<Result<_, _>>()?;
    Ok((headers, records))
}

fn create_csv_writer(output: &Path) -> Result<csv::Writer<BufWriter<File>>> {
    let output_file = File::create(output).context("Failed to create output file")?;
    Ok(csv::Writer::from_writer(BufWriter::new(output_file)))
}

/// Parse a numeric cell.
fn parse_field<T: std::str::FromStr>(
    value: Option<&str>,
    field: &'static str,
) -> Result<T> {
    let value = value.with_context(|| format!("Missing {}", field))?;
    value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid {}: {:?}", field, value))
}

fn encode_csv(
    input: &Path,
    output: &Path,
    columns: &Columns,
    default_type: ElevationType,
) -> Result<BatchSummary> {
    let (headers, records) = read_csv(input)?;

    // Find column indices
    let lat_idx = column_index(&headers, &columns.lat)
        .with_context(|| format!("Column '{}' not found in CSV", columns.lat))?;
    let lon_idx = column_index(&headers, &columns.lon)
        .with_context(|| format!("Column '{}' not found in CSV", columns.lon))?;
    let elevation_idx = column_index(&headers, &columns.elevation);
    let type_idx = column_index(&headers, &columns.elevation_type);

    if elevation_idx.is_none() {
        tracing::debug!(column = %columns.elevation, "No elevation column, using 0");
    }
    if type_idx.is_none() {
        tracing::debug!(column = %columns.elevation_type, fallback = %default_type, "No elevation type column");
    }

    let pb = progress_bar(records.len() as u64)?;
    let mut writer = create_csv_writer(output)?;

    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.push("encoded_point");
    new_headers.push("error");
    writer.write_record(&new_headers)?;

    let mut summary = BatchSummary::default();
    for (row, record) in records.iter().enumerate() {
        let elevation_type = match type_idx.and_then(|i| record.get(i)) {
            Some(v) if !v.trim().is_empty() => v.trim(),
            _ => default_type.as_str(),
        };
        let result = encode_record(record, lat_idx, lon_idx, elevation_idx, elevation_type);
        summary.record(row as u64, &result);

        let (code, error) = match result {
            Ok(code) => (code, String::new()),
            Err(e) => (String::new(), e.to_string()),
        };
        let mut new_record: Vec<&str> = record.iter().collect();
        new_record.push(&code);
        new_record.push(&error);
        writer.write_record(&new_record)?;

        pb.inc(1);
    }

    pb.finish_with_message("done");
    writer.flush()?;
    Ok(summary)
}

/// Encode one CSV row. Parse failures are reported like codec errors.
fn encode_record(
    record: &csv::StringRecord,
    lat_idx: usize,
    lon_idx: usize,
    elevation_idx: Option<usize>,
    elevation_type: &str,
) -> Result<String> {
    let lat: f64 = parse_field(record.get(lat_idx), "latitude")?;
    let lon: f64 = parse_field(record.get(lon_idx), "longitude")?;
    let elevation: i32 = match elevation_idx.and_then(|i| record.get(i)) {
        Some(v) if !v.trim().is_empty() => parse_field(Some(v), "elevation")?,
        _ => 0,
    };
    Ok(nli::encode(lat, lon, elevation, elevation_type)?)
}

fn decode_csv(input: &Path, output: &Path, columns: &Columns) -> Result<BatchSummary> {
    let (headers, records) = read_csv(input)?;

    let code_idx = column_index(&headers, &columns.code)
        .with_context(|| format!("Column '{}' not found in CSV", columns.code))?;

    let pb = progress_bar(records.len() as u64)?;
    let mut writer = create_csv_writer(output)?;

    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.extend(["latitude", "longitude", "elevation", "elevation_type", "error"]);
    writer.write_record(&new_headers)?;

    let mut summary = BatchSummary::default();
    for (row, record) in records.iter().enumerate() {
        let code = record.get(code_idx).unwrap_or("").trim();
        let result = nli::decode(code);
        summary.record(row as u64, &result);

        let fields = match result {
            Ok((lat, lon, elevation, elevation_type)) => [
                format!("{:.7}", lat),
                format!("{:.7}", lon),
                elevation.to_string(),
                elevation_type.to_string(),
                String::new(),
            ],
            Err(e) => [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                e.to_string(),
            ],
        };
        let mut new_record: Vec<&str> = record.iter().collect();
        new_record.extend(fields.iter().map(String::as_str));
        writer.write_record(&new_record)?;

        pb.inc(1);
    }

    pb.finish_with_message("done");
    writer.flush()?;
    Ok(summary)
}

fn process_geojson(
    input: &Path,
    output: &Path,
    decode: bool,
    code_property: &str,
    default_type: ElevationType,
) -> Result<BatchSummary> {
    let file = File::open(input).context("Failed to open input file")?;
    let reader = BufReader::new(file);

    let geojson: GeoJson = serde_json::from_reader(reader).context("Failed to parse GeoJSON")?;

    let mut summary = BatchSummary::default();
    let mut process = |row: u64, feature: &mut Feature| {
        let result = if decode {
            decode_feature(feature, code_property)
        } else {
            encode_feature(feature, default_type).map(|_| ())
        };
        summary.record(row, &result);
        if let Err(e) = result {
            feature.set_property("error", e.to_string());
        }
    };

    let result = match geojson {
        GeoJson::Geometry(geometry) => {
            let mut feature = Feature::from(geometry);
            process(0, &mut feature);
            GeoJson::Feature(feature)
        }
        GeoJson::Feature(mut feature) => {
            process(0, &mut feature);
            GeoJson::Feature(feature)
        }
        GeoJson::FeatureCollection(mut fc) => {
            let pb = progress_bar(fc.features.len() as u64)?;
            for (row, feature) in fc.features.iter_mut().enumerate() {
                process(row as u64, feature);
                pb.inc(1);
            }
            pb.finish_with_message("done");
            GeoJson::FeatureCollection(fc)
        }
    };

    let output_file = File::create(output).context("Failed to create output file")?;
    let mut writer = BufWriter::new(output_file);
    serde_json::to_writer_pretty(&mut writer, &result)?;
    writer.flush()?;

    Ok(summary)
}

/// Replace a feature's geometry with the point its code decodes to.
fn decode_feature(feature: &mut Feature, code_property: &str) -> nli::Result<()> {
    let code = feature
        .property(code_property)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim()
        .to_string();
    let decoded = code_to_feature(&code)?;

    if let Some(elevation_type) = decoded.property(ELEVATION_TYPE_PROPERTY) {
        feature.set_property(ELEVATION_TYPE_PROPERTY, elevation_type.clone());
    }
    feature.geometry = decoded.geometry;
    Ok(())
}
