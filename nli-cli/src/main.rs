use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

/// Encode and decode NLI point codes
#[derive(Parser)]
#[command(name = "nli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Default elevation type for points that don't specify one
    #[arg(
        short = 't',
        long,
        env = "NLI_ELEVATION_TYPE",
        default_value = "ground_level",
        global = true
    )]
    elevation_type: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a single point
    Encode {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Elevation in meters
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        elevation: i32,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Decode a single point code
    Decode {
        /// Point code to decode
        code: String,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Encode or decode points from a file
    Batch {
        /// Input file (CSV or GeoJSON)
        input: PathBuf,

        /// Output file (same format as input if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Decode codes instead of encoding points
        #[arg(short, long)]
        decode: bool,

        /// Column name for latitude (CSV only)
        #[arg(long, default_value = "lat")]
        lat_col: String,

        /// Column name for longitude (CSV only)
        #[arg(long, default_value = "lon")]
        lon_col: String,

        /// Column name for elevation (CSV only, 0 if the column is absent)
        #[arg(long, default_value = "elevation")]
        elevation_col: String,

        /// Column name for elevation type (CSV only, --elevation-type if absent)
        #[arg(long, default_value = "elevation_type")]
        type_col: String,

        /// Column or property name holding codes to decode
        #[arg(long, default_value = "encoded_point")]
        code_col: String,
    },

    /// Display the code format and its precision
    Info,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NLI_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("nli=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Encode {
            lat,
            lon,
            elevation,
            json,
        } => commands::encode::run(lat, lon, elevation, &cli.elevation_type, json),
        Commands::Decode { code, json } => commands::decode::run(&code, json),
        Commands::Batch {
            input,
            output,
            decode,
            lat_col,
            lon_col,
            elevation_col,
            type_col,
            code_col,
        } => commands::batch::run(
            input,
            output,
            decode,
            commands::batch::Columns {
                lat: lat_col,
                lon: lon_col,
                elevation: elevation_col,
                elevation_type: type_col,
                code: code_col,
            },
            &cli.elevation_type,
        ),
        Commands::Info => commands::info::run(),
    }
}
