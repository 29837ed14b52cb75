//! # NLI - Point Code Library
//!
//! Converts a geographic point (latitude, longitude, elevation and the
//! elevation's reference frame) into a short, fixed-length code that is easy
//! to read aloud or type, and back again.
//!
//! ## Features
//!
//! - **Compact**: 16 symbols from an alphabet without look-alike characters
//! - **Precise**: ~2 cm horizontal cells, whole-meter elevations
//! - **Local**: nearby points share leading symbols, like geohash
//! - **Pure**: no I/O, no global state, safe to call from any thread
//!
//! ## Quick Start
//!
//! ```
//! use nli::{decode, encode, ElevationType};
//!
//! let code = encode(35.3606, 138.7274, 3776, "sea_level")?;
//! assert_eq!(code.len(), nli::CODE_LENGTH);
//!
//! let (lat, lon, elevation, elevation_type) = decode(&code)?;
//! assert!((lat - 35.3606).abs() < 1e-6);
//! assert!((lon - 138.7274).abs() < 1e-6);
//! assert_eq!(elevation, 3776);
//! assert_eq!(elevation_type, ElevationType::SeaLevel);
//! # Ok::<(), nli::NliError>(())
//! ```
//!
//! ## Code Format
//!
//! | Field          | Bits | Range                                 |
//! |----------------|------|---------------------------------------|
//! | Longitude      | 30   | -180° to 180°, interleaved with latitude |
//! | Latitude       | 30   | -90° to 90°                           |
//! | Elevation      | 15   | -16384 m to 16383 m                   |
//! | Elevation type | 5    | see [`ElevationType`]                 |
//!
//! The 80 bits are written as 16 Crockford base-32 symbols. See [`codec`] for
//! the exact layout and [`quantize`] for the precision guarantees.

pub mod codec;
pub mod elevation;
pub mod error;
#[cfg(feature = "geojson")]
pub mod geojson;
pub mod point;
pub mod quantize;

// Re-export main types at crate root for convenience
pub use codec::{common_prefix_len, pack, unpack, ALPHABET, CODE_LENGTH};
pub use elevation::ElevationType;
pub use error::{ErrorKind, MalformedCode, NliError, Result};
pub use point::{decode, encode, EncodedPoint, GeoPoint};
pub use quantize::{dequantize, quantize, QuantizedCell, ELEVATION_MAX, ELEVATION_MIN};
