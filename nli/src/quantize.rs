//! Quantization between geographic values and fixed-width cell indices.
//!
//! Latitude and longitude are each mapped linearly onto `2^COORD_BITS` buckets:
//!
//! ```text
//! bucket = floor((value - min) / (max - min) * (2^B - 1))
//! value  = min + (bucket + 0.5) / (2^B - 1) * (max - min)
//! ```
//!
//! The top bucket only holds `max` itself, so its reconstruction is clamped
//! back to `max`. Every other value reconstructs to the center of its bucket,
//! which bounds the round-trip error to half a bucket width.
//!
//! Elevation uses whole meters over [`ELEVATION_MIN`]..=[`ELEVATION_MAX`].
//! That range spans exactly `2^ELEVATION_BITS` values, so the bucket is the
//! offset from [`ELEVATION_MIN`] and elevation round-trips without loss.

use crate::elevation::ElevationType;
use crate::error::{NliError, Result};
use crate::point::GeoPoint;

/// Bits per horizontal axis.
pub const COORD_BITS: u32 = 30;

/// Bits for the elevation field.
pub const ELEVATION_BITS: u32 = 15;

/// Lowest encodable elevation in meters.
pub const ELEVATION_MIN: i32 = -(1 << (ELEVATION_BITS - 1));

/// Highest encodable elevation in meters.
pub const ELEVATION_MAX: i32 = (1 << (ELEVATION_BITS - 1)) - 1;

/// Largest bucket index on a horizontal axis.
pub(crate) const COORD_MAX_BUCKET: u32 = (1 << COORD_BITS) - 1;

/// Largest elevation bucket index.
pub(crate) const ELEVATION_MAX_BUCKET: u16 = (1 << ELEVATION_BITS) - 1;

/// A horizontal axis of the quantization grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Returns the field name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }

    /// Returns the valid `(min, max)` range in decimal degrees.
    pub fn range(self) -> (f64, f64) {
        match self {
            Axis::Latitude => (-90.0, 90.0),
            Axis::Longitude => (-180.0, 180.0),
        }
    }

    /// Returns the width of one bucket in decimal degrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use nli::quantize::Axis;
    ///
    /// // Roughly 1.7e-7 degrees, under 2 cm of latitude.
    /// assert!(Axis::Latitude.bucket_width() < 2e-7);
    /// ```
    pub fn bucket_width(self) -> f64 {
        let (min, max) = self.range();
        (max - min) / COORD_MAX_BUCKET as f64
    }

    /// Checks that `value` lies within the axis range. NaN is rejected.
    pub(crate) fn validate(self, value: f64) -> Result<f64> {
        let (min, max) = self.range();
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(NliError::out_of_range(self.name(), value, min, max))
        }
    }

    fn bucket_of(self, value: f64) -> u32 {
        let (min, max) = self.range();
        let scaled = ((value - min) / (max - min) * COORD_MAX_BUCKET as f64).floor();
        scaled.clamp(0.0, COORD_MAX_BUCKET as f64) as u32
    }

    fn center_of(self, bucket: u32) -> f64 {
        let (min, max) = self.range();
        let value = min + (bucket as f64 + 0.5) / COORD_MAX_BUCKET as f64 * (max - min);
        value.clamp(min, max)
    }
}

/// Checks that an elevation is within the encodable range.
pub(crate) fn validate_elevation(elevation: i32) -> Result<i32> {
    if (ELEVATION_MIN..=ELEVATION_MAX).contains(&elevation) {
        Ok(elevation)
    } else {
        Err(NliError::out_of_range(
            "elevation",
            elevation as f64,
            ELEVATION_MIN as f64,
            ELEVATION_MAX as f64,
        ))
    }
}

/// Fixed-point representation of a point.
///
/// Bit fields are always within their declared widths, so any cell can be
/// packed and dequantized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantizedCell {
    lat_bits: u32,
    lon_bits: u32,
    elev_bits: u16,
    elevation_type: ElevationType,
}

impl QuantizedCell {
    /// Builds a cell from raw bucket indices.
    ///
    /// # Errors
    ///
    /// Returns [`NliError::OutOfRange`] naming the field if `lat_bits` or
    /// `lon_bits` exceed [`COORD_BITS`] bits, or `elev_bits` exceeds
    /// [`ELEVATION_BITS`] bits.
    pub fn new(
        lat_bits: u32,
        lon_bits: u32,
        elev_bits: u16,
        elevation_type: ElevationType,
    ) -> Result<Self> {
        let check = |field: &'static str, bits: u32, max: u32| {
            if bits <= max {
                Ok(())
            } else {
                Err(NliError::out_of_range(field, bits as f64, 0.0, max as f64))
            }
        };
        check("lat_bits", lat_bits, COORD_MAX_BUCKET)?;
        check("lon_bits", lon_bits, COORD_MAX_BUCKET)?;
        check("elev_bits", elev_bits.into(), ELEVATION_MAX_BUCKET.into())?;

        Ok(Self {
            lat_bits,
            lon_bits,
            elev_bits,
            elevation_type,
        })
    }

    /// Callers guarantee every field is within its bit width.
    pub(crate) fn from_parts_unchecked(
        lat_bits: u32,
        lon_bits: u32,
        elev_bits: u16,
        elevation_type: ElevationType,
    ) -> Self {
        debug_assert!(lat_bits <= COORD_MAX_BUCKET && lon_bits <= COORD_MAX_BUCKET);
        debug_assert!(elev_bits <= ELEVATION_MAX_BUCKET);
        Self {
            lat_bits,
            lon_bits,
            elev_bits,
            elevation_type,
        }
    }

    pub fn lat_bits(&self) -> u32 {
        self.lat_bits
    }

    pub fn lon_bits(&self) -> u32 {
        self.lon_bits
    }

    pub fn elev_bits(&self) -> u16 {
        self.elev_bits
    }

    pub fn elevation_type(&self) -> ElevationType {
        self.elevation_type
    }
}

/// Quantize a point into its cell.
///
/// # Arguments
///
/// * `lat` - Latitude in decimal degrees (-90 to 90)
/// * `lon` - Longitude in decimal degrees (-180 to 180)
/// * `elevation` - Elevation in meters ([`ELEVATION_MIN`] to [`ELEVATION_MAX`])
/// * `elevation_type` - Reference frame of the elevation
///
/// # Errors
///
/// Returns [`NliError::OutOfRange`] naming the first offending field.
///
/// # Examples
///
/// ```
/// use nli::quantize::{quantize, COORD_BITS};
/// use nli::ElevationType;
///
/// let cell = quantize(90.0, -180.0, 0, ElevationType::GroundLevel).unwrap();
/// assert_eq!(cell.lat_bits(), (1 << COORD_BITS) - 1);
/// assert_eq!(cell.lon_bits(), 0);
///
/// assert!(quantize(90.0000001, 0.0, 0, ElevationType::GroundLevel).is_err());
/// ```
pub fn quantize(
    lat: f64,
    lon: f64,
    elevation: i32,
    elevation_type: ElevationType,
) -> Result<QuantizedCell> {
    let point = GeoPoint::new(lat, lon, elevation, elevation_type)?;
    Ok(quantize_point(&point))
}

/// Quantize an already validated point.
pub(crate) fn quantize_point(point: &GeoPoint) -> QuantizedCell {
    QuantizedCell::from_parts_unchecked(
        Axis::Latitude.bucket_of(point.latitude()),
        Axis::Longitude.bucket_of(point.longitude()),
        (point.elevation() - ELEVATION_MIN) as u16,
        point.elevation_type(),
    )
}

/// Reconstruct the point at the center of a cell.
///
/// Never fails: every [`QuantizedCell`] holds in-range bucket indices.
pub fn dequantize(cell: &QuantizedCell) -> GeoPoint {
    GeoPoint::from_parts_unchecked(
        Axis::Latitude.center_of(cell.lat_bits),
        Axis::Longitude.center_of(cell.lon_bits),
        i32::from(cell.elev_bits) + ELEVATION_MIN,
        cell.elevation_type,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn half_width(axis: Axis) -> f64 {
        // Slack for the rounding of the scale and center computations.
        axis.bucket_width() / 2.0 + 1e-9
    }

    #[test]
    fn test_elevation_range_matches_bits() {
        assert_eq!(ELEVATION_MIN, -16384);
        assert_eq!(ELEVATION_MAX, 16383);
        assert_eq!(
            (ELEVATION_MAX - ELEVATION_MIN) as u32,
            u32::from(ELEVATION_MAX_BUCKET)
        );
    }

    #[test]
    fn test_corners() {
        let cell = quantize(-90.0, -180.0, ELEVATION_MIN, ElevationType::SeaLevel).unwrap();
        assert_eq!(cell.lat_bits(), 0);
        assert_eq!(cell.lon_bits(), 0);
        assert_eq!(cell.elev_bits(), 0);

        let cell = quantize(90.0, 180.0, ELEVATION_MAX, ElevationType::SeaLevel).unwrap();
        assert_eq!(cell.lat_bits(), COORD_MAX_BUCKET);
        assert_eq!(cell.lon_bits(), COORD_MAX_BUCKET);
        assert_eq!(cell.elev_bits(), ELEVATION_MAX_BUCKET);
    }

    #[test]
    fn test_top_bucket_reconstructs_max() {
        let cell = quantize(90.0, 180.0, 0, ElevationType::GroundLevel).unwrap();
        let point = dequantize(&cell);
        assert_eq!(point.latitude(), 90.0);
        assert_eq!(point.longitude(), 180.0);
    }

    #[test]
    fn test_out_of_range() {
        let cases: [(f64, f64, i32, &str); 8] = [
            (90.0000001, 0.0, 0, "latitude"),
            (-90.0000001, 0.0, 0, "latitude"),
            (f64::NAN, 0.0, 0, "latitude"),
            (0.0, 180.0000001, 0, "longitude"),
            (0.0, f64::NEG_INFINITY, 0, "longitude"),
            (0.0, 0.0, ELEVATION_MAX + 1, "elevation"),
            (0.0, 0.0, ELEVATION_MIN - 1, "elevation"),
            (100.0, 200.0, 1_000_000, "latitude"),
        ];

        for (lat, lon, elev, expected) in cases {
            match quantize(lat, lon, elev, ElevationType::GroundLevel) {
                Err(NliError::OutOfRange { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected OutOfRange for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_roundtrip_within_half_bucket() {
        let points = [
            (35.3606, 138.7274, 3776),
            (27.9881, 86.9250, 8849),
            (-33.8688, 151.2093, 58),
            (0.0, 0.0, 0),
            (-89.9999999, 179.9999999, -10994),
            (51.4778, -0.0015, 46),
        ];

        for (lat, lon, elev) in points {
            let cell = quantize(lat, lon, elev, ElevationType::SeaLevel).unwrap();
            let point = dequantize(&cell);
            assert!((point.latitude() - lat).abs() <= half_width(Axis::Latitude));
            assert!((point.longitude() - lon).abs() <= half_width(Axis::Longitude));
            assert_eq!(point.elevation(), elev);
            assert_eq!(point.elevation_type(), ElevationType::SeaLevel);
        }
    }

    #[test]
    fn test_monotonic_per_axis() {
        let mut prev = 0;
        for i in 0..=2000 {
            let lat = -90.0 + 180.0 * (i as f64 / 2000.0);
            let cell = quantize(lat, 0.0, 0, ElevationType::GroundLevel).unwrap();
            assert!(cell.lat_bits() >= prev);
            prev = cell.lat_bits();
        }

        let mut prev = 0;
        for i in 0..=2000 {
            let lon = -180.0 + 360.0 * (i as f64 / 2000.0);
            let cell = quantize(0.0, lon, 0, ElevationType::GroundLevel).unwrap();
            assert!(cell.lon_bits() >= prev);
            prev = cell.lon_bits();
        }
    }

    #[test]
    fn test_cell_new_validates_bits() {
        assert!(QuantizedCell::new(
            COORD_MAX_BUCKET,
            COORD_MAX_BUCKET,
            ELEVATION_MAX_BUCKET,
            ElevationType::Ellipsoid
        )
        .is_ok());

        let err = QuantizedCell::new(1 << COORD_BITS, 0, 0, ElevationType::GroundLevel)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(err.to_string().contains("lat_bits"));

        let err = QuantizedCell::new(0, u32::MAX, 0, ElevationType::GroundLevel).unwrap_err();
        assert!(err.to_string().contains("lon_bits"));

        let err = QuantizedCell::new(0, 0, 1 << ELEVATION_BITS, ElevationType::GroundLevel)
            .unwrap_err();
        assert!(err.to_string().contains("elev_bits"));
    }

    #[test]
    fn test_deterministic() {
        let a = quantize(12.345678, -98.765432, 120, ElevationType::FloorLevel).unwrap();
        let b = quantize(12.345678, -98.765432, 120, ElevationType::FloorLevel).unwrap();
        assert_eq!(a, b);
    }
}
