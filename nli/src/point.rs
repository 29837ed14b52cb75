//! Geographic points and their codes.
//!
//! [`encode`] and [`decode`] are the two operations adapters call. The
//! [`GeoPoint`] and [`EncodedPoint`] types offer the same conversions for
//! callers that already hold validated values.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::codec::{pack, unpack};
use crate::elevation::ElevationType;
use crate::error::{NliError, Result};
use crate::quantize::{dequantize, quantize_point, validate_elevation, Axis, QuantizedCell};

/// A validated geographic point with elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
    elevation: i32,
    elevation_type: ElevationType,
}

impl GeoPoint {
    /// Create a point, checking every field against its valid range.
    ///
    /// # Arguments
    ///
    /// * `latitude` - Decimal degrees (-90 to 90)
    /// * `longitude` - Decimal degrees (-180 to 180)
    /// * `elevation` - Meters ([`ELEVATION_MIN`](crate::ELEVATION_MIN) to
    ///   [`ELEVATION_MAX`](crate::ELEVATION_MAX))
    /// * `elevation_type` - Reference frame of the elevation
    ///
    /// # Errors
    ///
    /// Returns [`NliError::OutOfRange`] naming the first offending field.
    pub fn new(
        latitude: f64,
        longitude: f64,
        elevation: i32,
        elevation_type: ElevationType,
    ) -> Result<Self> {
        Ok(Self {
            latitude: Axis::Latitude.validate(latitude)?,
            longitude: Axis::Longitude.validate(longitude)?,
            elevation: validate_elevation(elevation)?,
            elevation_type,
        })
    }

    /// A point on the ground surface, as produced for geocoded addresses.
    pub fn ground_level(latitude: f64, longitude: f64) -> Result<Self> {
        Self::new(latitude, longitude, 0, ElevationType::GroundLevel)
    }

    pub(crate) fn from_parts_unchecked(
        latitude: f64,
        longitude: f64,
        elevation: i32,
        elevation_type: ElevationType,
    ) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
            elevation_type,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn elevation(&self) -> i32 {
        self.elevation
    }

    pub fn elevation_type(&self) -> ElevationType {
        self.elevation_type
    }

    /// The cell this point quantizes to.
    pub fn cell(&self) -> QuantizedCell {
        quantize_point(self)
    }

    /// Encode this point.
    pub fn encode(&self) -> EncodedPoint {
        let cell = self.cell();
        EncodedPoint {
            code: pack(&cell),
            cell,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} @ {}m ({})",
            self.latitude, self.longitude, self.elevation, self.elevation_type
        )
    }
}

/// A validated point code in canonical (uppercase) form.
///
/// Codes order as strings, which keeps horizontally close points together.
#[derive(Debug, Clone)]
pub struct EncodedPoint {
    code: String,
    cell: QuantizedCell,
}

impl EncodedPoint {
    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn cell(&self) -> QuantizedCell {
        self.cell
    }

    /// Decode to the center of the encoded cell.
    pub fn decode(&self) -> GeoPoint {
        dequantize(&self.cell)
    }

    pub fn into_string(self) -> String {
        self.code
    }
}

impl FromStr for EncodedPoint {
    type Err = NliError;

    fn from_str(s: &str) -> Result<Self> {
        let cell = unpack(s)?;
        Ok(Self {
            code: pack(&cell),
            cell,
        })
    }
}

impl fmt::Display for EncodedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl AsRef<str> for EncodedPoint {
    fn as_ref(&self) -> &str {
        &self.code
    }
}

impl PartialEq for EncodedPoint {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for EncodedPoint {}

impl Hash for EncodedPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl PartialOrd for EncodedPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EncodedPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }
}

/// Encode a point into its code.
///
/// # Arguments
///
/// * `latitude` - Decimal degrees (-90 to 90)
/// * `longitude` - Decimal degrees (-180 to 180)
/// * `elevation` - Meters ([`ELEVATION_MIN`](crate::ELEVATION_MIN) to
///   [`ELEVATION_MAX`](crate::ELEVATION_MAX))
/// * `elevation_type` - Name of the reference frame, e.g. `"ground_level"`
///
/// # Errors
///
/// - [`NliError::UnknownElevationType`] if `elevation_type` is not a known name
/// - [`NliError::OutOfRange`] if a numeric field is outside its range
///
/// # Examples
///
/// ```
/// use nli::{encode, CODE_LENGTH};
///
/// let code = encode(35.3606, 138.7274, 3776, "sea_level").unwrap();
/// assert_eq!(code.len(), CODE_LENGTH);
/// assert!(encode(35.3606, 138.7274, 3776, "summit").is_err());
/// ```
pub fn encode(
    latitude: f64,
    longitude: f64,
    elevation: i32,
    elevation_type: &str,
) -> Result<String> {
    let elevation_type = elevation_type.parse::<ElevationType>()?;
    let point = GeoPoint::new(latitude, longitude, elevation, elevation_type)?;
    Ok(pack(&point.cell()))
}

/// Decode a code into `(latitude, longitude, elevation, elevation_type)`.
///
/// Latitude and longitude are the center of the encoded cell, within half a
/// bucket width of the encoded values. Elevation and type are exact.
///
/// # Errors
///
/// Returns [`NliError::MalformedCode`] if the code has the wrong length or
/// contains a character outside the alphabet.
///
/// # Examples
///
/// ```
/// use nli::{decode, encode, ElevationType};
///
/// let code = encode(35.3606, 138.7274, 3776, "sea_level").unwrap();
/// let (lat, lon, elevation, elevation_type) = decode(&code).unwrap();
///
/// assert!((lat - 35.3606).abs() < 1e-6);
/// assert!((lon - 138.7274).abs() < 1e-6);
/// assert_eq!(elevation, 3776);
/// assert_eq!(elevation_type, ElevationType::SeaLevel);
/// ```
pub fn decode(encoded: &str) -> Result<(f64, f64, i32, ElevationType)> {
    let point = dequantize(&unpack(encoded)?);
    Ok((
        point.latitude,
        point.longitude,
        point.elevation,
        point.elevation_type,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CODE_LENGTH;
    use crate::error::{ErrorKind, MalformedCode};
    use crate::quantize::{ELEVATION_MAX, ELEVATION_MIN};

    #[test]
    fn test_encode_decode() {
        let code = encode(40.7484, -73.9857, 443, "ground_level").unwrap();
        assert_eq!(code.len(), CODE_LENGTH);

        let (lat, lon, elevation, elevation_type) = decode(&code).unwrap();
        assert!((lat - 40.7484).abs() <= Axis::Latitude.bucket_width());
        assert!((lon - -73.9857).abs() <= Axis::Longitude.bucket_width());
        assert_eq!(elevation, 443);
        assert_eq!(elevation_type, ElevationType::GroundLevel);
    }

    #[test]
    fn test_encode_boundaries() {
        let code = encode(90.0, 180.0, ELEVATION_MAX, "sea_level").unwrap();
        assert_eq!(code.len(), CODE_LENGTH);
        let (lat, lon, elevation, _) = decode(&code).unwrap();
        assert_eq!(lat, 90.0);
        assert_eq!(lon, 180.0);
        assert_eq!(elevation, ELEVATION_MAX);

        let code = encode(-90.0, -180.0, ELEVATION_MIN, "sea_level").unwrap();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_encode_rejects_just_past_pole() {
        match encode(90.0000001, 0.0, 0, "ground_level") {
            Err(NliError::OutOfRange { field, .. }) => assert_eq!(field, "latitude"),
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_unknown_type() {
        let err = encode(0.0, 0.0, 0, "basement").unwrap_err();
        assert_eq!(
            err,
            NliError::UnknownElevationType {
                name: "basement".to_string()
            }
        );
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(decode("").unwrap_err().kind(), ErrorKind::MalformedCode);

        let code = encode(1.0, 2.0, 3, "floor_level").unwrap();
        assert_eq!(
            decode(&code[..CODE_LENGTH - 1]).unwrap_err(),
            NliError::MalformedCode(MalformedCode::Length {
                expected: CODE_LENGTH,
                actual: CODE_LENGTH - 1
            })
        );
        assert_eq!(
            decode(&format!("{code}0")).unwrap_err(),
            NliError::MalformedCode(MalformedCode::Length {
                expected: CODE_LENGTH,
                actual: CODE_LENGTH + 1
            })
        );

        let mut bad = code.clone();
        bad.replace_range(5..6, "L");
        assert_eq!(
            decode(&bad).unwrap_err(),
            NliError::MalformedCode(MalformedCode::Character {
                position: 5,
                character: 'L'
            })
        );
    }

    #[test]
    fn test_deterministic() {
        let a = encode(-22.9519, -43.2105, 700, "ground_level").unwrap();
        let b = encode(-22.9519, -43.2105, 700, "ground_level").unwrap();
        assert_eq!(a, b);
        assert_eq!(decode(&a).unwrap(), decode(&b).unwrap());
    }

    #[test]
    fn test_elevation_type_changes_code() {
        let ground = encode(10.0, 10.0, 5, "ground_level").unwrap();
        let floor = encode(10.0, 10.0, 5, "floor_level").unwrap();
        assert_ne!(ground, floor);
        assert_eq!(ground[..CODE_LENGTH - 1], floor[..CODE_LENGTH - 1]);
    }

    #[test]
    fn test_geo_point_encode() {
        let point = GeoPoint::ground_level(48.8584, 2.2945).unwrap();
        assert_eq!(point.elevation(), 0);
        assert_eq!(point.elevation_type(), ElevationType::GroundLevel);

        let encoded = point.encode();
        assert_eq!(
            encoded.as_str(),
            encode(48.8584, 2.2945, 0, "ground_level").unwrap()
        );
        assert_eq!(encoded.decode().cell(), point.cell());
    }

    #[test]
    fn test_encoded_point_parse_canonicalizes() {
        let code = encode(-41.2865, 174.7762, 12, "sea_level").unwrap();
        let parsed: EncodedPoint = code.to_lowercase().parse().unwrap();
        assert_eq!(parsed.as_str(), code);
        assert_eq!(parsed.to_string(), code);
        assert_eq!(parsed, code.parse::<EncodedPoint>().unwrap());
    }

    #[test]
    fn test_encoded_point_parse_invalid() {
        let err = "not a code".parse::<EncodedPoint>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedCode);
    }

    #[test]
    fn test_geo_point_new_validates() {
        assert!(GeoPoint::new(0.0, 0.0, 0, ElevationType::SeaLevel).is_ok());
        let err = GeoPoint::new(0.0, 181.0, 0, ElevationType::SeaLevel).unwrap_err();
        assert!(err.to_string().contains("longitude"));
        let err = GeoPoint::new(0.0, 0.0, 20_000, ElevationType::SeaLevel).unwrap_err();
        assert!(err.to_string().contains("elevation"));
    }
}
