//! GeoJSON conversion for encoded points.
//!
//! Enable the `geojson` feature to use this module.
//!
//! Points are written as GeoJSON `Point` geometries in `[longitude, latitude,
//! elevation]` order, with the code and elevation type stored as the
//! `encoded_point` and `elevation_type` properties.
//!
//! # Example
//!
//! ```
//! use nli::geojson::{code_to_feature, ENCODED_POINT_PROPERTY};
//! use nli::encode;
//!
//! let code = encode(35.3606, 138.7274, 3776, "sea_level").unwrap();
//! let feature = code_to_feature(&code).unwrap();
//! assert_eq!(
//!     feature.property(ENCODED_POINT_PROPERTY).and_then(|v| v.as_str()),
//!     Some(code.as_str())
//! );
//! ```

use geojson::{Feature, Geometry, Value as GeoJsonValue};

use crate::elevation::ElevationType;
use crate::error::{NliError, Result};
use crate::point::{EncodedPoint, GeoPoint};
use crate::quantize::{ELEVATION_MAX, ELEVATION_MIN};

/// Property holding the point code.
pub const ENCODED_POINT_PROPERTY: &str = "encoded_point";

/// Property holding the elevation type name.
pub const ELEVATION_TYPE_PROPERTY: &str = "elevation_type";

fn geometry_kind(value: &GeoJsonValue) -> &'static str {
    match value {
        GeoJsonValue::Point(_) => "Point",
        GeoJsonValue::MultiPoint(_) => "MultiPoint",
        GeoJsonValue::LineString(_) => "LineString",
        GeoJsonValue::MultiLineString(_) => "MultiLineString",
        GeoJsonValue::Polygon(_) => "Polygon",
        GeoJsonValue::MultiPolygon(_) => "MultiPolygon",
        GeoJsonValue::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Build a `Point` feature for a point, including its code.
pub fn point_to_feature(point: &GeoPoint) -> Feature {
    let geometry = Geometry::new(GeoJsonValue::Point(vec![
        point.longitude(),
        point.latitude(),
        point.elevation() as f64,
    ]));
    let mut feature = Feature::from(geometry);
    feature.set_property(ENCODED_POINT_PROPERTY, point.encode().into_string());
    feature.set_property(ELEVATION_TYPE_PROPERTY, point.elevation_type().as_str());
    feature
}

/// Decode a code into a `Point` feature at the center of its cell.
///
/// # Errors
///
/// Returns [`NliError::MalformedCode`] if the code is invalid.
pub fn code_to_feature(code: &str) -> Result<Feature> {
    let encoded: EncodedPoint = code.parse()?;
    Ok(point_to_feature(&encoded.decode()))
}

/// Read a point from a `Point` geometry.
///
/// A third coordinate is taken as the elevation in meters and rounded to the
/// nearest meter; without one the elevation is 0.
///
/// # Errors
///
/// - [`NliError::UnsupportedGeometry`] for anything but a 2D or 3D `Point`
/// - [`NliError::OutOfRange`] if a coordinate is outside its range
pub fn point_from_geometry(geometry: &Geometry, elevation_type: ElevationType) -> Result<GeoPoint> {
    let coords = match &geometry.value {
        GeoJsonValue::Point(coords) if (2..=3).contains(&coords.len()) => coords,
        GeoJsonValue::Point(coords) => {
            return Err(NliError::UnsupportedGeometry {
                kind: format!("Point with {} coordinates", coords.len()),
            })
        }
        other => {
            return Err(NliError::UnsupportedGeometry {
                kind: geometry_kind(other).to_string(),
            })
        }
    };

    let elevation = match coords.get(2) {
        Some(&z) => {
            let rounded = z.round();
            if !(ELEVATION_MIN as f64..=ELEVATION_MAX as f64).contains(&rounded) {
                return Err(NliError::out_of_range(
                    "elevation",
                    z,
                    ELEVATION_MIN as f64,
                    ELEVATION_MAX as f64,
                ));
            }
            rounded as i32
        }
        None => 0,
    };

    GeoPoint::new(coords[1], coords[0], elevation, elevation_type)
}

/// Encode a `Point` feature in place, setting its `encoded_point` property.
///
/// The elevation type comes from the feature's `elevation_type` property when
/// present, otherwise `default_type` is used.
///
/// # Errors
///
/// - [`NliError::UnsupportedGeometry`] if the feature has no `Point` geometry
/// - [`NliError::UnknownElevationType`] if the `elevation_type` property is
///   not a known name
/// - [`NliError::OutOfRange`] if a coordinate is outside its range
pub fn encode_feature(feature: &mut Feature, default_type: ElevationType) -> Result<EncodedPoint> {
    let elevation_type = match feature.property(ELEVATION_TYPE_PROPERTY) {
        Some(value) => match value.as_str() {
            Some(name) => name.parse()?,
            None => {
                return Err(NliError::UnknownElevationType {
                    name: value.to_string(),
                })
            }
        },
        None => default_type,
    };

    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| NliError::UnsupportedGeometry {
            kind: "null".to_string(),
        })?;
    let encoded = point_from_geometry(geometry, elevation_type)?.encode();

    feature.set_property(ENCODED_POINT_PROPERTY, encoded.as_str());
    feature.set_property(ELEVATION_TYPE_PROPERTY, elevation_type.as_str());
    Ok(encoded)
}
