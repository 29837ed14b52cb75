//! Python bindings for the nli point codec.

#![allow(clippy::useless_conversion)]

use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

// Use fully qualified path to avoid collision with the Python module name
use ::nli as nli_lib;
use nli_lib::{ErrorKind, NliError};

create_exception!(
    nli_python,
    OutOfRangeError,
    PyValueError,
    "A numeric input is outside its valid range."
);
create_exception!(
    nli_python,
    UnknownElevationTypeError,
    PyValueError,
    "The elevation type is not a known reference frame."
);
create_exception!(
    nli_python,
    MalformedCodeError,
    PyValueError,
    "The string is not a valid point code."
);

fn to_py_err(err: NliError) -> PyErr {
    let msg = err.to_string();
    match err.kind() {
        ErrorKind::OutOfRange => OutOfRangeError::new_err(msg),
        ErrorKind::UnknownElevationType => UnknownElevationTypeError::new_err(msg),
        ErrorKind::MalformedCode => MalformedCodeError::new_err(msg),
        ErrorKind::UnsupportedGeometry => PyValueError::new_err(msg),
    }
}

/// Encode a point into a fixed-length code.
///
/// Args:
///     latitude: Latitude in decimal degrees (-90 to 90).
///     longitude: Longitude in decimal degrees (-180 to 180).
///     elevation: Elevation in meters (ELEVATION_MIN to ELEVATION_MAX).
///     elevation_type: Reference frame, one of ELEVATION_TYPES.
///
/// Returns:
///     The point code, CODE_LENGTH uppercase characters.
///
/// Raises:
///     OutOfRangeError: If a numeric input is outside its range.
///     UnknownElevationTypeError: If elevation_type is not recognized.
///
/// Example:
///     >>> encode_point(latitude=35.3606, longitude=138.7274, elevation=3776,
///     ...              elevation_type="sea_level")
#[pyfunction]
#[pyo3(signature = (latitude, longitude, elevation, elevation_type))]
fn encode_point(
    latitude: f64,
    longitude: f64,
    elevation: i32,
    elevation_type: &str,
) -> PyResult<String> {
    nli_lib::encode(latitude, longitude, elevation, elevation_type).map_err(to_py_err)
}

/// Decode a point code.
///
/// Args:
///     encoded_val: Code produced by encode_point (case-insensitive).
///
/// Returns:
///     Tuple of (latitude, longitude, elevation, elevation_type). Latitude and
///     longitude are the center of the encoded cell.
///
/// Raises:
///     MalformedCodeError: If the code has the wrong length or an invalid character.
///
/// Example:
///     >>> latitude, longitude, elevation, elevation_type = decode_point(encoded_val=code)
#[pyfunction]
#[pyo3(signature = (encoded_val))]
fn decode_point(encoded_val: &str) -> PyResult<(f64, f64, i32, &'static str)> {
    let (latitude, longitude, elevation, elevation_type) =
        nli_lib::decode(encoded_val).map_err(to_py_err)?;
    Ok((latitude, longitude, elevation, elevation_type.as_str()))
}

/// NLI - Point code library.
///
/// Converts latitude, longitude, elevation and an elevation reference type
/// into a short, fixed-length code and back.
///
/// Example:
///     >>> from nli_python import encode_point, decode_point
///     >>> code = encode_point(latitude=35.3606, longitude=138.7274,
///     ...                     elevation=3776, elevation_type="sea_level")
///     >>> decode_point(encoded_val=code)
#[pymodule]
fn nli_python(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(encode_point, m)?)?;
    m.add_function(wrap_pyfunction!(decode_point, m)?)?;
    m.add("OutOfRangeError", m.py().get_type_bound::<OutOfRangeError>())?;
    m.add(
        "UnknownElevationTypeError",
        m.py().get_type_bound::<UnknownElevationTypeError>(),
    )?;
    m.add(
        "MalformedCodeError",
        m.py().get_type_bound::<MalformedCodeError>(),
    )?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("CODE_LENGTH", nli_lib::CODE_LENGTH)?;
    m.add("ELEVATION_MIN", nli_lib::ELEVATION_MIN)?;
    m.add("ELEVATION_MAX", nli_lib::ELEVATION_MAX)?;
    m.add(
        "ELEVATION_TYPES",
        nli_lib::ElevationType::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>(),
    )?;
    Ok(())
}
