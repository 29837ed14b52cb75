//! Error types for the NLI codec.

use thiserror::Error;

/// Reasons a string is rejected as a point code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedCode {
    /// The code does not have exactly [`CODE_LENGTH`](crate::CODE_LENGTH) symbols.
    #[error("expected {expected} characters, got {actual}")]
    Length { expected: usize, actual: usize },

    /// A character outside the code alphabet.
    #[error("invalid character {character:?} at position {position}")]
    Character { position: usize, character: char },

    /// The elevation type field holds a tag with no assigned elevation type.
    #[error("unassigned elevation type tag {tag} in symbol at position {position}")]
    ElevationTypeTag { position: usize, tag: u8 },
}

/// Errors that can occur when encoding or decoding points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NliError {
    /// A numeric input is outside its declared domain.
    #[error("{field} out of range: {value} (valid: {min} to {max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The elevation type name is not one of the known reference frames.
    #[error("Unknown elevation type: {name:?}")]
    UnknownElevationType { name: String },

    /// The string passed to decode is not a valid point code.
    #[error("Malformed code: {0}")]
    MalformedCode(#[from] MalformedCode),

    /// A GeoJSON geometry that cannot be represented as a single point.
    #[error("Unsupported geometry: {kind} (expected Point)")]
    UnsupportedGeometry { kind: String },
}

/// Coarse classification of an [`NliError`], for adapters that map errors
/// to responses without inspecting the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfRange,
    UnknownElevationType,
    MalformedCode,
    UnsupportedGeometry,
}

impl NliError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NliError::OutOfRange { .. } => ErrorKind::OutOfRange,
            NliError::UnknownElevationType { .. } => ErrorKind::UnknownElevationType,
            NliError::MalformedCode(_) => ErrorKind::MalformedCode,
            NliError::UnsupportedGeometry { .. } => ErrorKind::UnsupportedGeometry,
        }
    }

    pub(crate) fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        NliError::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }
}

/// Result type alias using [`NliError`].
pub type Result<T> = std::result::Result<T, NliError>;
