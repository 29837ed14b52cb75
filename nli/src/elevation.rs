//! Elevation reference frames.
//!
//! Every encoded point carries the frame its elevation is measured against.
//! The set is closed: each frame owns a fixed tag that is stored in the
//! trailing [`TYPE_BITS`] of a code, so tags must never be renumbered.

use std::fmt;
use std::str::FromStr;

use crate::error::{NliError, Result};

/// Number of bits reserved for the elevation type tag.
pub const TYPE_BITS: u32 = 5;

/// Reference frame against which an elevation is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ElevationType {
    /// Height above the local ground surface.
    #[default]
    GroundLevel,
    /// Height above mean sea level.
    SeaLevel,
    /// Height above the floor of the containing structure.
    FloorLevel,
    /// Height above the WGS84 reference ellipsoid.
    Ellipsoid,
}

impl ElevationType {
    /// All elevation types, in tag order.
    pub const ALL: [ElevationType; 4] = [
        ElevationType::GroundLevel,
        ElevationType::SeaLevel,
        ElevationType::FloorLevel,
        ElevationType::Ellipsoid,
    ];

    /// Returns the tag stored in encoded points.
    pub fn tag(self) -> u8 {
        match self {
            ElevationType::GroundLevel => 0,
            ElevationType::SeaLevel => 1,
            ElevationType::FloorLevel => 2,
            ElevationType::Ellipsoid => 3,
        }
    }

    /// Looks up the elevation type for a tag, or `None` if the tag is unassigned.
    ///
    /// # Examples
    ///
    /// ```
    /// use nli::ElevationType;
    ///
    /// assert_eq!(ElevationType::from_tag(1), Some(ElevationType::SeaLevel));
    /// assert_eq!(ElevationType::from_tag(31), None);
    /// ```
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Returns the snake_case name used on external interfaces.
    pub fn as_str(self) -> &'static str {
        match self {
            ElevationType::GroundLevel => "ground_level",
            ElevationType::SeaLevel => "sea_level",
            ElevationType::FloorLevel => "floor_level",
            ElevationType::Ellipsoid => "ellipsoid",
        }
    }
}

impl fmt::Display for ElevationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElevationType {
    type Err = NliError;

    /// Parses an exact snake_case name. Unknown names are rejected, never
    /// mapped to a default frame.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| NliError::UnknownElevationType {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_known_names() {
        assert_eq!(
            "ground_level".parse::<ElevationType>().unwrap(),
            ElevationType::GroundLevel
        );
        assert_eq!(
            "sea_level".parse::<ElevationType>().unwrap(),
            ElevationType::SeaLevel
        );
        assert_eq!(
            "floor_level".parse::<ElevationType>().unwrap(),
            ElevationType::FloorLevel
        );
        assert_eq!(
            "ellipsoid".parse::<ElevationType>().unwrap(),
            ElevationType::Ellipsoid
        );
    }

    #[test]
    fn test_parse_unknown_names() {
        for name in ["", "Ground_Level", "ground level", "roof_level", "sea"] {
            let err = name.parse::<ElevationType>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownElevationType);
        }
    }

    #[test]
    fn test_tags_are_unique_and_fit() {
        for (i, t) in ElevationType::ALL.iter().enumerate() {
            assert_eq!(t.tag() as usize, i);
            assert!(u32::from(t.tag()) < (1 << TYPE_BITS));
            assert_eq!(ElevationType::from_tag(t.tag()), Some(*t));
        }
        for tag in ElevationType::ALL.len() as u8..(1 << TYPE_BITS) {
            assert_eq!(ElevationType::from_tag(tag), None);
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for t in ElevationType::ALL {
            assert_eq!(t.to_string().parse::<ElevationType>().unwrap(), t);
        }
    }
}
