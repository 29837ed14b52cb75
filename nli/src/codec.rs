//! Packing of quantized cells into fixed-length point codes.
//!
//! # Bit Layout
//!
//! A code holds 80 bits, most significant first:
//!
//! | Bits   | Width | Field                                            |
//! |--------|-------|--------------------------------------------------|
//! | 0-59   | 60    | Longitude and latitude buckets, interleaved      |
//! | 60-74  | 15    | Elevation bucket (meters above `ELEVATION_MIN`)  |
//! | 75-79  | 5     | Elevation type tag                               |
//!
//! Interleaving starts with the longitude bit, so even positions carry
//! longitude and odd positions carry latitude, as in geohash. Codes that
//! share a leading run of symbols therefore lie in the same horizontal cell
//! at the matching resolution.
//!
//! The bits are cut into groups of five and written with the Crockford
//! base-32 alphabet, which leaves out `I`, `L`, `O` and `U`. The alphabet is
//! in ascending ASCII order, so sorting codes as strings sorts them by their
//! interleaved value.

use crate::elevation::{ElevationType, TYPE_BITS};
use crate::error::{MalformedCode, Result};
use crate::quantize::{QuantizedCell, COORD_BITS, ELEVATION_BITS};

/// Symbols used in codes, indexed by their 5-bit value.
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Bits carried by one symbol.
pub const SYMBOL_BITS: u32 = 5;

/// Total bits in a code.
pub const TOTAL_BITS: u32 = 2 * COORD_BITS + ELEVATION_BITS + TYPE_BITS;

/// Number of symbols in every code.
pub const CODE_LENGTH: usize = (TOTAL_BITS / SYMBOL_BITS) as usize;

const _: () = assert!(TOTAL_BITS % SYMBOL_BITS == 0);
const _: () = assert!(TOTAL_BITS <= u128::BITS);

const INVALID: u8 = u8::MAX;

/// ASCII -> symbol value. Lowercase letters decode like their uppercase form.
const DECODE_TABLE: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        let c = ALPHABET[i];
        table[c as usize] = i as u8;
        table[c.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    table
};

/// Interleave two bucket indices, longitude bit first, most significant first.
pub(crate) fn interleave(lon: u32, lat: u32) -> u64 {
    let mut out = 0u64;
    for i in (0..COORD_BITS).rev() {
        out = (out << 2) | (u64::from((lon >> i) & 1) << 1) | u64::from((lat >> i) & 1);
    }
    out
}

/// Inverse of [`interleave`]: returns `(lon, lat)`.
pub(crate) fn deinterleave(bits: u64) -> (u32, u32) {
    let mut lon = 0u32;
    let mut lat = 0u32;
    for i in (0..COORD_BITS).rev() {
        let pair = (bits >> (2 * i)) & 0b11;
        lon = (lon << 1) | (pair >> 1) as u32;
        lat = (lat << 1) | (pair & 1) as u32;
    }
    (lon, lat)
}

fn symbol_value(c: char) -> Option<u8> {
    let v = *DECODE_TABLE.get(c as usize)?;
    (v != INVALID).then_some(v)
}

/// Pack a cell into its code.
///
/// The result is always [`CODE_LENGTH`] uppercase symbols, and distinct cells
/// always produce distinct codes.
///
/// # Examples
///
/// ```
/// use nli::codec::{pack, CODE_LENGTH};
/// use nli::quantize::QuantizedCell;
/// use nli::ElevationType;
///
/// let cell = QuantizedCell::new(0, 0, 0, ElevationType::GroundLevel).unwrap();
/// assert_eq!(pack(&cell), "0".repeat(CODE_LENGTH));
/// ```
pub fn pack(cell: &QuantizedCell) -> String {
    let value = (u128::from(interleave(cell.lon_bits(), cell.lat_bits()))
        << (ELEVATION_BITS + TYPE_BITS))
        | (u128::from(cell.elev_bits()) << TYPE_BITS)
        | u128::from(cell.elevation_type().tag());

    (0..CODE_LENGTH)
        .rev()
        .map(|i| {
            let index = (value >> (i as u32 * SYMBOL_BITS)) & 0b11111;
            ALPHABET[index as usize] as char
        })
        .collect()
}

/// Unpack a code into its cell.
///
/// Lowercase input is accepted.
///
/// # Errors
///
/// Returns [`NliError::MalformedCode`](crate::NliError::MalformedCode) with:
/// - [`MalformedCode::Length`] if the code is not [`CODE_LENGTH`] characters
/// - [`MalformedCode::Character`] for the first character outside the alphabet
/// - [`MalformedCode::ElevationTypeTag`] if the type tag is unassigned
pub fn unpack(code: &str) -> Result<QuantizedCell> {
    let actual = code.chars().count();
    if actual != CODE_LENGTH {
        return Err(MalformedCode::Length {
            expected: CODE_LENGTH,
            actual,
        }
        .into());
    }

    let mut value = 0u128;
    for (position, character) in code.chars().enumerate() {
        let v = symbol_value(character).ok_or(MalformedCode::Character {
            position,
            character,
        })?;
        value = (value << SYMBOL_BITS) | u128::from(v);
    }

    let tag = (value & ((1 << TYPE_BITS) - 1)) as u8;
    let elevation_type = ElevationType::from_tag(tag).ok_or(MalformedCode::ElevationTypeTag {
        position: CODE_LENGTH - 1,
        tag,
    })?;
    let elev_bits = ((value >> TYPE_BITS) & ((1 << ELEVATION_BITS) - 1)) as u16;
    let (lon_bits, lat_bits) = deinterleave((value >> (ELEVATION_BITS + TYPE_BITS)) as u64);

    Ok(QuantizedCell::from_parts_unchecked(
        lat_bits,
        lon_bits,
        elev_bits,
        elevation_type,
    ))
}

/// Number of leading symbols two codes have in common, ignoring case.
///
/// A longer shared prefix means the points fall in the same horizontal cell
/// at a finer resolution.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x.eq_ignore_ascii_case(y))
        .count()
}
