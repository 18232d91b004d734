//! Field-level readers used by grammar actions.
//!
//! Thin wrappers over the TLV primitive parsers that attach the field
//! name to every failure, so an out-of-range `sizeLimit` reports itself
//! as `sizeLimit` rather than as an anonymous integer.

use lber_tlv::primitives::{parse_boolean, parse_enumerated, parse_integer};
use lber_tlv::{Tlv, TlvError};

use crate::error::DecodeError;

/// Read an INTEGER field, checking it against `[min, max]`.
///
/// # Errors
///
/// - [`DecodeError::OutOfRange`] when the value decodes but falls
///   outside the field's range.
/// - [`DecodeError::BadPrimitive`] for a malformed encoding.
pub fn read_integer(
    tlv: &Tlv<'_>,
    field: &'static str,
    min: i64,
    max: i64,
) -> Result<i64, DecodeError> {
    parse_integer(tlv.value, min, max).map_err(|source| named(field, source))
}

/// Read an ENUMERATED field. Same encoding and errors as [`read_integer`].
///
/// # Errors
///
/// See [`read_integer`].
pub fn read_enumerated(
    tlv: &Tlv<'_>,
    field: &'static str,
    min: i64,
    max: i64,
) -> Result<i64, DecodeError> {
    parse_enumerated(tlv.value, min, max).map_err(|source| named(field, source))
}

/// Read a BOOLEAN field.
///
/// # Errors
///
/// [`DecodeError::BadPrimitive`] when the value is not exactly one octet.
pub fn read_boolean(tlv: &Tlv<'_>, field: &'static str) -> Result<bool, DecodeError> {
    parse_boolean(tlv.value).map_err(|source| named(field, source))
}

fn named(field: &'static str, source: TlvError) -> DecodeError {
    match source {
        TlvError::IntegerOutOfRange { value, min, max } => DecodeError::OutOfRange {
            field,
            value,
            min,
            max,
        },
        other => DecodeError::BadPrimitive {
            field,
            source: other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(tag: u8, value: &[u8]) -> Tlv<'_> {
        Tlv {
            tag,
            length: value.len(),
            value,
        }
    }

    #[test]
    fn integer_in_range() {
        let tlv = prim(0x02, &[0x03]);
        assert_eq!(read_integer(&tlv, "version", 1, 127).unwrap(), 3);
    }

    #[test]
    fn out_of_range_names_the_field() {
        let tlv = prim(0x02, &[0x00]);
        let err = read_integer(&tlv, "version", 1, 127).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::OutOfRange {
                field: "version",
                value: 0,
                min: 1,
                max: 127,
            }
        ));
    }

    #[test]
    fn malformed_integer_names_the_field() {
        let tlv = prim(0x02, &[]);
        let err = read_integer(&tlv, "messageID", 0, i64::from(i32::MAX)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::BadPrimitive {
                field: "messageID",
                source: TlvError::MalformedInteger { length: 0 },
            }
        ));
    }

    #[test]
    fn enumerated_reads_like_integer() {
        let tlv = prim(0x0A, &[0x02]);
        assert_eq!(read_enumerated(&tlv, "scope", 0, 2).unwrap(), 2);
    }

    #[test]
    fn boolean_width_error_names_the_field() {
        let tlv = prim(0x01, &[0xFF, 0x00]);
        let err = read_boolean(&tlv, "criticality").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::BadPrimitive {
                field: "criticality",
                source: TlvError::MalformedBoolean { length: 2 },
            }
        ));
    }
}
