//! Parsers for the BER primitive values the LDAP grammars use.
//!
//! These operate on the *value* window of an already-read TLV. They are
//! deliberately strict: LDAP integers fit 4 octets, booleans are exactly
//! one octet, and every caller states the range it accepts so an
//! out-of-range value names itself instead of surfacing downstream.

use crate::error::TlvError;

/// Parse a BER INTEGER value (two's complement, big-endian, 1-4 octets)
/// and check it against `[min, max]`.
///
/// # Errors
///
/// - [`TlvError::MalformedInteger`] when the value is empty or longer
///   than 4 octets.
/// - [`TlvError::IntegerOutOfRange`] when the decoded value falls outside
///   the caller's range.
pub fn parse_integer(value: &[u8], min: i64, max: i64) -> Result<i64, TlvError> {
    if value.is_empty() || value.len() > 4 {
        return Err(TlvError::MalformedInteger {
            length: value.len(),
        });
    }

    // Sign-extend from the first octet's high bit.
    let mut result: i64 = if value[0] & 0x80 != 0 { -1 } else { 0 };
    for &b in value {
        result = (result << 8) | i64::from(b);
    }

    if result < min || result > max {
        return Err(TlvError::IntegerOutOfRange {
            value: result,
            min,
            max,
        });
    }
    Ok(result)
}

/// Parse a BER ENUMERATED value. Same encoding rules as INTEGER.
///
/// # Errors
///
/// See [`parse_integer`].
pub fn parse_enumerated(value: &[u8], min: i64, max: i64) -> Result<i64, TlvError> {
    parse_integer(value, min, max)
}

/// Parse a BER BOOLEAN value.
///
/// BER (unlike DER) accepts any nonzero octet as true; zero is false.
///
/// # Errors
///
/// [`TlvError::MalformedBoolean`] when the value is not exactly one octet.
pub fn parse_boolean(value: &[u8]) -> Result<bool, TlvError> {
    match value {
        [b] => Ok(*b != 0),
        _ => Err(TlvError::MalformedBoolean {
            length: value.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: (i64, i64) = (i64::MIN, i64::MAX);

    #[test]
    fn integer_single_octet() {
        assert_eq!(parse_integer(&[0x00], FULL.0, FULL.1).unwrap(), 0);
        assert_eq!(parse_integer(&[0x7F], FULL.0, FULL.1).unwrap(), 127);
        assert_eq!(parse_integer(&[0xFF], FULL.0, FULL.1).unwrap(), -1);
        assert_eq!(parse_integer(&[0x80], FULL.0, FULL.1).unwrap(), -128);
    }

    #[test]
    fn integer_multi_octet() {
        assert_eq!(parse_integer(&[0x01, 0x00], FULL.0, FULL.1).unwrap(), 256);
        assert_eq!(
            parse_integer(&[0x7F, 0xFF, 0xFF, 0xFF], FULL.0, FULL.1).unwrap(),
            i64::from(i32::MAX)
        );
        assert_eq!(
            parse_integer(&[0x80, 0x00, 0x00, 0x00], FULL.0, FULL.1).unwrap(),
            i64::from(i32::MIN)
        );
    }

    #[test]
    fn integer_rejects_empty_and_oversized() {
        assert!(matches!(
            parse_integer(&[], FULL.0, FULL.1),
            Err(TlvError::MalformedInteger { length: 0 })
        ));
        assert!(matches!(
            parse_integer(&[0; 5], FULL.0, FULL.1),
            Err(TlvError::MalformedInteger { length: 5 })
        ));
    }

    #[test]
    fn integer_range_check() {
        assert_eq!(parse_integer(&[0x0F], 1, 15).unwrap(), 15);
        assert!(matches!(
            parse_integer(&[0x10], 1, 15),
            Err(TlvError::IntegerOutOfRange {
                value: 16,
                min: 1,
                max: 15
            })
        ));
        assert!(matches!(
            parse_integer(&[0x00], 1, 15),
            Err(TlvError::IntegerOutOfRange { value: 0, .. })
        ));
    }

    #[test]
    fn boolean_values() {
        assert!(!parse_boolean(&[0x00]).unwrap());
        assert!(parse_boolean(&[0xFF]).unwrap());
        // BER: any nonzero octet is true.
        assert!(parse_boolean(&[0x01]).unwrap());
    }

    #[test]
    fn boolean_rejects_wrong_width() {
        assert!(matches!(
            parse_boolean(&[]),
            Err(TlvError::MalformedBoolean { length: 0 })
        ));
        assert!(matches!(
            parse_boolean(&[0x00, 0x01]),
            Err(TlvError::MalformedBoolean { length: 2 })
        ));
    }
}
