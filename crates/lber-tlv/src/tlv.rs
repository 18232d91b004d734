use crate::error::TlvError;
use crate::tag::is_constructed;

/// Maximum number of length octets in a long-form length.
///
/// BER allows up to 126, but LDAP lengths must fit a 32-bit signed
/// integer, so anything beyond 4 octets cannot be valid.
const MAX_LENGTH_OCTETS: usize = 4;

/// One Tag-Length-Value unit, borrowed from the input buffer.
///
/// ```text
/// ┌───────┬────────────────┬──────────────────────────┐
/// │ tag   │ length         │ value                    │
/// │ 1 B   │ 1 B short form │ `length` bytes           │
/// │       │ 2-5 B long form│ (empty for constructed)  │
/// └───────┴────────────────┴──────────────────────────┘
/// ```
///
/// For a primitive tag, `value` is a zero-copy window over exactly
/// `length` bytes of the source buffer. For a constructed tag the window
/// is empty: the value bytes are themselves TLVs and the caller descends
/// into them instead of skipping past.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tlv<'a> {
    /// The tag byte. Multi-byte tags are out of scope for LDAP.
    pub tag: u8,

    /// Declared value length in bytes.
    pub length: usize,

    /// The value window. Empty both for constructed tags and for a
    /// primitive with `length == 0` — callers that care about the
    /// difference check [`Tlv::length`] and the constructed bit.
    pub value: &'a [u8],
}

impl Tlv<'_> {
    /// Returns true when this TLV's value contains nested TLVs.
    #[must_use]
    pub fn is_constructed(&self) -> bool {
        is_constructed(self.tag)
    }
}

/// Outcome of [`read_tlv`].
///
/// Truncation is a routine, expected outcome in a streaming decoder, so
/// it is a variant rather than an error: the caller keeps its unconsumed
/// bytes and retries once more input arrives. `read_tlv` itself holds no
/// partial state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TlvRead<'a> {
    /// A full TLV header (and, for primitives, its value) was available.
    Complete {
        tlv: Tlv<'a>,
        /// Bytes occupied by the tag and length octets.
        header_len: usize,
        /// Total bytes consumed: `header_len` for a constructed tag
        /// (the caller descends into the value), `header_len + length`
        /// for a primitive.
        consumed: usize,
    },

    /// The buffer ended mid-header or mid-value.
    NeedMore,
}

/// Read one TLV from the front of `buf`.
///
/// # Errors
///
/// - [`TlvError::IndefiniteLength`] for the reserved `0x80` length octet.
/// - [`TlvError::LengthOverflow`] when a long-form length uses more than
///   4 octets or encodes a value above `i32::MAX`.
///
/// A short buffer is not an error — see [`TlvRead::NeedMore`].
pub fn read_tlv(buf: &[u8]) -> Result<TlvRead<'_>, TlvError> {
    let Some(&tag) = buf.first() else {
        return Ok(TlvRead::NeedMore);
    };

    let Some(&first_len) = buf.get(1) else {
        return Ok(TlvRead::NeedMore);
    };

    let (length, header_len) = if first_len & 0x80 == 0 {
        // Short form: the octet itself is the length.
        (usize::from(first_len), 2)
    } else {
        let octets = usize::from(first_len & 0x7F);
        if octets == 0 {
            return Err(TlvError::IndefiniteLength);
        }
        if octets > MAX_LENGTH_OCTETS {
            return Err(TlvError::LengthOverflow { octets });
        }
        let Some(len_bytes) = buf.get(2..2 + octets) else {
            return Ok(TlvRead::NeedMore);
        };

        let mut length: u64 = 0;
        for &b in len_bytes {
            length = (length << 8) | u64::from(b);
        }
        if length > i64::from(i32::MAX) as u64 {
            return Err(TlvError::LengthOverflow { octets });
        }

        #[allow(clippy::cast_possible_truncation)]
        (length as usize, 2 + octets)
    };

    if is_constructed(tag) {
        // The value bytes are nested TLVs; do not require them here.
        return Ok(TlvRead::Complete {
            tlv: Tlv {
                tag,
                length,
                value: &[],
            },
            header_len,
            consumed: header_len,
        });
    }

    let Some(value) = buf.get(header_len..header_len + length) else {
        return Ok(TlvRead::NeedMore);
    };

    Ok(TlvRead::Complete {
        tlv: Tlv { tag, length, value },
        header_len,
        consumed: header_len + length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::write_tlv;
    use crate::tag::universal;

    /// Helper: read a TLV and unwrap the `Complete` variant.
    fn read_complete(buf: &[u8]) -> (Tlv<'_>, usize, usize) {
        match read_tlv(buf).unwrap() {
            TlvRead::Complete {
                tlv,
                header_len,
                consumed,
            } => (tlv, header_len, consumed),
            TlvRead::NeedMore => panic!("expected Complete for {buf:02x?}"),
        }
    }

    #[test]
    fn short_form_consumes_tag_length_value() {
        // Every short-form length L: 1 tag + 1 length + L value bytes.
        for len in [0usize, 1, 5, 127] {
            let mut buf = vec![universal::OCTET_STRING, len as u8];
            buf.extend(std::iter::repeat_n(0xAB, len));

            let (tlv, header_len, consumed) = read_complete(&buf);
            assert_eq!(tlv.tag, universal::OCTET_STRING);
            assert_eq!(tlv.length, len);
            assert_eq!(header_len, 2);
            assert_eq!(consumed, 2 + len, "wrong consumed for length {len}");
        }
    }

    #[test]
    fn long_form_roundtrip() {
        for len in [128usize, 255, 256, 65_535, 65_536] {
            let mut buf = Vec::new();
            write_tlv(&mut buf, universal::OCTET_STRING, &vec![0x5A; len]);

            let (tlv, _, consumed) = read_complete(&buf);
            assert_eq!(tlv.length, len);
            assert_eq!(tlv.value, &vec![0x5A; len][..]);
            assert_eq!(consumed, buf.len());
        }
    }

    #[test]
    fn zero_length_value_is_valid() {
        let buf = [universal::OCTET_STRING, 0x00];
        let (tlv, _, consumed) = read_complete(&buf);
        assert_eq!(tlv.length, 0);
        assert!(tlv.value.is_empty());
        assert_eq!(consumed, 2);
    }

    #[test]
    fn constructed_consumes_header_only() {
        // SEQUENCE of length 5: the 5 value bytes stay in the buffer for
        // the caller to descend into.
        let buf = [universal::SEQUENCE, 0x05, 0x02, 0x01, 0x07, 0x01, 0x00];
        let (tlv, header_len, consumed) = read_complete(&buf);
        assert!(tlv.is_constructed());
        assert_eq!(tlv.length, 5);
        assert!(tlv.value.is_empty());
        assert_eq!(consumed, header_len);
    }

    #[test]
    fn truncation_yields_need_more_at_every_boundary() {
        let mut full = vec![universal::OCTET_STRING];
        full.push(0x82); // long form, 2 length octets
        full.extend_from_slice(&[0x00, 0x80]);
        full.extend(std::iter::repeat_n(0x11, 128));

        for cut in 0..full.len() {
            let result = read_tlv(&full[..cut]).unwrap();
            assert_eq!(result, TlvRead::NeedMore, "cut at {cut} did not suspend");
        }
        // The full buffer completes.
        let (tlv, _, consumed) = read_complete(&full);
        assert_eq!(tlv.length, 128);
        assert_eq!(consumed, full.len());
    }

    #[test]
    fn need_more_mid_long_form_length() {
        // Claims 4 length octets but only 2 are present.
        let buf = [universal::OCTET_STRING, 0x84, 0x00, 0x00];
        assert_eq!(read_tlv(&buf).unwrap(), TlvRead::NeedMore);
    }

    #[test]
    fn rejects_indefinite_length() {
        let buf = [universal::SEQUENCE, 0x80];
        assert!(matches!(read_tlv(&buf), Err(TlvError::IndefiniteLength)));
    }

    #[test]
    fn rejects_length_overflow() {
        // 5 length octets can never fit an i32.
        let buf = [universal::OCTET_STRING, 0x85, 0x01, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(
            read_tlv(&buf),
            Err(TlvError::LengthOverflow { octets: 5 })
        ));

        // 4 octets encoding a value above i32::MAX.
        let buf = [universal::OCTET_STRING, 0x84, 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(matches!(
            read_tlv(&buf),
            Err(TlvError::LengthOverflow { octets: 4 })
        ));
    }

    #[test]
    fn trailing_bytes_are_left_alone() {
        let buf = [universal::BOOLEAN, 0x01, 0xFF, 0xDE, 0xAD];
        let (tlv, _, consumed) = read_complete(&buf);
        assert_eq!(tlv.value, &[0xFF]);
        assert_eq!(consumed, 3);
    }
}
