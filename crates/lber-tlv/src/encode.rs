//! BER write helpers.
//!
//! The decode side of this workspace is the interesting half; encoding
//! exists for the control envelope (controls advertise themselves on
//! requests) and for building test fixtures. Lengths always use the
//! shortest form BER permits.

use crate::tag::universal;

/// Number of bytes `write_length` will emit for `len`.
#[must_use]
pub fn length_len(len: usize) -> usize {
    if len < 0x80 {
        1
    } else {
        // One prefix octet plus the minimal big-endian octets of `len`.
        let bits = usize::BITS - len.leading_zeros();
        1 + bits.div_ceil(8) as usize
    }
}

/// Append a BER length (short or long form) to `out`.
pub fn write_length(out: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        #[allow(clippy::cast_possible_truncation)]
        out.push(len as u8);
        return;
    }

    let octets = length_len(len) - 1;
    #[allow(clippy::cast_possible_truncation)]
    out.push(0x80 | octets as u8);
    for i in (0..octets).rev() {
        #[allow(clippy::cast_possible_truncation)]
        out.push((len >> (8 * i)) as u8);
    }
}

/// Append a complete TLV with the given tag and value bytes.
pub fn write_tlv(out: &mut Vec<u8>, tag: u8, value: &[u8]) {
    out.push(tag);
    write_length(out, value.len());
    out.extend_from_slice(value);
}

/// Append a BER BOOLEAN (`0xFF` for true, `0x00` for false).
pub fn write_boolean(out: &mut Vec<u8>, value: bool) {
    write_tlv(out, universal::BOOLEAN, &[if value { 0xFF } else { 0x00 }]);
}

/// Append a BER INTEGER in minimal two's-complement form.
pub fn write_integer(out: &mut Vec<u8>, value: i64) {
    write_int_with_tag(out, universal::INTEGER, value);
}

/// Append a BER ENUMERATED in minimal two's-complement form.
pub fn write_enumerated(out: &mut Vec<u8>, value: i64) {
    write_int_with_tag(out, universal::ENUMERATED, value);
}

fn write_int_with_tag(out: &mut Vec<u8>, tag: u8, value: i64) {
    let bytes = value.to_be_bytes();

    // Strip redundant leading octets: 0x00 before a clear sign bit,
    // 0xFF before a set one. At least one octet always remains.
    let mut start = 0;
    while start < 7 {
        let lead = bytes[start];
        let next_high = bytes[start + 1] & 0x80;
        if (lead == 0x00 && next_high == 0) || (lead == 0xFF && next_high != 0) {
            start += 1;
        } else {
            break;
        }
    }
    write_tlv(out, tag, &bytes[start..]);
}
