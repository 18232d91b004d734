/// Errors raised by the TLV layer: BER length decoding and the
/// INTEGER/BOOLEAN primitive parsers.
///
/// Truncated input is *not* an error at this layer — [`crate::read_tlv`]
/// reports it as [`crate::TlvRead::NeedMore`] so a streaming caller can
/// resume once more bytes arrive. Everything here is a hard malformation
/// that no amount of further input can repair.
#[derive(Debug, thiserror::Error)]
pub enum TlvError {
    /// The length octet was `0x80`, the indefinite form. LDAP profiles BER
    /// to definite lengths only (RFC 4511 §5.1).
    #[error("indefinite length form is not allowed")]
    IndefiniteLength,

    /// A long-form length used more than 4 octets or encoded a value above
    /// `i32::MAX`.
    #[error("length encoding overflows: {octets} length octets")]
    LengthOverflow { octets: usize },

    /// A BOOLEAN value was not exactly one octet long.
    #[error("malformed BOOLEAN: expected 1 value octet, got {length}")]
    MalformedBoolean { length: usize },

    /// An INTEGER/ENUMERATED value was empty or longer than 4 octets.
    #[error("malformed INTEGER: {length} value octets (expected 1-4)")]
    MalformedInteger { length: usize },

    /// An INTEGER/ENUMERATED decoded cleanly but fell outside the range
    /// the caller allows for the field.
    #[error("integer value {value} out of range [{min}, {max}]")]
    IntegerOutOfRange { value: i64, min: i64, max: i64 },
}
