//! BER tag bytes for the LDAP subset.
//!
//! A BER tag byte packs three fields:
//!
//! ```text
//! ┌───────────┬─────────────┬──────────────┐
//! │ bits 7-6  │ bit 5       │ bits 4-0     │
//! │ class     │ constructed │ tag number   │
//! └───────────┴─────────────┴──────────────┘
//! ```
//!
//! LDAP never uses tag numbers above 30, so the multi-byte tag form
//! (number = 31) is out of scope and tags are always a single byte.

/// Constructed bit: set when the value bytes are themselves a TLV sequence.
pub const CONSTRUCTED: u8 = 0x20;

/// Returns true when the tag's value contains nested TLVs.
#[must_use]
pub fn is_constructed(tag: u8) -> bool {
    tag & CONSTRUCTED != 0
}

/// Universal-class tags used throughout the LDAP grammars.
pub mod universal {
    pub const BOOLEAN: u8 = 0x01;
    pub const INTEGER: u8 = 0x02;
    pub const OCTET_STRING: u8 = 0x04;
    pub const ENUMERATED: u8 = 0x0A;
    pub const SEQUENCE: u8 = 0x30;
    pub const SET: u8 = 0x31;
}

/// Application-class tags for the LDAP protocol ops (RFC 4511 §4.1.1).
pub mod application {
    pub const BIND_REQUEST: u8 = 0x60;
    pub const BIND_RESPONSE: u8 = 0x61;
    pub const UNBIND_REQUEST: u8 = 0x42;
    pub const SEARCH_REQUEST: u8 = 0x63;
    pub const SEARCH_RESULT_ENTRY: u8 = 0x64;
    pub const SEARCH_RESULT_DONE: u8 = 0x65;
}

/// Context-class tags used inside the ops.
pub mod context {
    /// Simple bind credentials: `[0]` primitive.
    pub const SIMPLE_CREDENTIALS: u8 = 0x80;
    /// SASL bind credentials: `[3]` constructed.
    pub const SASL_CREDENTIALS: u8 = 0xA3;
    /// The controls section of an LDAPMessage: `[0]` constructed.
    pub const CONTROLS: u8 = 0xA0;
    /// LDAPResult referral URI list: `[3]` constructed.
    pub const REFERRAL: u8 = 0xA3;

    /// Filter choice tags (RFC 4511 §4.5.1.7).
    pub const FILTER_AND: u8 = 0xA0;
    pub const FILTER_OR: u8 = 0xA1;
    pub const FILTER_NOT: u8 = 0xA2;
    pub const FILTER_EQUALITY: u8 = 0xA3;
    /// Present filter: `[7]` primitive, value is the attribute description.
    pub const FILTER_PRESENT: u8 = 0x87;
}
