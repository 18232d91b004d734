//! OID → value-decoder registry.
//!
//! The message grammar consults this when it reads a control value: a
//! registered OID gets its bytes decoded into a typed [`ControlValue`],
//! everything else stays [`ControlValue::Raw`].

use lber_grammar::DecodeError;

use crate::control::ControlValue;
use crate::{entry_change, oid, persistent_search};

/// Decodes the value bytes of one control type.
pub type ValueDecoder = fn(&[u8]) -> Result<ControlValue, DecodeError>;

/// Look up the value decoder for a control OID.
///
/// Controls with no value structure (ManageDsaIT, Cascade) are
/// deliberately unregistered.
#[must_use]
pub fn value_decoder(control_oid: &str) -> Option<ValueDecoder> {
    match control_oid {
        oid::PERSISTENT_SEARCH => Some(persistent_search::decode_value),
        oid::ENTRY_CHANGE => Some(entry_change::decode_value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_oids_resolve() {
        assert!(value_decoder(oid::PERSISTENT_SEARCH).is_some());
        assert!(value_decoder(oid::ENTRY_CHANGE).is_some());
    }

    #[test]
    fn valueless_and_unknown_oids_do_not() {
        assert!(value_decoder(oid::MANAGE_DSA_IT).is_none());
        assert!(value_decoder(oid::CASCADE).is_none());
        assert!(value_decoder("1.2.840.113556.1.4.319").is_none());
    }
}
