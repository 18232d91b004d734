//! Control OIDs and dotted-decimal syntax checking.

/// Persistent Search request control (draft-ietf-ldapext-psearch).
pub const PERSISTENT_SEARCH: &str = "2.16.840.1.113730.3.4.3";

/// Entry Change Notification response control (draft-ietf-ldapext-psearch).
pub const ENTRY_CHANGE: &str = "2.16.840.1.113730.3.4.7";

/// ManageDsaIT (RFC 3296). No control value.
pub const MANAGE_DSA_IT: &str = "2.16.840.1.113730.3.4.2";

/// ApacheDS replication cascade control. No control value.
pub const CASCADE: &str = "1.3.6.1.4.1.18060.0.0.1";

/// Check dotted-decimal OID syntax: at least two arcs, every arc a
/// decimal number without a superfluous leading zero.
#[must_use]
pub fn is_valid(oid: &str) -> bool {
    let mut arcs = 0;
    for arc in oid.split('.') {
        if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        if arc.len() > 1 && arc.starts_with('0') {
            return false;
        }
        arcs += 1;
    }
    arcs >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_oids_are_valid() {
        for oid in [PERSISTENT_SEARCH, ENTRY_CHANGE, MANAGE_DSA_IT, CASCADE] {
            assert!(is_valid(oid), "{oid}");
        }
    }

    #[test]
    fn rejects_bad_syntax() {
        for oid in ["", "1", "1.", ".1", "1..2", "1.2a", "1.02", "a.b"] {
            assert!(!is_valid(oid), "{oid:?} should be invalid");
        }
    }

    #[test]
    fn single_zero_arc_is_fine() {
        assert!(is_valid("0.9.2342.19200300.100.1.1"));
    }
}
