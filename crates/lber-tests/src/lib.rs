#![warn(clippy::pedantic)]

//! PDU fixture builders for the integration tests and benchmarks.
//!
//! These build syntactically exact LDAPMessage encodings from scratch so
//! the tests never depend on the decoder's own encode path (the control
//! envelope aside, the workspace has none).

use lber_controls::Control;
use lber_tlv::encode::{write_boolean, write_enumerated, write_integer, write_tlv};

/// Wrap `payload` in a TLV with the given tag.
#[must_use]
pub fn wrap(tag: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 6);
    write_tlv(&mut out, tag, payload);
    out
}

/// Wrap a protocolOp (and optional extra sections, e.g. controls) in the
/// LDAPMessage envelope.
#[must_use]
pub fn message(message_id: i64, op: &[u8], trailer: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    write_integer(&mut body, message_id);
    body.extend_from_slice(op);
    body.extend_from_slice(trailer);
    wrap(0x30, &body)
}

/// Encode a controls section (`[0]` constructed) from already-encoded
/// controls.
#[must_use]
pub fn controls_section(controls: &[Control]) -> Vec<u8> {
    let mut payload = Vec::new();
    for control in controls {
        control.encode(&mut payload);
    }
    wrap(0xA0, &payload)
}

/// A simple bind request PDU.
#[must_use]
pub fn simple_bind(message_id: i64, dn: &str, password: &[u8]) -> Vec<u8> {
    let mut bind = Vec::new();
    write_integer(&mut bind, 3);
    write_tlv(&mut bind, 0x04, dn.as_bytes());
    write_tlv(&mut bind, 0x80, password);
    message(message_id, &wrap(0x60, &bind), &[])
}

/// A SASL bind request PDU.
#[must_use]
pub fn sasl_bind(message_id: i64, dn: &str, mechanism: &str, credentials: Option<&[u8]>) -> Vec<u8> {
    let mut sasl = Vec::new();
    write_tlv(&mut sasl, 0x04, mechanism.as_bytes());
    if let Some(credentials) = credentials {
        write_tlv(&mut sasl, 0x04, credentials);
    }

    let mut bind = Vec::new();
    write_integer(&mut bind, 3);
    write_tlv(&mut bind, 0x04, dn.as_bytes());
    bind.extend(wrap(0xA3, &sasl));
    message(message_id, &wrap(0x60, &bind), &[])
}

/// An unbind request PDU.
#[must_use]
pub fn unbind(message_id: i64) -> Vec<u8> {
    message(message_id, &wrap(0x42, &[]), &[])
}

/// A search request PDU. `filter` is an already-encoded filter element;
/// see [`filters`].
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn search_request(
    message_id: i64,
    base: &str,
    scope: i64,
    deref: i64,
    size_limit: i64,
    time_limit: i64,
    types_only: bool,
    filter: &[u8],
    attributes: &[&str],
) -> Vec<u8> {
    let mut request = Vec::new();
    write_tlv(&mut request, 0x04, base.as_bytes());
    write_enumerated(&mut request, scope);
    write_enumerated(&mut request, deref);
    write_integer(&mut request, size_limit);
    write_integer(&mut request, time_limit);
    write_boolean(&mut request, types_only);
    request.extend_from_slice(filter);

    let mut attrs = Vec::new();
    for attribute in attributes {
        write_tlv(&mut attrs, 0x04, attribute.as_bytes());
    }
    request.extend(wrap(0x30, &attrs));

    message(message_id, &wrap(0x63, &request), &[])
}

/// A search result entry PDU. Each attribute is `(type, values)`.
#[must_use]
pub fn search_entry(message_id: i64, dn: &str, attributes: &[(&str, &[&[u8]])]) -> Vec<u8> {
    let mut attrs = Vec::new();
    for (attr_type, values) in attributes {
        let mut vals = Vec::new();
        for value in *values {
            write_tlv(&mut vals, 0x04, value);
        }
        let mut attr = Vec::new();
        write_tlv(&mut attr, 0x04, attr_type.as_bytes());
        attr.extend(wrap(0x31, &vals));
        attrs.extend(wrap(0x30, &attr));
    }

    let mut entry = Vec::new();
    write_tlv(&mut entry, 0x04, dn.as_bytes());
    entry.extend(wrap(0x30, &attrs));
    message(message_id, &wrap(0x64, &entry), &[])
}

/// The LDAPResult body shared by bind response (`0x61`) and search
/// result done (`0x65`).
#[must_use]
pub fn result_op(
    tag: u8,
    result_code: i64,
    matched_dn: &str,
    diagnostic: &str,
    referrals: &[&str],
) -> Vec<u8> {
    let mut body = Vec::new();
    write_enumerated(&mut body, result_code);
    write_tlv(&mut body, 0x04, matched_dn.as_bytes());
    write_tlv(&mut body, 0x04, diagnostic.as_bytes());
    if !referrals.is_empty() {
        let mut uris = Vec::new();
        for referral in referrals {
            write_tlv(&mut uris, 0x04, referral.as_bytes());
        }
        body.extend(wrap(0xA3, &uris));
    }
    wrap(tag, &body)
}

/// Filter element encoders.
pub mod filters {
    use super::wrap;
    use lber_tlv::encode::write_tlv;

    #[must_use]
    pub fn equality(attribute: &str, value: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        write_tlv(&mut body, 0x04, attribute.as_bytes());
        write_tlv(&mut body, 0x04, value);
        wrap(0xA3, &body)
    }

    #[must_use]
    pub fn present(attribute: &str) -> Vec<u8> {
        wrap(0x87, attribute.as_bytes())
    }

    #[must_use]
    pub fn and(children: &[Vec<u8>]) -> Vec<u8> {
        wrap(0xA0, &children.concat())
    }

    #[must_use]
    pub fn or(children: &[Vec<u8>]) -> Vec<u8> {
        wrap(0xA1, &children.concat())
    }

    #[must_use]
    pub fn not(child: &[u8]) -> Vec<u8> {
        wrap(0xA2, child)
    }
}
