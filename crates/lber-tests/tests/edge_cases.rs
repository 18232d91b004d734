//! Malformed and boundary-condition PDUs.
//!
//! Four categories:
//!
//! - **Structural**: truncation, trailing bytes, inconsistent nested
//!   lengths, the forbidden indefinite length form.
//! - **Grammar**: tags with no transition in the current state.
//! - **Range**: fields whose encoding is fine but whose value is not.
//! - **Referral quirks**: the deliberate asymmetry between unparsable
//!   URLs (fatal) and well-formed URLs on a non-referral result
//!   (sentinel substitution).

use lber_codec::LdapDecoder;
use lber_grammar::DecodeError;
use lber_messages::{Filter, LdapUrl, ResultCode};
use lber_tests::{filters, message, result_op, search_request, simple_bind, wrap};
use lber_tlv::encode::{write_enumerated, write_integer, write_tlv};

fn search_with_filter(filter: &[u8]) -> Vec<u8> {
    search_request(1, "dc=example,dc=com", 0, 0, 0, 0, false, filter, &[])
}

// ── Structural ────────────────────────────────────────────────────────────────

#[test]
fn truncated_pdu_is_rejected_by_one_shot_decode() {
    let pdu = simple_bind(1, "cn=a", b"p");
    for cut in 2..pdu.len() {
        let err = LdapDecoder::new().decode(&pdu[..cut]).unwrap_err();
        assert!(
            matches!(err, DecodeError::TruncatedPdu { .. }),
            "cut at {cut}: {err}"
        );
    }
}

#[test]
fn trailing_bytes_are_rejected() {
    let mut pdu = simple_bind(1, "cn=a", b"p");
    pdu.extend_from_slice(&[0x30, 0x00]);
    assert!(matches!(
        LdapDecoder::new().decode(&pdu).unwrap_err(),
        DecodeError::TrailingData { extra: 2 }
    ));
}

#[test]
fn inner_tlv_overrunning_outer_is_rejected() {
    // Envelope claims 3 bytes, messageID claims 4 value bytes.
    let pdu = [0x30, 0x03, 0x02, 0x04, 0x00, 0x00, 0x00, 0x01];
    assert!(matches!(
        LdapDecoder::new().decode(&pdu).unwrap_err(),
        DecodeError::NestedLengthMismatch { tag: 0x02 }
    ));
}

#[test]
fn indefinite_length_is_rejected() {
    let pdu = [0x30, 0x80, 0x02, 0x01, 0x01, 0x00, 0x00];
    assert!(matches!(
        LdapDecoder::new().decode(&pdu).unwrap_err(),
        DecodeError::Tlv(_)
    ));
}

// ── Grammar ───────────────────────────────────────────────────────────────────

#[test]
fn unsupported_operation_tag_is_rejected() {
    // ModifyRequest (0x66) is not in the decoded subset.
    let mut body = Vec::new();
    write_integer(&mut body, 1);
    body.extend(wrap(0x66, &[]));
    let err = LdapDecoder::new().decode(&wrap(0x30, &body)).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnexpectedTag {
            state: "MSG_ID",
            tag: 0x66,
            ..
        }
    ));
}

#[test]
fn boolean_where_integer_expected_is_rejected() {
    // messageID slot holds a BOOLEAN.
    let mut body = Vec::new();
    write_tlv(&mut body, 0x01, &[0xFF]);
    let err = LdapDecoder::new().decode(&wrap(0x30, &body)).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnexpectedTag { tag: 0x01, .. }
    ));
}

#[test]
fn unbind_with_nonzero_length_is_rejected() {
    let mut body = Vec::new();
    write_integer(&mut body, 1);
    body.extend(wrap(0x42, &[0x00]));
    let err = LdapDecoder::new().decode(&wrap(0x30, &body)).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InvalidValue {
            field: "unbindRequest",
            ..
        }
    ));
}

// ── Range and value checks ────────────────────────────────────────────────────

#[test]
fn negative_message_id_is_rejected() {
    let mut body = Vec::new();
    write_integer(&mut body, -1);
    body.extend(wrap(0x42, &[]));
    let err = LdapDecoder::new().decode(&wrap(0x30, &body)).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::OutOfRange {
            field: "messageID",
            value: -1,
            ..
        }
    ));
}

#[test]
fn scope_out_of_range_is_rejected() {
    let mut request = Vec::new();
    write_tlv(&mut request, 0x04, b"dc=example,dc=com");
    write_enumerated(&mut request, 3);

    let mut body = Vec::new();
    write_integer(&mut body, 1);
    body.extend(wrap(0x63, &request));

    let err = LdapDecoder::new().decode(&wrap(0x30, &body)).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::OutOfRange {
            field: "scope",
            value: 3,
            ..
        }
    ));
}

#[test]
fn bind_version_zero_is_rejected() {
    let mut bind = Vec::new();
    write_integer(&mut bind, 0);

    let mut body = Vec::new();
    write_integer(&mut body, 1);
    body.extend(wrap(0x60, &bind));

    let err = LdapDecoder::new().decode(&wrap(0x30, &body)).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::OutOfRange {
            field: "version",
            value: 0,
            ..
        }
    ));
}

// ── Filter edge cases ─────────────────────────────────────────────────────────

#[test]
fn empty_and_filter_is_rejected() {
    let err = LdapDecoder::new()
        .decode(&search_with_filter(&wrap(0xA0, &[])))
        .unwrap_err();
    assert!(matches!(
        err,
        DecodeError::EmptySet {
            field: "andFilter",
            tag: 0xA0,
        }
    ));
}

#[test]
fn empty_not_filter_is_rejected() {
    let err = LdapDecoder::new()
        .decode(&search_with_filter(&wrap(0xA2, &[])))
        .unwrap_err();
    assert!(matches!(err, DecodeError::EmptySet { field: "notFilter", .. }));
}

#[test]
fn not_filter_with_two_children_is_rejected() {
    let filter = filters::not(
        &[
            filters::present("cn"),
            filters::present("mail"),
        ]
        .concat(),
    );
    let err = LdapDecoder::new()
        .decode(&search_with_filter(&filter))
        .unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InvalidValue {
            field: "notFilter",
            ..
        }
    ));
}

#[test]
fn single_child_and_filter_is_fine() {
    let filter = filters::and(&[filters::present("cn")]);
    let decoded = LdapDecoder::new().decode(&search_with_filter(&filter)).unwrap();
    assert_eq!(
        decoded.op.search_request().unwrap().filter,
        Some(Filter::And(vec![Filter::Present("cn".to_owned())]))
    );
}

#[test]
fn deeply_nested_filters_decode() {
    let mut filter = filters::present("cn");
    for _ in 0..20 {
        filter = filters::not(&filter);
    }
    let decoded = LdapDecoder::new().decode(&search_with_filter(&filter)).unwrap();

    let mut node = decoded.op.search_request().unwrap().filter.clone().unwrap();
    let mut depth = 0;
    while let Filter::Not(child) = node {
        node = *child;
        depth += 1;
    }
    assert_eq!(depth, 20);
    assert_eq!(node, Filter::Present("cn".to_owned()));
}

// ── Referral quirks ───────────────────────────────────────────────────────────

#[test]
fn unparsable_referral_url_is_fatal() {
    let pdu = message(1, &result_op(0x65, 10, "", "", &["not a url"]), &[]);
    let err = LdapDecoder::new().decode(&pdu).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InvalidValue {
            field: "referral",
            ..
        }
    ));
}

#[test]
fn valid_url_on_non_referral_result_becomes_sentinel() {
    // Result code is success, yet a referral URI is attached.
    let pdu = message(
        1,
        &result_op(0x65, 0, "", "", &["ldap://host.example.com/dc=x"]),
        &[],
    );
    let decoded = LdapDecoder::new().decode(&pdu).unwrap();

    let result = decoded.op.result().unwrap();
    assert_eq!(result.result_code, ResultCode::Success);
    assert_eq!(result.referrals, vec![LdapUrl::empty()]);
}

#[test]
fn empty_referral_value_becomes_sentinel() {
    let pdu = message(1, &result_op(0x65, 10, "", "", &[""]), &[]);
    let decoded = LdapDecoder::new().decode(&pdu).unwrap();
    assert_eq!(
        decoded.op.result().unwrap().referrals,
        vec![LdapUrl::empty()]
    );
}

#[test]
fn empty_referral_sequence_cannot_end_the_pdu() {
    // Referral sequence opened but carrying no URI.
    let mut body = Vec::new();
    write_enumerated(&mut body, 10);
    write_tlv(&mut body, 0x04, b"");
    write_tlv(&mut body, 0x04, b"");
    body.extend(wrap(0xA3, &[]));

    let mut envelope = Vec::new();
    write_integer(&mut envelope, 1);
    envelope.extend(wrap(0x65, &body));

    let err = LdapDecoder::new().decode(&wrap(0x30, &envelope)).unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedPdu { .. }));
}
