//! Streaming behavior: PDU boundaries vs. chunk boundaries.

use lber_codec::LdapDecoder;
use lber_messages::LdapMessage;
use lber_tests::{filters, search_request, simple_bind, unbind};

fn sample_pdus() -> Vec<u8> {
    let mut bytes = simple_bind(1, "cn=admin,dc=example,dc=com", b"secret");
    bytes.extend(search_request(
        2,
        "dc=example,dc=com",
        2,
        0,
        0,
        0,
        false,
        &filters::and(&[
            filters::equality("objectClass", b"person"),
            filters::present("mail"),
        ]),
        &["cn"],
    ));
    bytes.extend(unbind(3));
    bytes
}

fn decode_in_chunks(bytes: &[u8], chunk_size: usize) -> Vec<LdapMessage> {
    let mut session = LdapDecoder::new().session();
    let mut messages = Vec::new();
    for chunk in bytes.chunks(chunk_size) {
        messages.extend(session.feed(chunk).unwrap());
    }
    session.finish().unwrap();
    messages
}

#[test]
fn one_chunk_yields_all_pdus() {
    let bytes = sample_pdus();
    let messages = decode_in_chunks(&bytes, bytes.len());
    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages.iter().map(|m| m.message_id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn byte_at_a_time_matches_one_chunk() {
    let bytes = sample_pdus();
    let whole = decode_in_chunks(&bytes, bytes.len());

    for chunk_size in [1, 2, 3, 7, 16] {
        let chunked = decode_in_chunks(&bytes, chunk_size);
        assert_eq!(chunked, whole, "divergence at chunk size {chunk_size}");
    }
}

#[test]
fn split_at_every_boundary_decodes_identically() {
    let bytes = simple_bind(1, "cn=x,dc=example,dc=com", b"pw");
    let reference = LdapDecoder::new().decode(&bytes).unwrap();

    for split in 0..=bytes.len() {
        let (head, tail) = bytes.split_at(split);
        let mut session = LdapDecoder::new().session();
        let mut messages = session.feed(head).unwrap();
        messages.extend(session.feed(tail).unwrap());
        assert_eq!(messages.len(), 1, "split at {split}");
        assert_eq!(messages[0], reference, "split at {split}");
    }
}

#[test]
fn pdu_straddling_a_chunk_boundary_is_buffered() {
    let bytes = sample_pdus();
    let mut session = LdapDecoder::new().session();

    // Stop 4 bytes into the second PDU.
    let first_len = simple_bind(1, "cn=admin,dc=example,dc=com", b"secret").len();
    let cut = first_len + 4;
    let messages = session.feed(&bytes[..cut]).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(session.buffered(), 4);

    let rest = session.feed(&bytes[cut..]).unwrap();
    assert_eq!(rest.len(), 2);
    assert_eq!(session.buffered(), 0);
}
