//! Async transport decoding against the one-shot reference path.

use lber_codec::{LdapDecoder, StreamingDecoder};
use lber_grammar::DecodeError;
use lber_messages::LdapMessage;
use lber_tests::{filters, result_op, search_entry, search_request, simple_bind, unbind};

/// A full search conversation: bind, request, two entries, done, unbind.
fn conversation() -> Vec<u8> {
    let mut bytes = simple_bind(1, "cn=admin,dc=example,dc=com", b"secret");
    bytes.extend(search_request(
        2,
        "ou=people,dc=example,dc=com",
        2,
        0,
        0,
        0,
        false,
        &filters::equality("objectClass", b"person"),
        &["cn", "mail"],
    ));
    bytes.extend(search_entry(
        2,
        "uid=jdoe,ou=people,dc=example,dc=com",
        &[("cn", &[b"John Doe".as_slice()])],
    ));
    bytes.extend(search_entry(
        2,
        "uid=asmith,ou=people,dc=example,dc=com",
        &[("cn", &[b"Alice Smith".as_slice()])],
    ));
    bytes.extend(result_op_message(2));
    bytes.extend(unbind(3));
    bytes
}

fn result_op_message(message_id: i64) -> Vec<u8> {
    lber_tests::message(message_id, &result_op(0x65, 0, "", "", &[]), &[])
}

async fn stream_all(bytes: Vec<u8>) -> Result<Vec<LdapMessage>, DecodeError> {
    let reader = tokio::io::BufReader::new(std::io::Cursor::new(bytes));
    let mut stream = StreamingDecoder::new(reader);
    let mut messages = Vec::new();
    while let Some(message) = stream.next().await {
        messages.push(message?);
    }
    Ok(messages)
}

#[tokio::test]
async fn streamed_conversation_matches_session_decode() {
    let bytes = conversation();

    let mut session = LdapDecoder::new().session();
    let mut reference = session.feed(&bytes).unwrap();
    reference.extend(session.feed(&[]).unwrap());
    session.finish().unwrap();

    let streamed = stream_all(bytes).await.unwrap();
    assert_eq!(streamed.len(), 6);
    assert_eq!(streamed, reference);
}

#[tokio::test]
async fn stream_ends_cleanly_on_pdu_boundary() {
    let streamed = stream_all(unbind(7)).await.unwrap();
    assert_eq!(streamed.len(), 1);
    assert_eq!(streamed[0].message_id, 7);
}

#[tokio::test]
async fn stream_reports_truncation_at_eof() {
    let mut bytes = conversation();
    bytes.truncate(bytes.len() - 1);

    let err = stream_all(bytes).await.unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedPdu { .. }));
}

#[tokio::test]
async fn configured_decoder_applies_to_the_stream() {
    let jpeg = [0xFF, 0xD8, 0xFF, 0xE0];
    let bytes = search_entry(1, "uid=jdoe,dc=example,dc=com", &[("jpegPhoto", &[jpeg.as_slice()])]);

    let decoder = LdapDecoder::new().with_binary_attribute("jpegPhoto");
    let reader = tokio::io::BufReader::new(std::io::Cursor::new(bytes));
    let mut stream = StreamingDecoder::with_decoder(&decoder, reader);

    let message = stream.next().await.unwrap().unwrap();
    let entry = message.op.search_result_entry().unwrap();
    assert_eq!(
        entry.attributes[0].values[0],
        lber_messages::AttributeValue::Binary(jpeg.to_vec())
    );
    assert!(stream.next().await.is_none());
}

#[test]
fn captured_bind_request_matches_fixture_builder() {
    // Wire capture of `ldapwhoami -D cn=admin,dc=example,dc=com -w secret`.
    let captured = hex::decode(
        "302c020101602702010304\
         1a636e3d61646d696e2c64633d6578616d706c652c64633d636f6d\
         8006736563726574",
    )
    .unwrap();

    assert_eq!(captured, simple_bind(1, "cn=admin,dc=example,dc=com", b"secret"));
    let message = LdapDecoder::new().decode(&captured).unwrap();
    assert_eq!(message.op.bind_request().unwrap().name, "cn=admin,dc=example,dc=com");
}
