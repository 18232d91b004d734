#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: chunking equivalence.
//
// The first byte picks a chunk size; the rest is the byte stream. A
// session fed in chunks must produce the same messages and the same
// accept/reject outcome as one fed the whole stream at once.
fuzz_target!(|data: &[u8]| {
    let Some((&first, stream)) = data.split_first() else {
        return;
    };
    let chunk_size = usize::from(first).max(1);

    let decoder = lber_codec::LdapDecoder::new();

    let mut whole_session = decoder.session();
    let whole = whole_session.feed(stream);

    let mut chunked_session = decoder.session();
    let mut chunked = Ok(Vec::new());
    for chunk in stream.chunks(chunk_size) {
        match chunked_session.feed(chunk) {
            Ok(messages) => {
                if let Ok(collected) = chunked.as_mut() {
                    collected.extend(messages);
                }
            }
            Err(e) => {
                chunked = Err(e);
                break;
            }
        }
    }

    match (whole, chunked) {
        (Ok(a), Ok(b)) => {
            assert_eq!(a, b);
            assert_eq!(whole_session.buffered(), chunked_session.buffered());
        }
        (Err(_), Err(_)) => {}
        (a, b) => panic!("chunking changed the outcome: {a:?} vs {b:?}"),
    }
});
