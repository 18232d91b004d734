#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: low-level TLV reader.
//
// Walks arbitrary bytes as a flat run of TLVs and checks the reader's
// contract on every step:
// - never panics on malformed input
// - `consumed` always advances and never exceeds the buffer
// - a primitive value window is exactly `length` bytes
fuzz_target!(|data: &[u8]| {
    let mut cursor = 0;
    while cursor < data.len() {
        match lber_tlv::tlv::read_tlv(&data[cursor..]) {
            Ok(lber_tlv::tlv::TlvRead::Complete {
                tlv,
                header_len,
                consumed,
            }) => {
                assert!(consumed >= header_len);
                assert!(cursor + consumed <= data.len());
                if !tlv.is_constructed() {
                    assert_eq!(tlv.value.len(), tlv.length);
                }
                cursor += consumed.max(1);
            }
            Ok(lber_tlv::tlv::TlvRead::NeedMore) | Err(_) => break,
        }
    }
});
