#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full message decoder entry point.
//
// Calls `LdapDecoder::decode(data)` on arbitrary input bytes.
// Catches bugs in:
// - TLV header and length parsing
// - grammar transitions for every operation
// - nested length containment
// - filter stack push/pop balance
// - control envelope and value dispatch
// - trailing data detection
fuzz_target!(|data: &[u8]| {
    let _ = lber_codec::LdapDecoder::new().decode(data);
});
