#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: registered control value decoders.
//
// Feeds arbitrary bytes to the persistent search and entry change
// value grammars. Both must reject or accept without panicking.
fuzz_target!(|data: &[u8]| {
    let _ = lber_controls::persistent_search::decode_value(data);
    let _ = lber_controls::entry_change::decode_value(data);
});
