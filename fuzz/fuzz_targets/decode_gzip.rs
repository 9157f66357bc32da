#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: gzip decoding of arbitrary bytes through the memory facade.
//
// Catches bugs in:
// - Header parsing (magic, flags, optional FNAME/FEXTRA fields)
// - Truncated streams ending mid-block or mid-trailer
// - Pump loop termination when the codec stops making progress
fuzz_target!(|data: &[u8]| {
    let _ = zpump_codec::Zlib::new().decode_from_memory(data);
});
