#![no_main]

use libfuzzer_sys::fuzz_target;
use zpump_codec::{ContainerFormat, Zlib};

// Fuzz target: decoding under every container format.
//
// Input format:
//   byte 0: format selector (mod 3)
//   bytes 1..: candidate stream
//
// Any error is fine; panics, hangs, and output from a failed call are not.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, stream)) = data.split_first() else {
        return;
    };
    let format = match selector % 3 {
        0 => ContainerFormat::RawDeflate,
        1 => ContainerFormat::Zlib,
        _ => ContainerFormat::Gzip,
    };
    let _ = Zlib::new().format(format).decode_from_memory(stream);
});
