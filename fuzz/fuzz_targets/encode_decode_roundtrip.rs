#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use zpump_codec::{ContainerFormat, Zlib};

#[derive(Debug, Arbitrary)]
enum FuzzFormat {
    RawDeflate,
    Zlib,
    Gzip,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    format: FuzzFormat,
    level: u8,
    data: Vec<u8>,
}

// Fuzz target: encode->decode roundtrip.
//
// Levels above 9 must be rejected; every accepted level must restore the
// input byte for byte.
fuzz_target!(|input: FuzzInput| {
    let format = match input.format {
        FuzzFormat::RawDeflate => ContainerFormat::RawDeflate,
        FuzzFormat::Zlib => ContainerFormat::Zlib,
        FuzzFormat::Gzip => ContainerFormat::Gzip,
    };
    let zlib = Zlib::new().format(format).level(input.level);

    match zlib.encode_from_memory(&input.data) {
        Ok(packed) => {
            assert!(input.level <= 9);
            let restored = zlib.decode_from_memory(&packed).unwrap();
            assert_eq!(restored, input.data);
        }
        Err(err) => {
            assert!(input.level > 9, "level {} failed: {err}", input.level);
        }
    }
});
