//! Conformance tests against reference streams from an independent zlib.
//!
//! The files under `tests/golden/reference/` were produced by a stock zlib
//! build, not by this workspace, so decoding them checks that the engine
//! speaks the real container formats rather than merely agreeing with
//! itself.
//!
//! ```text
//! ┌──────────────────┬─────────────┬───────────────────────────────────┐
//! │ Fixture          │ Format      │ Notes                             │
//! ├──────────────────┼─────────────┼───────────────────────────────────┤
//! │ hello.gz         │ gzip        │ "hello world", level 6            │
//! │ hello.zz         │ zlib        │ "hello world", level 6            │
//! │ hello.deflate    │ raw deflate │ "hello world", level 6            │
//! │ hello_named.gz   │ gzip        │ header carries FNAME "hello.txt"  │
//! │ lorem.gz         │ gzip        │ 65 003 bytes of text, level 9     │
//! └──────────────────┴─────────────┴───────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use zpump_codec::{ContainerFormat, Zlib};

fn reference(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden/reference")
        .join(name)
}

fn read_reference(name: &str) -> Vec<u8> {
    let path = reference(name);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read reference fixture {}: {e}", path.display()))
}

#[test]
fn decodes_reference_gzip() {
    let out = Zlib::new().decode_from_file(reference("hello.gz")).unwrap();
    assert_eq!(out, read_reference("hello.txt"));
}

#[test]
fn decodes_reference_zlib() {
    let out = Zlib::new()
        .format(ContainerFormat::Zlib)
        .decode_from_file(reference("hello.zz"))
        .unwrap();
    assert_eq!(out, b"hello world");
}

#[test]
fn decodes_reference_raw_deflate() {
    let out = Zlib::new()
        .format(ContainerFormat::RawDeflate)
        .decode_from_file(reference("hello.deflate"))
        .unwrap();
    assert_eq!(out, b"hello world");
}

#[test]
fn decodes_gzip_with_optional_header_fields() {
    let bytes = read_reference("hello_named.gz");
    assert_eq!(bytes[3] & 0x08, 0x08, "fixture should set FNAME");
    assert_eq!(Zlib::new().decode_from_memory(&bytes).unwrap(), b"hello world");
}

#[test]
fn decodes_reference_text_larger_than_a_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let restored = dir.path().join("lorem.txt");

    Zlib::new()
        .decode_file_to_file(reference("lorem.gz"), &restored)
        .unwrap();

    assert_eq!(std::fs::read(&restored).unwrap(), read_reference("lorem.txt"));
}

#[test]
fn our_gzip_output_uses_the_reference_header_layout() {
    let ours = Zlib::new().encode_from_memory(b"hello world").unwrap();
    let theirs = read_reference("hello.gz");

    // ID1 ID2 CM: magic plus the deflate method byte.
    assert_eq!(hex::encode(&ours[..3]), "1f8b08");
    assert_eq!(hex::encode(&ours[..3]), hex::encode(&theirs[..3]));

    // Trailer: CRC-32 then ISIZE, both little-endian, over the same input.
    assert_eq!(ours[ours.len() - 8..], theirs[theirs.len() - 8..]);
}

#[test]
fn our_zlib_output_carries_a_valid_header_and_adler_trailer() {
    let ours = Zlib::new()
        .format(ContainerFormat::Zlib)
        .encode_from_memory(b"hello world")
        .unwrap();
    let theirs = read_reference("hello.zz");

    let header = u16::from_be_bytes([ours[0], ours[1]]);
    assert_eq!(ours[0] & 0x0F, 8, "CM must be deflate");
    assert_eq!(header % 31, 0, "FCHECK must make the header a multiple of 31");
    assert_eq!(ours[ours.len() - 4..], theirs[theirs.len() - 4..]);
}
