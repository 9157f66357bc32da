//! Edge case integration tests for the codec engine.
//!
//! - **Missing input**: a path that does not exist fails with `NotFound`.
//! - **Corrupted input**: random bytes fail with a data error, never a
//!   panic or a hang.
//! - **Preset dictionary**: a zlib stream compressed against a dictionary
//!   fails with a need-dictionary error.
//! - **Truncated input**: a stream cut short yields what could be decoded.
//! - **Trailing data**: bytes after a complete stream are ignored.
//! - **Bad level**: a level above 9 fails on encode and is not swallowed.

use std::path::{Path, PathBuf};

use insta::assert_snapshot;
use zpump_codec::{CodecStatus, ContainerFormat, EndpointError, IoErrorKind, Zlib, ZlibError};

fn golden(subpath: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden").join(subpath)
}

fn read_golden(subpath: &str) -> Vec<u8> {
    let path = golden(subpath);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

// ── Missing input ────────────────────────────────────────────────────────────

#[test]
fn missing_file_is_not_found() {
    let err = Zlib::new()
        .decode_from_file("/definitely/missing/path")
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
    assert_snapshot!(err.to_string(), @"file not found: /definitely/missing/path");
}

#[test]
fn missing_file_is_not_found_for_every_file_entry_point() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.gz");
    let out = dir.path().join("out");
    let zlib = Zlib::new();

    assert!(zlib.decode_from_file(&missing).unwrap_err().is_not_found());
    assert!(zlib.decode_file_to_file(&missing, &out).unwrap_err().is_not_found());
    assert!(zlib.encode_from_file(&missing).unwrap_err().is_not_found());
    assert!(zlib.encode_file_to_file(&missing, &out).unwrap_err().is_not_found());
}

#[test]
#[cfg(unix)]
fn unwritable_output_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("no/such/dir/out.gz");

    let err = Zlib::new().encode_memory_to_file(b"abc", &out).unwrap_err();
    assert!(
        matches!(
            err,
            ZlibError::Endpoint(EndpointError::Io { kind: IoErrorKind::NoSuchEntry, .. })
        ),
        "got {err:?}"
    );
}

#[test]
#[cfg(unix)]
fn directory_as_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Zlib::new().decode_from_file(dir.path()).unwrap_err();
    assert!(
        matches!(
            err,
            ZlibError::Endpoint(EndpointError::Io { kind: IoErrorKind::IsADirectory, .. })
        ),
        "got {err:?}"
    );
}

// ── Corrupted input ──────────────────────────────────────────────────────────

#[test]
fn random_bytes_are_a_data_error() {
    let garbage = read_golden("edge_cases/random.bin");
    for format in [ContainerFormat::Gzip, ContainerFormat::Zlib] {
        let err = Zlib::new()
            .format(format)
            .decode_from_memory(&garbage)
            .unwrap_err();
        assert_eq!(err.status(), Some(CodecStatus::DataError), "{format}: {err}");
    }
}

#[test]
fn preset_dictionary_stream_needs_dict() {
    let bytes = read_golden("edge_cases/preset_dictionary.zz");
    let err = Zlib::new()
        .format(ContainerFormat::Zlib)
        .decode_from_memory(&bytes)
        .unwrap_err();
    assert_eq!(err.status(), Some(CodecStatus::NeedDict));
    assert_snapshot!(err.to_string(), @"codec error (need dictionary): stream requires a preset dictionary");
}

#[test]
fn truncated_stream_yields_a_prefix_of_the_plaintext() {
    let bytes = read_golden("edge_cases/truncated.gz");
    let lorem = read_golden("reference/lorem.txt");
    let out = Zlib::new().decode_from_memory(&bytes).unwrap();
    assert!(!out.is_empty());
    assert!(out.len() < lorem.len());
    assert!(lorem.starts_with(&out));
}

#[test]
fn stream_missing_its_trailer_still_yields_the_payload() {
    let zlib = Zlib::new().format(ContainerFormat::Zlib);
    let packed = zlib.encode_from_memory(b"cut short").unwrap();
    let out = zlib.decode_from_memory(&packed[..packed.len() - 3]).unwrap();
    assert!(b"cut short".starts_with(&out));
}

#[test]
fn empty_input_decodes_to_nothing() {
    for format in [ContainerFormat::RawDeflate, ContainerFormat::Zlib, ContainerFormat::Gzip] {
        let out = Zlib::new().format(format).decode_from_memory(&[]).unwrap();
        assert!(out.is_empty(), "{format}");
    }
}

#[test]
fn empty_input_file_decodes_to_an_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.gz");
    let output = dir.path().join("empty.txt");
    std::fs::write(&input, b"").unwrap();

    Zlib::new().decode_file_to_file(&input, &output).unwrap();
    assert!(std::fs::read(&output).unwrap().is_empty());
}

// ── Trailing data ────────────────────────────────────────────────────────────

#[test]
fn trailing_bytes_after_stream_end_are_ignored() {
    let bytes = read_golden("edge_cases/trailing_data.gz");
    assert!(bytes.ends_with(b"TRAILER!"));
    assert_eq!(Zlib::new().decode_from_memory(&bytes).unwrap(), b"hello world");
}

#[test]
fn trailing_bytes_in_file_input_are_ignored() {
    let out = Zlib::new()
        .decode_from_file(golden("edge_cases/trailing_data.gz"))
        .unwrap();
    assert_eq!(out, b"hello world");
}

// ── Encode failures ──────────────────────────────────────────────────────────

#[test]
fn level_above_nine_is_rejected() {
    let err = Zlib::new().level(10).encode_from_memory(b"data").unwrap_err();
    assert_eq!(err.status(), Some(CodecStatus::StreamError));
    assert_snapshot!(err.to_string(), @"codec error (stream error): invalid compression level 10 (expected 0-9)");
}

#[test]
fn encode_surfaces_sink_failures() {
    let dir = tempfile::tempdir().unwrap();
    // The output path is an existing directory, so creating it fails.
    let err = Zlib::new()
        .encode_memory_to_file(b"payload", dir.path())
        .unwrap_err();
    assert!(matches!(err, ZlibError::Endpoint(EndpointError::Io { .. })), "got {err:?}");
}
