//! Golden fixture generator for the zpump conformance and edge case suites.
//!
//! The streams under `tests/golden/reference/` come from a stock zlib build
//! and are committed as-is; this binary only checks that they still decode
//! to their plaintext. Everything that can be derived deterministically
//! (plaintext, random noise, damaged streams) is rewritten from scratch.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin generate_golden -p zpump-tests
//! ```
//!
//! # Fixtures
//!
//! | Path                           | Contents                                   |
//! |--------------------------------|--------------------------------------------|
//! | reference/lorem.txt            | 10 000 pseudo-random lorem ipsum words     |
//! | edge_cases/random.bin          | 4 KiB of xorshift32 noise                  |
//! | edge_cases/trailing_data.gz    | reference/hello.gz + `TRAILER!`            |
//! | edge_cases/truncated.gz        | first half of reference/lorem.gz           |

use std::path::Path;

use anyhow::{Context, Result, ensure};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use zpump_codec::{ContainerFormat, Zlib};

const LOREM_WORDS: [&str; 12] = [
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let golden_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden");
    let reference = golden_dir.join("reference");
    let edge_cases = golden_dir.join("edge_cases");

    write_file(&reference.join("lorem.txt"), &lorem(10_000))?;
    verify_reference(&reference)?;

    write_file(&edge_cases.join("random.bin"), &xorshift_noise(4096, 0x9E37_79B9))?;

    let mut trailing = std::fs::read(reference.join("hello.gz")).context("read hello.gz")?;
    trailing.extend_from_slice(b"TRAILER!");
    write_file(&edge_cases.join("trailing_data.gz"), &trailing)?;

    let lorem_gz = std::fs::read(reference.join("lorem.gz")).context("read lorem.gz")?;
    write_file(&edge_cases.join("truncated.gz"), &lorem_gz[..lorem_gz.len() / 2])?;

    info!(dir = %golden_dir.display(), "golden fixtures written");
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(path, data).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), bytes = data.len(), "wrote fixture");
    Ok(())
}

/// Words chosen by a 32-bit LCG, twelve to a sentence.
fn lorem(words: usize) -> Vec<u8> {
    let mut state: u32 = 0x2545_F491;
    let mut text = String::new();
    for i in 0..words {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        text.push_str(LOREM_WORDS[(state >> 16) as usize % LOREM_WORDS.len()]);
        text.push_str(if i % 12 == 11 { ".\n" } else { " " });
    }
    text.into_bytes()
}

fn xorshift_noise(len: usize, mut state: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state.to_le_bytes()[0]
        })
        .collect()
}

// ── Reference checks ─────────────────────────────────────────────────────────

fn verify_reference(dir: &Path) -> Result<()> {
    let hello = std::fs::read(dir.join("hello.txt")).context("read hello.txt")?;
    let lorem = std::fs::read(dir.join("lorem.txt")).context("read lorem.txt")?;

    let cases = [
        ("hello.gz", ContainerFormat::Gzip, &hello),
        ("hello_named.gz", ContainerFormat::Gzip, &hello),
        ("hello.zz", ContainerFormat::Zlib, &hello),
        ("hello.deflate", ContainerFormat::RawDeflate, &hello),
        ("lorem.gz", ContainerFormat::Gzip, &lorem),
    ];

    for (name, format, expected) in cases {
        let decoded = Zlib::new()
            .format(format)
            .decode_from_file(dir.join(name))
            .with_context(|| format!("decode reference {name}"))?;
        ensure!(&decoded == expected, "reference {name} no longer matches its plaintext");
        debug!(name, %format, bytes = decoded.len(), "reference fixture verified");
    }
    Ok(())
}
