use std::path::Path;

use zpump_endpoint::{FileEndpoint, MemoryEndpoint};

use crate::config::{CodecOptions, ContainerFormat};
use crate::engine;
use crate::error::ZlibError;

/// Named entry points for compressing and decompressing files and byte
/// slices.
///
/// Each method builds the two endpoints its name describes and hands them
/// to the pump in [`engine`]. The container format (default gzip) applies
/// to both directions; the level (default 6) only to encoding.
///
/// ```text
/// ┌───────────────────────┬──────────────┬─────────────┐
/// │ Method                │ Source       │ Sink        │
/// ├───────────────────────┼──────────────┼─────────────┤
/// │ decode_from_file      │ file         │ Vec<u8>     │
/// │ decode_from_memory    │ &[u8]        │ Vec<u8>     │
/// │ decode_file_to_file   │ file         │ file        │
/// │ decode_memory_to_file │ &[u8]        │ file        │
/// │ encode_from_file      │ file         │ Vec<u8>     │
/// │ encode_from_memory    │ &[u8]        │ Vec<u8>     │
/// │ encode_file_to_file   │ file         │ file        │
/// │ encode_memory_to_file │ &[u8]        │ file        │
/// └───────────────────────┴──────────────┴─────────────┘
/// ```
///
/// No method retries; a failure is final for that call.
///
/// # Example
///
/// ```rust
/// use zpump_codec::{ContainerFormat, Zlib};
///
/// let packed = Zlib::new().encode_from_memory(b"hello world").unwrap();
/// assert_eq!(&packed[..2], &[0x1F, 0x8B]);
///
/// let raw = Zlib::new().format(ContainerFormat::RawDeflate);
/// let packed = raw.encode_from_memory(b"hello world").unwrap();
/// assert_eq!(raw.decode_from_memory(&packed).unwrap(), b"hello world");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Zlib {
    options: CodecOptions,
}

impl Zlib {
    /// Gzip, level 6.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn format(mut self, format: ContainerFormat) -> Self {
        self.options.format = format;
        self
    }

    #[must_use]
    pub fn level(mut self, level: u8) -> Self {
        self.options.level = level;
        self
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    // ── Decode ──────────────────────────────────────────────────────────

    /// Decompress the file at `path` into memory.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if `path` does not exist, and otherwise as
    /// [`engine::decode`] does.
    pub fn decode_from_file(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, ZlibError> {
        let mut source = FileEndpoint::reader(path.as_ref());
        let mut sink = MemoryEndpoint::writer();
        engine::decode(&mut source, &mut sink, self.options.format)?;
        Ok(sink.into_bytes())
    }

    /// Decompress `data` into memory.
    ///
    /// # Errors
    ///
    /// As [`engine::decode`].
    pub fn decode_from_memory(&self, data: &[u8]) -> Result<Vec<u8>, ZlibError> {
        let mut source = MemoryEndpoint::reader(data);
        let mut sink = MemoryEndpoint::writer();
        engine::decode(&mut source, &mut sink, self.options.format)?;
        Ok(sink.into_bytes())
    }

    /// Decompress the file at `input` into the file at `output`.
    ///
    /// # Errors
    ///
    /// As [`decode_from_file`](Self::decode_from_file), plus any failure to
    /// create or write `output`.
    pub fn decode_file_to_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(), ZlibError> {
        let mut source = FileEndpoint::reader(input.as_ref());
        let mut sink = FileEndpoint::writer(output.as_ref());
        engine::decode(&mut source, &mut sink, self.options.format)?;
        Ok(())
    }

    /// Decompress `data` into the file at `output`.
    ///
    /// # Errors
    ///
    /// As [`engine::decode`], plus any failure to create or write `output`.
    pub fn decode_memory_to_file(
        &self,
        data: &[u8],
        output: impl AsRef<Path>,
    ) -> Result<(), ZlibError> {
        let mut source = MemoryEndpoint::reader(data);
        let mut sink = FileEndpoint::writer(output.as_ref());
        engine::decode(&mut source, &mut sink, self.options.format)?;
        Ok(())
    }

    // ── Encode ──────────────────────────────────────────────────────────

    /// Compress the file at `path` into memory.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if `path` does not exist, and otherwise as
    /// [`engine::encode`] does.
    pub fn encode_from_file(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, ZlibError> {
        let mut source = FileEndpoint::reader(path.as_ref());
        let mut sink = MemoryEndpoint::writer();
        engine::encode(&mut source, &mut sink, &self.options)?;
        Ok(sink.into_bytes())
    }

    /// Compress `data` into memory.
    ///
    /// # Errors
    ///
    /// As [`engine::encode`].
    pub fn encode_from_memory(&self, data: &[u8]) -> Result<Vec<u8>, ZlibError> {
        let mut source = MemoryEndpoint::reader(data);
        let mut sink = MemoryEndpoint::writer();
        engine::encode(&mut source, &mut sink, &self.options)?;
        Ok(sink.into_bytes())
    }

    /// Compress the file at `input` into the file at `output`.
    ///
    /// # Errors
    ///
    /// As [`encode_from_file`](Self::encode_from_file), plus any failure to
    /// create or write `output`.
    pub fn encode_file_to_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(), ZlibError> {
        let mut source = FileEndpoint::reader(input.as_ref());
        let mut sink = FileEndpoint::writer(output.as_ref());
        engine::encode(&mut source, &mut sink, &self.options)?;
        Ok(())
    }

    /// Compress `data` into the file at `output`.
    ///
    /// # Errors
    ///
    /// As [`engine::encode`], plus any failure to create or write `output`.
    pub fn encode_memory_to_file(
        &self,
        data: &[u8],
        output: impl AsRef<Path>,
    ) -> Result<(), ZlibError> {
        let mut source = MemoryEndpoint::reader(data);
        let mut sink = FileEndpoint::writer(output.as_ref());
        engine::encode(&mut source, &mut sink, &self.options)?;
        Ok(())
    }
}
