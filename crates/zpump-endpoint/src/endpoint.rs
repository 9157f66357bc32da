use std::io;

use crate::error::EndpointError;

/// Size of the transfer buffer moved between an endpoint and the codec.
///
/// Every fill and drain moves at most this many bytes, so memory use stays
/// constant no matter how large the underlying file or byte sequence is.
pub const CHUNK_SIZE: usize = 16_384;

/// Fixed-capacity staging area shared between an endpoint and the codec.
///
/// Buffers are owned by the pump loop, not by the endpoints, so a call
/// holds exactly two of them (one for input, one for output).
pub type TransferBuffer = [u8; CHUNK_SIZE];

/// A readable-or-writable byte channel driven by the codec pump.
///
/// Implementations move bytes in `CHUNK_SIZE` pieces between some backing
/// store (a file, an in-memory byte sequence) and a [`TransferBuffer`].
///
/// ```text
///   ┌────────────┐  fill_buffer   ┌────────┐  drain_buffer  ┌──────────┐
///   │  source    │ ─────────────▶ │ codec  │ ─────────────▶ │  sink    │
///   │  endpoint  │   ≤ 16 KiB     │        │   ≤ 16 KiB     │ endpoint │
///   └────────────┘                └────────┘                └──────────┘
/// ```
///
/// Lifecycle: `open` → any number of `fill_buffer` / `drain_buffer` calls →
/// `close`. `close` is idempotent and is called on every exit path of an
/// operation that opened the endpoint, including failed `open` calls.
pub trait Endpoint {
    /// Acquire whatever the endpoint needs to start moving bytes.
    ///
    /// # Errors
    ///
    /// - [`EndpointError::NotFound`] if a read-mode file does not exist.
    /// - [`EndpointError::Io`] if the underlying handle cannot be acquired.
    fn open(&mut self) -> Result<(), EndpointError>;

    /// Copy up to `CHUNK_SIZE` bytes from upstream into `buf`.
    ///
    /// Returns the number of bytes copied. A short count (including zero)
    /// means the endpoint has reached end-of-data.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Io`] if the upstream read fails for any
    /// reason other than reaching end-of-data.
    fn fill_buffer(&mut self, buf: &mut TransferBuffer) -> Result<usize, EndpointError>;

    /// Write exactly the first `count` bytes of `buf` downstream.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Io`] if fewer than `count` bytes were
    /// accepted, or with the `InvalidMode` sub-kind if `count` exceeds
    /// `CHUNK_SIZE`.
    fn drain_buffer(&mut self, buf: &TransferBuffer, count: usize) -> Result<(), EndpointError>;

    /// Whether the last fill reached end-of-data.
    fn at_end(&self) -> bool;

    /// Release any held handle. Safe to call repeatedly, or before `open`.
    fn close(&mut self);
}

/// The first `count` bytes of `buf`.
pub(crate) fn drained_bytes(buf: &TransferBuffer, count: usize) -> io::Result<&[u8]> {
    buf.get(..count).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("drain count {count} exceeds the {CHUNK_SIZE}-byte transfer buffer"),
        )
    })
}
