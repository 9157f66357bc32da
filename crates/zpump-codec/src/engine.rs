//! The chunked pump loop between a source and a sink endpoint.
//!
//! Both directions share one shape:
//!
//! ```text
//!   ┌─────────┐ fill  ┌───────┐ step  ┌────────┐ drain ┌──────┐
//!   │ source  │ ────▶ │ input │ ────▶ │ output │ ────▶ │ sink │
//!   └─────────┘       │ 16KiB │       │ 16KiB  │       └──────┘
//!                     └───────┘       └────────┘
//!        outer loop: one fill per iteration
//!        inner loop: step + drain until the output buffer comes back
//!                    less than full
//! ```
//!
//! Each call owns its two transfer buffers and its codec session. Endpoints
//! are opened through a guard that closes them when it goes out of scope, so
//! every exit path (success, codec failure, I/O failure) closes both
//! endpoints and drops the session before the result reaches the caller.

use std::ops::{Deref, DerefMut};

use tracing::{debug, trace};
use zpump_endpoint::{CHUNK_SIZE, Endpoint, EndpointError, TransferBuffer};

use crate::config::{CodecOptions, ContainerFormat};
use crate::error::ZlibError;
use crate::session::{DeflateSession, FlushMode, InflateSession, Step};
use crate::status::CodecStatus;

/// Counters describing how a call moved its bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferStats {
    /// Number of `fill_buffer` calls on the source.
    pub fills: usize,
    /// Number of `drain_buffer` calls on the sink.
    pub drains: usize,
    /// Bytes read from the source.
    pub bytes_in: u64,
    /// Bytes written to the sink.
    pub bytes_out: u64,
}

/// An endpoint that was opened by the current call and must be closed by it.
struct Opened<'a, E: Endpoint + ?Sized> {
    endpoint: &'a mut E,
}

impl<'a, E: Endpoint + ?Sized> Opened<'a, E> {
    fn open(endpoint: &'a mut E) -> Result<Self, EndpointError> {
        // Guard first: a failed open still gets its close.
        let guard = Self { endpoint };
        guard.endpoint.open()?;
        Ok(guard)
    }
}

impl<E: Endpoint + ?Sized> Deref for Opened<'_, E> {
    type Target = E;

    fn deref(&self) -> &E {
        self.endpoint
    }
}

impl<E: Endpoint + ?Sized> DerefMut for Opened<'_, E> {
    fn deref_mut(&mut self) -> &mut E {
        self.endpoint
    }
}

impl<E: Endpoint + ?Sized> Drop for Opened<'_, E> {
    fn drop(&mut self) {
        self.endpoint.close();
    }
}

fn fill<E: Endpoint + ?Sized>(
    source: &mut E,
    buf: &mut TransferBuffer,
    stats: &mut TransferStats,
) -> Result<usize, ZlibError> {
    let filled = source.fill_buffer(buf)?;
    stats.fills += 1;
    stats.bytes_in += filled as u64;
    trace!(filled, at_end = source.at_end(), "filled transfer buffer");
    Ok(filled)
}

fn drain<E: Endpoint + ?Sized>(
    sink: &mut E,
    buf: &TransferBuffer,
    count: usize,
    stats: &mut TransferStats,
) -> Result<(), ZlibError> {
    if count == 0 {
        return Ok(());
    }
    sink.drain_buffer(buf, count)?;
    stats.drains += 1;
    stats.bytes_out += count as u64;
    Ok(())
}

fn stalled() -> ZlibError {
    ZlibError::codec(CodecStatus::BufError, "codec made no progress")
}

/// Inflate everything `source` yields into `sink`.
///
/// Stops as soon as the algorithm reports the end of the logical stream.
/// Bytes after a complete stream are left unread and are not an error.
/// A source that runs dry first also ends the call normally: the sink
/// holds whatever the algorithm could decode, which is empty for an empty
/// source.
///
/// # Errors
///
/// - [`ZlibError::Codec`] with `NeedDict` or `DataError` if the input is
///   not a stream in `format`.
/// - [`ZlibError::Endpoint`] if either endpoint fails to open, read, or write.
pub fn decode<S, D>(
    source: &mut S,
    sink: &mut D,
    format: ContainerFormat,
) -> Result<TransferStats, ZlibError>
where
    S: Endpoint + ?Sized,
    D: Endpoint + ?Sized,
{
    let mut session = InflateSession::new(format);
    debug!(%format, "inflate session started");
    let result = pump_inflate(&mut session, source, sink);
    match &result {
        Ok(stats) => debug!(
            %format,
            bytes_in = session.total_in(),
            bytes_out = session.total_out(),
            fills = stats.fills,
            drains = stats.drains,
            "inflate complete"
        ),
        Err(e) => debug!(%format, error = %e, "inflate aborted"),
    }
    result
}

fn pump_inflate<S, D>(
    session: &mut InflateSession,
    source: &mut S,
    sink: &mut D,
) -> Result<TransferStats, ZlibError>
where
    S: Endpoint + ?Sized,
    D: Endpoint + ?Sized,
{
    let mut source = Opened::open(source)?;
    let mut sink = Opened::open(sink)?;

    let mut input: TransferBuffer = [0; CHUNK_SIZE];
    let mut output: TransferBuffer = [0; CHUNK_SIZE];
    let mut stats = TransferStats::default();

    loop {
        let filled = fill(&mut *source, &mut input, &mut stats)?;
        if filled == 0 {
            debug!("source exhausted before end of stream");
            break;
        }

        let mut offset = 0;
        loop {
            let Step { consumed, produced, status } =
                session.step(&input[offset..filled], &mut output)?;
            offset += consumed;
            drain(&mut *sink, &output, produced, &mut stats)?;

            if status == CodecStatus::StreamEnd {
                return Ok(stats);
            }
            // A full output buffer means more output may be pending for the
            // same input; otherwise move on once this chunk is used up.
            if produced < CHUNK_SIZE && offset == filled {
                break;
            }
            if consumed == 0 && produced == 0 {
                return Err(stalled());
            }
        }
    }
    Ok(stats)
}

/// Deflate everything `source` yields into `sink`.
///
/// The algorithm is told to finish once the source reports end-of-data, so
/// the container trailer is emitted exactly once, after the last chunk. An
/// empty source still produces a complete, valid container.
///
/// # Errors
///
/// - [`ZlibError::Codec`] with `StreamError` if `options.level` is above 9
///   or the algorithm rejects its state.
/// - [`ZlibError::Endpoint`] if either endpoint fails to open, read, or write.
pub fn encode<S, D>(
    source: &mut S,
    sink: &mut D,
    options: &CodecOptions,
) -> Result<TransferStats, ZlibError>
where
    S: Endpoint + ?Sized,
    D: Endpoint + ?Sized,
{
    let mut session = DeflateSession::new(options.format, options.level)?;
    debug!(format = %options.format, level = options.level, "deflate session started");
    let result = pump_deflate(&mut session, source, sink);
    match &result {
        Ok(stats) => debug!(
            format = %options.format,
            level = options.level,
            bytes_in = session.total_in(),
            bytes_out = session.total_out(),
            fills = stats.fills,
            drains = stats.drains,
            "deflate complete"
        ),
        Err(e) => debug!(format = %options.format, error = %e, "deflate aborted"),
    }
    result
}

fn pump_deflate<S, D>(
    session: &mut DeflateSession,
    source: &mut S,
    sink: &mut D,
) -> Result<TransferStats, ZlibError>
where
    S: Endpoint + ?Sized,
    D: Endpoint + ?Sized,
{
    let mut source = Opened::open(source)?;
    let mut sink = Opened::open(sink)?;

    let mut input: TransferBuffer = [0; CHUNK_SIZE];
    let mut output: TransferBuffer = [0; CHUNK_SIZE];
    let mut stats = TransferStats::default();

    loop {
        let filled = fill(&mut *source, &mut input, &mut stats)?;
        let flush = if filled == 0 || source.at_end() {
            FlushMode::Finish
        } else {
            FlushMode::NoFlush
        };

        let mut offset = 0;
        loop {
            let Step { consumed, produced, status } =
                session.step(&input[offset..filled], &mut output, flush)?;
            offset += consumed;
            drain(&mut *sink, &output, produced, &mut stats)?;

            match flush {
                FlushMode::Finish if status == CodecStatus::StreamEnd => return Ok(stats),
                FlushMode::NoFlush if produced < CHUNK_SIZE && offset == filled => break,
                _ => {}
            }
            if consumed == 0 && produced == 0 {
                return Err(stalled());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zpump_endpoint::MemoryEndpoint;

    fn encode_bytes(data: &[u8], options: &CodecOptions) -> (Vec<u8>, TransferStats) {
        let mut source = MemoryEndpoint::reader(data);
        let mut sink = MemoryEndpoint::writer();
        let stats = encode(&mut source, &mut sink, options).unwrap();
        (sink.into_bytes(), stats)
    }

    fn decode_bytes(data: &[u8], format: ContainerFormat) -> Result<Vec<u8>, ZlibError> {
        let mut source = MemoryEndpoint::reader(data);
        let mut sink = MemoryEndpoint::writer();
        decode(&mut source, &mut sink, format)?;
        Ok(sink.into_bytes())
    }

    #[test]
    fn roundtrip_each_format() {
        let data = b"the quick brown fox jumps over the lazy dog ".repeat(20);
        for format in [ContainerFormat::RawDeflate, ContainerFormat::Zlib, ContainerFormat::Gzip] {
            let (packed, _) = encode_bytes(&data, &CodecOptions::default().format(format));
            assert_eq!(decode_bytes(&packed, format).unwrap(), data, "format {format}");
        }
    }

    #[test]
    fn empty_input_encodes_to_a_valid_stream() {
        let (packed, stats) = encode_bytes(&[], &CodecOptions::default());
        assert!(!packed.is_empty());
        assert_eq!(stats.fills, 1);
        assert_eq!(stats.bytes_in, 0);
        assert!(decode_bytes(&packed, ContainerFormat::Gzip).unwrap().is_empty());
    }

    #[test]
    fn stats_count_every_cycle() {
        let data: Vec<u8> = (0..CHUNK_SIZE * 3).map(|i| (i * 31 % 256) as u8).collect();
        let (packed, stats) = encode_bytes(&data, &CodecOptions::default());
        assert_eq!(stats.fills, 3);
        assert_eq!(stats.bytes_in, data.len() as u64);
        assert_eq!(stats.bytes_out, packed.len() as u64);
    }

    #[test]
    fn highly_compressible_input_drains_more_than_once() {
        // 1 MiB of zeros compresses to ~1 KiB, so a single input chunk
        // inflates to many full output buffers.
        let data = vec![0u8; 1 << 20];
        let (packed, _) = encode_bytes(&data, &CodecOptions::default().level(9));

        let mut source = MemoryEndpoint::reader(&packed);
        let mut sink = MemoryEndpoint::writer();
        let stats = decode(&mut source, &mut sink, ContainerFormat::Gzip).unwrap();
        assert_eq!(stats.fills, 1);
        assert_eq!(stats.drains, (1 << 20) / CHUNK_SIZE);
        assert_eq!(sink.into_bytes(), data);
    }

    #[test]
    fn truncated_stream_yields_decoded_prefix() {
        let data = b"truncate me please, truncate me please".repeat(10);
        let (packed, _) = encode_bytes(&data, &CodecOptions::default().format(ContainerFormat::Zlib));
        let out = decode_bytes(&packed[..packed.len() - 3], ContainerFormat::Zlib).unwrap();
        assert!(data.starts_with(&out));
    }

    #[test]
    fn empty_source_decodes_to_nothing() {
        let mut source = MemoryEndpoint::reader(&[]);
        let mut sink = MemoryEndpoint::writer();
        let stats = decode(&mut source, &mut sink, ContainerFormat::Gzip).unwrap();
        assert_eq!(stats.fills, 1);
        assert_eq!(stats.drains, 0);
        assert!(sink.into_bytes().is_empty());
    }

    #[test]
    fn wrong_format_is_a_data_error() {
        let (packed, _) = encode_bytes(b"hello", &CodecOptions::default().format(ContainerFormat::Zlib));
        let err = decode_bytes(&packed, ContainerFormat::Gzip).unwrap_err();
        assert_eq!(err.status(), Some(CodecStatus::DataError));
    }
}
