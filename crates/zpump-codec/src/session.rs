// Per-call deflate/inflate working state.
//
// A session wraps one of flate2's low-level state machines and reports each
// step as (bytes consumed, bytes produced, status). The working memory is
// released when the session is dropped, so any early return from the pump
// loop tears it down.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::config::{ContainerFormat, MAX_LEVEL, MAX_WBITS};
use crate::error::ZlibError;
use crate::status::CodecStatus;

/// Result of a single algorithm step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Step {
    pub consumed: usize,
    pub produced: usize,
    pub status: CodecStatus,
}

/// Whether more input will follow the current chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FlushMode {
    NoFlush,
    Finish,
}

pub(crate) struct InflateSession {
    inner: Decompress,
}

impl InflateSession {
    pub fn new(format: ContainerFormat) -> Self {
        let inner = match format {
            ContainerFormat::RawDeflate => Decompress::new_with_window_bits(false, MAX_WBITS),
            ContainerFormat::Zlib => Decompress::new_with_window_bits(true, MAX_WBITS),
            ContainerFormat::Gzip => Decompress::new_gzip(MAX_WBITS),
        };
        Self { inner }
    }

    /// Feed `input`, writing at most `output.len()` decompressed bytes.
    pub fn step(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step, ZlibError> {
        let (in_before, out_before) = (self.inner.total_in(), self.inner.total_out());
        let status = self
            .inner
            .decompress(input, output, FlushDecompress::None)
            .map_err(|e| {
                if e.needs_dictionary().is_some() {
                    ZlibError::codec(CodecStatus::NeedDict, "stream requires a preset dictionary")
                } else {
                    ZlibError::codec(CodecStatus::DataError, e.to_string())
                }
            })?;

        // A single step never moves more than one transfer buffer.
        #[allow(clippy::cast_possible_truncation)]
        let step = Step {
            consumed: (self.inner.total_in() - in_before) as usize,
            produced: (self.inner.total_out() - out_before) as usize,
            status: map_status(status),
        };
        Ok(step)
    }

    pub fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    pub fn total_out(&self) -> u64 {
        self.inner.total_out()
    }
}

pub(crate) struct DeflateSession {
    inner: Compress,
}

impl DeflateSession {
    /// # Errors
    ///
    /// Fails with [`CodecStatus::StreamError`] for a level above
    /// [`MAX_LEVEL`], as zlib's initializer does.
    pub fn new(format: ContainerFormat, level: u8) -> Result<Self, ZlibError> {
        if level > MAX_LEVEL {
            return Err(ZlibError::codec(
                CodecStatus::StreamError,
                format!("invalid compression level {level} (expected 0-{MAX_LEVEL})"),
            ));
        }
        let level = Compression::new(u32::from(level));
        let inner = match format {
            ContainerFormat::RawDeflate => Compress::new_with_window_bits(level, false, MAX_WBITS),
            ContainerFormat::Zlib => Compress::new_with_window_bits(level, true, MAX_WBITS),
            ContainerFormat::Gzip => Compress::new_gzip(level, MAX_WBITS),
        };
        Ok(Self { inner })
    }

    pub fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> Result<Step, ZlibError> {
        let flush = match flush {
            FlushMode::NoFlush => FlushCompress::None,
            FlushMode::Finish => FlushCompress::Finish,
        };
        let (in_before, out_before) = (self.inner.total_in(), self.inner.total_out());
        let status = self
            .inner
            .compress(input, output, flush)
            .map_err(|e| ZlibError::codec(CodecStatus::StreamError, e.to_string()))?;

        // A single step never moves more than one transfer buffer.
        #[allow(clippy::cast_possible_truncation)]
        let step = Step {
            consumed: (self.inner.total_in() - in_before) as usize,
            produced: (self.inner.total_out() - out_before) as usize,
            status: map_status(status),
        };
        Ok(step)
    }

    pub fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    pub fn total_out(&self) -> u64 {
        self.inner.total_out()
    }
}

fn map_status(status: Status) -> CodecStatus {
    match status {
        Status::Ok => CodecStatus::Ok,
        Status::BufError => CodecStatus::BufError,
        Status::StreamEnd => CodecStatus::StreamEnd,
    }
}
