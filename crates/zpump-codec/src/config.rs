use std::fmt;

/// Default compression level (0–9 scale), matching zlib's own default.
pub const DEFAULT_LEVEL: u8 = 6;

/// Highest accepted compression level.
pub const MAX_LEVEL: u8 = 9;

/// zlib's maximum window size exponent (32 KiB window).
pub(crate) const MAX_WBITS: u8 = 15;

/// Envelope wrapped around the deflate payload.
///
/// All three formats share the same pump loop; they differ only in the
/// window-bits value handed to the algorithm at initialization.
///
/// ```text
/// ┌────────────┬─────────────┬──────────────────────────────────────────┐
/// │ Format     │ Window bits │ Framing                                  │
/// ├────────────┼─────────────┼──────────────────────────────────────────┤
/// │ RawDeflate │ -15         │ none                                     │
/// │ Zlib       │ 15          │ 2-byte header + Adler-32 trailer         │
/// │ Gzip       │ 31 (15|16)  │ 10-byte header (1F 8B ..) + CRC-32/ISIZE │
/// └────────────┴─────────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    RawDeflate,
    Zlib,
    #[default]
    Gzip,
}

impl ContainerFormat {
    /// The zlib window-bits parameter selecting this format.
    pub fn window_bits(self) -> i8 {
        #[allow(clippy::cast_possible_wrap)]
        let bits = MAX_WBITS as i8;
        match self {
            Self::RawDeflate => -bits,
            Self::Zlib => bits,
            Self::Gzip => bits | 16,
        }
    }

    /// Inverse of [`window_bits`](Self::window_bits).
    ///
    /// Only the maximum window size is recognised.
    pub fn from_window_bits(bits: i8) -> Option<Self> {
        [Self::RawDeflate, Self::Zlib, Self::Gzip]
            .into_iter()
            .find(|format| format.window_bits() == bits)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::RawDeflate => "raw-deflate",
            Self::Zlib => "zlib",
            Self::Gzip => "gzip",
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-call codec configuration.
///
/// ```text
/// ┌────────┬──────────────────────────────────────────────┬─────────┐
/// │ Field  │ Purpose                                      │ Default │
/// ├────────┼──────────────────────────────────────────────┼─────────┤
/// │ format │ Container envelope for encode and decode     │ Gzip    │
/// │ level  │ Compression effort 0–9, used by encode only  │ 6       │
/// └────────┴──────────────────────────────────────────────┴─────────┘
/// ```
///
/// The level is not validated here. An out-of-range level is rejected when
/// the compression session is initialized, the same point at which zlib
/// would reject it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecOptions {
    pub format: ContainerFormat,
    pub level: u8,
}

impl CodecOptions {
    #[must_use]
    pub fn format(mut self, format: ContainerFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            format: ContainerFormat::Gzip,
            level: DEFAULT_LEVEL,
        }
    }
}
