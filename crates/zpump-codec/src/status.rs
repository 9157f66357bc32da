use std::fmt;

/// Status reported by the deflate/inflate algorithm.
///
/// Mirrors zlib's integer return codes so that failures can be reported
/// with the code a zlib user would recognise.
///
/// ```text
/// ┌──────────────┬──────┬────────────────────────────────────────────┐
/// │ Variant      │ Code │ Meaning                                    │
/// ├──────────────┼──────┼────────────────────────────────────────────┤
/// │ Ok           │  0   │ progress was made                          │
/// │ StreamEnd    │  1   │ the logical end of the stream was reached  │
/// │ NeedDict     │  2   │ a preset dictionary is required            │
/// │ Errno        │ -1   │ file operation error inside the library    │
/// │ StreamError  │ -2   │ inconsistent state or invalid parameter    │
/// │ DataError    │ -3   │ input is not a valid compressed stream     │
/// │ MemError     │ -4   │ not enough memory                          │
/// │ BufError     │ -5   │ no progress possible / truncated input     │
/// │ VersionError │ -6   │ incompatible library version               │
/// │ Unknown      │ any  │ anything else                              │
/// └──────────────┴──────┴────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodecStatus {
    Ok,
    StreamEnd,
    NeedDict,
    Errno,
    StreamError,
    DataError,
    MemError,
    BufError,
    VersionError,
    Unknown(i32),
}

impl CodecStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::StreamEnd,
            2 => Self::NeedDict,
            -1 => Self::Errno,
            -2 => Self::StreamError,
            -3 => Self::DataError,
            -4 => Self::MemError,
            -5 => Self::BufError,
            -6 => Self::VersionError,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::StreamEnd => 1,
            Self::NeedDict => 2,
            Self::Errno => -1,
            Self::StreamError => -2,
            Self::DataError => -3,
            Self::MemError => -4,
            Self::BufError => -5,
            Self::VersionError => -6,
            Self::Unknown(code) => code,
        }
    }

    /// Human-readable status name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::StreamEnd => "stream end",
            Self::NeedDict => "need dictionary",
            Self::Errno => "file error",
            Self::StreamError => "stream error",
            Self::DataError => "data error",
            Self::MemError => "insufficient memory",
            Self::BufError => "buffer error",
            Self::VersionError => "incompatible version",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for CodecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "unknown status {code}"),
            status => f.write_str(status.name()),
        }
    }
}
