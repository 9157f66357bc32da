use zpump_endpoint::EndpointError;

use crate::status::CodecStatus;

/// Errors raised by an encode or decode call.
///
/// Every error is surfaced only after the call's endpoints have been
/// closed and its codec session torn down.
///
/// ```text
///   ZlibError
///   ├── Codec { status, message }   ← algorithm reported a fatal status
///   └── Endpoint(EndpointError)     ← from zpump-endpoint
///         ├── NotFound              ← input path does not exist
///         └── Io                    ← open/read/write failed
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ZlibError {
    /// The compression algorithm could not continue.
    #[error("codec error ({status}): {message}")]
    Codec { status: CodecStatus, message: String },

    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

impl ZlibError {
    pub(crate) fn codec(status: CodecStatus, message: impl Into<String>) -> Self {
        Self::Codec {
            status,
            message: message.into(),
        }
    }

    /// The algorithm status, for codec failures.
    pub fn status(&self) -> Option<CodecStatus> {
        match self {
            Self::Codec { status, .. } => Some(*status),
            Self::Endpoint(_) => None,
        }
    }

    /// Whether this is a missing-input failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Endpoint(EndpointError::NotFound { .. }))
    }
}
