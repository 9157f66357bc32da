use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised by a byte endpoint.
///
/// ```text
///   EndpointError
///   ├── NotFound   ← a read-mode path does not resolve to an existing file
///   └── Io         ← open/read/write failed; carries the platform sub-kind
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// The input path does not exist.
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// An open, read, or write call failed.
    ///
    /// `kind` is derived from the platform error code when there is one,
    /// so callers can distinguish "permission denied" from "no space left"
    /// without inspecting the raw `source`.
    #[error("I/O error ({kind}){}: {source}", path_suffix(.path.as_ref()))]
    Io {
        kind: IoErrorKind,
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
}

impl EndpointError {
    /// Wrap an I/O error, classifying it by its platform code.
    pub fn io(source: io::Error, path: Option<PathBuf>) -> Self {
        Self::Io {
            kind: IoErrorKind::from_io(&source),
            path,
            source,
        }
    }

    /// The raw platform error code, if the failure carried one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::NotFound { .. } => None,
            Self::Io { source, .. } => source.raw_os_error(),
        }
    }
}

fn path_suffix(path: Option<&PathBuf>) -> String {
    match path {
        Some(p) => format!(" on {}", p.display()),
        None => String::new(),
    }
}

/// Descriptive sub-kind for an [`EndpointError::Io`] failure.
///
/// ```text
/// ┌──────────────────────────┬──────────────┐
/// │ Variant                  │ POSIX code   │
/// ├──────────────────────────┼──────────────┤
/// │ PermissionDenied         │ EACCES/EPERM │
/// │ Interrupted              │ EINTR        │
/// │ IsADirectory             │ EISDIR       │
/// │ TooManySymlinks          │ ELOOP        │
/// │ TooManyOpenFiles         │ EMFILE       │
/// │ TooManyOpenFilesInSystem │ ENFILE       │
/// │ NameTooLong              │ ENAMETOOLONG │
/// │ NoSuchEntry              │ ENOENT       │
/// │ NoSpace                  │ ENOSPC       │
/// │ NotADirectory            │ ENOTDIR      │
/// │ SpecialFile              │ ENXIO        │
/// │ Overflow                 │ EOVERFLOW    │
/// │ ReadOnlyFilesystem       │ EROFS        │
/// │ InvalidMode              │ EINVAL       │
/// │ OutOfMemory              │ ENOMEM       │
/// │ TextFileBusy             │ ETXTBSY      │
/// │ Unknown                  │ anything else│
/// └──────────────────────────┴──────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoErrorKind {
    PermissionDenied,
    Interrupted,
    IsADirectory,
    TooManySymlinks,
    TooManyOpenFiles,
    TooManyOpenFilesInSystem,
    NameTooLong,
    NoSuchEntry,
    NoSpace,
    NotADirectory,
    SpecialFile,
    Overflow,
    ReadOnlyFilesystem,
    InvalidMode,
    OutOfMemory,
    TextFileBusy,
    /// Unmapped failure. Carries the raw platform code when one exists.
    Unknown(Option<i32>),
}

impl IoErrorKind {
    /// Classify an I/O error, preferring its raw platform code.
    pub fn from_io(err: &io::Error) -> Self {
        match err.raw_os_error() {
            Some(code) => Self::from_raw_os_error(code),
            None => Self::from_error_kind(err.kind()),
        }
    }

    /// Map a raw POSIX error code.
    #[cfg(unix)]
    pub fn from_raw_os_error(code: i32) -> Self {
        match code {
            libc::EACCES | libc::EPERM => Self::PermissionDenied,
            libc::EINTR => Self::Interrupted,
            libc::EISDIR => Self::IsADirectory,
            libc::ELOOP => Self::TooManySymlinks,
            libc::EMFILE => Self::TooManyOpenFiles,
            libc::ENFILE => Self::TooManyOpenFilesInSystem,
            libc::ENAMETOOLONG => Self::NameTooLong,
            libc::ENOENT => Self::NoSuchEntry,
            libc::ENOSPC => Self::NoSpace,
            libc::ENOTDIR => Self::NotADirectory,
            libc::ENXIO => Self::SpecialFile,
            libc::EOVERFLOW => Self::Overflow,
            libc::EROFS => Self::ReadOnlyFilesystem,
            libc::EINVAL => Self::InvalidMode,
            libc::ENOMEM => Self::OutOfMemory,
            libc::ETXTBSY => Self::TextFileBusy,
            other => Self::Unknown(Some(other)),
        }
    }

    /// Map a raw platform error code through the portable `io::ErrorKind`.
    #[cfg(not(unix))]
    pub fn from_raw_os_error(code: i32) -> Self {
        match Self::from_error_kind(io::Error::from_raw_os_error(code).kind()) {
            Self::Unknown(_) => Self::Unknown(Some(code)),
            kind => kind,
        }
    }

    fn from_error_kind(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::Interrupted => Self::Interrupted,
            io::ErrorKind::NotFound => Self::NoSuchEntry,
            io::ErrorKind::InvalidInput => Self::InvalidMode,
            io::ErrorKind::OutOfMemory => Self::OutOfMemory,
            _ => Self::Unknown(None),
        }
    }

    /// Human-readable description of the sub-kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission denied",
            Self::Interrupted => "interrupted system call",
            Self::IsADirectory => "is a directory",
            Self::TooManySymlinks => "too many symbolic links",
            Self::TooManyOpenFiles => "too many open files in process",
            Self::TooManyOpenFilesInSystem => "too many open files in system",
            Self::NameTooLong => "file name too long",
            Self::NoSuchEntry => "no such file or directory",
            Self::NoSpace => "no space left on device",
            Self::NotADirectory => "not a directory",
            Self::SpecialFile => "special file without a device",
            Self::Overflow => "value too large for file",
            Self::ReadOnlyFilesystem => "read-only file system",
            Self::InvalidMode => "invalid mode",
            Self::OutOfMemory => "out of memory",
            Self::TextFileBusy => "text file busy",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for IoErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(Some(code)) => write!(f, "unknown error code {code}"),
            kind => f.write_str(kind.as_str()),
        }
    }
}
