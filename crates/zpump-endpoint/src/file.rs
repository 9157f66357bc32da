use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::endpoint::{Endpoint, TransferBuffer, drained_bytes};
use crate::error::EndpointError;

/// Which way bytes flow through a [`FileEndpoint`].
///
/// Fixed at construction. A `Read` endpoint can only be filled from, a
/// `Write` endpoint can only be drained into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

/// A byte endpoint backed by a filesystem path.
///
/// The OS handle exists only between `open` and `close`:
///
/// ```text
///   new ──open()──▶ open (handle held) ──close()──▶ closed (handle dropped)
///                        │     ▲
///                        └─────┘ fill_buffer / drain_buffer
/// ```
///
/// Read-mode endpoints check that the path exists before opening so that a
/// missing input surfaces as [`EndpointError::NotFound`] instead of a
/// generic I/O failure. Write-mode endpoints create or truncate the file.
#[derive(Debug)]
pub struct FileEndpoint {
    path: PathBuf,
    direction: Direction,
    handle: Option<File>,
    eof: bool,
}

impl FileEndpoint {
    /// Create a closed endpoint for `path`.
    pub fn new(path: impl Into<PathBuf>, direction: Direction) -> Self {
        Self {
            path: path.into(),
            direction,
            handle: None,
            eof: false,
        }
    }

    /// Convenience constructor for a read-mode endpoint.
    pub fn reader(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Direction::Read)
    }

    /// Convenience constructor for a write-mode endpoint.
    pub fn writer(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Direction::Write)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether an OS handle is currently held.
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }
}

fn io_error(path: &Path, source: io::Error) -> EndpointError {
    EndpointError::io(source, Some(path.to_path_buf()))
}

fn wrong_direction(path: &Path, expected: Direction) -> EndpointError {
    let msg = match expected {
        Direction::Read => "endpoint was opened for writing",
        Direction::Write => "endpoint was opened for reading",
    };
    io_error(path, io::Error::new(io::ErrorKind::InvalidInput, msg))
}

fn not_open(path: &Path) -> EndpointError {
    io_error(path, io::Error::other("endpoint is not open"))
}

impl Endpoint for FileEndpoint {
    fn open(&mut self) -> Result<(), EndpointError> {
        let abs = std::path::absolute(&self.path).map_err(|e| io_error(&self.path, e))?;

        let file = match self.direction {
            Direction::Read => {
                if !abs.try_exists().map_err(|e| io_error(&self.path, e))? {
                    return Err(EndpointError::NotFound { path: abs });
                }
                File::open(&abs)
            }
            Direction::Write => File::create(&abs),
        }
        .map_err(|e| io_error(&self.path, e))?;

        debug!(path = %abs.display(), direction = ?self.direction, "opened file endpoint");
        self.handle = Some(file);
        self.eof = false;
        Ok(())
    }

    fn fill_buffer(&mut self, buf: &mut TransferBuffer) -> Result<usize, EndpointError> {
        if self.direction != Direction::Read {
            return Err(wrong_direction(&self.path, Direction::Read));
        }
        let Some(file) = self.handle.as_mut() else {
            return Err(not_open(&self.path));
        };

        // A single read may return fewer bytes than asked for without being
        // at end-of-file, so keep reading until the buffer is full or EOF.
        let mut filled = 0;
        let mut result = Ok(());
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        result.map_err(|e| io_error(&self.path, e))?;
        Ok(filled)
    }

    fn drain_buffer(&mut self, buf: &TransferBuffer, count: usize) -> Result<(), EndpointError> {
        if self.direction != Direction::Write {
            return Err(wrong_direction(&self.path, Direction::Write));
        }
        let Some(file) = self.handle.as_mut() else {
            return Err(not_open(&self.path));
        };
        let result = drained_bytes(buf, count).and_then(|bytes| file.write_all(bytes));
        result.map_err(|e| io_error(&self.path, e))
    }

    fn at_end(&self) -> bool {
        self.eof
    }

    fn close(&mut self) {
        if self.handle.take().is_some() {
            debug!(path = %self.path.display(), "closed file endpoint");
        }
    }
}

impl Drop for FileEndpoint {
    fn drop(&mut self) {
        self.close();
    }
}
