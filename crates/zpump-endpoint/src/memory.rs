use crate::endpoint::{CHUNK_SIZE, Endpoint, TransferBuffer, drained_bytes};
use crate::error::EndpointError;

/// A byte endpoint backed by memory.
///
/// As a source it reads from a borrowed byte slice through a cursor; as a
/// sink it appends to an owned, growable buffer. Reads never fail, and a
/// drain fails only for a count larger than the transfer buffer. `open`
/// and `close` are no-ops.
///
/// Invariant: `cursor <= input.len()`, and [`at_end`](Endpoint::at_end)
/// is true exactly when `cursor == input.len()`.
#[derive(Debug, Default)]
pub struct MemoryEndpoint<'a> {
    input: &'a [u8],
    cursor: usize,
    output: Vec<u8>,
}

impl<'a> MemoryEndpoint<'a> {
    /// A source that yields the bytes of `input`.
    pub fn reader(input: &'a [u8]) -> Self {
        Self {
            input,
            cursor: 0,
            output: Vec::new(),
        }
    }

    /// An empty sink.
    pub fn writer() -> Self {
        Self::default()
    }

    /// Number of source bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.cursor
    }

    /// Bytes drained into this endpoint so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.output
    }

    /// Consume the endpoint and return everything drained into it.
    pub fn into_bytes(self) -> Vec<u8> {
        self.output
    }
}

impl Endpoint for MemoryEndpoint<'_> {
    fn open(&mut self) -> Result<(), EndpointError> {
        Ok(())
    }

    fn fill_buffer(&mut self, buf: &mut TransferBuffer) -> Result<usize, EndpointError> {
        let count = self.remaining().min(CHUNK_SIZE);
        buf[..count].copy_from_slice(&self.input[self.cursor..self.cursor + count]);
        self.cursor += count;
        Ok(count)
    }

    fn drain_buffer(&mut self, buf: &TransferBuffer, count: usize) -> Result<(), EndpointError> {
        let bytes = drained_bytes(buf, count).map_err(|e| EndpointError::io(e, None))?;
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn at_end(&self) -> bool {
        self.cursor == self.input.len()
    }

    fn close(&mut self) {}
}
