#![warn(clippy::pedantic)]

pub mod endpoint;
pub mod error;
pub mod file;
pub mod memory;

pub use endpoint::{CHUNK_SIZE, Endpoint, TransferBuffer};
pub use error::{EndpointError, IoErrorKind};
pub use file::{Direction, FileEndpoint};
pub use memory::MemoryEndpoint;
