#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod error;
pub mod status;
pub mod zlib;

mod session;

pub use config::{CodecOptions, ContainerFormat, DEFAULT_LEVEL, MAX_LEVEL};
pub use engine::TransferStats;
pub use error::ZlibError;
pub use status::CodecStatus;
pub use zlib::Zlib;

pub use zpump_endpoint::{
    CHUNK_SIZE, Direction, Endpoint, EndpointError, FileEndpoint, IoErrorKind, MemoryEndpoint,
    TransferBuffer,
};
