//! Binary plumbing for tessel.
//!
//! This crate contains:
//! - Endian-aware byte writer/reader with backpatch fixups
//! - The chunked container format (writer state machine and read view)
//! - RPC message framing and the connect handshake

mod container;
mod error;
mod message;
mod reader;
mod writer;

#[cfg(test)]
mod message_tests;
#[cfg(test)]
mod reader_tests;

pub use container::{CHUNK_ALIGN, ChunkContainer, ChunkState, ContainerView};
pub use error::{ContainerError, FormatError};
pub use message::{
    HandshakeError, Message, MessageHeader, MessageKind, verify_connect_response,
};
pub use reader::ByteReader;
pub use writer::{BinaryWriter, Endian, Fixup, UNWRITTEN};
