use tessel_format::{FormatError, HandshakeError, MessageKind};
use tessel_schema::SchemaError;

use crate::scalar::OutOfRange;

/// Failure while reading or writing one value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("'{ty}' is not a known scalar type")]
    UnknownScalar { ty: String },

    #[error("scalar type '{ty}' has size {found}, expected {expected}")]
    ScalarSize { ty: String, expected: u32, found: u32 },

    #[error("'{ty}' expects {expected}, got {found}")]
    WrongKind {
        ty: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("'{ty}' expects {expected} elements, got {found}")]
    WrongLength { ty: String, expected: usize, found: usize },

    #[error("struct '{ty}' member {index} is '{expected}', got '{found}'")]
    WrongField {
        ty: String,
        index: usize,
        expected: String,
        found: String,
    },

    #[error("'{ty}': {source}")]
    OutOfRange {
        ty: String,
        #[source]
        source: OutOfRange,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("function '{function}' is not finalized")]
    NotFinalized { function: String },

    #[error("function '{function}' takes {expected} bytes of arguments, got {found}")]
    PayloadSize {
        function: String,
        expected: u32,
        found: usize,
    },

    #[error("function '{function}' left {remaining} payload bytes unread")]
    TrailingBytes { function: String, remaining: usize },

    #[error("parameter {index} '{name}': {source}")]
    Parameter {
        index: u32,
        name: String,
        #[source]
        source: ValueError,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error("function '{function}' is not finalized")]
    NotFinalized { function: String },

    #[error("function '{function}' takes {expected} arguments, got {found}")]
    ArgumentCount {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("function '{function}' takes {expected} bytes of arguments, wrote {written}")]
    PayloadSize {
        function: String,
        expected: u32,
        written: usize,
    },

    #[error("parameter {index} '{name}': {source}")]
    Parameter {
        index: u32,
        name: String,
        #[source]
        source: ValueError,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RpcError {
    #[error(transparent)]
    Handshake(#[from] HandshakeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("expected a {expected} message, got {found}")]
    WrongKind {
        expected: MessageKind,
        found: MessageKind,
    },

    #[error("function call payload is {len} bytes, too short for a function id")]
    MissingFunctionId { len: usize },

    #[error("function id {id} is not in the string table")]
    UnknownFunctionId { id: u32 },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("unexpected {kind} message")]
    Unexpected { kind: MessageKind },

    #[error("unknown message kind 0x{0:04X}")]
    UnknownKind(u16),
}
