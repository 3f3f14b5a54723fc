//! RPC message framing.
//!
//! Every message is an 8-byte big-endian header followed by the payload:
//! ```text
//! u16 kind | u16 id | u32 payload_size | payload[payload_size]
//! ```

use std::fmt;

use tessel_core::{hash, hash_bytes};

use crate::{BinaryWriter, ByteReader, Endian, FormatError};

/// Known message kinds. Anything else is kept as [`MessageKind::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Connect,
    ConnectResponse,
    FunctionRpc,
    /// Test message sent by the server.
    ServerTest,
    /// Test message sent by the client.
    ClientTest,
    Unknown(u16),
}

impl MessageKind {
    pub fn from_u16(raw: u16) -> Self {
        match raw {
            0x0001 => Self::Connect,
            0x0002 => Self::ConnectResponse,
            0x0010 => Self::FunctionRpc,
            0x0033 => Self::ServerTest,
            0x0066 => Self::ClientTest,
            other => Self::Unknown(other),
        }
    }

    pub fn as_u16(self) -> u16 {
        match self {
            Self::Connect => 0x0001,
            Self::ConnectResponse => 0x0002,
            Self::FunctionRpc => 0x0010,
            Self::ServerTest => 0x0033,
            Self::ClientTest => 0x0066,
            Self::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => f.write_str("Connect"),
            Self::ConnectResponse => f.write_str("ConnectResponse"),
            Self::FunctionRpc => f.write_str("FunctionRpc"),
            Self::ServerTest => f.write_str("ServerTest"),
            Self::ClientTest => f.write_str("ClientTest"),
            Self::Unknown(raw) => write!(f, "Unknown(0x{raw:04X})"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageHeader {
    pub kind: MessageKind,
    pub id: u16,
    pub payload_size: u32,
}

impl MessageHeader {
    pub const SIZE: usize = 8;

    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, FormatError> {
        Ok(Self {
            kind: MessageKind::from_u16(reader.read_u16()?),
            id: reader.read_u16()?,
            payload_size: reader.read_u32()?,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16(self.kind.as_u16());
        writer.write_u16(self.id);
        writer.write_u32(self.payload_size);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub id: u16,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(kind: MessageKind, id: u16, payload: Vec<u8>) -> Self {
        Self { kind, id, payload }
    }

    pub fn header(&self) -> MessageHeader {
        MessageHeader {
            kind: self.kind,
            id: self.id,
            payload_size: self.payload.len() as u32,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::new(Endian::Big);
        self.header().write(&mut writer);
        writer.write_bytes(&self.payload);
        writer.into_bytes()
    }

    /// Decode one message from the front of `bytes`.
    ///
    /// Returns the message and the number of bytes consumed, so frames can be
    /// read back to back from a stream buffer.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize), FormatError> {
        let mut reader = ByteReader::new(bytes, Endian::Big);
        let header = MessageHeader::read(&mut reader)?;
        let payload = reader.read_bytes(header.payload_size as usize)?.to_vec();
        let message = Self {
            kind: header.kind,
            id: header.id,
            payload,
        };
        Ok((message, reader.position()))
    }

    /// Client hello carrying a token the server must hash back.
    pub fn connect(id: u16, token: &str) -> Self {
        Self::new(MessageKind::Connect, id, token.as_bytes().to_vec())
    }

    /// Server reply to a [`MessageKind::Connect`]: same id, `hash(token)` as
    /// a big-endian `u32`.
    pub fn connect_response(request: &Message) -> Result<Self, HandshakeError> {
        if request.kind != MessageKind::Connect {
            return Err(HandshakeError::WrongKind {
                expected: MessageKind::Connect,
                found: request.kind,
            });
        }
        let token_hash = hash_bytes(&request.payload);
        Ok(Self::new(
            MessageKind::ConnectResponse,
            request.id,
            token_hash.to_be_bytes().to_vec(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandshakeError {
    #[error("wrong message kind: expected {expected}, found {found}")]
    WrongKind {
        expected: MessageKind,
        found: MessageKind,
    },

    #[error("wrong message id: expected {expected}, found {found}")]
    WrongId { expected: u16, found: u16 },

    #[error("wrong payload size: expected 4, found {0}")]
    WrongPayloadSize(usize),

    #[error("wrong response hash: expected 0x{expected:X}, found 0x{found:X}")]
    WrongHash { expected: u32, found: u32 },
}

/// Check a server's reply against the token that was sent.
pub fn verify_connect_response(
    token: &str,
    id: u16,
    response: &Message,
) -> Result<(), HandshakeError> {
    if response.kind != MessageKind::ConnectResponse {
        return Err(HandshakeError::WrongKind {
            expected: MessageKind::ConnectResponse,
            found: response.kind,
        });
    }
    if response.id != id {
        return Err(HandshakeError::WrongId {
            expected: id,
            found: response.id,
        });
    }
    let Ok(bytes) = <[u8; 4]>::try_from(response.payload.as_slice()) else {
        return Err(HandshakeError::WrongPayloadSize(response.payload.len()));
    };
    let found = u32::from_be_bytes(bytes);
    let expected = hash(token);
    if found != expected {
        return Err(HandshakeError::WrongHash { expected, found });
    }
    Ok(())
}
