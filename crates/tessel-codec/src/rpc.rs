//! Function call messages and server-side dispatch.

use tessel_core::StringId;
use tessel_format::{Message, MessageKind};
use tessel_schema::{FunctionDefinition, Schema};

use crate::decoder::{Arguments, Decoder};
use crate::encoder::Encoder;
use crate::error::RpcError;
use crate::Value;

/// A FunctionRpc payload: the function's name id followed by packed
/// arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionCall {
    pub function_name_id: StringId,
    pub arguments: Vec<u8>,
}

impl FunctionCall {
    /// Encode `values` as a call to the function named `function`.
    pub fn encode(schema: &Schema, function: &str, values: &[Value]) -> Result<Self, RpcError> {
        let (function_name_id, def) = lookup(schema, function)?;
        let arguments = Encoder::new(schema.resolver()).encode(def, values)?;
        Ok(Self {
            function_name_id,
            arguments,
        })
    }

    pub fn from_message(message: &Message) -> Result<Self, RpcError> {
        if message.kind != MessageKind::FunctionRpc {
            return Err(RpcError::WrongKind {
                expected: MessageKind::FunctionRpc,
                found: message.kind,
            });
        }
        let Some((id, arguments)) = message.payload.split_first_chunk::<4>() else {
            return Err(RpcError::MissingFunctionId {
                len: message.payload.len(),
            });
        };
        Ok(Self {
            function_name_id: StringId::from_raw(u32::from_be_bytes(*id)),
            arguments: arguments.to_vec(),
        })
    }

    pub fn to_message(&self, id: u16) -> Message {
        let mut payload = Vec::with_capacity(4 + self.arguments.len());
        payload.extend_from_slice(&self.function_name_id.as_u32().to_be_bytes());
        payload.extend_from_slice(&self.arguments);
        Message::new(MessageKind::FunctionRpc, id, payload)
    }

    /// Resolve the function and decode the arguments.
    pub fn decode(&self, schema: &Schema) -> Result<(String, Arguments), RpcError> {
        let name = schema
            .strings()
            .get_string(self.function_name_id)
            .ok_or(RpcError::UnknownFunctionId {
                id: self.function_name_id.as_u32(),
            })?;
        let (_, def) = lookup(schema, name)?;
        let arguments = Decoder::new(schema.resolver()).decode(def, &self.arguments)?;
        Ok((name.to_owned(), arguments))
    }
}

fn lookup<'s>(schema: &'s Schema, function: &str) -> Result<(StringId, &'s FunctionDefinition), RpcError> {
    let (_, def) = schema
        .functions()
        .get_by_name(function)
        .ok_or_else(|| RpcError::UnknownFunction {
            name: function.to_owned(),
        })?;
    Ok((def.name_id(), def))
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecodedCall {
    pub id: u16,
    pub function: String,
    pub arguments: Arguments,
}

/// What the server does with an incoming message.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// Send this back to finish the handshake.
    ConnectResponse(Message),
    Call(DecodedCall),
    /// Test message text.
    Test(String),
}

/// Dispatch one incoming message against `schema`.
pub fn handle_message(schema: &Schema, message: &Message) -> Result<Reply, RpcError> {
    tracing::debug!(kind = %message.kind, id = message.id, len = message.payload.len(), "message");
    match message.kind {
        MessageKind::Connect => Ok(Reply::ConnectResponse(Message::connect_response(message)?)),
        MessageKind::FunctionRpc => {
            let (function, arguments) = FunctionCall::from_message(message)?.decode(schema)?;
            Ok(Reply::Call(DecodedCall {
                id: message.id,
                function,
                arguments,
            }))
        }
        MessageKind::ServerTest | MessageKind::ClientTest => {
            Ok(Reply::Test(String::from_utf8_lossy(&message.payload).into_owned()))
        }
        MessageKind::ConnectResponse => Err(RpcError::Unexpected { kind: message.kind }),
        MessageKind::Unknown(raw) => Err(RpcError::UnknownKind(raw)),
    }
}
