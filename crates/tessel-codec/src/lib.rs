//! Argument payloads for tessel functions.
//!
//! Turns packed big-endian argument bytes into a [`Value`] tree and back,
//! driven by a finalized function signature, and dispatches RPC messages.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod decoder;
mod encoder;
mod error;
mod rpc;
mod scalar;
mod value;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod encoder_tests;

pub use decoder::{Arguments, Decoder};
pub use encoder::Encoder;
pub use error::{DecodeError, EncodeError, RpcError, ValueError};
pub use rpc::{DecodedCall, FunctionCall, Reply, handle_message};
pub use scalar::{OutOfRange, Scalar};
pub use value::{Value, format_arguments};
