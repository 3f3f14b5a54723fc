//! Definition file emission.
//!
//! A definition file is a chunk container with magic [`DEFINITION_MAGIC`]
//! and four chunks, always in this order:
//! - `StringTable`: hashes, blob offsets and the string blob
//! - `TypeData`: fixed 20-byte type entries
//! - `StructData`: offset table plus struct layouts
//! - `FunctionData`: offset table plus function signatures

mod chunks;
mod emitter;
mod error;


pub use emitter::emit_definition_file;
pub use error::EmitError;

pub const DEFINITION_MAGIC: &str = "TSLD";

/// Chunk names in file order.
pub const CHUNK_NAMES: [&str; 4] = ["StringTable", "TypeData", "StructData", "FunctionData"];
