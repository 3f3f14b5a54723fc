//! Tessel schema registries and the definition file.
//!
//! This crate provides:
//! - `types` - the type registry with alias and array validation
//! - `resolve` - root types, alignment and packed storage sizes
//! - `structs` - struct layouts with 32-bit C packing
//! - `functions` - function signatures and argument payload sizes
//! - `emit` / `load` - the chunked definition file, both directions
//! - `source` - JSON schema source
//! - `dump` - human-readable listing

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod dump;
pub mod emit;
mod error;
mod functions;
mod load;
mod resolve;
mod schema;
pub mod source;
mod structs;
mod types;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod functions_tests;
#[cfg(test)]
mod structs_tests;

pub use dump::dump;
pub use emit::{DEFINITION_MAGIC, EmitError, emit_definition_file};
pub use error::SchemaError;
pub use functions::{FunctionDefinition, FunctionId, FunctionParameter, FunctionRegistry, ParamMode};
pub use load::{LoadError, load_definition_file};
pub use resolve::{MAX_RESOLVE_DEPTH, Resolver, element_count};
pub use schema::Schema;
pub use source::{SchemaSource, SourceError, load_schema_source};
pub use structs::{
    MAX_ALIGNMENT, StructDefinition, StructId, StructMember, StructRegistry, compute_alignment_padding,
};
pub use types::{MAX_DATA_SIZE, TypeEntry, TypeId, TypeRegistry};

/// Result type for registry operations.
pub type Result<T, E = SchemaError> = std::result::Result<T, E>;
