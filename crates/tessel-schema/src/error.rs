use tessel_core::TypeFlags;

use crate::ParamMode;
use crate::types::MAX_DATA_SIZE;

/// A registration or lookup that violates the schema rules.
///
/// Registries are left unchanged when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("type '{name}' already registered with {field} {existing}, new declaration has {new}")]
    TypeMismatch {
        name: String,
        field: &'static str,
        existing: String,
        new: String,
    },

    #[error("name {name:?} contains a NUL byte")]
    NulInName { name: String },

    #[error("type '{name}' {field} {value} exceeds {max}", max = MAX_DATA_SIZE)]
    TooLarge {
        name: String,
        field: &'static str,
        value: u32,
    },

    #[error("size of '{name}' exceeds {max} bytes", max = MAX_DATA_SIZE)]
    SizeOverflow { name: String },

    #[error("type '{name}' has no flags")]
    EmptyFlags { name: String },

    #[error("type '{name}' with flags {flags} needs a positive size, got {size}")]
    InvalidSize {
        name: String,
        size: u32,
        flags: TypeFlags,
    },

    #[error("struct type '{name}' must be registered with size 0, got {size}")]
    StructSizeNotZero { name: String, size: u32 },

    #[error("type '{name}' aliases unknown type '{alias}'")]
    UnknownAlias { name: String, alias: String },

    #[error("type '{name}' has {elements} elements but is not an array")]
    ElementsWithoutArray { name: String, elements: u32 },

    #[error("array type '{name}' needs at least one element")]
    ArrayWithoutElements { name: String },

    #[error("array type '{name}' must alias its element type")]
    ArrayNotAliased { name: String },

    #[error("array type '{name}' can't have element type '{element}' ({flags})")]
    InvalidArrayElement {
        name: String,
        element: String,
        flags: TypeFlags,
    },

    #[error("unknown type '{name}'")]
    UnknownType { name: String },

    #[error("unknown string id {id}")]
    UnknownString { id: u32 },

    #[error("alias chain from '{name}' exceeds {depth} hops")]
    AliasCycle { name: String, depth: usize },

    #[error("struct nesting under '{name}' exceeds depth {depth}")]
    NestingTooDeep { name: String, depth: usize },

    #[error("unknown struct '{name}'")]
    UnknownStruct { name: String },

    #[error("struct '{owner}' is full ({capacity} members), can't add '{name}'")]
    TooManyMembers {
        owner: String,
        capacity: usize,
        name: String,
    },

    #[error("struct '{owner}' already has member '{name}'")]
    DuplicateMember { owner: String, name: String },

    #[error("struct '{owner}' member '{name}' uses struct type '{ty}' before its layout is registered")]
    UnsizedMember {
        owner: String,
        name: String,
        ty: String,
    },

    #[error("struct '{name}' has {added} of {declared} members")]
    MissingMembers {
        name: String,
        added: usize,
        declared: usize,
    },

    #[error("struct '{name}' has no members")]
    EmptyStruct { name: String },

    #[error("struct '{name}' size {struct_size} doesn't match its type size {type_size}")]
    StructSizeMismatch {
        name: String,
        type_size: u32,
        struct_size: u32,
    },

    #[error("struct '{name}' already registered")]
    DuplicateStruct { name: String },

    #[error("'{name}' is not finalized")]
    NotFinalized { name: String },

    #[error("'{name}' is already finalized")]
    AlreadyFinalized { name: String },

    #[error("'{name}' doesn't match the definition's name '{defined}'")]
    NameMismatch { name: String, defined: String },

    #[error("function '{function}' has all {capacity} {mode} parameters, can't add '{name}'")]
    TooManyParameters {
        function: String,
        mode: ParamMode,
        capacity: usize,
        name: String,
    },

    #[error("function '{function}' already has parameter '{name}'")]
    DuplicateParameter { function: String, name: String },

    #[error(
        "function '{function}' parameter '{param}' type '{ty}' needs {required}, type has {actual}"
    )]
    DirectionMismatch {
        function: String,
        param: String,
        ty: String,
        required: TypeFlags,
        actual: TypeFlags,
    },

    #[error(
        "function '{function}' has {inputs}/{declared_inputs} inputs and {outputs}/{declared_outputs} outputs"
    )]
    ParameterCountMismatch {
        function: String,
        inputs: usize,
        declared_inputs: usize,
        outputs: usize,
        declared_outputs: usize,
    },

    #[error("function '{name}' already registered")]
    DuplicateFunction { name: String },
}
