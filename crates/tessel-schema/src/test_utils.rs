//! Shared fixtures for registry tests.

use tessel_core::TypeFlags;

use crate::{Schema, SchemaError};

pub const IN_POD: TypeFlags = TypeFlags::INPUT.union(TypeFlags::POD);
pub const IN_OUT_POD: TypeFlags = IN_POD.union(TypeFlags::OUTPUT);
pub const IN_OUT_STRUCT: TypeFlags = TypeFlags::INPUT
    .union(TypeFlags::OUTPUT)
    .union(TypeFlags::STRUCT);

/// `char`, `short`, `int`, `float` and `float*`.
pub fn primitives() -> Result<Schema, SchemaError> {
    let mut schema = Schema::new();
    schema.add_type("char", 1, IN_POD, "char", 0)?;
    schema.add_type("short", 2, IN_POD, "short", 0)?;
    schema.add_type("int", 4, IN_OUT_POD, "int", 0)?;
    schema.add_type("float", 4, IN_OUT_POD, "float", 0)?;
    schema.add_type("float*", 4, TypeFlags::INPUT | TypeFlags::OUTPUT | TypeFlags::POINTER, "float", 0)?;
    Ok(schema)
}

/// `char`, `float`, `float*`, struct `Point { char c; float f; }` and
/// `void Move(Point to, float* status)`.
pub fn sample_schema() -> Result<Schema, SchemaError> {
    let mut schema = Schema::new();
    schema.add_type("char", 1, IN_POD, "char", 0)?;
    schema.add_type("float", 4, IN_OUT_POD, "float", 0)?;
    schema.add_type("float*", 4, TypeFlags::INPUT | TypeFlags::OUTPUT | TypeFlags::POINTER, "float", 0)?;
    schema.add_type("Point", 0, IN_OUT_STRUCT, "Point", 0)?;
    schema.define_struct("Point", &[("char", "c"), ("float", "f")])?;
    schema.define_function("Move", "void", &[("Point", "to")], &[("float*", "status")])?;
    Ok(schema)
}
