//! Per-chunk writers.
//!
//! Every chunk starts with `i32 count | i32 reserved(0)`. Struct and
//! function chunks follow that with a `u32` offset table, relative to the
//! chunk start, backpatched as each definition is written.

use tessel_core::StringTable;
use tessel_format::{BinaryWriter, Fixup};

use super::EmitError;
use crate::functions::{FunctionDefinition, FunctionRegistry};
use crate::structs::{StructDefinition, StructRegistry};
use crate::types::TypeRegistry;

fn count_i32(what: &'static str, count: usize) -> Result<i32, EmitError> {
    i32::try_from(count).map_err(|_| EmitError::TooMany { what, count })
}

fn stored_i32(what: &'static str, value: u32) -> Result<i32, EmitError> {
    i32::try_from(value).map_err(|_| EmitError::TooLarge { what, value })
}

fn write_count_header(w: &mut BinaryWriter, what: &'static str, count: usize) -> Result<(), EmitError> {
    w.write_i32(count_i32(what, count)?);
    w.write_i32(0);
    Ok(())
}

pub(super) fn write_string_table(w: &mut BinaryWriter, strings: &StringTable) -> Result<(), EmitError> {
    write_count_header(w, "string", strings.len())?;
    for (_, _, entry) in strings.iter() {
        w.write_u32(entry.hash);
        w.write_i32(stored_i32("string offset", entry.offset)?);
    }
    w.write_bytes(&strings.to_blob());
    Ok(())
}

pub(super) fn write_type_data(w: &mut BinaryWriter, types: &TypeRegistry) -> Result<(), EmitError> {
    write_count_header(w, "type", types.len())?;
    for (_, entry) in types.iter() {
        w.write_u32(entry.hash);
        w.write_u32(entry.data_size);
        w.write_u32(entry.flags.bits());
        w.write_i32(entry.aliased_type_id.as_i32());
        w.write_i32(stored_i32("element count", entry.num_elements)?);
    }
    Ok(())
}

/// Count header plus an offset table, returning the table's fixups.
fn write_offset_table(
    w: &mut BinaryWriter,
    what: &'static str,
    count: usize,
) -> Result<Vec<Fixup>, EmitError> {
    write_count_header(w, what, count)?;
    Ok((0..count).map(|_| w.reserve_u32()).collect())
}

pub(super) fn write_struct_data(w: &mut BinaryWriter, structs: &StructRegistry) -> Result<(), EmitError> {
    let chunk_start = w.position();
    let fixups = write_offset_table(w, "struct", structs.len())?;
    for ((_, def), fixup) in structs.iter().zip(fixups) {
        let offset = (w.position() - chunk_start) as u32;
        w.patch_u32(fixup, offset)?;
        write_struct(w, def)?;
    }
    Ok(())
}

fn write_struct(w: &mut BinaryWriter, def: &StructDefinition) -> Result<(), EmitError> {
    w.write_i32(def.name_id().as_i32());
    w.write_i32(count_i32("member", def.members().len())?);
    for member in def.members() {
        w.write_u32(member.hash);
        w.write_i32(member.name_id.as_i32());
        w.write_i32(member.type_id.as_i32());
        w.write_i32(stored_i32("member size", member.data_size)?);
        w.write_i32(stored_i32("member padding", member.alignment_padding)?);
    }
    Ok(())
}

pub(super) fn write_function_data(
    w: &mut BinaryWriter,
    functions: &FunctionRegistry,
) -> Result<(), EmitError> {
    let chunk_start = w.position();
    let fixups = write_offset_table(w, "function", functions.len())?;
    for ((_, def), fixup) in functions.iter().zip(fixups) {
        let offset = (w.position() - chunk_start) as u32;
        w.patch_u32(fixup, offset)?;
        write_function(w, def)?;
    }
    Ok(())
}

fn write_function(w: &mut BinaryWriter, def: &FunctionDefinition) -> Result<(), EmitError> {
    w.write_i32(def.name_id().as_i32());
    w.write_i32(def.return_type_id().as_i32());
    w.write_i32(stored_i32("payload size", def.parameter_data_size())?);
    w.write_i32(count_i32("input", def.num_inputs())?);
    w.write_i32(count_i32("output", def.num_outputs())?);
    for param in def.parameters() {
        w.write_u32(param.hash);
        w.write_i32(param.name_id.as_i32());
        w.write_i32(param.type_id.as_i32());
        w.write_i32(stored_i32("parameter index", param.index)?);
        w.write_u32(param.mode.flag().bits());
    }
    Ok(())
}
