use tessel_format::{ChunkContainer, Endian};

use super::chunks::{write_function_data, write_string_table, write_struct_data, write_type_data};
use super::{CHUNK_NAMES, DEFINITION_MAGIC, EmitError};
use crate::Schema;

/// Serialize a schema into a definition file.
pub fn emit_definition_file(schema: &Schema, endian: Endian) -> Result<Vec<u8>, EmitError> {
    let [strings, types, structs, functions] = CHUNK_NAMES;
    let mut container = ChunkContainer::new(DEFINITION_MAGIC, CHUNK_NAMES.len(), endian);

    let w = container.start_chunk(strings)?;
    write_string_table(w, schema.strings())?;
    container.end_chunk()?;

    let w = container.start_chunk(types)?;
    write_type_data(w, schema.types())?;
    container.end_chunk()?;

    let w = container.start_chunk(structs)?;
    write_struct_data(w, schema.structs())?;
    container.end_chunk()?;

    let w = container.start_chunk(functions)?;
    write_function_data(w, schema.functions())?;
    container.end_chunk()?;

    let bytes = container.close()?;
    tracing::debug!(
        len = bytes.len(),
        strings = schema.strings().len(),
        types = schema.types().len(),
        structs = schema.structs().len(),
        functions = schema.functions().len(),
        "emitted definition file"
    );
    Ok(bytes)
}
