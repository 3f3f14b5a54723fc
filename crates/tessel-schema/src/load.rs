//! Definition file loading.
//!
//! Reads the four chunks written by [`emit_definition_file`] back into a
//! [`Schema`]. Stored hashes, offsets, member layouts and payload sizes
//! are checked against recomputed values, so a loaded schema re-emits byte
//! for byte.
//!
//! [`emit_definition_file`]: crate::emit_definition_file

use tessel_core::{StringId, StringTable, TypeFlags, hash};
use tessel_format::{ByteReader, ContainerView, Endian, FormatError};

use crate::emit::{CHUNK_NAMES, DEFINITION_MAGIC};
use crate::functions::{FunctionDefinition, FunctionParameter, FunctionRegistry, ParamMode, payload_size};
use crate::resolve::Resolver;
use crate::structs::{
    StructDefinition, StructMember, StructRegistry, compute_alignment_padding, member_size,
};
use crate::types::{TypeEntry, TypeRegistry};
use crate::{Schema, SchemaError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("expected {expected} chunks, found {found}")]
    ChunkCount { expected: usize, found: usize },

    #[error("{chunk}: reserved word is {value}, expected 0")]
    ReservedNotZero { chunk: &'static str, value: i32 },

    #[error("{chunk}: negative {what} {value}")]
    Negative {
        chunk: &'static str,
        what: &'static str,
        value: i32,
    },

    #[error("string {index} '{text}': stored {field} 0x{stored:X}, computed 0x{computed:X}")]
    StringMismatch {
        index: usize,
        text: String,
        field: &'static str,
        stored: u32,
        computed: u32,
    },

    #[error("string {index} '{text}' is a duplicate")]
    DuplicateString { index: usize, text: String },

    #[error("{chunk}: string id {id} out of range ({len} strings)")]
    BadStringId {
        chunk: &'static str,
        id: i32,
        len: usize,
    },

    #[error("type hash 0x{hash:08X} doesn't name a string")]
    UnnamedType { hash: u32 },

    #[error("type '{name}' has unknown flag bits 0x{bits:X}")]
    BadFlags { name: String, bits: u32 },

    #[error("{chunk}: '{name}' appears twice")]
    Duplicate { chunk: &'static str, name: String },

    #[error("{item}: stored {field} {stored}, computed {computed}")]
    LayoutMismatch {
        item: String,
        field: &'static str,
        stored: u32,
        computed: u32,
    },

    #[error("function '{function}' parameter '{param}' has invalid mode 0x{bits:X}")]
    BadParamMode {
        function: String,
        param: String,
        bits: u32,
    },
}

/// Load a definition file written by [`crate::emit_definition_file`].
pub fn load_definition_file(bytes: &[u8], endian: Endian) -> Result<Schema, LoadError> {
    let view = ContainerView::parse(bytes, endian, DEFINITION_MAGIC)?;
    if view.num_chunks() != CHUNK_NAMES.len() {
        return Err(LoadError::ChunkCount {
            expected: CHUNK_NAMES.len(),
            found: view.num_chunks(),
        });
    }

    let strings = read_string_table(&mut view.chunk_reader(0)?)?;
    let types = read_type_data(&mut view.chunk_reader(1)?, &strings)?;
    let structs = read_struct_data(&mut view.chunk_reader(2)?, &strings, &types)?;
    let functions = read_function_data(&mut view.chunk_reader(3)?, &strings, &types, &structs)?;

    tracing::debug!(
        strings = strings.len(),
        types = types.len(),
        structs = structs.len(),
        functions = functions.len(),
        "loaded definition file"
    );
    Ok(Schema::from_parts(strings, types, structs, functions))
}

fn read_count(r: &mut ByteReader<'_>, chunk: &'static str) -> Result<usize, LoadError> {
    let count = r.read_i32()?;
    if count < 0 {
        return Err(LoadError::Negative {
            chunk,
            what: "count",
            value: count,
        });
    }
    let reserved = r.read_i32()?;
    if reserved != 0 {
        return Err(LoadError::ReservedNotZero {
            chunk,
            value: reserved,
        });
    }
    Ok(count as usize)
}

// Fixed record sizes in bytes.
const STRING_RECORD: usize = 8;
const TYPE_RECORD: usize = 20;
const OFFSET_RECORD: usize = 4;
const MEMBER_RECORD: usize = 20;
const PARAMETER_RECORD: usize = 20;

/// Reject `count` records that can't fit in the rest of the chunk.
fn check_fits(r: &ByteReader<'_>, count: usize, record: usize) -> Result<(), LoadError> {
    let needed = count.saturating_mul(record);
    if needed > r.remaining() {
        return Err(FormatError::Truncated {
            offset: r.position(),
            needed,
            available: r.remaining(),
        }
        .into());
    }
    Ok(())
}

fn read_non_negative(r: &mut ByteReader<'_>, chunk: &'static str, what: &'static str) -> Result<u32, LoadError> {
    let value = r.read_i32()?;
    if value < 0 {
        return Err(LoadError::Negative { chunk, what, value });
    }
    Ok(value as u32)
}

fn read_string_id(
    r: &mut ByteReader<'_>,
    strings: &StringTable,
    chunk: &'static str,
) -> Result<StringId, LoadError> {
    let id = r.read_i32()?;
    if id < 0 || id as usize >= strings.len() {
        return Err(LoadError::BadStringId {
            chunk,
            id,
            len: strings.len(),
        });
    }
    Ok(StringId::from_raw(id as u32))
}

fn read_string_table(r: &mut ByteReader<'_>) -> Result<StringTable, LoadError> {
    const CHUNK: &str = "StringTable";
    let count = read_count(r, CHUNK)?;
    check_fits(r, count, STRING_RECORD)?;
    let mut stored = Vec::with_capacity(count);
    for _ in 0..count {
        stored.push((r.read_u32()?, r.read_u32()?));
    }

    let mut strings = StringTable::new();
    for (index, (stored_hash, stored_offset)) in stored.into_iter().enumerate() {
        let text = r.read_cstr()?;
        let id = strings.add_string(text);
        if id.index() != index {
            return Err(LoadError::DuplicateString {
                index,
                text: text.to_owned(),
            });
        }
        let Some(entry) = strings.entry(id) else {
            continue;
        };
        let mismatch = |field, stored, computed| LoadError::StringMismatch {
            index,
            text: text.to_owned(),
            field,
            stored,
            computed,
        };
        if entry.hash != stored_hash {
            return Err(mismatch("hash", stored_hash, entry.hash));
        }
        if entry.offset != stored_offset {
            return Err(mismatch("offset", stored_offset, entry.offset));
        }
    }
    Ok(strings)
}

fn read_type_data(r: &mut ByteReader<'_>, strings: &StringTable) -> Result<TypeRegistry, LoadError> {
    const CHUNK: &str = "TypeData";
    let count = read_count(r, CHUNK)?;
    check_fits(r, count, TYPE_RECORD)?;
    let mut types = TypeRegistry::new();
    for _ in 0..count {
        let type_hash = r.read_u32()?;
        let data_size = r.read_u32()?;
        let bits = r.read_u32()?;
        let aliased_type_id = read_string_id(r, strings, CHUNK)?;
        let num_elements = read_non_negative(r, CHUNK, "element count")?;

        let Some(name) = strings.get_string_by_hash(type_hash) else {
            return Err(LoadError::UnnamedType { hash: type_hash });
        };
        let Some(flags) = TypeFlags::from_bits(bits) else {
            return Err(LoadError::BadFlags {
                name: name.to_owned(),
                bits,
            });
        };
        let entry = TypeEntry {
            hash: type_hash,
            data_size,
            flags,
            aliased_type_id,
            num_elements,
        };
        if types.insert_loaded(entry).is_none() {
            return Err(LoadError::Duplicate {
                chunk: CHUNK,
                name: name.to_owned(),
            });
        }
    }
    Ok(types)
}

/// Relative offsets of each definition in a struct or function chunk.
fn read_offset_table(r: &mut ByteReader<'_>, chunk: &'static str) -> Result<Vec<usize>, LoadError> {
    let count = read_count(r, chunk)?;
    check_fits(r, count, OFFSET_RECORD)?;
    let mut offsets = Vec::with_capacity(count);
    for _ in 0..count {
        offsets.push(r.read_u32()? as usize);
    }
    Ok(offsets)
}

fn read_struct_data(
    r: &mut ByteReader<'_>,
    strings: &StringTable,
    types: &TypeRegistry,
) -> Result<StructRegistry, LoadError> {
    const CHUNK: &str = "StructData";
    let mut structs = StructRegistry::new();
    for offset in read_offset_table(r, CHUNK)? {
        r.seek(offset)?;
        let name_id = read_string_id(r, strings, CHUNK)?;
        let num_members = read_non_negative(r, CHUNK, "member count")? as usize;
        check_fits(r, num_members, MEMBER_RECORD)?;
        let mut members = Vec::with_capacity(num_members);
        for _ in 0..num_members {
            members.push(StructMember {
                hash: r.read_u32()?,
                name_id: read_string_id(r, strings, CHUNK)?,
                type_id: read_string_id(r, strings, CHUNK)?,
                data_size: read_non_negative(r, CHUNK, "member size")?,
                alignment_padding: read_non_negative(r, CHUNK, "member padding")?,
            });
        }

        let name = strings.get_string(name_id).unwrap_or_default();
        let def = {
            let resolver = Resolver::new(strings, types, &structs);
            let max_alignment = check_member_layout(&resolver, name, &members)?;
            let def = StructDefinition::from_members(strings, name_id, members, max_alignment)?;
            let type_size = resolver.type_entry(name)?.data_size;
            if type_size != def.total_size_with_padding() {
                return Err(LoadError::LayoutMismatch {
                    item: format!("struct '{name}'"),
                    field: "size",
                    stored: type_size,
                    computed: def.total_size_with_padding(),
                });
            }
            def
        };
        if structs.insert_loaded(hash(name), def).is_none() {
            return Err(LoadError::Duplicate {
                chunk: CHUNK,
                name: name.to_owned(),
            });
        }
    }
    Ok(structs)
}

/// Recompute each stored member's size and padding. Returns the largest
/// member alignment.
fn check_member_layout(resolver: &Resolver<'_>, owner: &str, members: &[StructMember]) -> Result<u32, LoadError> {
    let mut offset = 0u32;
    let mut max_alignment = 0;
    for member in members {
        let entry = resolver.type_entry_for(member.type_id)?;
        let alignment = resolver.compute_alignment(entry)?;
        let checks = [
            ("size", member.data_size, member_size(resolver, entry)?),
            ("padding", member.alignment_padding, compute_alignment_padding(offset, alignment)),
        ];
        for (field, stored, computed) in checks {
            if stored != computed {
                let member_name = resolver.strings().get_string(member.name_id).unwrap_or_default();
                return Err(LoadError::LayoutMismatch {
                    item: format!("struct '{owner}' member '{member_name}'"),
                    field,
                    stored,
                    computed,
                });
            }
        }
        offset = offset
            .saturating_add(member.alignment_padding)
            .saturating_add(member.data_size);
        max_alignment = max_alignment.max(alignment);
    }
    Ok(max_alignment)
}

fn read_function_data(
    r: &mut ByteReader<'_>,
    strings: &StringTable,
    types: &TypeRegistry,
    structs: &StructRegistry,
) -> Result<FunctionRegistry, LoadError> {
    const CHUNK: &str = "FunctionData";
    let mut functions = FunctionRegistry::new();
    for offset in read_offset_table(r, CHUNK)? {
        r.seek(offset)?;
        let name_id = read_string_id(r, strings, CHUNK)?;
        let return_type_id = read_string_id(r, strings, CHUNK)?;
        let parameter_data_size = read_non_negative(r, CHUNK, "payload size")?;
        let num_inputs = read_non_negative(r, CHUNK, "input count")? as usize;
        let num_outputs = read_non_negative(r, CHUNK, "output count")? as usize;
        let name = strings.get_string(name_id).unwrap_or_default();

        check_fits(r, num_inputs + num_outputs, PARAMETER_RECORD)?;
        let mut parameters = Vec::with_capacity(num_inputs + num_outputs);
        for _ in 0..num_inputs + num_outputs {
            let param_hash = r.read_u32()?;
            let param_name_id = read_string_id(r, strings, CHUNK)?;
            let type_id = read_string_id(r, strings, CHUNK)?;
            let index = read_non_negative(r, CHUNK, "parameter index")?;
            let bits = r.read_u32()?;
            let Some(mode) = ParamMode::from_bits(bits) else {
                return Err(LoadError::BadParamMode {
                    function: name.to_owned(),
                    param: strings.get_string(param_name_id).unwrap_or_default().to_owned(),
                    bits,
                });
            };
            parameters.push(FunctionParameter {
                hash: param_hash,
                name_id: param_name_id,
                type_id,
                index,
                mode,
            });
        }

        let resolver = Resolver::new(strings, types, structs);
        let computed = payload_size(&resolver, &parameters, || name.to_owned())?;
        if computed != parameter_data_size {
            return Err(LoadError::LayoutMismatch {
                item: format!("function '{name}'"),
                field: "payload size",
                stored: parameter_data_size,
                computed,
            });
        }

        let def = FunctionDefinition::from_parameters(name_id, return_type_id, parameters, parameter_data_size);
        if def.num_inputs() != num_inputs {
            return Err(SchemaError::ParameterCountMismatch {
                function: name.to_owned(),
                inputs: def.num_inputs(),
                declared_inputs: num_inputs,
                outputs: def.num_outputs(),
                declared_outputs: num_outputs,
            }
            .into());
        }
        if functions.insert_loaded(hash(name), def).is_none() {
            return Err(LoadError::Duplicate {
                chunk: CHUNK,
                name: name.to_owned(),
            });
        }
    }
    Ok(functions)
}
