//! Alias, alignment and storage-size resolution.
//!
//! All walks are bounded by [`MAX_RESOLVE_DEPTH`]: alias chains count hops,
//! struct recursion counts nesting levels.

use tessel_core::{StringId, StringTable, hash};

use crate::SchemaError;
use crate::structs::{StructDefinition, StructRegistry};
use crate::types::{MAX_DATA_SIZE, TypeEntry, TypeRegistry};

pub const MAX_RESOLVE_DEPTH: usize = 64;

/// Read-only view over the registries needed to resolve a type.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    strings: &'a StringTable,
    types: &'a TypeRegistry,
    structs: &'a StructRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(strings: &'a StringTable, types: &'a TypeRegistry, structs: &'a StructRegistry) -> Self {
        Self {
            strings,
            types,
            structs,
        }
    }

    pub fn strings(&self) -> &'a StringTable {
        self.strings
    }

    pub fn types(&self) -> &'a TypeRegistry {
        self.types
    }

    pub fn structs(&self) -> &'a StructRegistry {
        self.structs
    }

    /// Name for diagnostics. Falls back to the hex hash.
    pub fn name_of(&self, hash: u32) -> String {
        match self.strings.get_string_by_hash(hash) {
            Some(name) => name.to_owned(),
            None => format!("0x{hash:08X}"),
        }
    }

    pub fn string(&self, id: StringId) -> Result<&'a str, SchemaError> {
        self.strings
            .get_string(id)
            .ok_or(SchemaError::UnknownString { id: id.as_u32() })
    }

    /// Type entry named by a string id (member, parameter and alias ids).
    pub fn type_entry_for(&self, id: StringId) -> Result<&'a TypeEntry, SchemaError> {
        let name = self.string(id)?;
        self.type_entry(name)
    }

    pub fn type_entry(&self, name: &str) -> Result<&'a TypeEntry, SchemaError> {
        self.types
            .get_by_hash(hash(name))
            .map(|(_, entry)| entry)
            .ok_or_else(|| SchemaError::UnknownType {
                name: name.to_owned(),
            })
    }

    /// The entry `entry` aliases. Non-alias entries name themselves.
    pub fn alias_target(&self, entry: &TypeEntry) -> Result<&'a TypeEntry, SchemaError> {
        self.type_entry_for(entry.aliased_type_id)
    }

    /// Follow the alias chain to the first non-alias entry.
    pub fn root_type(&self, entry: &'a TypeEntry) -> Result<&'a TypeEntry, SchemaError> {
        let mut current = entry;
        for _ in 0..MAX_RESOLVE_DEPTH {
            if !current.is_alias() {
                return Ok(current);
            }
            current = self.alias_target(current)?;
        }
        if !current.is_alias() {
            return Ok(current);
        }
        Err(SchemaError::AliasCycle {
            name: self.name_of(entry.hash),
            depth: MAX_RESOLVE_DEPTH,
        })
    }

    /// Struct layout for a STRUCT entry, looked up through its root.
    pub fn struct_for(&self, entry: &'a TypeEntry) -> Result<&'a StructDefinition, SchemaError> {
        let root = self.root_type(entry)?;
        self.structs
            .get_by_hash(root.hash)
            .map(|(_, def)| def)
            .ok_or_else(|| SchemaError::UnknownStruct {
                name: self.name_of(root.hash),
            })
    }

    /// Alignment of `entry` inside a struct. Struct alignment is the largest
    /// member alignment. Arrays align like their element root.
    pub fn compute_alignment(&self, entry: &'a TypeEntry) -> Result<u32, SchemaError> {
        self.alignment_at(entry, 0)
    }

    fn alignment_at(&self, entry: &'a TypeEntry, depth: usize) -> Result<u32, SchemaError> {
        let entry = if entry.is_array() || entry.is_struct() {
            self.root_type(entry)?
        } else {
            entry
        };
        if !entry.is_struct() {
            return Ok(entry.data_size);
        }

        let def = self.enter_struct(entry, depth)?;
        let mut alignment = 0;
        for member in def.members() {
            let member_type = self.type_entry_for(member.type_id)?;
            alignment = alignment.max(self.alignment_at(member_type, depth + 1)?);
        }
        Ok(alignment)
    }

    /// Bytes `entry` occupies in a packed argument payload.
    ///
    /// Pointers and references contribute their pointee's root size.
    /// Structs sum their members recursively, without padding.
    pub fn compute_data_storage_size(&self, entry: &'a TypeEntry) -> Result<u32, SchemaError> {
        self.storage_at(entry, 0)
    }

    fn storage_at(&self, entry: &'a TypeEntry, depth: usize) -> Result<u32, SchemaError> {
        let root = self.root_type(entry)?;
        let unit = if root.is_struct() {
            let def = self.enter_struct(root, depth)?;
            let mut total = 0u32;
            for member in def.members() {
                let member_type = self.type_entry_for(member.type_id)?;
                let size = self.storage_at(member_type, depth + 1)?;
                total = checked_size(total.checked_add(size), || self.name_of(root.hash))?;
            }
            total
        } else {
            root.data_size
        };
        checked_size(unit.checked_mul(element_count(entry)), || self.name_of(entry.hash))
    }

    fn enter_struct(&self, entry: &'a TypeEntry, depth: usize) -> Result<&'a StructDefinition, SchemaError> {
        if depth >= MAX_RESOLVE_DEPTH {
            return Err(SchemaError::NestingTooDeep {
                name: self.name_of(entry.hash),
                depth: MAX_RESOLVE_DEPTH,
            });
        }
        self.struct_for(entry)
    }
}

/// A size that still fits the definition file, or [`SchemaError::SizeOverflow`]
/// naming the item being measured.
pub(crate) fn checked_size(size: Option<u32>, name: impl FnOnce() -> String) -> Result<u32, SchemaError> {
    size.filter(|&size| size <= MAX_DATA_SIZE)
        .ok_or_else(|| SchemaError::SizeOverflow { name: name() })
}

/// Number of consecutive values `entry` stands for on the wire.
#[inline]
pub fn element_count(entry: &TypeEntry) -> u32 {
    entry.num_elements.max(1)
}
