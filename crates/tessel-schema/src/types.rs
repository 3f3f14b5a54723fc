//! Type registry.
//!
//! Types are keyed by the hash of their name. An alias names its target by
//! string id; the chain is resolved through the string table and back into
//! this registry by hash (see [`Resolver`](crate::Resolver)).

use indexmap::IndexMap;
use indexmap::map::Entry;
use tessel_core::{StringId, StringTable, TypeFlags, hash};

use crate::SchemaError;

/// Largest size or element count a definition file can store (`int32`).
pub const MAX_DATA_SIZE: u32 = i32::MAX as u32;

/// Names are NUL-delimited in the string blob.
pub(crate) fn check_name(name: &str) -> Result<(), SchemaError> {
    if name.contains('\0') {
        return Err(SchemaError::NulInName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

/// Index of a type in its [`TypeRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeEntry {
    pub hash: u32,
    pub data_size: u32,
    pub flags: TypeFlags,
    /// Name of the aliased type. Equals the type's own name when not an alias.
    pub aliased_type_id: StringId,
    pub num_elements: u32,
}

impl TypeEntry {
    #[inline]
    pub fn is_alias(&self) -> bool {
        self.flags.contains(TypeFlags::ALIAS)
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.flags.contains(TypeFlags::ARRAY)
    }

    #[inline]
    pub fn is_struct(&self) -> bool {
        self.flags.contains(TypeFlags::STRUCT)
    }

    #[inline]
    pub fn is_pointer(&self) -> bool {
        self.flags.contains(TypeFlags::POINTER)
    }

    #[inline]
    pub fn is_reference(&self) -> bool {
        self.flags.contains(TypeFlags::REFERENCE)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: IndexMap<u32, TypeEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, or confirm an identical earlier registration.
    ///
    /// `aliased_name` is the type's own name for non-alias types. A
    /// different name sets `ALIAS`. Names are only interned on success.
    pub fn add_type(
        &mut self,
        strings: &mut StringTable,
        name: &str,
        data_size: u32,
        flags: TypeFlags,
        aliased_name: &str,
        num_elements: u32,
    ) -> Result<TypeId, SchemaError> {
        check_name(name)?;
        check_name(aliased_name)?;
        let name_hash = hash(name);
        let mut flags = flags;
        if name != aliased_name {
            flags |= TypeFlags::ALIAS;
        }

        if let Some((index, _, existing)) = self.entries.get_full(&name_hash) {
            let existing_alias = strings.get_string(existing.aliased_type_id).unwrap_or("");
            check_redeclaration(name, existing, existing_alias, data_size, flags, aliased_name, num_elements)?;
            return Ok(TypeId(index as u32));
        }

        self.validate(name, data_size, flags, aliased_name, num_elements)?;

        strings.add_string(name);
        let aliased_type_id = strings.add_string(aliased_name);
        let entry = TypeEntry {
            hash: name_hash,
            data_size,
            flags,
            aliased_type_id,
            num_elements,
        };
        let id = TypeId(self.entries.len() as u32);
        self.entries.insert(name_hash, entry);
        tracing::debug!(name, id = id.0, size = data_size, %flags, "registered type");
        Ok(id)
    }

    fn validate(
        &self,
        name: &str,
        data_size: u32,
        flags: TypeFlags,
        aliased_name: &str,
        num_elements: u32,
    ) -> Result<(), SchemaError> {
        for (field, value) in [("size", data_size), ("element count", num_elements)] {
            if value > MAX_DATA_SIZE {
                return Err(SchemaError::TooLarge {
                    name: name.to_owned(),
                    field,
                    value,
                });
            }
        }

        if data_size < 1 && flags.intersects(TypeFlags::SIZED) {
            return Err(SchemaError::InvalidSize {
                name: name.to_owned(),
                size: data_size,
                flags,
            });
        }

        let shaped = TypeFlags::POINTER | TypeFlags::REFERENCE | TypeFlags::ARRAY | TypeFlags::ALIAS;
        if flags.contains(TypeFlags::STRUCT) && !flags.intersects(shaped) && data_size != 0 {
            return Err(SchemaError::StructSizeNotZero {
                name: name.to_owned(),
                size: data_size,
            });
        }

        if flags.is_empty() {
            return Err(SchemaError::EmptyFlags {
                name: name.to_owned(),
            });
        }

        let aliased = if flags.contains(TypeFlags::ALIAS) {
            let aliased = self.get_by_name(aliased_name).map(|(_, entry)| entry);
            if aliased.is_none() {
                return Err(SchemaError::UnknownAlias {
                    name: name.to_owned(),
                    alias: aliased_name.to_owned(),
                });
            }
            aliased
        } else {
            None
        };

        if num_elements > 0 && !flags.contains(TypeFlags::ARRAY) {
            return Err(SchemaError::ElementsWithoutArray {
                name: name.to_owned(),
                elements: num_elements,
            });
        }

        if flags.contains(TypeFlags::ARRAY) {
            if num_elements == 0 {
                return Err(SchemaError::ArrayWithoutElements {
                    name: name.to_owned(),
                });
            }
            let Some(element) = aliased else {
                return Err(SchemaError::ArrayNotAliased {
                    name: name.to_owned(),
                });
            };
            let element_ok = if element.is_array() {
                false
            } else if flags.contains(TypeFlags::REFERENCE) {
                element.is_pointer() && !element.is_reference()
            } else {
                !element.flags.intersects(TypeFlags::POINTER | TypeFlags::REFERENCE)
            };
            if !element_ok {
                return Err(SchemaError::InvalidArrayElement {
                    name: name.to_owned(),
                    element: aliased_name.to_owned(),
                    flags: element.flags,
                });
            }
        }

        Ok(())
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> Option<&TypeEntry> {
        self.entries.get_index(id.index()).map(|(_, entry)| entry)
    }

    pub fn get_by_hash(&self, hash: u32) -> Option<(TypeId, &TypeEntry)> {
        self.entries
            .get_full(&hash)
            .map(|(index, _, entry)| (TypeId(index as u32), entry))
    }

    pub fn get_by_name(&self, name: &str) -> Option<(TypeId, &TypeEntry)> {
        self.get_by_hash(hash(name))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeEntry)> {
        self.entries
            .values()
            .enumerate()
            .map(|(i, entry)| (TypeId(i as u32), entry))
    }

    /// Fill in a struct type's size once its layout is known.
    pub(crate) fn set_data_size(&mut self, hash: u32, data_size: u32) {
        if let Some(entry) = self.entries.get_mut(&hash) {
            entry.data_size = data_size;
        }
    }

    /// Insert an entry read from a definition file, without validation.
    ///
    /// Returns `None` if the hash is already present.
    pub(crate) fn insert_loaded(&mut self, entry: TypeEntry) -> Option<TypeId> {
        let index = self.entries.len();
        match self.entries.entry(entry.hash) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Some(TypeId(index as u32))
            }
        }
    }
}

fn check_redeclaration(
    name: &str,
    existing: &TypeEntry,
    existing_alias: &str,
    data_size: u32,
    flags: TypeFlags,
    aliased_name: &str,
    num_elements: u32,
) -> Result<(), SchemaError> {
    let mismatch = |field: &'static str, existing: String, new: String| SchemaError::TypeMismatch {
        name: name.to_owned(),
        field,
        existing,
        new,
    };

    if existing.data_size != data_size {
        return Err(mismatch("size", existing.data_size.to_string(), data_size.to_string()));
    }
    if existing.flags != flags {
        return Err(mismatch("flags", existing.flags.to_string(), flags.to_string()));
    }
    if existing_alias != aliased_name {
        return Err(mismatch("alias", format!("'{existing_alias}'"), format!("'{aliased_name}'")));
    }
    if existing.num_elements != num_elements {
        return Err(mismatch(
            "elements",
            existing.num_elements.to_string(),
            num_elements.to_string(),
        ));
    }
    Ok(())
}
