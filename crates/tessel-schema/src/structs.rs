//! Struct layouts with 32-bit C packing.
//!
//! Members are laid out in declaration order. Each member is padded to its
//! alignment, capped at 4 bytes, and the finished struct is padded to its
//! own alignment under the same cap.

use indexmap::IndexMap;
use tessel_core::{StringId, StringTable, TypeFlags, hash};

use crate::SchemaError;
use crate::resolve::{Resolver, checked_size};
use crate::types::{TypeEntry, TypeRegistry, check_name};

/// Largest alignment honored by the layout rules.
pub const MAX_ALIGNMENT: u32 = 4;

/// Bytes needed to move `offset` up to `alignment`, with alignment capped
/// at [`MAX_ALIGNMENT`].
pub fn compute_alignment_padding(offset: u32, alignment: u32) -> u32 {
    let mask = u64::from(alignment.saturating_sub(1).min(MAX_ALIGNMENT - 1));
    let offset = u64::from(offset);
    let padded = (offset + mask) & !mask;
    (padded - offset) as u32
}

/// Bytes a member of type `entry` occupies inside a struct.
///
/// Array members that are not references take the array's full storage
/// size. Every other member takes its type's declared size.
pub(crate) fn member_size(resolver: &Resolver<'_>, entry: &TypeEntry) -> Result<u32, SchemaError> {
    if entry.is_array() && !entry.is_reference() {
        resolver.compute_data_storage_size(entry)
    } else {
        Ok(entry.data_size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructMember {
    pub hash: u32,
    pub name_id: StringId,
    /// Name of the member's type.
    pub type_id: StringId,
    pub data_size: u32,
    /// Padding inserted before this member.
    pub alignment_padding: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructDefinition {
    name_id: StringId,
    capacity: usize,
    members: Vec<StructMember>,
    finalized: bool,
    total_size_with_padding: u32,
    max_member_alignment: u32,
}

impl StructDefinition {
    /// Empty layout with room for exactly `num_members` members.
    pub fn new(strings: &mut StringTable, name: &str, num_members: usize) -> Result<Self, SchemaError> {
        check_name(name)?;
        Ok(Self {
            name_id: strings.add_string(name),
            capacity: num_members,
            members: Vec::new(),
            finalized: false,
            total_size_with_padding: 0,
            max_member_alignment: 0,
        })
    }

    /// Rebuild a finalized layout from stored members.
    pub(crate) fn from_members(
        strings: &StringTable,
        name_id: StringId,
        members: Vec<StructMember>,
        max_member_alignment: u32,
    ) -> Result<Self, SchemaError> {
        let overflow = || strings_name(strings, name_id);
        let mut total = 0u32;
        for member in &members {
            let end = total
                .checked_add(member.alignment_padding)
                .and_then(|t| t.checked_add(member.data_size));
            total = checked_size(end, overflow)?;
        }
        total = checked_size(
            total.checked_add(compute_alignment_padding(total, max_member_alignment)),
            overflow,
        )?;
        Ok(Self {
            name_id,
            capacity: members.len(),
            members,
            finalized: true,
            total_size_with_padding: total,
            max_member_alignment,
        })
    }

    /// Append a member of type `ty`, sized by [`member_size`].
    pub fn add_member(
        &mut self,
        strings: &mut StringTable,
        types: &TypeRegistry,
        structs: &StructRegistry,
        ty: &str,
        name: &str,
    ) -> Result<(), SchemaError> {
        let (member_hash, data_size, alignment, alignment_padding, total) = {
            let resolver = Resolver::new(strings, types, structs);
            let owner = strings_name(resolver.strings(), self.name_id);

            if self.finalized {
                return Err(SchemaError::AlreadyFinalized { name: owner });
            }
            if self.members.len() >= self.capacity {
                return Err(SchemaError::TooManyMembers {
                    owner,
                    capacity: self.capacity,
                    name: name.to_owned(),
                });
            }
            check_name(name)?;
            let member_hash = hash(name);
            if self.members.iter().any(|m| m.hash == member_hash) {
                return Err(SchemaError::DuplicateMember {
                    owner,
                    name: name.to_owned(),
                });
            }

            let entry = resolver.type_entry(ty)?;
            let data_size = member_size(&resolver, entry)?;
            if data_size == 0 && entry.flags.contains(TypeFlags::STRUCT) {
                return Err(SchemaError::UnsizedMember {
                    owner,
                    name: name.to_owned(),
                    ty: ty.to_owned(),
                });
            }
            let alignment = resolver.compute_alignment(entry)?;
            let alignment_padding = compute_alignment_padding(self.total_size_with_padding, alignment);
            let end = self
                .total_size_with_padding
                .checked_add(alignment_padding)
                .and_then(|t| t.checked_add(data_size));
            let total = checked_size(end, || owner)?;
            (member_hash, data_size, alignment, alignment_padding, total)
        };

        let name_id = strings.add_string(name);
        let type_id = strings.add_string(ty);
        self.members.push(StructMember {
            hash: member_hash,
            name_id,
            type_id,
            data_size,
            alignment_padding,
        });
        self.total_size_with_padding = total;
        self.max_member_alignment = self.max_member_alignment.max(alignment);
        Ok(())
    }

    /// Lock the layout once every member slot is filled.
    pub fn finalise(&mut self, strings: &StringTable) -> Result<(), SchemaError> {
        let name = || strings_name(strings, self.name_id);
        if self.finalized {
            return Err(SchemaError::AlreadyFinalized { name: name() });
        }
        if self.members.len() != self.capacity {
            return Err(SchemaError::MissingMembers {
                name: name(),
                added: self.members.len(),
                declared: self.capacity,
            });
        }
        let padding = compute_alignment_padding(self.total_size_with_padding, self.max_member_alignment);
        self.total_size_with_padding = checked_size(self.total_size_with_padding.checked_add(padding), name)?;
        self.finalized = true;
        Ok(())
    }

    #[inline]
    pub fn name_id(&self) -> StringId {
        self.name_id
    }

    #[inline]
    pub fn num_members(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn members(&self) -> &[StructMember] {
        &self.members
    }

    pub fn member(&self, index: usize) -> Option<&StructMember> {
        self.members.get(index)
    }

    /// First member whose name hash matches.
    pub fn member_by_name(&self, name: &str) -> Option<&StructMember> {
        let member_hash = hash(name);
        self.members.iter().find(|m| m.hash == member_hash)
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    #[inline]
    pub fn total_size_with_padding(&self) -> u32 {
        self.total_size_with_padding
    }

    #[inline]
    pub fn max_member_alignment(&self) -> u32 {
        self.max_member_alignment
    }

    /// The struct's own alignment.
    #[inline]
    pub fn alignment(&self) -> u32 {
        self.max_member_alignment.min(MAX_ALIGNMENT)
    }
}

fn strings_name(strings: &StringTable, id: StringId) -> String {
    strings.get_string(id).unwrap_or_default().to_owned()
}

/// Index of a layout in its [`StructRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructId(u32);

impl StructId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Finalized struct layouts keyed by name hash.
#[derive(Debug, Clone, Default)]
pub struct StructRegistry {
    definitions: IndexMap<u32, StructDefinition>,
}

impl StructRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a finalized layout under `name`.
    ///
    /// The matching STRUCT type's size is filled in on first registration
    /// and must agree afterwards.
    pub fn add_struct_definition(
        &mut self,
        strings: &StringTable,
        types: &mut TypeRegistry,
        name: &str,
        def: StructDefinition,
    ) -> Result<StructId, SchemaError> {
        if strings.get_string_id(name) != Some(def.name_id) {
            return Err(SchemaError::NameMismatch {
                name: name.to_owned(),
                defined: strings_name(strings, def.name_id),
            });
        }
        if def.num_members() == 0 {
            return Err(SchemaError::EmptyStruct {
                name: name.to_owned(),
            });
        }
        if !def.is_finalized() {
            return Err(SchemaError::NotFinalized {
                name: name.to_owned(),
            });
        }
        let struct_hash = hash(name);
        if self.definitions.contains_key(&struct_hash) {
            return Err(SchemaError::DuplicateStruct {
                name: name.to_owned(),
            });
        }

        let Some((_, entry)) = types.get_by_hash(struct_hash) else {
            return Err(SchemaError::UnknownType {
                name: name.to_owned(),
            });
        };
        let type_size = entry.data_size;
        let struct_size = def.total_size_with_padding();
        if type_size == 0 {
            types.set_data_size(struct_hash, struct_size);
        } else if type_size != struct_size {
            return Err(SchemaError::StructSizeMismatch {
                name: name.to_owned(),
                type_size,
                struct_size,
            });
        }

        let id = StructId(self.definitions.len() as u32);
        tracing::debug!(name, id = id.0, size = struct_size, members = def.num_members(), "registered struct");
        self.definitions.insert(struct_hash, def);
        Ok(id)
    }

    pub fn get(&self, id: StructId) -> Option<&StructDefinition> {
        self.definitions.get_index(id.index()).map(|(_, def)| def)
    }

    pub fn get_by_hash(&self, hash: u32) -> Option<(StructId, &StructDefinition)> {
        self.definitions
            .get_full(&hash)
            .map(|(index, _, def)| (StructId(index as u32), def))
    }

    pub fn get_by_name(&self, name: &str) -> Option<(StructId, &StructDefinition)> {
        self.get_by_hash(hash(name))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StructId, &StructDefinition)> {
        self.definitions
            .values()
            .enumerate()
            .map(|(i, def)| (StructId(i as u32), def))
    }

    /// Insert a layout read from a definition file.
    ///
    /// Returns `None` if the name hash is already present.
    pub(crate) fn insert_loaded(&mut self, struct_hash: u32, def: StructDefinition) -> Option<StructId> {
        if self.definitions.contains_key(&struct_hash) {
            return None;
        }
        let id = StructId(self.definitions.len() as u32);
        self.definitions.insert(struct_hash, def);
        Some(id)
    }
}
