//! Argument payload decoding.
//!
//! Payloads are packed in parameter order with no padding. Scalars are
//! big-endian and take their root type's size, so a pointer parameter
//! carries its pointee.

use tessel_core::StringId;
use tessel_format::{ByteReader, Endian};
use tessel_schema::{FunctionDefinition, MAX_RESOLVE_DEPTH, Resolver, SchemaError, TypeEntry, element_count};

use crate::Value;
use crate::error::{DecodeError, ValueError};
use crate::scalar::Scalar;

/// Decoded arguments, in declaration order.
pub type Arguments = Vec<(String, Value)>;

#[derive(Clone, Copy)]
pub struct Decoder<'a> {
    resolver: Resolver<'a>,
}

impl<'a> Decoder<'a> {
    pub fn new(resolver: Resolver<'a>) -> Self {
        Self { resolver }
    }

    /// Decode every parameter of `function` from `payload`.
    ///
    /// `payload` must be exactly the function's parameter data size. The
    /// first failing parameter aborts the whole decode.
    pub fn decode(&self, function: &FunctionDefinition, payload: &[u8]) -> Result<Arguments, DecodeError> {
        if !function.is_finalized() {
            return Err(DecodeError::NotFinalized {
                function: display_name(&self.resolver, function.name_id()),
            });
        }
        let expected = function.parameter_data_size();
        if payload.len() != expected as usize {
            return Err(DecodeError::PayloadSize {
                function: display_name(&self.resolver, function.name_id()),
                expected,
                found: payload.len(),
            });
        }

        let mut reader = ByteReader::new(payload, Endian::Big);
        let mut arguments = Vec::with_capacity(function.parameters().len());
        for param in function.parameters() {
            let name = display_name(&self.resolver, param.name_id);
            let value = self
                .resolver
                .type_entry_for(param.type_id)
                .map_err(ValueError::from)
                .and_then(|entry| self.decode_type(entry, &mut reader, 0))
                .map_err(|source| DecodeError::Parameter {
                    index: param.index,
                    name: name.clone(),
                    source,
                })?;
            tracing::debug!(parameter = %name, ?value, "decoded");
            arguments.push((name, value));
        }
        if !reader.is_at_end() {
            return Err(DecodeError::TrailingBytes {
                function: display_name(&self.resolver, function.name_id()),
                remaining: reader.remaining(),
            });
        }
        Ok(arguments)
    }

    /// Decode the value of one type entry.
    ///
    /// Array entries produce an array. A struct entry with one element
    /// produces a struct.
    pub fn decode_type(
        &self,
        entry: &'a TypeEntry,
        reader: &mut ByteReader<'_>,
        depth: usize,
    ) -> Result<Value, ValueError> {
        let root = self.resolver.root_type(entry)?;
        if !entry.is_array() && entry.num_elements <= 1 {
            return self.decode_root(root, reader, depth);
        }

        // Every element reads at least one byte.
        let count = element_count(entry) as usize;
        let mut items = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            items.push(self.decode_root(root, reader, depth)?);
        }
        Ok(Value::Array(items))
    }

    fn decode_root(&self, root: &'a TypeEntry, reader: &mut ByteReader<'_>, depth: usize) -> Result<Value, ValueError> {
        if !root.is_struct() {
            let scalar = scalar_for(&self.resolver, root)?;
            return Ok(scalar.read(reader)?);
        }
        check_depth(&self.resolver, root, depth)?;

        let def = self.resolver.struct_for(root)?;
        let mut fields = Vec::with_capacity(def.members().len());
        for member in def.members() {
            let member_type = self.resolver.type_entry_for(member.type_id)?;
            let value = self.decode_type(member_type, reader, depth + 1)?;
            fields.push((self.resolver.string(member.name_id)?.to_owned(), value));
        }
        Ok(Value::Struct(fields))
    }
}

/// Host scalar for a non-struct root type, checked against its size.
pub(crate) fn scalar_for(resolver: &Resolver<'_>, root: &TypeEntry) -> Result<Scalar, ValueError> {
    let ty = || resolver.name_of(root.hash);
    let scalar = Scalar::from_type_hash(root.hash).ok_or_else(|| ValueError::UnknownScalar { ty: ty() })?;
    if scalar.width() != root.data_size {
        return Err(ValueError::ScalarSize {
            ty: ty(),
            expected: scalar.width(),
            found: root.data_size,
        });
    }
    Ok(scalar)
}

pub(crate) fn check_depth(resolver: &Resolver<'_>, root: &TypeEntry, depth: usize) -> Result<(), ValueError> {
    if depth >= MAX_RESOLVE_DEPTH {
        return Err(SchemaError::NestingTooDeep {
            name: resolver.name_of(root.hash),
            depth: MAX_RESOLVE_DEPTH,
        }
        .into());
    }
    Ok(())
}

/// Name behind a string id, or `#id` when the table doesn't have it.
pub(crate) fn display_name(resolver: &Resolver<'_>, id: StringId) -> String {
    match resolver.string(id) {
        Ok(name) => name.to_owned(),
        Err(_) => format!("#{}", id.as_u32()),
    }
}
