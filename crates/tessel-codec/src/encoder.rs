//! Argument payload encoding, the inverse of [`Decoder`](crate::Decoder).

use tessel_format::{BinaryWriter, Endian};
use tessel_schema::{FunctionDefinition, Resolver, TypeEntry, element_count};

use crate::Value;
use crate::decoder::{check_depth, display_name, scalar_for};
use crate::error::{EncodeError, ValueError};

#[derive(Clone, Copy)]
pub struct Encoder<'a> {
    resolver: Resolver<'a>,
}

impl<'a> Encoder<'a> {
    pub fn new(resolver: Resolver<'a>) -> Self {
        Self { resolver }
    }

    /// Pack one value per parameter, in declaration order.
    pub fn encode(&self, function: &FunctionDefinition, values: &[Value]) -> Result<Vec<u8>, EncodeError> {
        let function_name = || display_name(&self.resolver, function.name_id());
        if !function.is_finalized() {
            return Err(EncodeError::NotFinalized {
                function: function_name(),
            });
        }
        let params = function.parameters();
        if values.len() != params.len() {
            return Err(EncodeError::ArgumentCount {
                function: function_name(),
                expected: params.len(),
                found: values.len(),
            });
        }

        let mut writer = BinaryWriter::new(Endian::Big);
        for (param, value) in params.iter().zip(values) {
            self.resolver
                .type_entry_for(param.type_id)
                .map_err(ValueError::from)
                .and_then(|entry| self.encode_type(entry, value, &mut writer, 0))
                .map_err(|source| EncodeError::Parameter {
                    index: param.index,
                    name: display_name(&self.resolver, param.name_id),
                    source,
                })?;
        }

        let expected = function.parameter_data_size();
        if writer.len() != expected as usize {
            return Err(EncodeError::PayloadSize {
                function: function_name(),
                expected,
                written: writer.len(),
            });
        }
        Ok(writer.into_bytes())
    }

    /// Write `value` as `entry`, checking its shape.
    pub fn encode_type(
        &self,
        entry: &'a TypeEntry,
        value: &Value,
        writer: &mut BinaryWriter,
        depth: usize,
    ) -> Result<(), ValueError> {
        let root = self.resolver.root_type(entry)?;
        if !entry.is_array() && entry.num_elements <= 1 {
            return self.encode_root(root, value, writer, depth);
        }

        let ty = self.resolver.name_of(entry.hash);
        let Value::Array(items) = value else {
            return Err(ValueError::WrongKind {
                ty,
                expected: "array",
                found: value.kind(),
            });
        };
        let count = element_count(entry) as usize;
        if items.len() != count {
            return Err(ValueError::WrongLength {
                ty,
                expected: count,
                found: items.len(),
            });
        }
        for item in items {
            self.encode_root(root, item, writer, depth)?;
        }
        Ok(())
    }

    fn encode_root(
        &self,
        root: &'a TypeEntry,
        value: &Value,
        writer: &mut BinaryWriter,
        depth: usize,
    ) -> Result<(), ValueError> {
        let ty = || self.resolver.name_of(root.hash);
        if !root.is_struct() {
            let scalar = scalar_for(&self.resolver, root)?;
            let written = scalar
                .write(value, writer)
                .map_err(|source| ValueError::OutOfRange { ty: ty(), source })?;
            if !written {
                return Err(ValueError::WrongKind {
                    ty: ty(),
                    expected: if scalar.is_float() { "float" } else { "integer" },
                    found: value.kind(),
                });
            }
            return Ok(());
        }
        check_depth(&self.resolver, root, depth)?;

        let Value::Struct(fields) = value else {
            return Err(ValueError::WrongKind {
                ty: ty(),
                expected: "struct",
                found: value.kind(),
            });
        };
        let def = self.resolver.struct_for(root)?;
        if fields.len() != def.members().len() {
            return Err(ValueError::WrongLength {
                ty: ty(),
                expected: def.members().len(),
                found: fields.len(),
            });
        }
        for (index, (member, (field_name, field_value))) in def.members().iter().zip(fields).enumerate() {
            let member_name = self.resolver.string(member.name_id)?;
            if member_name != field_name {
                return Err(ValueError::WrongField {
                    ty: ty(),
                    index,
                    expected: member_name.to_owned(),
                    found: field_name.clone(),
                });
            }
            let member_type = self.resolver.type_entry_for(member.type_id)?;
            self.encode_type(member_type, field_value, writer, depth + 1)?;
        }
        Ok(())
    }
}
