//! Function signatures.
//!
//! A signature declares how many input and output parameters it takes.
//! Parameters are added one at a time, each checked against its type's
//! direction flags, and the argument payload size is fixed on finalise.

use std::fmt;

use indexmap::IndexMap;
use tessel_core::{StringId, StringTable, TypeFlags, hash};

use crate::SchemaError;
use crate::resolve::{Resolver, checked_size};
use crate::types::{TypeRegistry, check_name};

/// Direction of a parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamMode {
    Input,
    Output,
}

impl ParamMode {
    /// Capability flag a parameter type must carry for this direction.
    pub fn flag(self) -> TypeFlags {
        match self {
            Self::Input => TypeFlags::INPUT,
            Self::Output => TypeFlags::OUTPUT,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        [Self::Input, Self::Output]
            .into_iter()
            .find(|mode| mode.flag().bits() == bits)
    }
}

impl fmt::Display for ParamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("INPUT"),
            Self::Output => f.write_str("OUTPUT"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionParameter {
    pub hash: u32,
    pub name_id: StringId,
    pub type_id: StringId,
    /// Position among all parameters, inputs and outputs together.
    pub index: u32,
    pub mode: ParamMode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDefinition {
    name_id: StringId,
    return_type_id: StringId,
    num_inputs: usize,
    num_outputs: usize,
    parameters: Vec<FunctionParameter>,
    parameter_data_size: u32,
    finalized: bool,
}

impl FunctionDefinition {
    pub fn new(
        strings: &mut StringTable,
        name: &str,
        return_type: &str,
        num_inputs: usize,
        num_outputs: usize,
    ) -> Result<Self, SchemaError> {
        check_name(name)?;
        check_name(return_type)?;
        Ok(Self {
            name_id: strings.add_string(name),
            return_type_id: strings.add_string(return_type),
            num_inputs,
            num_outputs,
            parameters: Vec::new(),
            parameter_data_size: 0,
            finalized: false,
        })
    }

    pub(crate) fn from_parameters(
        name_id: StringId,
        return_type_id: StringId,
        parameters: Vec<FunctionParameter>,
        parameter_data_size: u32,
    ) -> Self {
        let num_inputs = parameters.iter().filter(|p| p.mode == ParamMode::Input).count();
        Self {
            name_id,
            return_type_id,
            num_inputs,
            num_outputs: parameters.len() - num_inputs,
            parameters,
            parameter_data_size,
            finalized: true,
        }
    }

    pub fn add_parameter(
        &mut self,
        strings: &mut StringTable,
        types: &TypeRegistry,
        mode: ParamMode,
        ty: &str,
        name: &str,
    ) -> Result<(), SchemaError> {
        let function = || strings.get_string(self.name_id).unwrap_or_default().to_owned();
        if self.finalized {
            return Err(SchemaError::AlreadyFinalized { name: function() });
        }

        let capacity = match mode {
            ParamMode::Input => self.num_inputs,
            ParamMode::Output => self.num_outputs,
        };
        if self.count(mode) >= capacity {
            return Err(SchemaError::TooManyParameters {
                function: function(),
                mode,
                capacity,
                name: name.to_owned(),
            });
        }

        check_name(name)?;
        let param_hash = hash(name);
        if self.parameters.iter().any(|p| p.hash == param_hash) {
            return Err(SchemaError::DuplicateParameter {
                function: function(),
                name: name.to_owned(),
            });
        }

        let Some((_, entry)) = types.get_by_name(ty) else {
            return Err(SchemaError::UnknownType { name: ty.to_owned() });
        };
        if !entry.flags.contains(mode.flag()) {
            return Err(SchemaError::DirectionMismatch {
                function: function(),
                param: name.to_owned(),
                ty: ty.to_owned(),
                required: mode.flag(),
                actual: entry.flags,
            });
        }

        let name_id = strings.add_string(name);
        let type_id = strings.add_string(ty);
        self.parameters.push(FunctionParameter {
            hash: param_hash,
            name_id,
            type_id,
            index: self.parameters.len() as u32,
            mode,
        });
        Ok(())
    }

    /// Lock the signature and compute the argument payload size.
    pub fn finalise(&mut self, resolver: &Resolver<'_>) -> Result<(), SchemaError> {
        let function = || {
            resolver
                .strings()
                .get_string(self.name_id)
                .unwrap_or_default()
                .to_owned()
        };
        if self.finalized {
            return Err(SchemaError::AlreadyFinalized { name: function() });
        }
        let inputs = self.count(ParamMode::Input);
        let outputs = self.count(ParamMode::Output);
        if inputs != self.num_inputs || outputs != self.num_outputs {
            return Err(SchemaError::ParameterCountMismatch {
                function: function(),
                inputs,
                declared_inputs: self.num_inputs,
                outputs,
                declared_outputs: self.num_outputs,
            });
        }

        self.parameter_data_size = payload_size(resolver, &self.parameters, function)?;
        self.finalized = true;
        Ok(())
    }

    fn count(&self, mode: ParamMode) -> usize {
        self.parameters.iter().filter(|p| p.mode == mode).count()
    }

    #[inline]
    pub fn name_id(&self) -> StringId {
        self.name_id
    }

    #[inline]
    pub fn return_type_id(&self) -> StringId {
        self.return_type_id
    }

    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    #[inline]
    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    #[inline]
    pub fn parameters(&self) -> &[FunctionParameter] {
        &self.parameters
    }

    /// First parameter whose name hash matches.
    pub fn parameter_by_name(&self, name: &str) -> Option<&FunctionParameter> {
        let param_hash = hash(name);
        self.parameters.iter().find(|p| p.hash == param_hash)
    }

    /// Exact byte length of a packed argument payload.
    #[inline]
    pub fn parameter_data_size(&self) -> u32 {
        self.parameter_data_size
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

/// Packed size of `parameters`, each taking its type's storage size.
pub(crate) fn payload_size(
    resolver: &Resolver<'_>,
    parameters: &[FunctionParameter],
    function: impl Fn() -> String,
) -> Result<u32, SchemaError> {
    let mut size = 0u32;
    for param in parameters {
        let entry = resolver.type_entry_for(param.type_id)?;
        let param_size = resolver.compute_data_storage_size(entry)?;
        size = checked_size(size.checked_add(param_size), &function)?;
    }
    Ok(size)
}

/// Index of a signature in its [`FunctionRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(u32);

impl FunctionId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    definitions: IndexMap<u32, FunctionDefinition>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function_definition(
        &mut self,
        strings: &StringTable,
        name: &str,
        def: FunctionDefinition,
    ) -> Result<FunctionId, SchemaError> {
        if strings.get_string_id(name) != Some(def.name_id) {
            return Err(SchemaError::NameMismatch {
                name: name.to_owned(),
                defined: strings.get_string(def.name_id).unwrap_or_default().to_owned(),
            });
        }
        if !def.is_finalized() {
            return Err(SchemaError::NotFinalized {
                name: name.to_owned(),
            });
        }
        let function_hash = hash(name);
        if self.definitions.contains_key(&function_hash) {
            return Err(SchemaError::DuplicateFunction {
                name: name.to_owned(),
            });
        }

        let id = FunctionId(self.definitions.len() as u32);
        tracing::debug!(
            name,
            id = id.0,
            payload = def.parameter_data_size(),
            inputs = def.num_inputs(),
            outputs = def.num_outputs(),
            "registered function"
        );
        self.definitions.insert(function_hash, def);
        Ok(id)
    }

    pub fn get(&self, id: FunctionId) -> Option<&FunctionDefinition> {
        self.definitions.get_index(id.index()).map(|(_, def)| def)
    }

    pub fn get_by_hash(&self, hash: u32) -> Option<(FunctionId, &FunctionDefinition)> {
        self.definitions
            .get_full(&hash)
            .map(|(index, _, def)| (FunctionId(index as u32), def))
    }

    pub fn get_by_name(&self, name: &str) -> Option<(FunctionId, &FunctionDefinition)> {
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

    pub fn iter(&self) -> impl Iterator<Item = (FunctionId, &FunctionDefinition)> {
        self.definitions
            .values()
            .enumerate()
            .map(|(i, def)| (FunctionId(i as u32), def))
    }

    pub(crate) fn insert_loaded(&mut self, function_hash: u32, def: FunctionDefinition) -> Option<FunctionId> {
        if self.definitions.contains_key(&function_hash) {
            return None;
        }
        let id = FunctionId(self.definitions.len() as u32);
        self.definitions.insert(function_hash, def);
        Some(id)
    }
}
