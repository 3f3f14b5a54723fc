//! The four registries bundled together.

use tessel_core::{StringTable, TypeFlags};

use crate::functions::{FunctionDefinition, FunctionId, FunctionRegistry, ParamMode};
use crate::resolve::Resolver;
use crate::structs::{StructDefinition, StructId, StructRegistry};
use crate::types::{TypeId, TypeRegistry};
use crate::SchemaError;

/// A complete schema: names, types, struct layouts and function signatures.
///
/// Build it single-threaded, then share it read-only.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    strings: StringTable,
    types: TypeRegistry,
    structs: StructRegistry,
    functions: FunctionRegistry,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        strings: StringTable,
        types: TypeRegistry,
        structs: StructRegistry,
        functions: FunctionRegistry,
    ) -> Self {
        Self {
            strings,
            types,
            structs,
            functions,
        }
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn structs(&self) -> &StructRegistry {
        &self.structs
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.strings, &self.types, &self.structs)
    }

    pub fn add_type(
        &mut self,
        name: &str,
        data_size: u32,
        flags: TypeFlags,
        aliased_name: &str,
        num_elements: u32,
    ) -> Result<TypeId, SchemaError> {
        self.types
            .add_type(&mut self.strings, name, data_size, flags, aliased_name, num_elements)
    }

    pub fn new_struct(&mut self, name: &str, num_members: usize) -> Result<StructDefinition, SchemaError> {
        StructDefinition::new(&mut self.strings, name, num_members)
    }

    pub fn add_struct_member(
        &mut self,
        def: &mut StructDefinition,
        ty: &str,
        name: &str,
    ) -> Result<(), SchemaError> {
        def.add_member(&mut self.strings, &self.types, &self.structs, ty, name)
    }

    pub fn finalise_struct(&self, def: &mut StructDefinition) -> Result<(), SchemaError> {
        def.finalise(&self.strings)
    }

    pub fn add_struct_definition(
        &mut self,
        name: &str,
        def: StructDefinition,
    ) -> Result<StructId, SchemaError> {
        self.structs
            .add_struct_definition(&self.strings, &mut self.types, name, def)
    }

    /// Build, finalise and register a struct from `(type, name)` members.
    pub fn define_struct(&mut self, name: &str, members: &[(&str, &str)]) -> Result<StructId, SchemaError> {
        let mut def = self.new_struct(name, members.len())?;
        for &(ty, member) in members {
            self.add_struct_member(&mut def, ty, member)?;
        }
        self.finalise_struct(&mut def)?;
        self.add_struct_definition(name, def)
    }

    pub fn new_function(
        &mut self,
        name: &str,
        return_type: &str,
        num_inputs: usize,
        num_outputs: usize,
    ) -> Result<FunctionDefinition, SchemaError> {
        FunctionDefinition::new(&mut self.strings, name, return_type, num_inputs, num_outputs)
    }

    pub fn add_parameter(
        &mut self,
        def: &mut FunctionDefinition,
        mode: ParamMode,
        ty: &str,
        name: &str,
    ) -> Result<(), SchemaError> {
        def.add_parameter(&mut self.strings, &self.types, mode, ty, name)
    }

    pub fn finalise_function(&self, def: &mut FunctionDefinition) -> Result<(), SchemaError> {
        def.finalise(&self.resolver())
    }

    pub fn add_function_definition(
        &mut self,
        name: &str,
        def: FunctionDefinition,
    ) -> Result<FunctionId, SchemaError> {
        self.functions.add_function_definition(&self.strings, name, def)
    }

    /// Build, finalise and register a function from `(type, name)` inputs
    /// and outputs.
    pub fn define_function(
        &mut self,
        name: &str,
        return_type: &str,
        inputs: &[(&str, &str)],
        outputs: &[(&str, &str)],
    ) -> Result<FunctionId, SchemaError> {
        let mut def = self.new_function(name, return_type, inputs.len(), outputs.len())?;
        for &(ty, param) in inputs {
            self.add_parameter(&mut def, ParamMode::Input, ty, param)?;
        }
        for &(ty, param) in outputs {
            self.add_parameter(&mut def, ParamMode::Output, ty, param)?;
        }
        self.finalise_function(&mut def)?;
        self.add_function_definition(name, def)
    }
}
