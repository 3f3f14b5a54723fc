//! JSON schema source.
//!
//! ```json
//! {
//!   "types": [{ "name": "int", "size": 4, "flags": ["INPUT", "POD"] }],
//!   "structs": [{ "name": "Point", "members": [{ "type": "int", "name": "x" }] }],
//!   "functions": [{ "name": "Move", "returns": "void",
//!                   "inputs": [{ "type": "Point", "name": "to" }], "outputs": [] }]
//! }
//! ```
//!
//! Items register in order: every type, then every struct, then every
//! function. A struct whose name is not yet a type is registered as one
//! with size 0 first.

use serde::Deserialize;
use tessel_core::TypeFlags;

use crate::{ParamMode, Schema, SchemaError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaSource {
    #[serde(default)]
    pub types: Vec<TypeSource>,
    #[serde(default)]
    pub structs: Vec<StructSource>,
    #[serde(default)]
    pub functions: Vec<FunctionSource>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSource {
    pub name: String,
    pub size: u32,
    pub flags: Vec<String>,
    /// Defaults to `name`.
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub elements: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructSource {
    pub name: String,
    pub members: Vec<NamedType>,
    /// Flags for the implicit struct type. Defaults to `INPUT|OUTPUT|STRUCT`.
    #[serde(default)]
    pub flags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionSource {
    pub name: String,
    #[serde(default = "void")]
    pub returns: String,
    #[serde(default)]
    pub inputs: Vec<NamedType>,
    #[serde(default)]
    pub outputs: Vec<NamedType>,
}

/// A `{ "type": ..., "name": ... }` pair used for members and parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamedType {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

fn void() -> String {
    "void".to_owned()
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("invalid schema source: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{item}: unknown flag '{flag}'")]
    UnknownFlag { item: String, flag: String },

    #[error("{item}: {source}")]
    Register {
        item: String,
        #[source]
        source: SchemaError,
    },
}

impl SchemaSource {
    pub fn from_json(text: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Register every item into `schema`, stopping at the first failure.
    pub fn register(&self, schema: &mut Schema) -> Result<(), SourceError> {
        for ty in &self.types {
            let item = format!("type '{}'", ty.name);
            let flags = parse_flags(&item, &ty.flags)?;
            let alias = ty.alias.as_deref().unwrap_or(&ty.name);
            schema
                .add_type(&ty.name, ty.size, flags, alias, ty.elements)
                .map_err(|source| register(&item, source))?;
        }

        for st in &self.structs {
            let item = format!("struct '{}'", st.name);
            if schema.types().get_by_name(&st.name).is_none() {
                let flags = match &st.flags {
                    Some(names) => parse_flags(&item, names)?,
                    None => TypeFlags::INPUT | TypeFlags::OUTPUT | TypeFlags::STRUCT,
                };
                schema
                    .add_type(&st.name, 0, flags, &st.name, 0)
                    .map_err(|source| register(&item, source))?;
            }

            let mut def = schema
                .new_struct(&st.name, st.members.len())
                .map_err(|source| register(&item, source))?;
            for member in &st.members {
                schema
                    .add_struct_member(&mut def, &member.ty, &member.name)
                    .map_err(|source| register(&format!("{item} member '{}'", member.name), source))?;
            }
            schema
                .finalise_struct(&mut def)
                .map_err(|source| register(&item, source))?;
            schema
                .add_struct_definition(&st.name, def)
                .map_err(|source| register(&item, source))?;
        }

        for func in &self.functions {
            let item = format!("function '{}'", func.name);
            let mut def = schema
                .new_function(&func.name, &func.returns, func.inputs.len(), func.outputs.len())
                .map_err(|source| register(&item, source))?;
            let params = func
                .inputs
                .iter()
                .map(|p| (ParamMode::Input, p))
                .chain(func.outputs.iter().map(|p| (ParamMode::Output, p)));
            for (mode, param) in params {
                schema
                    .add_parameter(&mut def, mode, &param.ty, &param.name)
                    .map_err(|source| register(&format!("{item} parameter '{}'", param.name), source))?;
            }
            schema
                .finalise_function(&mut def)
                .map_err(|source| register(&item, source))?;
            schema
                .add_function_definition(&func.name, def)
                .map_err(|source| register(&item, source))?;
        }

        tracing::debug!(
            types = self.types.len(),
            structs = self.structs.len(),
            functions = self.functions.len(),
            "registered schema source"
        );
        Ok(())
    }
}

/// Parse and register a JSON schema source into a fresh [`Schema`].
pub fn load_schema_source(text: &str) -> Result<Schema, SourceError> {
    let source = SchemaSource::from_json(text)?;
    let mut schema = Schema::new();
    source.register(&mut schema)?;
    Ok(schema)
}

fn register(item: &str, source: SchemaError) -> SourceError {
    tracing::warn!(item, error = %source, "schema source item rejected");
    SourceError::Register {
        item: item.to_owned(),
        source,
    }
}

fn parse_flags(item: &str, names: &[String]) -> Result<TypeFlags, SourceError> {
    let mut flags = TypeFlags::empty();
    for name in names {
        let Some(flag) = TypeFlags::from_name(name) else {
            return Err(SourceError::UnknownFlag {
                item: item.to_owned(),
                flag: name.clone(),
            });
        };
        flags |= flag;
    }
    Ok(flags)
}
