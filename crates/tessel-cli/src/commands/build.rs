use std::fs;
use std::path::PathBuf;

use tessel_format::Endian;
use tessel_schema::emit_definition_file;

use super::schema_loader::load_schema;
use super::{CliError, exit_with};

pub struct BuildArgs {
    pub source_path: PathBuf,
    pub output: PathBuf,
    pub endian: Endian,
}

pub fn run(args: BuildArgs) {
    if let Err(err) = execute(&args) {
        exit_with(err);
    }
}

/// Returns the number of bytes written.
pub fn execute(args: &BuildArgs) -> Result<usize, CliError> {
    let schema = load_schema(&args.source_path, args.endian)?;
    let bytes = emit_definition_file(&schema, args.endian)?;
    fs::write(&args.output, &bytes).map_err(|source| CliError::Write {
        path: args.output.display().to_string(),
        source,
    })?;
    tracing::info!(
        output = %args.output.display(),
        bytes = bytes.len(),
        types = schema.types().len(),
        functions = schema.functions().len(),
        "wrote definition file"
    );
    Ok(bytes.len())
}
