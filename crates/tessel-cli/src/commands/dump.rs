use std::path::PathBuf;

use tessel_core::Colors;
use tessel_format::Endian;
use tessel_schema::dump;

use super::schema_loader::load_schema;
use super::{CliError, exit_with};

pub struct DumpArgs {
    pub schema_path: PathBuf,
    pub color: bool,
    pub endian: Endian,
}

pub fn run(args: DumpArgs) {
    match execute(&args) {
        Ok(text) => print!("{}", text),
        Err(err) => exit_with(err),
    }
}

pub fn execute(args: &DumpArgs) -> Result<String, CliError> {
    let schema = load_schema(&args.schema_path, args.endian)?;
    Ok(dump(&schema, Colors::new(args.color)))
}
