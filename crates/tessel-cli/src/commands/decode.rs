use std::path::PathBuf;

use tessel_codec::{Decoder, format_arguments};
use tessel_core::Colors;
use tessel_format::Endian;

use super::schema_loader::{load_schema, parse_hex};
use super::{CliError, exit_with};

pub struct DecodeArgs {
    pub schema_path: PathBuf,
    pub function: String,
    pub payload: String,
    pub pretty: bool,
    pub color: bool,
    pub endian: Endian,
}

pub fn run(args: DecodeArgs) {
    match execute(&args) {
        Ok(json) => println!("{}", json),
        Err(err) => exit_with(err),
    }
}

pub fn execute(args: &DecodeArgs) -> Result<String, CliError> {
    let schema = load_schema(&args.schema_path, args.endian)?;
    let (_, function) = schema
        .functions()
        .get_by_name(&args.function)
        .ok_or_else(|| CliError::UnknownFunction(args.function.clone()))?;
    let payload = parse_hex(&args.payload)?;

    let arguments = Decoder::new(schema.resolver()).decode(function, &payload)?;
    Ok(format_arguments(&arguments, args.pretty, Colors::new(args.color)))
}
