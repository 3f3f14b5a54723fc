use std::path::PathBuf;

use tessel_codec::{FunctionCall, Value};
use tessel_format::Endian;

use super::schema_loader::{load_schema, to_hex};
use super::{CliError, exit_with};

pub struct EncodeArgs {
    pub schema_path: PathBuf,
    pub function: String,
    pub values: String,
    /// Message id when the payload is framed as a FunctionRpc call.
    pub frame: Option<u16>,
    pub endian: Endian,
}

pub fn run(args: EncodeArgs) {
    match execute(&args) {
        Ok(hex) => println!("{}", hex),
        Err(err) => exit_with(err),
    }
}

pub fn execute(args: &EncodeArgs) -> Result<String, CliError> {
    let schema = load_schema(&args.schema_path, args.endian)?;
    let values = parse_values(&args.values)?;

    let call = FunctionCall::encode(&schema, &args.function, &values)?;
    let bytes = match args.frame {
        Some(id) => call.to_message(id).encode(),
        None => call.arguments,
    };
    Ok(to_hex(&bytes))
}

fn parse_values(text: &str) -> Result<Vec<Value>, CliError> {
    let json: serde_json::Value = serde_json::from_str(text).map_err(|e| CliError::Values(e.to_string()))?;
    let serde_json::Value::Array(items) = json else {
        return Err(CliError::Values("expected a JSON array".into()));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Value::from_json(item)
                .ok_or_else(|| CliError::Values(format!("element {i} is not a number, array or object")))
        })
        .collect()
}
