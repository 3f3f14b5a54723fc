use std::fs;
use std::path::Path;

use tessel_format::Endian;
use tessel_schema::{Schema, load_definition_file, load_schema_source};

use super::CliError;

/// Load a schema from a JSON source (`.json`) or a definition file.
pub fn load_schema(path: &Path, endian: Endian) -> Result<Schema, CliError> {
    let display = path.display().to_string();
    if path.extension().is_some_and(|ext| ext == "json") {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: display.clone(),
            source,
        })?;
        return load_schema_source(&text).map_err(|source| CliError::Source { path: display, source });
    }

    let bytes = fs::read(path).map_err(|source| CliError::Read {
        path: display.clone(),
        source,
    })?;
    load_definition_file(&bytes, endian).map_err(|source| CliError::Load { path: display, source })
}

/// Parse hex digits, ignoring whitespace.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, CliError> {
    let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(CliError::Hex(format!("odd number of digits ({})", digits.len())));
    }
    digits
        .chunks(2)
        .map(|pair| {
            let hi = hex_digit(pair[0])?;
            let lo = hex_digit(pair[1])?;
            Ok(hi << 4 | lo)
        })
        .collect()
}

fn hex_digit(b: u8) -> Result<u8, CliError> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        _ => Err(CliError::Hex(format!("'{}' is not a hex digit", b as char))),
    }
}

/// Lowercase hex, two digits per byte.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
