//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that commands compose.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Schema to load: JSON source (`.json`) or definition file (positional).
pub fn schema_path_arg() -> Arg {
    Arg::new("schema_path")
        .value_name("SCHEMA")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON schema source (.json) or definition file")
}

/// JSON schema source (positional).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON schema source")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Write the definition file here")
}

/// Definition file byte order (--little-endian).
pub fn little_endian_arg() -> Arg {
    Arg::new("little_endian")
        .long("little-endian")
        .action(ArgAction::SetTrue)
        .help("Definition file is little-endian (default: big-endian)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Function to decode or encode arguments for (-f/--function).
pub fn function_arg() -> Arg {
    Arg::new("function")
        .short('f')
        .long("function")
        .value_name("NAME")
        .required(true)
        .help("Function name")
}

/// Hex-encoded argument payload (-p/--payload).
pub fn payload_arg() -> Arg {
    Arg::new("payload")
        .short('p')
        .long("payload")
        .value_name("HEX")
        .required(true)
        .help("Packed argument bytes as hex (whitespace ignored)")
}

/// JSON array of argument values (--values).
pub fn values_arg() -> Arg {
    Arg::new("values")
        .long("values")
        .value_name("JSON")
        .required(true)
        .help("JSON array with one value per parameter")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty)")
}

/// Wrap the payload in a FunctionRpc message (--frame).
pub fn frame_arg() -> Arg {
    Arg::new("frame")
        .long("frame")
        .action(ArgAction::SetTrue)
        .help("Print a complete FunctionRpc message instead of the bare payload")
}

/// Message id for --frame (--id).
pub fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .value_name("N")
        .default_value("1")
        .value_parser(value_parser!(u16))
        .requires("frame")
        .help("Message id of the framed call")
}

/// Strings to hash (positional, one or more).
pub fn strings_arg() -> Arg {
    Arg::new("strings")
        .value_name("STRING")
        .required(true)
        .num_args(1..)
        .help("Strings to hash")
}
