//! Command builders for the CLI.
//!
//! Each command is built from the shared arg builders in `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("tessel")
        .about("Schema-driven binary serialization: definition files, argument payloads, RPC frames")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(build_command())
        .subcommand(dump_command())
        .subcommand(decode_command())
        .subcommand(encode_command())
        .subcommand(hash_command())
}

/// Compile a JSON schema source into a definition file.
pub fn build_command() -> Command {
    Command::new("build")
        .about("Compile a JSON schema source into a definition file")
        .after_help(
            r#"EXAMPLES:
  tessel build schema.json -o schema.tsl
  tessel build schema.json -o schema.tsl --little-endian"#,
        )
        .arg(source_path_arg())
        .arg(output_file_arg())
        .arg(little_endian_arg())
}

/// List the strings, types, structs and functions of a schema.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("List the strings, types, structs and functions of a schema")
        .after_help(
            r#"EXAMPLES:
  tessel dump schema.json
  tessel dump schema.tsl --color never"#,
        )
        .arg(schema_path_arg())
        .arg(color_arg())
        .arg(little_endian_arg())
}

/// Decode a packed argument payload.
pub fn decode_command() -> Command {
    Command::new("decode")
        .about("Decode a packed argument payload into JSON")
        .after_help(
            r#"EXAMPLES:
  tessel decode schema.tsl -f Send -p '6e 00000066'
  tessel decode schema.json -f Send -p 6e00000066 --compact"#,
        )
        .arg(schema_path_arg())
        .arg(function_arg())
        .arg(payload_arg())
        .arg(compact_arg())
        .arg(color_arg())
        .arg(little_endian_arg())
}

/// Encode argument values into a packed payload.
pub fn encode_command() -> Command {
    Command::new("encode")
        .about("Encode JSON argument values into a packed payload")
        .after_help(
            r#"EXAMPLES:
  tessel encode schema.tsl -f Send --values '[110, 102]'
  tessel encode schema.tsl -f Move --values '[{"c": 1, "f": 0.5}, 2.0]' --frame --id 7"#,
        )
        .arg(schema_path_arg())
        .arg(function_arg())
        .arg(values_arg())
        .arg(frame_arg())
        .arg(id_arg())
        .arg(little_endian_arg())
}

/// Print name hashes.
pub fn hash_command() -> Command {
    Command::new("hash")
        .about("Print the 32-bit name hash of each string")
        .arg(strings_arg())
}
