use std::fs;
use std::path::{Path, PathBuf};

use indoc::indoc;
use tessel_format::Endian;

use super::build::{self, BuildArgs};
use super::decode::{self, DecodeArgs};
use super::dump::{self, DumpArgs};
use super::encode::{self, EncodeArgs};
use super::hash::{self, HashArgs};
use super::schema_loader::{parse_hex, to_hex};
use super::CliError;

const SOURCE: &str = indoc! {r#"
    {
      "types": [
        { "name": "char", "size": 1, "flags": ["INPUT", "POD"] },
        { "name": "int", "size": 4, "flags": ["INPUT", "POD"] },
        { "name": "float", "size": 4, "flags": ["INPUT", "OUTPUT", "POD"] }
      ],
      "structs": [
        { "name": "Point", "members": [{ "type": "char", "name": "c" }, { "type": "float", "name": "f" }] }
      ],
      "functions": [
        { "name": "Send", "inputs": [{ "type": "char", "name": "c" }, { "type": "int", "name": "n" }] },
        { "name": "Move", "inputs": [{ "type": "Point", "name": "to" }] }
      ]
    }
"#};

fn write_source(dir: &Path) -> PathBuf {
    let path = dir.join("schema.json");
    fs::write(&path, SOURCE).unwrap();
    path
}

fn build_into(dir: &Path, endian: Endian) -> PathBuf {
    let output = dir.join("schema.tsl");
    build::execute(&BuildArgs {
        source_path: write_source(dir),
        output: output.clone(),
        endian,
    })
    .unwrap();
    output
}

fn decode_args(schema_path: PathBuf, function: &str, payload: &str) -> DecodeArgs {
    DecodeArgs {
        schema_path,
        function: function.into(),
        payload: payload.into(),
        pretty: false,
        color: false,
        endian: Endian::Big,
    }
}

#[test]
fn build_then_dump_matches_source() {
    let dir = tempfile::tempdir().unwrap();
    let output = build_into(dir.path(), Endian::Big);

    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..5], b"TSLD\0");

    let from_file = dump::execute(&DumpArgs {
        schema_path: output,
        color: false,
        endian: Endian::Big,
    })
    .unwrap();
    let from_source = dump::execute(&DumpArgs {
        schema_path: dir.path().join("schema.json"),
        color: false,
        endian: Endian::Big,
    })
    .unwrap();
    assert_eq!(from_file, from_source);
    assert!(from_file.contains("[0] 'Send' returns:'void' payload:5 inputs:2 outputs:0"));
}

#[test]
fn little_endian_file_needs_the_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = build_into(dir.path(), Endian::Little);

    let args = |endian| DumpArgs {
        schema_path: output.clone(),
        color: false,
        endian,
    };
    assert!(dump::execute(&args(Endian::Little)).is_ok());
    assert!(matches!(dump::execute(&args(Endian::Big)), Err(CliError::Load { .. })));
}

#[test]
fn decode_payload() {
    let dir = tempfile::tempdir().unwrap();
    let output = build_into(dir.path(), Endian::Big);

    let json = decode::execute(&decode_args(output, "Send", "6e 00 00 00 66")).unwrap();

    assert_eq!(json, r#"{"c":110,"n":102}"#);
}

#[test]
fn decode_pretty() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = decode_args(write_source(dir.path()), "Move", "01 3f000000");
    args.pretty = true;

    insta::assert_snapshot!(decode::execute(&args).unwrap(), @r#"
    {
      "to": {
        "c": 1,
        "f": 0.5
      }
    }
    "#);
}

#[test]
fn decode_errors() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path());

    let err = decode::execute(&decode_args(source.clone(), "Jump", "00")).unwrap_err();
    assert_eq!(err.to_string(), "unknown function 'Jump'");

    let err = decode::execute(&decode_args(source.clone(), "Send", "6e0")).unwrap_err();
    assert_eq!(err.to_string(), "invalid hex payload: odd number of digits (3)");

    let err = decode::execute(&decode_args(source, "Send", "6e")).unwrap_err();
    assert_eq!(err.to_string(), "function 'Send' takes 5 bytes of arguments, got 1");
}

#[test]
fn encode_payload_and_frame() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path());
    let args = |frame| EncodeArgs {
        schema_path: source.clone(),
        function: "Send".into(),
        values: "[110, 102]".into(),
        frame,
        endian: Endian::Big,
    };

    assert_eq!(encode::execute(&args(None)).unwrap(), "6e00000066");

    // kind 0x0010, id 7, 9 payload bytes, then the "Send" string id.
    let framed = encode::execute(&args(Some(7))).unwrap();
    assert!(framed.starts_with("0010000700000009"));
    assert!(framed.ends_with("6e00000066"));
}

#[test]
fn encode_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path());
    let args = |values: &str| EncodeArgs {
        schema_path: source.clone(),
        function: "Send".into(),
        values: values.into(),
        frame: None,
        endian: Endian::Big,
    };

    let err = encode::execute(&args(r#"{"c": 1}"#)).unwrap_err();
    assert_eq!(err.to_string(), "invalid --values: expected a JSON array");

    let err = encode::execute(&args(r#"["n", 1]"#)).unwrap_err();
    assert_eq!(err.to_string(), "invalid --values: element 0 is not a number, array or object");

    let err = encode::execute(&args("[1000, 1]")).unwrap_err();
    assert_eq!(err.to_string(), "parameter 0 'c': 'char': 1000 doesn't fit i8");
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = dump::execute(&DumpArgs {
        schema_path: dir.path().join("nope.tsl"),
        color: false,
        endian: Endian::Big,
    })
    .unwrap_err();

    assert!(matches!(err, CliError::Read { .. }));
    assert!(err.to_string().starts_with("failed to read '"));
}

#[test]
fn hash_lines() {
    let out = hash::execute(&HashArgs {
        strings: vec!["jake".into(), "Jake".into()],
    });

    insta::assert_snapshot!(out, @r"
    1863425725 0x6F119EBD jake
       8686429 0x00848B5D Jake
    ");
}

#[test]
fn hex_helpers() {
    assert_eq!(parse_hex("DE ad\nbe ef").unwrap(), [0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
    assert!(parse_hex("zz").is_err());
    assert_eq!(to_hex(&[0, 0x0F, 0xA0]), "000fa0");
}
