use tessel_core::Colors;

use crate::dump;
use crate::test_utils::sample_schema;

#[test]
fn sample() {
    let schema = sample_schema().unwrap();

    insta::assert_snapshot!(dump(&schema, Colors::OFF), @r"
    Strings:
      [0] 0x56F2B2AE 'char' offset:0
      [1] 0x29C40BA8 'float' offset:5
      [2] 0x235D9F22 'float*' offset:11
      [3] 0x4E94AFF4 'Point' offset:18
      [4] 0x00000063 'c' offset:24
      [5] 0x00000066 'f' offset:26
      [6] 0x0B01D44D 'Move' offset:28
      [7] 0x98A68178 'void' offset:33
      [8] 0x0000AFCB 'to' offset:38
      [9] 0x76B4CC7E 'status' offset:41
    Types:
      [0] 'char' size:1 flags:0x5 INPUT|POD alias:'char' elements:0
      [1] 'float' size:4 flags:0x7 INPUT|OUTPUT|POD alias:'float' elements:0
      [2] 'float*' size:4 flags:0x53 INPUT|OUTPUT|POINTER|ALIAS alias:'float' elements:0
      [3] 'Point' size:8 flags:0xB INPUT|OUTPUT|STRUCT alias:'Point' elements:0
    Structs:
      [0] 'Point' size:8 align:4 members:2
        [0] 'c' type:'char' size:1 padding:0
        [1] 'f' type:'float' size:4 padding:3
    Functions:
      [0] 'Move' returns:'void' payload:9 inputs:1 outputs:1
        [0] 'to' type:'Point' mode:INPUT
        [1] 'status' type:'float*' mode:OUTPUT
    ");
}

#[test]
fn empty_schema() {
    insta::assert_snapshot!(dump(&crate::Schema::new(), Colors::OFF), @r"
    Strings:
    Types:
    Structs:
    Functions:
    ");
}

#[test]
fn colored_roles() {
    let mut schema = crate::Schema::new();
    schema
        .add_type("int", 4, crate::test_utils::IN_POD, "int", 0)
        .unwrap();

    let out = dump(&schema, Colors::ON);

    assert!(out.contains("\x1b[36m'int'\x1b[0m"));
    assert!(out.contains("\x1b[33mINPUT|POD\x1b[0m"));
    assert!(out.contains("\x1b[2moffset:0\x1b[0m"));
}
