use indoc::indoc;
use tessel_schema::{FunctionDefinition, Schema, load_schema_source};

pub const SOURCE: &str = indoc! {r#"
    {
      "types": [
        { "name": "char", "size": 1, "flags": ["INPUT", "POD"] },
        { "name": "unsigned char", "size": 1, "flags": ["INPUT", "POD"] },
        { "name": "short", "size": 2, "flags": ["INPUT", "POD"] },
        { "name": "unsigned short", "size": 2, "flags": ["INPUT", "POD"] },
        { "name": "int", "size": 4, "flags": ["INPUT", "OUTPUT", "POD"] },
        { "name": "unsigned int", "size": 4, "flags": ["INPUT", "POD"] },
        { "name": "long long int", "size": 8, "flags": ["INPUT", "POD"] },
        { "name": "unsigned long long int", "size": 8, "flags": ["INPUT", "POD"] },
        { "name": "float", "size": 4, "flags": ["INPUT", "OUTPUT", "POD"] },
        { "name": "float*", "size": 8, "flags": ["INPUT", "OUTPUT", "POINTER"], "alias": "float" },
        { "name": "int*", "size": 8, "flags": ["INPUT", "POINTER"], "alias": "int" },
        { "name": "int[3]", "size": 4, "flags": ["INPUT", "ARRAY"], "alias": "int", "elements": 3 },
        { "name": "int*[2]&", "size": 4, "flags": ["INPUT", "REFERENCE", "ARRAY"], "alias": "int*", "elements": 2 },
        { "name": "Point", "size": 0, "flags": ["INPUT", "OUTPUT", "STRUCT"] },
        { "name": "Point[2]", "size": 8, "flags": ["INPUT", "ARRAY"], "alias": "Point", "elements": 2 },
        { "name": "Blob", "size": 4, "flags": ["INPUT", "POD"] }
      ],
      "structs": [
        { "name": "Point", "members": [{ "type": "char", "name": "c" }, { "type": "float", "name": "f" }] },
        { "name": "Path", "members": [{ "type": "short", "name": "len" }, { "type": "Point[2]", "name": "ends" }] }
      ],
      "functions": [
        { "name": "Send", "inputs": [{ "type": "char", "name": "c" }, { "type": "int", "name": "n" }] },
        { "name": "Move",
          "inputs": [{ "type": "Point", "name": "to" }],
          "outputs": [{ "type": "float*", "name": "status" }] },
        { "name": "Batch", "inputs": [
          { "type": "Point[2]", "name": "points" },
          { "type": "int[3]", "name": "ids" },
          { "type": "int*[2]&", "name": "refs" }
        ] },
        { "name": "Trace", "inputs": [{ "type": "Path", "name": "path" }] },
        { "name": "Widths", "inputs": [
          { "type": "unsigned char", "name": "u8" },
          { "type": "short", "name": "i16" },
          { "type": "unsigned short", "name": "u16" },
          { "type": "unsigned int", "name": "u32" },
          { "type": "long long int", "name": "i64" },
          { "type": "unsigned long long int", "name": "u64" }
        ] },
        { "name": "Opaque", "inputs": [{ "type": "char", "name": "tag" }, { "type": "Blob", "name": "blob" }] }
      ]
    }
"#};

pub fn schema() -> Schema {
    load_schema_source(SOURCE).unwrap()
}

pub fn function<'s>(schema: &'s Schema, name: &str) -> &'s FunctionDefinition {
    schema.functions().get_by_name(name).unwrap().1
}
