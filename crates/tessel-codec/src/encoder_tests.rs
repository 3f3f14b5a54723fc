use super::*;
use crate::test_utils::{function, schema};

fn point(c: i64, f: f32) -> Value {
    Value::Struct(vec![("c".to_owned(), Value::Int(c)), ("f".to_owned(), Value::Float(f))])
}

fn encode(name: &str, values: &[Value]) -> Result<Vec<u8>, EncodeError> {
    let schema = schema();
    Encoder::new(schema.resolver()).encode(function(&schema, name), values)
}

#[test]
fn char_and_int() {
    let bytes = encode("Send", &[Value::Int(i64::from(b'n')), Value::Int(102)]).unwrap();

    assert_eq!(bytes, [b'n', 0, 0, 0, 102]);
}

#[test]
fn decodes_back() {
    let schema = schema();
    let batch = function(&schema, "Batch");
    let values = [
        Value::Array(vec![point(-1, 0.5), point(2, -4.0)]),
        Value::Array(vec![Value::Int(1), Value::Int(-2), Value::UInt(3)]),
        Value::Array(vec![Value::Int(i32::MAX.into()), Value::Int(i32::MIN.into())]),
    ];

    let bytes = Encoder::new(schema.resolver()).encode(batch, &values).unwrap();
    assert_eq!(bytes.len() as u32, batch.parameter_data_size());

    let decoded = Decoder::new(schema.resolver()).decode(batch, &bytes).unwrap();
    let names: Vec<_> = decoded.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["points", "ids", "refs"]);
    assert_eq!(decoded[0].1, values[0]);
    assert_eq!(decoded[1].1, Value::Array(vec![Value::Int(1), Value::Int(-2), Value::Int(3)]));
    assert_eq!(decoded[2].1, values[2]);
}

#[test]
fn integer_into_float() {
    let bytes = encode("Move", &[point(0, 0.0), Value::Int(2)]).unwrap();

    assert_eq!(&bytes[5..], 2.0f32.to_be_bytes());
}

#[test]
fn argument_count() {
    let err = encode("Send", &[Value::Int(1)]).unwrap_err();

    assert_eq!(err.to_string(), "function 'Send' takes 2 arguments, got 1");
}

#[test]
fn out_of_range() {
    let err = encode("Send", &[Value::Int(200), Value::Int(0)]).unwrap_err();

    assert_eq!(err.to_string(), "parameter 0 'c': 'char': 200 doesn't fit i8");
}

#[test]
fn float_into_integer() {
    let err = encode("Send", &[Value::Int(0), Value::Float(1.5)]).unwrap_err();

    assert_eq!(err.to_string(), "parameter 1 'n': 'int': 1.5 doesn't fit i32");
}

#[test]
fn shape_mismatches() {
    let err = encode("Send", &[Value::Array(vec![]), Value::Int(0)]).unwrap_err();
    assert_eq!(err.to_string(), "parameter 0 'c': 'char' expects integer, got array");

    let err = encode("Move", &[Value::Int(1), Value::Float(0.0)]).unwrap_err();
    assert_eq!(err.to_string(), "parameter 0 'to': 'Point' expects struct, got integer");

    let swapped = Value::Struct(vec![("f".to_owned(), Value::Float(1.0)), ("c".to_owned(), Value::Int(1))]);
    let err = encode("Move", &[swapped, Value::Float(0.0)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "parameter 0 'to': struct 'Point' member 0 is 'c', got 'f'"
    );

    let short = Value::Array(vec![point(0, 0.0)]);
    let ids = Value::Array(vec![Value::Int(0); 3]);
    let refs = Value::Array(vec![Value::Int(0); 2]);
    let err = encode("Batch", &[short, ids, refs]).unwrap_err();
    assert_eq!(err.to_string(), "parameter 0 'points': 'Point[2]' expects 2 elements, got 1");
}
