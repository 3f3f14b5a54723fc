use tessel_core::TypeFlags;

use super::*;
use crate::test_utils::{primitives, sample_schema};

#[test]
fn payload_size_uses_pointee() {
    let mut schema = primitives().unwrap();

    let id = schema
        .define_function("Test", "void", &[("char", "a")], &[("float*", "b")])
        .unwrap();

    let def = schema.functions().get(id).unwrap();
    assert_eq!(def.parameter_data_size(), 5);
    assert_eq!((def.num_inputs(), def.num_outputs()), (1, 1));
    assert!(def.is_finalized());
}

#[test]
fn struct_and_array_parameters() {
    let mut schema = sample_schema().unwrap();
    schema
        .add_type("float[3]", 4, TypeFlags::INPUT | TypeFlags::ARRAY, "float", 3)
        .unwrap();

    schema
        .define_function("Draw", "void", &[("Point", "at"), ("float[3]", "color")], &[])
        .unwrap();

    let (_, def) = schema.functions().get_by_name("Draw").unwrap();
    assert_eq!(def.parameter_data_size(), 5 + 12);
}

#[test]
fn parameters_keep_declared_order() {
    let mut schema = primitives().unwrap();
    let mut def = schema.new_function("Mix", "int", 2, 1).unwrap();
    schema.add_parameter(&mut def, ParamMode::Output, "int", "out").unwrap();
    schema.add_parameter(&mut def, ParamMode::Input, "char", "a").unwrap();
    schema.add_parameter(&mut def, ParamMode::Input, "short", "b").unwrap();

    let params: Vec<_> = def
        .parameters()
        .iter()
        .map(|p| (p.index, p.mode, schema.strings().get_string(p.name_id).unwrap()))
        .collect();
    assert_eq!(
        params,
        [
            (0, ParamMode::Output, "out"),
            (1, ParamMode::Input, "a"),
            (2, ParamMode::Input, "b"),
        ]
    );
    assert_eq!(def.parameter_by_name("b").unwrap().index, 2);
    assert_eq!(schema.strings().get_string(def.return_type_id()), Some("int"));
}

#[test]
fn direction_must_match_type_flags() {
    let mut schema = primitives().unwrap();
    let mut def = schema.new_function("F", "void", 0, 1).unwrap();

    let err = schema
        .add_parameter(&mut def, ParamMode::Output, "char", "x")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "function 'F' parameter 'x' type 'char' needs OUTPUT, type has INPUT|POD"
    );
    assert!(def.parameters().is_empty());
}

#[test]
fn per_direction_capacity() {
    let mut schema = primitives().unwrap();
    let mut def = schema.new_function("F", "void", 1, 1).unwrap();
    schema.add_parameter(&mut def, ParamMode::Input, "char", "x").unwrap();

    let err = schema
        .add_parameter(&mut def, ParamMode::Input, "int", "y")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "function 'F' has all 1 INPUT parameters, can't add 'y'"
    );

    schema.add_parameter(&mut def, ParamMode::Output, "int", "y").unwrap();
}

#[test]
fn parameter_errors() {
    let mut schema = primitives().unwrap();
    let mut def = schema.new_function("F", "void", 3, 0).unwrap();
    schema.add_parameter(&mut def, ParamMode::Input, "char", "x").unwrap();

    assert_eq!(
        schema.add_parameter(&mut def, ParamMode::Input, "int", "x"),
        Err(SchemaError::DuplicateParameter {
            function: "F".into(),
            name: "x".into(),
        })
    );
    assert_eq!(
        schema.add_parameter(&mut def, ParamMode::Input, "long", "y"),
        Err(SchemaError::UnknownType { name: "long".into() })
    );
}

#[test]
fn finalise_requires_exact_counts() {
    let mut schema = primitives().unwrap();
    let mut def = schema.new_function("F", "void", 2, 1).unwrap();
    schema.add_parameter(&mut def, ParamMode::Input, "char", "x").unwrap();

    assert_eq!(
        schema.finalise_function(&mut def),
        Err(SchemaError::ParameterCountMismatch {
            function: "F".into(),
            inputs: 1,
            declared_inputs: 2,
            outputs: 0,
            declared_outputs: 1,
        })
    );
    assert!(!def.is_finalized());
}

#[test]
fn registry_rejections() {
    let mut schema = primitives().unwrap();

    let open = schema.new_function("F", "void", 0, 0).unwrap();
    assert_eq!(
        schema.add_function_definition("F", open),
        Err(SchemaError::NotFinalized { name: "F".into() })
    );

    let mut def = schema.new_function("F", "void", 0, 0).unwrap();
    schema.finalise_function(&mut def).unwrap();
    assert!(matches!(
        schema.add_function_definition("G", def.clone()),
        Err(SchemaError::NameMismatch { .. })
    ));
    schema.add_function_definition("F", def.clone()).unwrap();
    assert_eq!(
        schema.add_function_definition("F", def),
        Err(SchemaError::DuplicateFunction { name: "F".into() })
    );
    assert_eq!(schema.functions().len(), 1);
}

#[test]
fn mode_bits() {
    assert_eq!(ParamMode::from_bits(1), Some(ParamMode::Input));
    assert_eq!(ParamMode::from_bits(2), Some(ParamMode::Output));
    assert_eq!(ParamMode::from_bits(3), None);
    assert_eq!(ParamMode::Output.to_string(), "OUTPUT");
}

#[test]
fn payload_past_int32_is_an_error() {
    let mut schema = primitives().unwrap();
    let array = TypeFlags::INPUT | TypeFlags::ARRAY;
    schema.add_type("float[huge]", 4, array, "float", 0x4000_0001).unwrap();
    schema.add_type("char[half]", 1, array, "char", 0x4000_0000).unwrap();

    assert_eq!(
        schema.define_function("One", "void", &[("float[huge]", "xs")], &[]),
        Err(SchemaError::SizeOverflow {
            name: "float[huge]".into()
        })
    );
    assert_eq!(
        schema.define_function("Two", "void", &[("char[half]", "a"), ("char[half]", "b")], &[]),
        Err(SchemaError::SizeOverflow { name: "Two".into() })
    );
    assert!(schema.functions().is_empty());
}

#[test]
fn rejects_nul_in_function_names() {
    let mut schema = primitives().unwrap();

    assert!(matches!(
        schema.new_function("F", "vo\0id", 0, 0),
        Err(SchemaError::NulInName { .. })
    ));
    let mut def = schema.new_function("F", "void", 1, 0).unwrap();
    assert_eq!(
        schema.add_parameter(&mut def, ParamMode::Input, "char", "\0"),
        Err(SchemaError::NulInName { name: "\0".into() })
    );
}
