use tessel_core::TypeFlags;

use super::*;
use crate::Schema;
use crate::test_utils::{IN_OUT_STRUCT, primitives};

fn with_struct_type(name: &str) -> Schema {
    let mut schema = primitives().unwrap();
    schema.add_type(name, 0, IN_OUT_STRUCT, name, 0).unwrap();
    schema
}

fn layout(schema: &mut Schema, name: &str, members: &[(&str, &str)]) -> StructDefinition {
    let mut def = schema.new_struct(name, members.len()).unwrap();
    for &(ty, member) in members {
        schema.add_struct_member(&mut def, ty, member).unwrap();
    }
    schema.finalise_struct(&mut def).unwrap();
    def
}

#[test]
fn padding_rule() {
    assert_eq!(compute_alignment_padding(0, 4), 0);
    assert_eq!(compute_alignment_padding(1, 4), 3);
    assert_eq!(compute_alignment_padding(1, 2), 1);
    assert_eq!(compute_alignment_padding(6, 4), 2);
    // Alignment is capped at 4.
    assert_eq!(compute_alignment_padding(3, 8), 1);
    assert_eq!(compute_alignment_padding(5, 1), 0);
    assert_eq!(compute_alignment_padding(5, 0), 0);
}

#[test]
fn char_then_float() {
    let mut schema = with_struct_type("Point");
    let def = layout(&mut schema, "Point", &[("char", "c"), ("float", "f")]);

    let members: Vec<_> = def
        .members()
        .iter()
        .map(|m| (m.data_size, m.alignment_padding))
        .collect();
    assert_eq!(members, [(1, 0), (4, 3)]);
    assert_eq!(def.total_size_with_padding(), 8);
    assert_eq!(def.max_member_alignment(), 4);
    assert!(def.is_finalized());
}

#[test]
fn trailing_padding_on_finalise() {
    let mut schema = with_struct_type("Tail");
    let def = layout(&mut schema, "Tail", &[("float", "f"), ("char", "c")]);
    assert_eq!(def.total_size_with_padding(), 8);

    let mut schema = with_struct_type("Pair");
    let def = layout(&mut schema, "Pair", &[("short", "s"), ("char", "c")]);
    assert_eq!(def.total_size_with_padding(), 4);
    assert_eq!(def.alignment(), 2);
}

#[test]
fn array_member_takes_full_storage() {
    let mut schema = with_struct_type("Triple");
    schema
        .add_type("int[3]", 4, TypeFlags::INPUT | TypeFlags::ARRAY, "int", 3)
        .unwrap();

    let def = layout(&mut schema, "Triple", &[("char", "tag"), ("int[3]", "values")]);

    let values = def.member_by_name("values").unwrap();
    assert_eq!(values.data_size, 12);
    assert_eq!(values.alignment_padding, 3);
    assert_eq!(def.total_size_with_padding(), 16);
}

#[test]
fn nested_struct_member() {
    let mut schema = with_struct_type("Point");
    schema.define_struct("Point", &[("char", "c"), ("float", "f")]).unwrap();
    schema.add_type("Line", 0, IN_OUT_STRUCT, "Line", 0).unwrap();

    let def = layout(&mut schema, "Line", &[("char", "tag"), ("Point", "start")]);

    let start = def.member(1).unwrap();
    assert_eq!((start.data_size, start.alignment_padding), (8, 3));
    assert_eq!(def.total_size_with_padding(), 12);
}

#[test]
fn member_errors() {
    let mut schema = with_struct_type("Point");
    schema
        .add_type("Pending", 0, IN_OUT_STRUCT, "Pending", 0)
        .unwrap();
    let mut def = schema.new_struct("Point", 2).unwrap();
    schema.add_struct_member(&mut def, "char", "c").unwrap();

    assert_eq!(
        schema.add_struct_member(&mut def, "float", "c"),
        Err(SchemaError::DuplicateMember {
            owner: "Point".into(),
            name: "c".into(),
        })
    );
    assert_eq!(
        schema.add_struct_member(&mut def, "long", "l"),
        Err(SchemaError::UnknownType { name: "long".into() })
    );
    let err = schema.add_struct_member(&mut def, "Pending", "p").unwrap_err();
    assert_eq!(
        err.to_string(),
        "struct 'Point' member 'p' uses struct type 'Pending' before its layout is registered"
    );

    schema.add_struct_member(&mut def, "float", "f").unwrap();
    assert_eq!(
        schema.add_struct_member(&mut def, "int", "extra"),
        Err(SchemaError::TooManyMembers {
            owner: "Point".into(),
            capacity: 2,
            name: "extra".into(),
        })
    );
    assert_eq!(def.members().len(), 2);
    assert_eq!(def.total_size_with_padding(), 8);
}

#[test]
fn finalise_requires_every_member() {
    let mut schema = with_struct_type("Point");
    let mut def = schema.new_struct("Point", 2).unwrap();
    schema.add_struct_member(&mut def, "char", "c").unwrap();

    assert_eq!(
        schema.finalise_struct(&mut def),
        Err(SchemaError::MissingMembers {
            name: "Point".into(),
            added: 1,
            declared: 2,
        })
    );

    schema.add_struct_member(&mut def, "float", "f").unwrap();
    schema.finalise_struct(&mut def).unwrap();
    assert!(matches!(
        schema.finalise_struct(&mut def),
        Err(SchemaError::AlreadyFinalized { .. })
    ));
    assert!(matches!(
        schema.add_struct_member(&mut def, "char", "late"),
        Err(SchemaError::AlreadyFinalized { .. })
    ));
}

#[test]
fn registry_back_fills_type_size() {
    let mut schema = with_struct_type("Point");
    let def = layout(&mut schema, "Point", &[("char", "c"), ("float", "f")]);

    let id = schema.add_struct_definition("Point", def).unwrap();

    assert_eq!(id.as_u32(), 0);
    assert_eq!(schema.types().get_by_name("Point").unwrap().1.data_size, 8);
    let (found, def) = schema.structs().get_by_name("Point").unwrap();
    assert_eq!(found, id);
    assert_eq!(def.num_members(), 2);
}

#[test]
fn registry_checks_existing_type_size() {
    let mut schema = primitives().unwrap();
    schema
        .add_type("Blob", 4, TypeFlags::INPUT | TypeFlags::STRUCT | TypeFlags::POINTER, "Blob", 0)
        .unwrap();

    let err = schema.define_struct("Blob", &[("char", "c")]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::StructSizeMismatch {
            name: "Blob".into(),
            type_size: 4,
            struct_size: 1,
        }
    );
    assert!(schema.structs().is_empty());
}

#[test]
fn registry_rejections() {
    let mut schema = with_struct_type("Point");

    let def = layout(&mut schema, "Point", &[("char", "c")]);
    assert!(matches!(
        schema.add_struct_definition("Other", def),
        Err(SchemaError::NameMismatch { .. })
    ));

    let empty = schema.new_struct("Point", 0).unwrap();
    assert_eq!(
        schema.add_struct_definition("Point", empty),
        Err(SchemaError::EmptyStruct { name: "Point".into() })
    );

    let mut open = schema.new_struct("Point", 1).unwrap();
    schema.add_struct_member(&mut open, "char", "c").unwrap();
    assert_eq!(
        schema.add_struct_definition("Point", open),
        Err(SchemaError::NotFinalized { name: "Point".into() })
    );

    let def = layout(&mut schema, "Point", &[("char", "c")]);
    schema.add_struct_definition("Point", def).unwrap();
    let again = layout(&mut schema, "Point", &[("char", "c")]);
    assert_eq!(
        schema.add_struct_definition("Point", again),
        Err(SchemaError::DuplicateStruct { name: "Point".into() })
    );
    assert_eq!(schema.structs().len(), 1);
}

#[test]
fn struct_needs_its_type() {
    let mut schema = primitives().unwrap();

    assert_eq!(
        schema.define_struct("Loose", &[("char", "c")]),
        Err(SchemaError::UnknownType { name: "Loose".into() })
    );
}

#[test]
fn layout_past_int32_is_an_error() {
    let mut schema = with_struct_type("S");
    schema
        .add_type("blob", crate::MAX_DATA_SIZE, crate::test_utils::IN_POD, "blob", 0)
        .unwrap();

    let err = schema
        .define_struct("S", &[("blob", "a"), ("int", "b")])
        .unwrap_err();

    assert_eq!(err, SchemaError::SizeOverflow { name: "S".into() });
    assert!(schema.structs().is_empty());
}

#[test]
fn rejects_nul_in_member_and_struct_names() {
    let mut schema = with_struct_type("S");

    assert!(matches!(
        schema.new_struct("S\0", 1),
        Err(SchemaError::NulInName { .. })
    ));
    let mut def = schema.new_struct("S", 1).unwrap();
    assert_eq!(
        schema.add_struct_member(&mut def, "int", "x\0"),
        Err(SchemaError::NulInName { name: "x\0".into() })
    );
    assert!(def.members().is_empty());
}
