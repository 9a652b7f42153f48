#![allow(unused_crate_dependencies)]

use graphql_type_wrapping::{
    FieldDefinition, FieldType, NamedType, SchemaBuilder, TypeId, TypeKind, TypeReference, TypeRegistry,
};

#[derive(Debug, Clone, Copy)]
enum Wrap {
    NonNull,
    List,
    SkippingList,
}

fn apply(registry: &mut TypeRegistry, ty: TypeId, wrappers: &[Wrap]) -> TypeId {
    wrappers.iter().fold(ty, |ty, wrap| match wrap {
        Wrap::NonNull => ty.to_non_null_type(registry),
        Wrap::List => ty.to_list_type(registry, false),
        Wrap::SkippingList => ty.to_list_type(registry, true),
    })
}

#[rstest::rstest]
#[case::bare(&[])]
#[case::required(&[Wrap::NonNull])]
#[case::list(&[Wrap::List])]
#[case::skipping_list(&[Wrap::SkippingList])]
#[case::required_items(&[Wrap::NonNull, Wrap::SkippingList, Wrap::NonNull])]
#[case::nested(&[Wrap::List, Wrap::NonNull, Wrap::SkippingList])]
fn wrapping_before_resolution_matches_wrapping_after(#[case] wrappers: &[Wrap]) {
    let mut builder = SchemaBuilder::new();
    let forward = builder.forward("Item");
    let early = apply(builder.registry_mut(), forward, wrappers);
    let field = builder.field(FieldDefinition::new("Query", "items", early)).unwrap();

    let item = builder.define(NamedType::object("Item")).unwrap();
    let direct = apply(builder.registry_mut(), item, wrappers);

    let schema = builder.finalize().unwrap();

    assert_eq!(schema[field].ty(), FieldType::Type(direct));
    assert_eq!(schema.canonical(early), direct);

    let resolved = schema.walk(early);
    let expected = schema.walk(direct);
    assert_eq!(resolved.id(), expected.id());
    assert_eq!(resolved.non_null(), expected.non_null());
    assert_eq!(resolved.list(), expected.list());
    assert_eq!(resolved.skip_nodes_on_raise(), expected.skip_nodes_on_raise());
    assert_eq!(resolved.unwrap().kind(), Ok(TypeKind::Object));
    assert_eq!(resolved.to_string(), expected.to_string());
}

#[test]
fn resolution_preserves_the_skip_flag_through_non_null() {
    let mut builder = SchemaBuilder::new();
    let forward = builder.forward("Item");
    let required = forward.to_non_null_type(builder.registry_mut());
    let list = required.to_list_type(builder.registry_mut(), false);
    let required_list = list.to_non_null_type(builder.registry_mut());
    let field = builder
        .field(FieldDefinition::new("Query", "items", required_list).skip_nodes_on_raise(true))
        .unwrap();
    builder.define(NamedType::object("Item")).unwrap();

    let schema = builder.finalize().unwrap();
    let ty = schema.field_type(field).unwrap();

    assert!(ty.non_null());
    assert!(ty.list());
    assert!(ty.skip_nodes_on_raise());
    assert!(ty.is_resolved());
    insta::assert_snapshot!(ty.to_string(), @"[Item!]!");
}

#[test]
fn lookups_only_see_definitions() {
    let mut builder = SchemaBuilder::new();
    builder.forward("Item");
    builder.define(NamedType::object("Item")).unwrap();
    builder.define(NamedType::scalar("String")).unwrap();

    let schema = builder.finalize().unwrap();

    let item = schema.lookup_type("Item").unwrap();
    assert_eq!(item.kind(), Ok(TypeKind::Object));
    assert_eq!(schema.lookup_type("String").unwrap().kind(), Ok(TypeKind::Scalar));
    assert!(schema.lookup_type("Missing").is_none());
}
