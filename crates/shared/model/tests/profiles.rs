pub mod fixtures;

use fixtures::keys;
use roster_model::prelude::*;
use roster_model::profiles::{self, basic, demo};
use roster_model::{DISCRIMINATOR, FieldShape};

fn assert_fields_match_declaration<E: Entity>() {
    let mut expected: Vec<String> =
        E::CLASS.all_fields().iter().map(|field| field.name.to_owned()).collect();
    if E::CLASS.category.is_some() {
        expected.push(DISCRIMINATOR.to_owned());
    }
    expected.sort();

    let mut actual = keys(&E::default());
    actual.sort();
    assert_eq!(actual, expected, "struct and declaration of `{}` differ", E::CLASS.name);
}

#[test]
fn test_shipped_profiles_are_consistent() {
    for profile in profiles::ALL {
        profile.check().unwrap_or_else(|err| panic!("{err}"));
    }
    assert!(matches!(profiles::find("extended"), Err(ModelError::UnknownProfile { .. })));
}

#[test]
fn test_struct_fields_match_declarations() {
    assert_fields_match_declaration::<basic::Person>();
    assert_fields_match_declaration::<basic::Ontologist>();
    assert_fields_match_declaration::<basic::Programmer>();

    assert_fields_match_declaration::<demo::NamedThing>();
    assert_fields_match_declaration::<demo::Person>();
    assert_fields_match_declaration::<demo::Ontologist>();
    assert_fields_match_declaration::<demo::Programmer>();
    assert_fields_match_declaration::<demo::Chef>();
    assert_fields_match_declaration::<demo::Animal>();
    assert_fields_match_declaration::<demo::Plant>();
    assert_fields_match_declaration::<demo::Fungi>();
    assert_fields_match_declaration::<demo::Container>();
}

#[test]
fn test_profiles_are_not_merged() {
    assert_eq!(basic::Person::CATEGORY, "Person");
    assert_eq!(demo::Person::CATEGORY, "pydanticgen-demo:Person");
    assert!(basic::PROFILE.by_category(demo::Person::CATEGORY).is_none());
    assert!(matches!(basic::PROFILE.class("Chef"), Err(ModelError::UnknownClass { .. })));

    let chef = demo::PROFILE.by_category("pydanticgen-demo:Chef").map(|class| class.name);
    assert_eq!(chef, Some("Chef"));
}

#[test]
fn test_subclasses_are_additive() {
    let chef = demo::PROFILE.class("Chef").unwrap();
    let names: Vec<_> = chef.all_fields().iter().map(|field| field.name).collect();
    assert_eq!(names, ["id", "name", "favorite_animals", "favorite_plants", "favorite_fungi"]);
    assert!(chef.is_subclass_of(&demo::decl::NAMED_THING));

    let ancestors: Vec<_> = chef.ancestors().map(|class| class.name).collect();
    assert_eq!(ancestors, ["Person", "NamedThing"]);

    let people = demo::decl::CONTAINER.field("people").map(|field| field.shape);
    assert!(matches!(people, Some(FieldShape::UnionList { root, .. }) if root.name == "Person"));
}

#[test]
fn test_canonicalize_fills_defaults() {
    let canonical = profiles::canonicalize(
        "demo",
        "Chef",
        fixtures::fields(serde_json::json!({ "name": "Remy" })),
    )
    .unwrap();

    assert_eq!(canonical["category"], "pydanticgen-demo:Chef");
    assert_eq!(canonical["favorite_fungi"], serde_json::json!([]));

    let unknown = profiles::canonicalize("demo", "Wizard", FieldMap::new());
    assert!(matches!(unknown, Err(ModelError::UnknownClass { .. })));
}
