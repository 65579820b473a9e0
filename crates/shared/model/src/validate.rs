//! # Validation
//!
//! Checks raw field maps against class declarations before they are decoded into typed
//! entities. Every error carries the path of the offending value, e.g.
//! `people[1].favorite_animals.cat.name`.

use crate::entity::FieldMap;
use crate::error::ModelError;
use crate::schema::{ClassDecl, DISCRIMINATOR, FieldShape};
use serde_json::Value;
use std::borrow::Cow;

/// Coarse kind of a raw value, as reported in shape errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    Text,
    Sequence,
    Mapping,
}

impl ValueKind {
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::Text,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }
}

/// Checks every key of `fields` against `class`, recursing into nested entities.
pub fn check_entity(
    class: &'static ClassDecl,
    fields: &FieldMap,
    path: &str,
) -> Result<(), ModelError> {
    for (name, value) in fields {
        check_field(class, name, value, &join(path, name))?;
    }
    Ok(())
}

/// Checks one field value. `path` is the full path of the field itself.
///
/// `null` is accepted for every field and means "unset". The discriminator accepts only
/// `null` or the class literal.
pub fn check_field(
    class: &'static ClassDecl,
    name: &str,
    value: &Value,
    path: &str,
) -> Result<(), ModelError> {
    if name == DISCRIMINATOR
        && let Some(expected) = class.category
    {
        return match value {
            Value::Null => Ok(()),
            Value::String(found) if found == expected => Ok(()),
            Value::String(found) => Err(ModelError::DiscriminatorMismatch {
                field: Cow::Owned(path.to_owned()),
                expected: Cow::Borrowed(expected),
                found: Cow::Owned(found.clone()),
                context: None,
            }),
            other => Err(shape_error(path, Cow::Borrowed("text"), other)),
        };
    }

    let Some(decl) = class.field(name) else {
        return Err(ModelError::UnknownField {
            class: Cow::Borrowed(class.name),
            field: Cow::Owned(path.to_owned()),
            context: None,
        });
    };
    check_shape(&decl.shape, value, path)
}

fn check_shape(shape: &FieldShape, value: &Value, path: &str) -> Result<(), ModelError> {
    if value.is_null() {
        return Ok(());
    }

    match (*shape, value) {
        (FieldShape::Text, Value::String(_)) => Ok(()),
        (FieldShape::TextList, Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(shape_error(&index(path, i), Cow::Borrowed("text"), item));
                }
            }
            Ok(())
        },
        (FieldShape::EntityList(class), Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_nested(class, item, &index(path, i))?;
            }
            Ok(())
        },
        (FieldShape::EntityMap(class), Value::Object(entries)) => {
            for (key, item) in entries {
                check_nested(class, item, &join(path, key))?;
            }
            Ok(())
        },
        (FieldShape::UnionList { root, members }, Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                let path = index(path, i);
                let (class, fields) = resolve_member(root, members, item, &path)?;
                check_entity(class, fields, &path)?;
            }
            Ok(())
        },
        (shape, other) => Err(shape_error(path, shape.expected(), other)),
    }
}

fn check_nested(class: &'static ClassDecl, value: &Value, path: &str) -> Result<(), ModelError> {
    match value {
        Value::Object(fields) => check_entity(class, fields, path),
        other => Err(shape_error(path, Cow::Owned(format!("`{}` mapping", class.name)), other)),
    }
}

/// Picks the union member named by the element's discriminator.
///
/// An element without a discriminator is rejected: the root is never assumed.
pub fn resolve_member<'v>(
    root: &'static ClassDecl,
    members: &[&'static ClassDecl],
    value: &'v Value,
    path: &str,
) -> Result<(&'static ClassDecl, &'v FieldMap), ModelError> {
    let Value::Object(fields) = value else {
        return Err(shape_error(path, Cow::Owned(format!("`{}` member", root.name)), value));
    };

    match fields.get(DISCRIMINATOR) {
        None | Some(Value::Null) => Err(ModelError::MissingDiscriminator {
            field: Cow::Owned(path.to_owned()),
            root: Cow::Borrowed(root.name),
            context: None,
        }),
        Some(Value::String(category)) => members
            .iter()
            .copied()
            .find(|member| member.category == Some(category.as_str()))
            .map(|member| (member, fields))
            .ok_or_else(|| ModelError::UnknownDiscriminator {
                field: Cow::Owned(path.to_owned()),
                root: Cow::Borrowed(root.name),
                found: Cow::Owned(category.clone()),
                context: None,
            }),
        Some(other) => Err(shape_error(&join(path, DISCRIMINATOR), Cow::Borrowed("text"), other)),
    }
}

/// Drops `null` entries from mappings, recursively, so that they decode as unset fields.
#[must_use]
pub fn normalize(fields: FieldMap) -> FieldMap {
    fields
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key, normalize_value(value)))
        .collect()
}

fn normalize_value(value: Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(normalize(fields)),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        other => other,
    }
}

pub(crate) fn shape_error(path: &str, expected: Cow<'static, str>, found: &Value) -> ModelError {
    ModelError::InvalidShape {
        field: Cow::Owned(path.to_owned()),
        expected,
        found: Cow::Borrowed(ValueKind::of(found).into()),
        context: None,
    }
}

pub(crate) fn join(path: &str, field: &str) -> String {
    if path.is_empty() { field.to_owned() } else { format!("{path}.{field}") }
}

fn index(path: &str, i: usize) -> String {
    format!("{path}[{i}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::demo::decl;
    use serde_json::json;

    fn map(value: Value) -> FieldMap {
        match value {
            Value::Object(fields) => fields,
            _ => FieldMap::new(),
        }
    }

    #[test]
    fn nested_errors_carry_full_path() {
        let fields = map(json!({
            "people": [
                { "category": "pydanticgen-demo:Person", "name": "Bo" },
                { "category": "pydanticgen-demo:Chef", "favorite_fungi": [{ "name": 3 }] },
            ]
        }));

        let err = check_entity(&decl::CONTAINER, &fields, "").unwrap_err();
        assert_eq!(err.field(), Some("people[1].favorite_fungi[0].name"));
        assert!(err.to_string().contains("found number"), "{err}");
    }

    #[test]
    fn null_is_unset_but_list_elements_are_not() {
        let plants = "favorite_plants";
        assert!(check_field(&decl::PROGRAMMER, plants, &Value::Null, plants).is_ok());
        assert!(check_field(&decl::PROGRAMMER, "category", &Value::Null, "category").is_ok());

        let err =
            check_field(&decl::PROGRAMMER, plants, &json!(["fern", null]), plants).unwrap_err();
        assert_eq!(err.field(), Some("favorite_plants[1]"));
    }

    #[test]
    fn discriminator_checks() {
        let err =
            check_field(&decl::PERSON, "category", &json!("pydanticgen-demo:Chef"), "category")
                .unwrap_err();
        assert!(matches!(err, ModelError::DiscriminatorMismatch { .. }));

        let err = check_field(&decl::CONTAINER, "category", &json!("x"), "category").unwrap_err();
        assert!(matches!(err, ModelError::UnknownField { .. }));
    }

    #[test]
    fn resolve_member_requires_known_discriminator() {
        let members = crate::profiles::demo::decl::PERSON_MEMBERS;

        let value = json!({ "name": "x" });
        let missing = resolve_member(&decl::PERSON, members, &value, "people[0]");
        assert!(matches!(missing, Err(ModelError::MissingDiscriminator { .. })));

        let value = json!({ "category": "Wizard" });
        let unknown = resolve_member(&decl::PERSON, members, &value, "people[0]");
        assert!(matches!(unknown, Err(ModelError::UnknownDiscriminator { .. })));

        let value = json!({ "category": "pydanticgen-demo:Ontologist" });
        let resolved =
            resolve_member(&decl::PERSON, members, &value, "people[0]").map(|(c, _)| c.name);
        assert_eq!(resolved.ok(), Some("Ontologist"));
    }

    #[test]
    fn normalize_drops_nulls_recursively() {
        let fields = map(json!({ "id": null, "people": [{ "name": null, "category": "c" }] }));
        assert_eq!(Value::Object(normalize(fields)), json!({ "people": [{ "category": "c" }] }));
    }
}
