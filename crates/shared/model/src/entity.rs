//! # Entities
//!
//! Runtime contract shared by every generated entity struct.

use crate::error::{ModelError, ModelErrorExt};
use crate::schema::{ClassDecl, FieldShape};
use crate::validate::{self, ValueKind};
use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use tracing::debug;

/// Raw, untyped field map: the form entities take at system boundaries.
pub type FieldMap = serde_json::Map<String, Value>;

/// A class with a fixed discriminator literal.
pub trait Tagged {
    const CATEGORY: &'static str;
}

/// Entities that descend from the named root of a hierarchy.
pub trait Named {
    fn id(&self) -> Option<&str>;
    fn name(&self) -> Option<&str>;
    /// The discriminator literal of the concrete class.
    fn category(&self) -> &'static str;
}

/// Discriminator slot of a tagged entity.
///
/// Zero-sized: the value is always `T::CATEGORY`. On input it accepts the literal or an
/// absent/`null` value and rejects anything else, so an instance can never hold a foreign
/// category.
pub struct Discriminator<T>(PhantomData<fn() -> T>);

impl<T> Default for Discriminator<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T> Clone for Discriminator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Discriminator<T> {}

impl<T> PartialEq for Discriminator<T> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl<T> Eq for Discriminator<T> {}

impl<T: Tagged> Hash for Discriminator<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        T::CATEGORY.hash(state);
    }
}

impl<T: Tagged> fmt::Debug for Discriminator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Discriminator").field(&T::CATEGORY).finish()
    }
}

impl<T: Tagged> Serialize for Discriminator<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(T::CATEGORY)
    }
}

impl<'de, T: Tagged> Deserialize<'de> for Discriminator<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LiteralVisitor<T>(PhantomData<fn() -> T>);

        impl<'de, T: Tagged> Visitor<'de> for LiteralVisitor<T> {
            type Value = Discriminator<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "the discriminator `{}`", T::CATEGORY)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Discriminator::default())
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Discriminator::default())
            }

            fn visit_some<D: Deserializer<'de>>(self, inner: D) -> Result<Self::Value, D::Error> {
                inner.deserialize_str(self)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                if value == T::CATEGORY {
                    Ok(Discriminator::default())
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }
        }

        deserializer.deserialize_option(LiteralVisitor(PhantomData))
    }
}

/// A typed entity bound to its class declaration.
///
/// Implemented by `#[entity_model]`. The provided methods are the only checked way to
/// build or change an entity from untrusted data; every failure leaves `self` untouched.
pub trait Entity: Serialize + DeserializeOwned + Clone + Default {
    const CLASS: &'static ClassDecl;

    /// Builds an entity from a raw field map.
    ///
    /// Absent and `null` fields take their defaults. Unknown keys, wrong shapes and
    /// foreign discriminators are rejected with the path of the offending value.
    fn from_fields(fields: FieldMap) -> Result<Self, ModelError> {
        if let Err(err) = validate::check_entity(Self::CLASS, &fields, "") {
            debug!(class = Self::CLASS.name, error = %err, "Rejected entity fields");
            return Err(err);
        }
        decode(fields)
    }

    /// Like [`Entity::from_fields`], for any raw value. Non-mappings are rejected.
    fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(fields) => Self::from_fields(fields),
            other => Err(validate::shape_error(
                Self::CLASS.name,
                Cow::Owned(format!("`{}` mapping", Self::CLASS.name)),
                &other,
            )),
        }
    }

    /// Raw field map of the entity, including the discriminator of tagged classes.
    fn to_fields(&self) -> Result<FieldMap, ModelError> {
        match serde_json::to_value(self).context(Self::CLASS.name)? {
            Value::Object(fields) => Ok(fields),
            other => Err(ModelError::Internal {
                message: Cow::Owned(format!(
                    "`{}` encoded as {}, not a mapping",
                    Self::CLASS.name,
                    ValueKind::of(&other)
                )),
                context: None,
            }),
        }
    }

    /// Replaces one field. `null` resets it to its default.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        validate::check_field(Self::CLASS, name, &value, name)?;

        let mut fields = self.to_fields()?;
        fields.insert(name.to_owned(), value);
        *self = decode(fields)?;
        Ok(())
    }

    /// Appends one element to a sequence field.
    fn push_item(&mut self, name: &str, item: Value) -> Result<(), ModelError> {
        let shape = declared_shape(Self::CLASS, name)?;
        if !matches!(
            shape,
            FieldShape::TextList | FieldShape::EntityList(_) | FieldShape::UnionList { .. }
        ) {
            return Err(not_a_container(name, shape));
        }

        let mut items = match self.to_fields()?.remove(name) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        items.push(item);
        self.set_field(name, Value::Array(items))
    }

    /// Inserts or replaces one entry of a mapping field.
    fn insert_entry(&mut self, name: &str, key: &str, entry: Value) -> Result<(), ModelError> {
        let shape = declared_shape(Self::CLASS, name)?;
        if !matches!(shape, FieldShape::EntityMap(_)) {
            return Err(not_a_container(name, shape));
        }

        let mut entries = match self.to_fields()?.remove(name) {
            Some(Value::Object(entries)) => entries,
            _ => FieldMap::new(),
        };
        entries.insert(key.to_owned(), entry);
        self.set_field(name, Value::Object(entries))
    }
}

fn decode<E: Entity>(fields: FieldMap) -> Result<E, ModelError> {
    serde_json::from_value::<E>(Value::Object(validate::normalize(fields))).context(E::CLASS.name)
}

fn declared_shape(class: &'static ClassDecl, name: &str) -> Result<FieldShape, ModelError> {
    class.field(name).map(|field| field.shape).ok_or_else(|| ModelError::UnknownField {
        class: Cow::Borrowed(class.name),
        field: Cow::Owned(name.to_owned()),
        context: None,
    })
}

fn not_a_container(name: &str, shape: FieldShape) -> ModelError {
    ModelError::InvalidShape {
        field: Cow::Owned(name.to_owned()),
        expected: shape.expected(),
        found: Cow::Borrowed("a single element"),
        context: None,
    }
}
