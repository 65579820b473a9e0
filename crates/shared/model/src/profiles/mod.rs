//! # Profiles
//!
//! Independent class sets. Each profile module holds its declarations (`decl`), its
//! `PROFILE`, the entity structs and a `canonicalize` entry point keyed by class name.
//!
//! * [`basic`] - `Person` with `Ontologist` and `Programmer` holding plain text lists.
//! * [`demo`] - a `NamedThing` rooted hierarchy with nested organisms and a polymorphic
//!   `Container`.

use crate::entity::FieldMap;
use crate::error::ModelError;
use crate::schema::SchemaProfile;
use std::borrow::Cow;

/// Lossy upcast of a subclass into its base: shared fields are kept, the rest dropped.
macro_rules! upcast {
    ($($sub:ty => $base:ty),+ $(,)?) => {$(
        impl From<$sub> for $base {
            fn from(value: $sub) -> Self {
                Self { id: value.id, name: value.name, ..Self::default() }
            }
        }
    )+};
}

/// Generates `canonicalize(class, fields)` dispatching on the class name.
macro_rules! canonicalizer {
    ($($ty:ty),+ $(,)?) => {
        /// Validates `fields` as an instance of `class` and returns its canonical field map.
        pub fn canonicalize(
            class: &str,
            fields: $crate::FieldMap,
        ) -> Result<$crate::FieldMap, $crate::ModelError> {
            $(
                if class == <$ty as $crate::Entity>::CLASS.name {
                    let entity = <$ty as $crate::Entity>::from_fields(fields)?;
                    return $crate::Entity::to_fields(&entity);
                }
            )+
            Err($crate::ModelError::UnknownClass {
                profile: ::std::borrow::Cow::Borrowed(PROFILE.name),
                class: ::std::borrow::Cow::Owned(class.to_owned()),
                context: None,
            })
        }
    };
}

pub mod basic;
pub mod demo;

/// Every profile the crate ships.
pub const ALL: &[&SchemaProfile] = &[&basic::PROFILE, &demo::PROFILE];

/// Finds a profile by name.
pub fn find(name: &str) -> Result<&'static SchemaProfile, ModelError> {
    ALL.iter().copied().find(|profile| profile.name == name).ok_or_else(|| {
        ModelError::UnknownProfile { profile: Cow::Owned(name.to_owned()), context: None }
    })
}

/// Validates `fields` as `class` of the named profile and returns the canonical field map.
pub fn canonicalize(profile: &str, class: &str, fields: FieldMap) -> Result<FieldMap, ModelError> {
    match find(profile)?.name {
        name if name == basic::PROFILE.name => basic::canonicalize(class, fields),
        _ => demo::canonicalize(class, fields),
    }
}
