//! # Class Declarations
//!
//! Static descriptions of every class a profile defines. Declarations are plain `const`
//! data so that the entity structs, the validator and the CLI all read the same source.

use crate::error::ModelError;
use std::borrow::Cow;
use std::collections::BTreeSet;
use tracing::debug;

/// Name of the discriminator field carried by every tagged class.
pub const DISCRIMINATOR: &str = "category";

/// The value shape a field accepts.
#[derive(Debug, Clone, Copy)]
pub enum FieldShape {
    /// Optional text.
    Text,
    /// Sequence of text.
    TextList,
    /// Sequence of nested entities of a single class.
    EntityList(&'static ClassDecl),
    /// Text keys mapped to nested entities of a single class.
    EntityMap(&'static ClassDecl),
    /// Sequence of polymorphic elements, resolved through the discriminator.
    UnionList { root: &'static ClassDecl, members: &'static [&'static ClassDecl] },
}

impl FieldShape {
    /// Human readable description used in error messages.
    #[must_use]
    pub fn expected(&self) -> Cow<'static, str> {
        match self {
            Self::Text => Cow::Borrowed("text"),
            Self::TextList => Cow::Borrowed("sequence of text"),
            Self::EntityList(class) => Cow::Owned(format!("sequence of `{}`", class.name)),
            Self::EntityMap(class) => Cow::Owned(format!("mapping of text to `{}`", class.name)),
            Self::UnionList { root, .. } => {
                Cow::Owned(format!("sequence of `{}` members", root.name))
            },
        }
    }

    fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text, Self::Text) | (Self::TextList, Self::TextList) => true,
            (Self::EntityList(a), Self::EntityList(b))
            | (Self::EntityMap(a), Self::EntityMap(b)) => a.name == b.name,
            (Self::UnionList { root: a, .. }, Self::UnionList { root: b, .. }) => a.name == b.name,
            _ => false,
        }
    }

    fn referenced(&self) -> Vec<&'static ClassDecl> {
        match *self {
            Self::Text | Self::TextList => Vec::new(),
            Self::EntityList(class) | Self::EntityMap(class) => vec![class],
            Self::UnionList { root, members } => {
                std::iter::once(root).chain(members.iter().copied()).collect()
            },
        }
    }
}

/// A single declared field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecl {
    pub name: &'static str,
    pub shape: FieldShape,
}

/// A class as emitted by the schema compiler.
#[derive(Debug, Clone, Copy)]
pub struct ClassDecl {
    pub name: &'static str,
    pub description: Option<&'static str>,
    /// Single base class, if any.
    pub is_a: Option<&'static ClassDecl>,
    /// Discriminator literal; `None` for untagged aggregates.
    pub category: Option<&'static str>,
    /// Fields declared on this class only. Inherited fields live on the bases.
    pub fields: &'static [FieldDecl],
}

impl ClassDecl {
    /// Base classes, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'static ClassDecl> {
        std::iter::successors(self.is_a, |class| class.is_a)
    }

    /// Every field of the class, inherited ones first. A redeclared field keeps its
    /// inherited position.
    #[must_use]
    pub fn all_fields(&self) -> Vec<&'static FieldDecl> {
        let mut chain: Vec<&'static [FieldDecl]> =
            self.ancestors().map(|class| class.fields).collect();
        chain.reverse();
        chain.push(self.fields);

        let mut fields: Vec<&'static FieldDecl> = Vec::new();
        for field in chain.into_iter().flatten() {
            match fields.iter_mut().find(|known| known.name == field.name) {
                Some(slot) => *slot = field,
                None => fields.push(field),
            }
        }
        fields
    }

    /// Looks a field up on the class or its nearest declaring base.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDecl> {
        self.fields
            .iter()
            .chain(self.ancestors().flat_map(|class| class.fields.iter()))
            .find(|field| field.name == name)
    }

    /// `true` when `other` is this class or one of its bases.
    #[must_use]
    pub fn is_subclass_of(&self, other: &ClassDecl) -> bool {
        self.name == other.name || self.ancestors().any(|class| class.name == other.name)
    }
}

/// Returns the discriminator literal of a tagged class.
///
/// # Panics
///
/// Panics (at compile time when used in a `const`) if the class is untagged.
#[must_use]
pub const fn category_of(class: &ClassDecl) -> &'static str {
    match class.category {
        Some(category) => category,
        None => panic!("untagged class has no discriminator literal"),
    }
}

/// A closed set of class declarations. Profiles are independent of one another.
#[derive(Debug, Clone, Copy)]
pub struct SchemaProfile {
    pub name: &'static str,
    pub classes: &'static [&'static ClassDecl],
}

impl SchemaProfile {
    /// Finds a class by name.
    pub fn class(&self, name: &str) -> Result<&'static ClassDecl, ModelError> {
        self.classes.iter().copied().find(|class| class.name == name).ok_or_else(|| {
            ModelError::UnknownClass {
                profile: Cow::Borrowed(self.name),
                class: Cow::Owned(name.to_owned()),
                context: None,
            }
        })
    }

    /// Finds a class by discriminator literal.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Option<&'static ClassDecl> {
        self.classes.iter().copied().find(|class| class.category == Some(category))
    }

    /// Verifies the structural rules every profile must satisfy:
    ///
    /// * class names and discriminator literals are unique;
    /// * bases and referenced classes belong to the profile;
    /// * a redeclared field keeps the shape of the inherited one;
    /// * union members are distinct tagged subclasses of the union root;
    /// * no class declares a field named like the discriminator.
    pub fn check(&self) -> Result<(), ModelError> {
        let mut names = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for class in self.classes {
            if !names.insert(class.name) {
                return Err(self.invalid(format!("class `{}` is declared twice", class.name)));
            }
            if let Some(category) = class.category
                && !categories.insert(category)
            {
                return Err(self.invalid(format!("discriminator `{category}` is not unique")));
            }
        }

        for class in self.classes {
            if let Some(base) = class.ancestors().find(|base| !names.contains(base.name)) {
                return Err(self.invalid(format!(
                    "`{}` inherits from `{}`, which is not in the profile",
                    class.name, base.name
                )));
            }
            for field in class.fields {
                self.check_field(class, field)?;
            }
        }

        debug!(profile = self.name, classes = self.classes.len(), "Schema profile checked");
        Ok(())
    }

    fn check_field(&self, class: &ClassDecl, field: &FieldDecl) -> Result<(), ModelError> {
        if field.name == DISCRIMINATOR {
            return Err(self.invalid(format!(
                "`{}` declares `{DISCRIMINATOR}`, which is reserved for the discriminator",
                class.name
            )));
        }

        if let Some(inherited) =
            class.ancestors().find_map(|base| base.fields.iter().find(|f| f.name == field.name))
            && !inherited.shape.same_as(&field.shape)
        {
            return Err(self.invalid(format!(
                "`{}.{}` changes the shape of the inherited field",
                class.name, field.name
            )));
        }

        for referenced in field.shape.referenced() {
            if !self.classes.iter().any(|known| known.name == referenced.name) {
                return Err(self.invalid(format!(
                    "`{}.{}` refers to `{}`, which is not in the profile",
                    class.name, field.name, referenced.name
                )));
            }
        }

        if let FieldShape::UnionList { root, members } = field.shape {
            let mut seen = BTreeSet::new();
            for member in members {
                if !member.is_subclass_of(root) {
                    return Err(self.invalid(format!(
                        "`{}` is not a subclass of union root `{}`",
                        member.name, root.name
                    )));
                }
                if member.category.is_none() {
                    return Err(self.invalid(format!(
                        "union member `{}` has no discriminator",
                        member.name
                    )));
                }
                if !seen.insert(member.name) {
                    return Err(self.invalid(format!(
                        "union member `{}` is listed twice",
                        member.name
                    )));
                }
            }
        }

        Ok(())
    }

    fn invalid(&self, message: String) -> ModelError {
        ModelError::InvalidSchema {
            profile: Cow::Borrowed(self.name),
            message: Cow::Owned(message),
            context: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: ClassDecl = ClassDecl {
        name: "Base",
        description: None,
        is_a: None,
        category: Some("Base"),
        fields: &[
            FieldDecl { name: "id", shape: FieldShape::Text },
            FieldDecl { name: "tags", shape: FieldShape::TextList },
        ],
    };
    const CHILD: ClassDecl = ClassDecl {
        name: "Child",
        description: None,
        is_a: Some(&BASE),
        category: Some("Child"),
        fields: &[
            FieldDecl { name: "tags", shape: FieldShape::TextList },
            FieldDecl { name: "extra", shape: FieldShape::Text },
        ],
    };
    const BROKEN: ClassDecl = ClassDecl {
        name: "Broken",
        description: None,
        is_a: Some(&BASE),
        category: Some("Broken"),
        fields: &[FieldDecl { name: "tags", shape: FieldShape::Text }],
    };

    #[test]
    fn all_fields_keeps_inherited_order() {
        let names: Vec<_> = CHILD.all_fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["id", "tags", "extra"]);
        assert!(CHILD.field("id").is_some());
        assert!(CHILD.field("missing").is_none());
        assert!(CHILD.is_subclass_of(&BASE));
        assert!(!BASE.is_subclass_of(&CHILD));
    }

    #[test]
    fn check_rejects_shape_change_and_missing_base() {
        let ok = SchemaProfile { name: "ok", classes: &[&BASE, &CHILD] };
        assert!(ok.check().is_ok());

        let changed = SchemaProfile { name: "changed", classes: &[&BASE, &BROKEN] };
        assert!(matches!(changed.check(), Err(ModelError::InvalidSchema { .. })));

        let orphan = SchemaProfile { name: "orphan", classes: &[&CHILD] };
        assert!(matches!(orphan.check(), Err(ModelError::InvalidSchema { .. })));
    }

    #[test]
    fn lookups() {
        let profile = SchemaProfile { name: "ok", classes: &[&BASE, &CHILD] };
        assert_eq!(profile.class("Child").map(|c| c.name).ok(), Some("Child"));
        assert!(matches!(profile.class("Nope"), Err(ModelError::UnknownClass { .. })));
        assert_eq!(profile.by_category("Base").map(|c| c.name), Some("Base"));
        assert_eq!(category_of(&CHILD), "Child");
    }
}
