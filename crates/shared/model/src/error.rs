//! # Model Errors
//!
//! Every failure the model can report. Validation failures carry the dotted field path
//! (`people[2].favorite_fungi[0].name`) of the offending value.

use std::borrow::Cow;

/// Errors raised while constructing, mutating or encoding entities.
#[roster_derive::roster_error]
pub enum ModelError {
    /// A key that the class does not declare (directly or through its bases).
    #[error("Unknown field `{field}` on `{class}`{}", format_context(.context))]
    UnknownField {
        class: Cow<'static, str>,
        field: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A value whose shape does not match the field declaration.
    #[error(
        "Invalid value for `{field}`{}: expected {expected}, found {found}",
        format_context(.context)
    )]
    InvalidShape {
        field: Cow<'static, str>,
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The discriminator names a different class than the one being constructed.
    #[error(
        "Discriminator mismatch at `{field}`{}: expected `{expected}`, found `{found}`",
        format_context(.context)
    )]
    DiscriminatorMismatch {
        field: Cow<'static, str>,
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A polymorphic element whose discriminator is not one of the union's literals.
    #[error(
        "Unknown discriminator `{found}` at `{field}`{}: not a member of `{root}`",
        format_context(.context)
    )]
    UnknownDiscriminator {
        field: Cow<'static, str>,
        root: Cow<'static, str>,
        found: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A polymorphic element without a discriminator; there is no fallback class.
    #[error(
        "Missing discriminator at `{field}`{}: `{root}` members must name their category",
        format_context(.context)
    )]
    MissingDiscriminator {
        field: Cow<'static, str>,
        root: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// Failure while converting between typed entities and field maps.
    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// A profile whose declarations break the hierarchy rules.
    #[error("Invalid schema `{profile}`{}: {message}", format_context(.context))]
    InvalidSchema {
        profile: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// Lookup of a class the profile does not declare.
    #[error("Unknown class `{class}` in profile `{profile}`{}", format_context(.context))]
    UnknownClass {
        profile: Cow<'static, str>,
        class: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// Lookup of a profile that does not exist.
    #[error("Unknown profile `{profile}`{}", format_context(.context))]
    UnknownProfile { profile: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal logic errors.
    #[error("Internal model error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ModelError {
    /// Returns `true` for failures caused by the shape of the input data.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownField { .. }
                | Self::InvalidShape { .. }
                | Self::DiscriminatorMismatch { .. }
                | Self::UnknownDiscriminator { .. }
                | Self::MissingDiscriminator { .. }
        )
    }

    /// Returns the field path the error points at, when there is one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownField { field, .. }
            | Self::InvalidShape { field, .. }
            | Self::DiscriminatorMismatch { field, .. }
            | Self::UnknownDiscriminator { field, .. }
            | Self::MissingDiscriminator { field, .. } => Some(field),
            _ => None,
        }
    }
}
