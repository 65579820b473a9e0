#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the roster workspace.
//!
//! * [`macro@entity_model`] binds a plain struct to the class declaration emitted by the
//!   schema compiler: closed field set, discriminator literal, builder, and serde wiring.
//! * [`macro@roster_error`] turns an enum into a `thiserror` error with context support.
//!
//! Generated code refers to `::roster_model`, `::serde` and `::typed_builder`, so consumers
//! of `entity_model` must depend on those crates (the model crate re-exports the macro).

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro that turns a struct into a validated entity of a schema profile.
///
/// # Arguments
///
/// * `class = PATH` - the `ClassDecl` constant this struct implements (required).
/// * `untagged` - the class carries no discriminator (aggregates such as containers).
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Clone`, `PartialEq`, `Eq`, `Default`, `Serialize`,
///   `Deserialize` and `TypedBuilder` when missing.
/// * **Serde Policy**: `deny_unknown_fields` and container-level `default`, so partial
///   input is accepted and unknown keys are not.
/// * **Discriminator**: a private `category: Discriminator<Self>` field is appended for
///   tagged classes. It has no builder setter and only accepts the class literal on input.
/// * **Builder**: every declared field gets a defaulted setter; `Option` fields take the
///   inner value directly.
/// * **Traits**: `Entity` always; `Tagged` and `Named` for tagged classes with `id`/`name`.
///
/// # Example
///
/// ```rust,ignore
/// use roster_model::entity_model;
///
/// #[entity_model(class = decl::PROGRAMMER)]
/// pub struct Programmer {
///     pub id: Option<String>,
///     pub name: Option<String>,
///     pub favorite_plants: Vec<String>,
/// }
///
/// let ada = Programmer::builder().name("Ada").build();
/// ```
#[proc_macro_attribute]
pub fn entity_model(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::entity::expand_entity_model(args.into(), input).into()
}

/// Attribute macro for defining error enums with optional context.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to `Result<T, Name>` and to results of every wrapped source error.
/// * **Standard Conversions**: `From<Source>` for variants holding a `source` field
///   (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants wrapping a source error must carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use roster_derive::roster_error;
/// use std::borrow::Cow;
///
/// #[roster_error]
/// pub enum ModelError {
///     #[error("Serialization error{}: {source}", format_context(.context))]
///     Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal model error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn roster_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
