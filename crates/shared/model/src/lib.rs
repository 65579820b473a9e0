//! # Roster Model
//!
//! A closed, discriminated entity hierarchy and the runtime contract its instances satisfy.
//!
//! * Class declarations ([`schema`]) are the output of an external schema compiler: class
//!   names, bases, own fields with their shapes, and the `category` discriminator literal.
//! * Each declared class has a Rust struct bound to its declaration via
//!   [`macro@entity_model`]. Structs reject unknown fields, default every field, and carry a
//!   private discriminator that only ever holds the class literal.
//! * Untrusted input enters through [`Entity::from_fields`], which reports structured
//!   [`ModelError`]s (unknown field, wrong shape, discriminator problems) before decoding.
//! * Declarations are grouped into independent [`profiles`]; they are never merged.
//!
//! ## Example
//!
//! ```rust
//! use roster_model::prelude::*;
//! use roster_model::profiles::basic::Ontologist;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), ModelError> {
//! let Value::Object(fields) = json!({
//!     "id": "1",
//!     "name": "Ada",
//!     "favorite_animals": ["cat", "owl"],
//! }) else {
//!     unreachable!()
//! };
//! let ada = Ontologist::from_fields(fields)?;
//! assert_eq!(ada.category(), "Ontologist");
//! assert_eq!(ada.favorite_animals, ["cat", "owl"]);
//! # Ok(())
//! # }
//! ```

extern crate self as roster_model;

mod entity;
mod error;
pub mod profiles;
pub mod schema;
pub mod validate;

pub use entity::{Discriminator, Entity, FieldMap, Named, Tagged};
pub use error::{ModelError, ModelErrorExt};
pub use roster_derive::entity_model;
pub use schema::{ClassDecl, DISCRIMINATOR, FieldDecl, FieldShape, SchemaProfile};

pub mod prelude {
    pub use crate::entity::{Entity, FieldMap, Named, Tagged};
    pub use crate::error::{ModelError, ModelErrorExt};
    pub use crate::schema::{ClassDecl, SchemaProfile};
    pub use serde_json::Value;
}
