//! Schema description and wire-schema extraction for AFlow interface
//! registration.
//!
//! Models describe their own shape through the closed [`SchemaNode`] sum
//! type instead of runtime reflection: each structured model implements
//! [`ModelSchema`] and hands back an ordered list of [`FieldSpec`]s. The
//! rest of the crate is pure structural transformation over that data:
//! canonical type tokens ([`type_token`]), recursive field expansion
//! ([`expand_fields`]/[`expand_record`]) and the registry wire shape
//! ([`adapt`]).

pub mod adapter;
pub mod convert;
pub mod error;
pub mod field;
pub mod node;

pub use adapter::{adapt, adapt_all, WireField};
pub use convert::type_token;
pub use error::SchemaError;
pub use field::{expand_fields, expand_record, FieldDescriptor};
pub use node::{FieldSpec, ModelSchema, RecordRef, SchemaNode};
