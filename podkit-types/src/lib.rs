//! Core type definitions for podkit.
//!
//! This crate defines the fundamental types shared by the model and storage
//! layers:
//! - [`ObjectType`]: the fixed taxonomy of schema objects (pod, group, field, ...)
//! - Identifier derivation from an argument bag
//! - Loose value helpers that give argument values a single, predictable
//!   string and truthiness interpretation
//!
//! Argument bags are plain `serde_json` maps so any JSON-shaped value can be
//! attached to a schema object.

mod identifier;
mod object_type;
mod value;

pub use identifier::{identifier_from_args, IDENTIFIER_SEPARATOR};
pub use object_type::ObjectType;
pub use value::{arg_to_string, is_empty_like, is_truthy, to_positive_int};

/// An argument bag: attribute name to JSON value.
pub type Args = serde_json::Map<String, serde_json::Value>;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("unknown object type: {0}")]
    UnknownObjectType(String),
}
