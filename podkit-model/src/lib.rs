//! Schema object model for podkit.
//!
//! Defines the types every storage adapter works against:
//! - [`Object`]: one schema entity (pod, group, field, ...) as an argument bag
//! - [`Store`]: the registry of live objects keyed by identifier
//! - [`Attribute`] / [`Relation`]: the finite table of attributes that can be
//!   read directly or through a `parent`/`group` reference
//! - [`Loaded`] / [`LoadAs`]: results of the deserialization constructors
//!
//! Objects reference their parent and group by identifier only. References
//! are resolved on demand through the [`Store`] the object was built with.

mod attribute;
mod error;
mod loader;
mod object;
mod store;

pub use attribute::{Attribute, Relation};
pub use error::{ModelError, ModelResult};
pub use loader::{ExternalRecord, LoadAs, Loaded, RecordSource};
pub use object::{Object, ObjectRef, PersistedObject, DEFAULT_STORAGE_TYPE};
pub use store::Store;

pub use podkit_types::{Args, ObjectType};
