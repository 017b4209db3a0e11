//! Storage layer for podkit.
//!
//! Storage adapters expose get/find/save/delete over schema objects. The
//! adapters shipped here all work against the in-memory [`Store`] registry:
//!
//! - [`Collection`]: objects declared in code and registered at runtime
//! - [`FileStorage`]: objects declared in a JSON schema document
//!
//! # Architecture
//!
//! - [`Storage`] is the strategy interface; [`StorageRegistry`] selects an
//!   implementation by storage type tag
//! - [`FindQuery`] is a typed query; its normalized form serializes to a
//!   canonical JSON string used as the find cache key
//! - Find results are cached per adapter once the host has signalled
//!   bootstrap completion through [`Store::mark_initialized`]
//!
//! [`Store`]: podkit_model::Store
//! [`Store::mark_initialized`]: podkit_model::Store::mark_initialized

mod collection;
mod config;
mod error;
mod file;
mod query;
mod registry;
mod storage;

pub use collection::{Collection, COLLECTION_COMPATIBLE_TYPES};
pub use config::{StorageConfig, DEFAULT_FIND_LIMIT};
pub use error::{StorageError, StorageResult};
pub use file::{FileStorage, FILE_COMPATIBLE_TYPES};
pub use query::{ArgFilter, FindQuery, FindResult, NormalizedQuery, RefFilter};
pub use registry::StorageRegistry;
pub use storage::Storage;
