//! Indexer runtime configuration.
//!
//! - [`model`]: the configuration sections and their defaults
//! - [`schema`]: static key metadata for every section
//! - [`validate`]: the ordered, fail-fast validation pipeline
//! - [`endpoint`]: default-port normalization applied during validation
//! - [`loader`]: JSON source loading and `key=value` overrides
//!
//! A configuration is built once, validated once, and then handed by value to
//! whatever needs it.

pub mod endpoint;
pub mod error;
pub mod loader;
pub mod model;
pub mod schema;
pub mod validate;

pub use error::{LoadError, Result, ValidationError};
pub use loader::ConfigSource;
pub use model::{Base, Database, Flags, IndexConfig, Log, Probe, Retry, Throttling};
pub use schema::{check_superfluous_index_keys, index_schema};
pub use validate::{rules, validate, Rule};
