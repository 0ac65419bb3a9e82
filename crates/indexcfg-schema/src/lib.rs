//! Static configuration schema for the indexer.
//!
//! Every configuration section is described once, at compile time, as a
//! [`SectionSchema`]. From those descriptions the [`SchemaRegistry`] derives
//! the flat key namespace (`<section-prefix>.<declared-key>`) that the
//! command-line surface uses, and the [`drift`] module compares operator
//! supplied keys against it.
//!
//! No configuration values are needed for any of this: the key namespace is
//! metadata only.

pub mod drift;
pub mod error;
pub mod registry;
pub mod section;

pub use drift::check_superfluous_keys;
pub use error::{Result, SchemaError};
pub use registry::{FieldLookup, SchemaRegistry};
pub use section::{flat_key, FieldKind, FieldSchema, SectionSchema, KEY_SEPARATOR};
