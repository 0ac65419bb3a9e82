//! Indexer configuration validation and schema drift detection.
//!
//! # Crate Structure
//!
//! - [`schema`]: static section metadata, flat key extraction, drift detection
//! - [`config`]: configuration model, fail-fast validation pipeline, JSON loader
//!
//! Typical startup sequence:
//!
//! ```no_run
//! use indexcfg::config::{index_schema, ConfigSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ConfigSource::from_path("indexer.json".as_ref())?;
//! for key in index_schema().superfluous_keys(source.supplied_keys()) {
//!     eprintln!("warning: ignoring unknown config key {key}");
//! }
//! let config = source.to_config()?.validate()?;
//! # let _ = config;
//! # Ok(())
//! # }
//! ```

/// Re-export schema types.
pub mod schema {
    pub use indexcfg_schema::*;
}

/// Re-export configuration types.
pub mod config {
    pub use indexcfg_config::*;
}
