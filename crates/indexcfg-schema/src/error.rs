/// Errors that can occur while building a schema registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A top-level section was registered without a prefix.
    #[error("section {section} has no prefix and cannot be registered at the top level")]
    MissingPrefix { section: &'static str },

    /// Two top-level sections share the same prefix.
    #[error("prefix {prefix} is already used by section {existing}")]
    DuplicatePrefix {
        prefix: &'static str,
        existing: &'static str,
    },

    /// Two fields in the same section (including composed sub-sections)
    /// declare the same key.
    #[error("section {section} declares key {key} more than once")]
    DuplicateKey {
        section: &'static str,
        key: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
