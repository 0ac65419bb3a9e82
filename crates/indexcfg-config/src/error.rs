use std::path::PathBuf;

/// The first rule that rejected a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A section with its own consistency check (database, probe,
    /// throttling) rejected itself.
    #[error("invalid {section} configuration: {field} {reason}")]
    DelegatedSectionInvalid {
        section: &'static str,
        field: &'static str,
        reason: String,
    },

    /// Neither transaction nor block-event indexing is enabled.
    #[error("must enable at least one of base.index-transactions or base.index-block-events")]
    NoIndexingModeSelected,

    /// A block boundary is still at its unset sentinel (0).
    #[error("{field} must be set when indexing is enabled (got {value})")]
    MissingBlockRange { field: &'static str, value: i64 },

    /// The block-event filter file does not exist.
    #[error("base.block-event-filter-file {} does not exist", path.display())]
    FilterFileNotFound { path: PathBuf },

    /// Reserved for field-level rules that fit none of the kinds above.
    #[error("invalid value {value:?} for {field}: {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl ValidationError {
    /// Stable snake_case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::DelegatedSectionInvalid { .. } => "delegated_section_invalid",
            ValidationError::NoIndexingModeSelected => "no_indexing_mode_selected",
            ValidationError::MissingBlockRange { .. } => "missing_block_range",
            ValidationError::FilterFileNotFound { .. } => "filter_file_not_found",
            ValidationError::InvalidFieldValue { .. } => "invalid_field_value",
        }
    }

    pub(crate) fn section(
        section: &'static str,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        ValidationError::DelegatedSectionInvalid {
            section,
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors that can occur while reading a configuration source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source is not valid JSON or does not match the model's types.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document root is not a JSON object.
    #[error("config root must be a JSON object")]
    NotAnObject,

    /// A section that must be written to is not a JSON object.
    #[error("config section {0} must be a JSON object")]
    SectionNotObject(String),

    /// An override is not of the form `key=value`.
    #[error("override must look like key=value: {0}")]
    MalformedOverride(String),

    /// An override names a key the schema does not define.
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// An override value does not parse as the field's kind.
    #[error("invalid value {value:?} for {key}: expected {expected}")]
    InvalidOverride {
        key: String,
        value: String,
        expected: &'static str,
    },
}
