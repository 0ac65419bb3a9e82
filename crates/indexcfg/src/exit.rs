use std::fmt;
use std::io;

use indexcfg_config::{LoadError, ValidationError};

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn load_error(context: &str, err: LoadError) -> CliError {
    match err {
        LoadError::Read { path, source } => {
            io_error(&format!("{context} {}", path.display()), source)
        }
        LoadError::MalformedOverride(_)
        | LoadError::UnknownKey(_)
        | LoadError::InvalidOverride { .. } => CliError::new(USAGE, format!("{context}: {err}")),
        LoadError::Parse(_) | LoadError::NotAnObject | LoadError::SectionNotObject(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn validation_error(err: ValidationError) -> CliError {
    CliError::new(
        DATA_INVALID,
        format!("config validation failed [{}]: {err}", err.kind()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_mistakes_are_usage_errors() {
        let err = load_error("load", LoadError::UnknownKey("base.nope".to_string()));
        assert_eq!(err.code, USAGE);
        assert!(err.message.contains("base.nope"));
    }

    #[test]
    fn missing_file_maps_to_failure() {
        let err = load_error(
            "read",
            LoadError::Read {
                path: "/nope.json".into(),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
        );
        assert_eq!(err.code, FAILURE);
        assert!(err.message.contains("/nope.json"));
    }

    #[test]
    fn validation_failures_are_data_invalid() {
        let err = validation_error(ValidationError::NoIndexingModeSelected);
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("no_indexing_mode_selected"));
    }
}
