//! Fail-fast validation pipeline.
//!
//! Rules run in the order returned by [`rules`]. The first rule that fails
//! stops the pass and its error is returned alone. Rule order is part of the
//! contract: it decides which error is reported when several rules would fail.
//!
//! Two rules write back into the configuration: `probe` replaces the probe
//! section with its defaulted form, and `api-endpoint` appends a default port
//! to `base.api`. Both are idempotent.

use std::io::ErrorKind;

use tracing::debug;

use crate::endpoint::with_default_port;
use crate::error::{Result, ValidationError};
use crate::model::IndexConfig;

/// One step of the validation pipeline.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Short identifier used in logs.
    pub name: &'static str,
    check: fn(&mut IndexConfig) -> Result<()>,
}

impl Rule {
    /// Run this rule against `config`.
    pub fn apply(&self, config: &mut IndexConfig) -> Result<()> {
        (self.check)(config)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

static RULES: [Rule; 7] = [
    Rule {
        name: "database",
        check: check_database,
    },
    Rule {
        name: "probe",
        check: check_probe,
    },
    Rule {
        name: "throttling",
        check: check_throttling,
    },
    Rule {
        name: "indexing-mode",
        check: check_indexing_mode,
    },
    Rule {
        name: "block-range",
        check: check_block_range,
    },
    Rule {
        name: "block-event-filter-file",
        check: check_filter_file,
    },
    Rule {
        name: "api-endpoint",
        check: normalize_api_endpoint,
    },
];

/// The pipeline's rules in execution order.
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// Validate `config`, returning it normalized or the first failure.
pub fn validate(mut config: IndexConfig) -> Result<IndexConfig> {
    for rule in rules() {
        if let Err(err) = rule.apply(&mut config) {
            debug!(rule = rule.name, kind = err.kind(), "config rule failed");
            return Err(err);
        }
        debug!(rule = rule.name, "config rule passed");
    }
    Ok(config)
}

impl IndexConfig {
    /// Validate this configuration. See [`validate`].
    pub fn validate(self) -> Result<IndexConfig> {
        validate(self)
    }
}

fn check_database(config: &mut IndexConfig) -> Result<()> {
    config.database.check()
}

fn check_probe(config: &mut IndexConfig) -> Result<()> {
    let probe = std::mem::take(&mut config.probe);
    config.probe = probe.with_defaults()?;
    Ok(())
}

fn check_throttling(config: &mut IndexConfig) -> Result<()> {
    config.base.throttling.check()
}

fn check_indexing_mode(config: &mut IndexConfig) -> Result<()> {
    if !config.base.any_indexing_enabled() {
        return Err(ValidationError::NoIndexingModeSelected);
    }
    Ok(())
}

// 0 is the unset sentinel for both boundaries.
fn check_block_range(config: &mut IndexConfig) -> Result<()> {
    let base = &config.base;
    if !base.any_indexing_enabled() {
        return Ok(());
    }
    if base.start_block == 0 {
        return Err(ValidationError::MissingBlockRange {
            field: "base.start-block",
            value: base.start_block,
        });
    }
    if base.end_block == 0 {
        return Err(ValidationError::MissingBlockRange {
            field: "base.end-block",
            value: base.end_block,
        });
    }
    Ok(())
}

fn check_filter_file(config: &mut IndexConfig) -> Result<()> {
    if !config.base.block_event_indexing_enabled {
        return Ok(());
    }
    let Some(path) = config.base.block_event_filter_path() else {
        return Ok(());
    };
    match std::fs::metadata(&path) {
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(ValidationError::FilterFileNotFound { path })
        }
        _ => Ok(()),
    }
}

fn normalize_api_endpoint(config: &mut IndexConfig) -> Result<()> {
    let normalized = with_default_port(&config.base.api);
    if normalized != config.base.api.as_str() {
        debug!(from = %config.base.api, to = %normalized, "added default port to base.api");
        config.base.api = normalized.into_owned();
    }
    Ok(())
}
