//! Configuration sections.
//!
//! Field names serialize to the declared keys listed in [`crate::schema`].
//! `Base` mixes in [`Throttling`] and [`Retry`] by holding them as named
//! values; serde flattens them so their keys sit directly under `base`.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

const REDACTED: &str = "<redacted>";

/// Root configuration aggregate: one value per section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub database: Database,
    pub log: Log,
    pub probe: Probe,
    pub base: Base,
    pub flags: Flags,
}

impl IndexConfig {
    /// Copy with secrets replaced, for printing.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.database.password.is_empty() {
            copy.database.password = REDACTED.to_string();
        }
        copy
    }
}

/// Storage connection parameters.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Database {
    pub host: String,
    pub port: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub log_level: String,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: "5432".to_string(),
            database: String::new(),
            user: String::new(),
            password: String::new(),
            log_level: "info".to_string(),
        }
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Database");
        dbg.field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user);
        if self.password.is_empty() {
            dbg.field("password", &"");
        } else {
            dbg.field(
                "password",
                &format_args!("<redacted:{} bytes>", self.password.len()),
            );
        }
        dbg.field("log_level", &self.log_level).finish()
    }
}

impl Database {
    /// Every connection parameter must be present and the port must be a
    /// valid TCP port.
    pub fn check(&self) -> Result<()> {
        let required = [
            ("host", &self.host),
            ("port", &self.port),
            ("database", &self.database),
            ("user", &self.user),
            ("password", &self.password),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::section("database", field, "must be set"));
            }
        }

        if self.port.trim().parse::<u16>().is_err() {
            return Err(ValidationError::section(
                "database",
                "port",
                format!("must be a TCP port number, got {:?}", self.port),
            ));
        }
        Ok(())
    }
}

/// Logging output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Log {
    pub level: String,
    pub path: String,
    pub pretty: bool,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: String::new(),
            pretty: false,
        }
    }
}

/// Chain node probe settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Probe {
    pub rpc: String,
    pub account_prefix: String,
    pub chain_id: String,
    pub chain_name: String,
}

impl Probe {
    /// Check required fields and fill computed defaults.
    ///
    /// An empty `chain-name` takes the value of `chain-id`.
    pub fn with_defaults(mut self) -> Result<Self> {
        if self.rpc.trim().is_empty() {
            return Err(ValidationError::section("probe", "rpc", "must be set"));
        }
        if self.account_prefix.trim().is_empty() {
            return Err(ValidationError::section(
                "probe",
                "account-prefix",
                "must be set",
            ));
        }
        if self.chain_id.trim().is_empty() {
            return Err(ValidationError::section("probe", "chain-id", "must be set"));
        }
        if self.chain_name.is_empty() {
            self.chain_name = self.chain_id.clone();
        }
        Ok(self)
    }
}

/// Request pacing, mixed into [`Base`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Throttling {
    /// Seconds to pause between block requests.
    pub throttling: f64,
}

impl Default for Throttling {
    fn default() -> Self {
        Self { throttling: 0.5 }
    }
}

impl Throttling {
    pub fn check(&self) -> Result<()> {
        if !self.throttling.is_finite() || self.throttling < 0.0 {
            return Err(ValidationError::section(
                "throttling",
                "throttling",
                format!("must be a non-negative number, got {}", self.throttling),
            ));
        }
        Ok(())
    }
}

/// RPC retry policy, mixed into [`Base`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Retry {
    pub request_retry_attempts: i64,
    /// Upper bound, in seconds, of the incremental backoff.
    pub request_retry_max_wait: u64,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            request_retry_attempts: 0,
            request_retry_max_wait: 30,
        }
    }
}

/// Core indexing behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Base {
    #[serde(flatten)]
    pub throttling: Throttling,
    #[serde(flatten)]
    pub retry: Retry,
    pub reindex_message_type: String,
    pub reattempt_failed_blocks: bool,
    /// Node API endpoint. Gets a default port during validation.
    pub api: String,
    /// 0 means unset; -1 resumes from the highest indexed block.
    pub start_block: i64,
    /// 0 means unset; -1 indexes indefinitely.
    pub end_block: i64,
    pub block_input_file: String,
    pub reindex: bool,
    pub rpc_workers: i64,
    pub block_timer: i64,
    pub wait_for_chain: bool,
    pub wait_for_chain_delay: i64,
    #[serde(rename = "index-transactions")]
    pub transaction_indexing_enabled: bool,
    pub exit_when_caught_up: bool,
    #[serde(rename = "index-block-events")]
    pub block_event_indexing_enabled: bool,
    pub block_event_filter_file: String,
    pub dry: bool,
}

impl Default for Base {
    fn default() -> Self {
        Self {
            throttling: Throttling::default(),
            retry: Retry::default(),
            reindex_message_type: String::new(),
            reattempt_failed_blocks: false,
            api: String::new(),
            start_block: 0,
            end_block: -1,
            block_input_file: String::new(),
            reindex: false,
            rpc_workers: 1,
            block_timer: 10_000,
            wait_for_chain: false,
            wait_for_chain_delay: 10,
            transaction_indexing_enabled: false,
            exit_when_caught_up: false,
            block_event_indexing_enabled: false,
            block_event_filter_file: String::new(),
            dry: false,
        }
    }
}

impl Base {
    pub fn any_indexing_enabled(&self) -> bool {
        self.transaction_indexing_enabled || self.block_event_indexing_enabled
    }

    pub fn block_event_filter_path(&self) -> Option<PathBuf> {
        if self.block_event_filter_file.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.block_event_filter_file))
        }
    }
}

/// Opt-in indexing behaviors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Flags {
    /// Store raw message bytes. Grows the database considerably.
    pub index_tx_message_raw: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database() -> Database {
        Database {
            host: "localhost".to_string(),
            database: "indexer".to_string(),
            user: "indexer".to_string(),
            password: "hunter2".to_string(),
            ..Database::default()
        }
    }

    #[test]
    fn database_requires_every_connection_field() {
        assert!(database().check().is_ok());

        let missing_user = Database {
            user: String::new(),
            ..database()
        };
        assert!(matches!(
            missing_user.check(),
            Err(ValidationError::DelegatedSectionInvalid {
                section: "database",
                field: "user",
                ..
            })
        ));
    }

    #[test]
    fn database_port_must_parse() {
        let bad_port = Database {
            port: "postgres".to_string(),
            ..database()
        };
        assert!(matches!(
            bad_port.check(),
            Err(ValidationError::DelegatedSectionInvalid { field: "port", .. })
        ));
    }

    #[test]
    fn database_debug_redacts_password() {
        let rendered = format!("{:?}", database());
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted:7 bytes>"));
    }

    #[test]
    fn redacted_config_hides_password_only() {
        let config = IndexConfig {
            database: database(),
            ..IndexConfig::default()
        };
        let redacted = config.redacted();
        assert_eq!(redacted.database.password, REDACTED);
        assert_eq!(redacted.database.host, "localhost");
        assert_eq!(IndexConfig::default().redacted().database.password, "");
    }

    #[test]
    fn probe_chain_name_defaults_to_chain_id() {
        let probe = Probe {
            rpc: "https://rpc.example.com:443".to_string(),
            account_prefix: "cosmos".to_string(),
            chain_id: "cosmoshub-4".to_string(),
            chain_name: String::new(),
        };
        let probe = probe.with_defaults().unwrap();
        assert_eq!(probe.chain_name, "cosmoshub-4");

        let named = Probe {
            chain_name: "hub".to_string(),
            ..probe
        };
        assert_eq!(named.with_defaults().unwrap().chain_name, "hub");
    }

    #[test]
    fn probe_requires_rpc() {
        let probe = Probe {
            account_prefix: "cosmos".to_string(),
            chain_id: "cosmoshub-4".to_string(),
            ..Probe::default()
        };
        assert!(matches!(
            probe.with_defaults(),
            Err(ValidationError::DelegatedSectionInvalid {
                section: "probe",
                field: "rpc",
                ..
            })
        ));
    }

    #[test]
    fn throttling_rejects_negative_and_nan() {
        assert!(Throttling::default().check().is_ok());
        assert!(Throttling { throttling: 0.0 }.check().is_ok());
        assert!(Throttling { throttling: -1.0 }.check().is_err());
        assert!(Throttling {
            throttling: f64::NAN
        }
        .check()
        .is_err());
    }

    #[test]
    fn base_serializes_composed_sections_flat() {
        let value = serde_json::to_value(Base::default()).unwrap();
        let map = value.as_object().unwrap();
        assert!(map.contains_key("throttling"));
        assert!(map.contains_key("request-retry-max-wait"));
        assert!(map.contains_key("index-transactions"));
        assert!(!map.contains_key("retry"));
    }

    #[test]
    fn defaults_match_flag_defaults() {
        let base = Base::default();
        assert_eq!(base.start_block, 0);
        assert_eq!(base.end_block, -1);
        assert_eq!(base.rpc_workers, 1);
        assert_eq!(base.block_timer, 10_000);
        assert_eq!(base.wait_for_chain_delay, 10);
        assert_eq!(base.retry.request_retry_max_wait, 30);
    }
}
