//! Key metadata for the indexer configuration.
//!
//! Each declared key here matches the serde name of the corresponding field
//! in [`crate::model`]; the command-line flag for a field is
//! `<prefix>.<key>`.

use indexcfg_schema::{
    check_superfluous_keys, FieldKind, FieldSchema, SchemaRegistry, SectionSchema,
};

pub static DATABASE: SectionSchema = SectionSchema {
    name: "database",
    prefix: Some("database"),
    fields: &[
        FieldSchema::new("host", FieldKind::String, "database host"),
        FieldSchema::new("port", FieldKind::String, "database port"),
        FieldSchema::new("database", FieldKind::String, "database name"),
        FieldSchema::new("user", FieldKind::String, "database user"),
        FieldSchema::new("password", FieldKind::String, "database password"),
        FieldSchema::new("log-level", FieldKind::String, "database client log level"),
    ],
    composed: &[],
};

pub static LOG: SectionSchema = SectionSchema {
    name: "log",
    prefix: Some("log"),
    fields: &[
        FieldSchema::new("level", FieldKind::String, "log level"),
        FieldSchema::new("path", FieldKind::String, "log file path (stderr when empty)"),
        FieldSchema::new("pretty", FieldKind::Bool, "human readable log output"),
    ],
    composed: &[],
};

pub static PROBE: SectionSchema = SectionSchema {
    name: "probe",
    prefix: Some("probe"),
    fields: &[
        FieldSchema::new("rpc", FieldKind::String, "node RPC endpoint"),
        FieldSchema::new("account-prefix", FieldKind::String, "bech32 account prefix"),
        FieldSchema::new("chain-id", FieldKind::String, "chain id"),
        FieldSchema::new("chain-name", FieldKind::String, "chain name (defaults to chain-id)"),
    ],
    composed: &[],
};

pub static THROTTLING: SectionSchema = SectionSchema {
    name: "throttling",
    prefix: None,
    fields: &[FieldSchema::new(
        "throttling",
        FieldKind::Float,
        "seconds to pause between block requests",
    )],
    composed: &[],
};

pub static RETRY: SectionSchema = SectionSchema {
    name: "retry",
    prefix: None,
    fields: &[
        FieldSchema::new(
            "request-retry-attempts",
            FieldKind::Int,
            "number of RPC query retries to make",
        ),
        FieldSchema::new(
            "request-retry-max-wait",
            FieldKind::UInt,
            "max retry incremental backoff wait time in seconds",
        ),
    ],
    composed: &[],
};

pub static BASE: SectionSchema = SectionSchema {
    name: "base",
    prefix: Some("base"),
    fields: &[
        FieldSchema::new(
            "reindex-message-type",
            FieldKind::String,
            "reindex blocks containing this message type URL",
        ),
        FieldSchema::new(
            "reattempt-failed-blocks",
            FieldKind::Bool,
            "re-enqueue failed blocks at startup",
        ),
        FieldSchema::new("api", FieldKind::String, "node api endpoint"),
        FieldSchema::new(
            "start-block",
            FieldKind::Int,
            "block to start indexing at (-1 resumes from highest indexed)",
        ),
        FieldSchema::new(
            "end-block",
            FieldKind::Int,
            "block to stop indexing at (-1 indexes indefinitely)",
        ),
        FieldSchema::new(
            "block-input-file",
            FieldKind::String,
            "JSON list of block heights to index",
        ),
        FieldSchema::new("reindex", FieldKind::Bool, "re-index already indexed blocks"),
        FieldSchema::new("rpc-workers", FieldKind::Int, "rpc workers"),
        FieldSchema::new(
            "block-timer",
            FieldKind::Int,
            "report timing every this many blocks",
        ),
        FieldSchema::new("wait-for-chain", FieldKind::Bool, "wait for the node to sync"),
        FieldSchema::new(
            "wait-for-chain-delay",
            FieldKind::Int,
            "seconds between node sync checks",
        ),
        FieldSchema::new(
            "index-transactions",
            FieldKind::Bool,
            "enable transaction indexing",
        ),
        FieldSchema::new(
            "exit-when-caught-up",
            FieldKind::Bool,
            "exit once the chain head is reached",
        ),
        FieldSchema::new(
            "index-block-events",
            FieldKind::Bool,
            "enable begin/end blocker event indexing",
        ),
        FieldSchema::new(
            "block-event-filter-file",
            FieldKind::String,
            "JSON list of block event filters",
        ),
        FieldSchema::new("dry", FieldKind::Bool, "index without writing to the database"),
    ],
    composed: &[&THROTTLING, &RETRY],
};

pub static FLAGS: SectionSchema = SectionSchema {
    name: "flags",
    prefix: Some("flags"),
    fields: &[FieldSchema::new(
        "index-tx-message-raw",
        FieldKind::Bool,
        "index raw message bytes",
    )],
    composed: &[],
};

/// Top-level sections in registration order.
pub static SECTIONS: [&SectionSchema; 5] = [&DATABASE, &LOG, &PROBE, &BASE, &FLAGS];

/// Registry over the indexer's sections.
pub fn index_schema() -> SchemaRegistry {
    // Static data; `built_in_schema_is_consistent` guards it.
    SchemaRegistry::from_sections(&SECTIONS).expect("built-in index schema is consistent")
}

/// Supplied keys that no indexer field declares.
pub fn check_superfluous_index_keys<I, S>(supplied: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    check_superfluous_keys(&index_schema().valid_keys(), supplied)
}
