//! JSON configuration source.
//!
//! A source document is a JSON object whose members are sections, each an
//! object keyed by declared key names:
//!
//! ```json
//! { "base": { "start-block": 1, "index-transactions": true } }
//! ```
//!
//! The loader keeps the raw document so it can report which keys were
//! actually supplied, independent of the defaulted [`IndexConfig`] it
//! produces.

use std::path::Path;

use indexcfg_schema::{FieldKind, SchemaRegistry, KEY_SEPARATOR};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::LoadError;
use crate::model::IndexConfig;

/// A parsed configuration document plus any overrides applied to it.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    document: Map<String, Value>,
    overridden: Vec<String>,
}

impl ConfigSource {
    /// An empty source; every field takes its default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read a JSON document from disk.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        debug!(path = %path.display(), "reading config source");
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse a JSON document.
    pub fn from_json_str(contents: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    /// Wrap an already parsed document. The root must be an object.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Object(document) => Ok(Self {
                document,
                overridden: Vec::new(),
            }),
            _ => Err(LoadError::NotAnObject),
        }
    }

    /// Apply a `key=value` override, where `key` is a flat key.
    ///
    /// The value is parsed according to the field's kind and written into
    /// the document, replacing anything the file set.
    pub fn set_override(
        &mut self,
        registry: &SchemaRegistry,
        assignment: &str,
    ) -> Result<(), LoadError> {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| LoadError::MalformedOverride(assignment.to_string()))?;
        let key = key.trim();
        let lookup = registry
            .field(key)
            .ok_or_else(|| LoadError::UnknownKey(key.to_string()))?;
        let value = coerce(lookup.field.kind, raw).ok_or_else(|| LoadError::InvalidOverride {
            key: key.to_string(),
            value: raw.to_string(),
            expected: lookup.field.kind.as_str(),
        })?;

        let section = self
            .document
            .entry(lookup.prefix.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(section) = section else {
            return Err(LoadError::SectionNotObject(lookup.prefix.to_string()));
        };
        section.insert(lookup.field.key.to_string(), value);

        debug!(key, "applied config override");
        if !self.overridden.iter().any(|k| k == key) {
            self.overridden.push(key.to_string());
        }
        Ok(())
    }

    /// Flat keys present in the document, followed by overridden keys the
    /// document did not already contain. Empty objects contribute nothing.
    pub fn supplied_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        flatten_keys(None, &self.document, &mut keys);
        for key in &self.overridden {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
        keys
    }

    /// The raw document.
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Deserialize into a configuration; absent fields take their defaults.
    pub fn to_config(&self) -> Result<IndexConfig, LoadError> {
        let config = serde_json::from_value(Value::Object(self.document.clone()))?;
        Ok(config)
    }
}

fn flatten_keys(prefix: Option<&str>, map: &Map<String, Value>, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = match prefix {
            Some(prefix) => format!("{prefix}{KEY_SEPARATOR}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(child) => flatten_keys(Some(&path), child, out),
            _ => out.push(path),
        }
    }
}

fn coerce(kind: FieldKind, raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    match kind {
        FieldKind::Bool => trimmed.parse::<bool>().ok().map(Value::Bool),
        FieldKind::Int => trimmed.parse::<i64>().ok().map(Value::from),
        FieldKind::UInt => trimmed.parse::<u64>().ok().map(Value::from),
        FieldKind::Float => trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        FieldKind::String => Some(Value::String(raw.to_string())),
    }
}
