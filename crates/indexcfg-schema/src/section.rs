//! Section and field metadata.
//!
//! A section is a prefixed group of fields. Sections can be composed of
//! smaller reusable sections; a composed section contributes its declared
//! keys under the parent's prefix, never its own.

use std::collections::HashSet;

use crate::error::{Result, SchemaError};

/// Separator between a section prefix and a declared key.
pub const KEY_SEPARATOR: char = '.';

/// Value kind of a configuration field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Int,
    UInt,
    Float,
    String,
}

impl FieldKind {
    /// Short lowercase name used in listings.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::Int => "int",
            FieldKind::UInt => "uint",
            FieldKind::Float => "float",
            FieldKind::String => "string",
        }
    }
}

/// Metadata for a single configuration field.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldSchema {
    /// Declared, user-facing key name (e.g. `start-block`).
    pub key: &'static str,
    /// Value kind accepted for this key.
    pub kind: FieldKind,
    /// One-line help text.
    pub help: &'static str,
}

impl FieldSchema {
    pub const fn new(key: &'static str, kind: FieldKind, help: &'static str) -> Self {
        Self { key, kind, help }
    }
}

/// Static description of a configuration section.
#[derive(Debug)]
pub struct SectionSchema {
    /// Section name, used in diagnostics.
    pub name: &'static str,
    /// Prefix applied to every key of the section. Composed sections may
    /// carry one, but it is ignored when they are mixed into a parent.
    pub prefix: Option<&'static str>,
    /// Fields declared directly on the section.
    pub fields: &'static [FieldSchema],
    /// Sub-sections mixed into this one.
    pub composed: &'static [&'static SectionSchema],
}

impl SectionSchema {
    /// Full field set: own fields first, then each composed section's fields
    /// in declaration order.
    pub fn all_fields(&self) -> Vec<&'static FieldSchema> {
        let mut out: Vec<&'static FieldSchema> = self.fields.iter().collect();
        for sub in self.composed {
            out.extend(sub.all_fields());
        }
        out
    }

    /// Flat keys for the full field set under `prefix`.
    pub fn keys_under(&self, prefix: &str) -> Vec<String> {
        self.all_fields()
            .into_iter()
            .map(|field| flat_key(prefix, field.key))
            .collect()
    }

    /// Look up a field of the full field set by declared key.
    pub fn field(&self, key: &str) -> Option<&'static FieldSchema> {
        self.all_fields().into_iter().find(|field| field.key == key)
    }

    /// Reject a section whose full field set declares a key twice.
    pub fn check_unique_keys(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in self.all_fields() {
            if !seen.insert(field.key) {
                return Err(SchemaError::DuplicateKey {
                    section: self.name,
                    key: field.key,
                });
            }
        }
        Ok(())
    }
}

/// Join a section prefix and a declared key into a flat key.
pub fn flat_key(prefix: &str, key: &str) -> String {
    format!("{prefix}{KEY_SEPARATOR}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    static RETRY: SectionSchema = SectionSchema {
        name: "retry",
        prefix: None,
        fields: &[
            FieldSchema::new("attempts", FieldKind::Int, "retries"),
            FieldSchema::new("max-wait", FieldKind::UInt, "seconds"),
        ],
        composed: &[],
    };

    static PREFIXED_PART: SectionSchema = SectionSchema {
        name: "part",
        prefix: Some("part"),
        fields: &[FieldSchema::new("rate", FieldKind::Float, "rate")],
        composed: &[],
    };

    static PARENT: SectionSchema = SectionSchema {
        name: "parent",
        prefix: Some("top"),
        fields: &[FieldSchema::new("api", FieldKind::String, "endpoint")],
        composed: &[&RETRY, &PREFIXED_PART],
    };

    static CLASH: SectionSchema = SectionSchema {
        name: "clash",
        prefix: Some("clash"),
        fields: &[FieldSchema::new("attempts", FieldKind::Int, "dup")],
        composed: &[&RETRY],
    };

    static LEAF: SectionSchema = SectionSchema {
        name: "leaf",
        prefix: Some("leaf"),
        fields: &[FieldSchema::new("deep", FieldKind::Bool, "innermost")],
        composed: &[],
    };

    static MID: SectionSchema = SectionSchema {
        name: "mid",
        prefix: None,
        fields: &[FieldSchema::new("mid", FieldKind::Int, "middle")],
        composed: &[&LEAF],
    };

    static TOP: SectionSchema = SectionSchema {
        name: "top",
        prefix: Some("top"),
        fields: &[],
        composed: &[&MID],
    };

    static MID_CLASH: SectionSchema = SectionSchema {
        name: "mid-clash",
        prefix: None,
        fields: &[FieldSchema::new("deep", FieldKind::Int, "shadows leaf")],
        composed: &[&LEAF],
    };

    static TOP_CLASH: SectionSchema = SectionSchema {
        name: "top-clash",
        prefix: Some("top"),
        fields: &[],
        composed: &[&MID_CLASH],
    };

    #[test]
    fn nested_composition_flattens_under_top_prefix() {
        let keys = TOP.keys_under("top");
        assert_eq!(keys, vec!["top.mid", "top.deep"]);
        assert!(!keys.iter().any(|k| k.starts_with("leaf.")));
        assert_eq!(TOP.field("deep").map(|f| f.kind), Some(FieldKind::Bool));
        assert!(TOP.check_unique_keys().is_ok());
    }

    #[test]
    fn nested_duplicate_key_is_rejected() {
        assert_eq!(
            TOP_CLASH.check_unique_keys(),
            Err(SchemaError::DuplicateKey {
                section: "top-clash",
                key: "deep",
            })
        );
    }

    #[test]
    fn composed_fields_follow_own_fields() {
        let keys: Vec<&str> = PARENT.all_fields().iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["api", "attempts", "max-wait", "rate"]);
    }

    #[test]
    fn composed_keys_use_parent_prefix_only() {
        let keys = PARENT.keys_under("top");
        assert_eq!(
            keys,
            vec!["top.api", "top.attempts", "top.max-wait", "top.rate"]
        );
        assert!(!keys.iter().any(|k| k.starts_with("part.")));
    }

    #[test]
    fn empty_section_has_no_keys() {
        let empty = SectionSchema {
            name: "empty",
            prefix: Some("empty"),
            fields: &[],
            composed: &[],
        };
        assert!(empty.keys_under("empty").is_empty());
        assert!(empty.check_unique_keys().is_ok());
    }

    #[test]
    fn duplicate_key_across_composition_is_rejected() {
        assert_eq!(
            CLASH.check_unique_keys(),
            Err(SchemaError::DuplicateKey {
                section: "clash",
                key: "attempts",
            })
        );
        assert!(PARENT.check_unique_keys().is_ok());
    }

    #[test]
    fn field_lookup_reaches_composed_fields() {
        let field = PARENT.field("max-wait").expect("composed field should resolve");
        assert_eq!(field.kind, FieldKind::UInt);
        assert!(PARENT.field("missing").is_none());
    }
}
