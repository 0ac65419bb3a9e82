use std::collections::BTreeSet;

use tracing::debug;

use crate::drift::check_superfluous_keys;
use crate::error::{Result, SchemaError};
use crate::section::{FieldSchema, SectionSchema, KEY_SEPARATOR};

/// Resolved metadata for one flat key.
#[derive(Debug, Clone, Copy)]
pub struct FieldLookup {
    /// Prefix of the top-level section owning the field.
    pub prefix: &'static str,
    /// Top-level section owning the field.
    pub section: &'static SectionSchema,
    /// The field itself (possibly declared on a composed sub-section).
    pub field: &'static FieldSchema,
}

/// Ordered set of top-level configuration sections.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    sections: Vec<(&'static str, &'static SectionSchema)>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from top-level sections, in order.
    pub fn from_sections(sections: &[&'static SectionSchema]) -> Result<Self> {
        let mut registry = Self::new();
        for section in sections {
            registry.register(section)?;
        }
        Ok(registry)
    }

    /// Register a top-level section.
    ///
    /// The section must carry a prefix not used by any other registered
    /// section, and its full field set must not declare a key twice.
    pub fn register(&mut self, section: &'static SectionSchema) -> Result<()> {
        let prefix = section.prefix.ok_or(SchemaError::MissingPrefix {
            section: section.name,
        })?;

        if let Some((_, existing)) = self.sections.iter().find(|(p, _)| *p == prefix) {
            return Err(SchemaError::DuplicatePrefix {
                prefix,
                existing: existing.name,
            });
        }

        section.check_unique_keys()?;

        debug!(
            section = section.name,
            prefix,
            fields = section.all_fields().len(),
            "registered config section"
        );
        self.sections.push((prefix, section));
        Ok(())
    }

    /// Registered sections as `(prefix, section)` pairs in registration order.
    pub fn sections(&self) -> &[(&'static str, &'static SectionSchema)] {
        &self.sections
    }

    /// Find a top-level section by prefix.
    pub fn section(&self, prefix: &str) -> Option<&'static SectionSchema> {
        self.sections
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, section)| *section)
    }

    /// Every flat key the schema defines.
    pub fn valid_keys(&self) -> BTreeSet<String> {
        self.sections
            .iter()
            .flat_map(|(prefix, section)| section.keys_under(prefix))
            .collect()
    }

    /// Flat keys of a single section, in declaration order.
    pub fn section_keys(&self, prefix: &str) -> Vec<String> {
        self.section(prefix)
            .map(|section| section.keys_under(prefix))
            .unwrap_or_default()
    }

    /// Resolve a flat key to its field metadata.
    pub fn field(&self, key: &str) -> Option<FieldLookup> {
        let (prefix, declared) = key.split_once(KEY_SEPARATOR)?;
        let &(prefix, section) = self.sections.iter().find(|(p, _)| *p == prefix)?;
        let field = section.field(declared)?;
        Some(FieldLookup {
            prefix,
            section,
            field,
        })
    }

    /// Supplied keys that the schema does not define.
    pub fn superfluous_keys<I, S>(&self, supplied: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        check_superfluous_keys(&self.valid_keys(), supplied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::FieldKind;

    static THROTTLE: SectionSchema = SectionSchema {
        name: "throttling",
        prefix: None,
        fields: &[FieldSchema::new("throttling", FieldKind::Float, "pause")],
        composed: &[],
    };

    static BASE: SectionSchema = SectionSchema {
        name: "base",
        prefix: Some("base"),
        fields: &[
            FieldSchema::new("api", FieldKind::String, "endpoint"),
            FieldSchema::new("start-block", FieldKind::Int, "first block"),
        ],
        composed: &[&THROTTLE],
    };

    static LOG: SectionSchema = SectionSchema {
        name: "log",
        prefix: Some("log"),
        fields: &[FieldSchema::new("level", FieldKind::String, "level")],
        composed: &[],
    };

    static EMPTY: SectionSchema = SectionSchema {
        name: "empty",
        prefix: Some("empty"),
        fields: &[],
        composed: &[],
    };

    static OTHER_BASE: SectionSchema = SectionSchema {
        name: "other",
        prefix: Some("base"),
        fields: &[],
        composed: &[],
    };

    fn registry() -> SchemaRegistry {
        SchemaRegistry::from_sections(&[&BASE, &LOG, &EMPTY]).unwrap()
    }

    #[test]
    fn valid_keys_cover_all_sections() {
        let keys: Vec<String> = registry().valid_keys().into_iter().collect();
        assert_eq!(
            keys,
            vec![
                "base.api",
                "base.start-block",
                "base.throttling",
                "log.level",
            ]
        );
    }

    #[test]
    fn extraction_is_deterministic() {
        let first = registry();
        let second = registry();
        assert_eq!(first.valid_keys(), first.valid_keys());
        assert_eq!(first.valid_keys(), second.valid_keys());
    }

    #[test]
    fn fragment_cannot_be_top_level() {
        let mut registry = SchemaRegistry::new();
        assert_eq!(
            registry.register(&THROTTLE),
            Err(SchemaError::MissingPrefix {
                section: "throttling"
            })
        );
    }

    #[test]
    fn duplicate_prefix_is_rejected() {
        let result = SchemaRegistry::from_sections(&[&BASE, &OTHER_BASE]);
        assert!(matches!(
            result,
            Err(SchemaError::DuplicatePrefix {
                prefix: "base",
                existing: "base"
            })
        ));
    }

    #[test]
    fn field_lookup_resolves_composed_key() {
        let registry = registry();
        let lookup = registry
            .field("base.throttling")
            .expect("composed key should resolve");
        assert_eq!(lookup.prefix, "base");
        assert_eq!(lookup.section.name, "base");
        assert_eq!(lookup.field.kind, FieldKind::Float);

        assert!(registry.field("throttling.throttling").is_none());
        assert!(registry.field("base").is_none());
        assert!(registry.field("Base.api").is_none());
    }

    #[test]
    fn section_keys_for_unknown_prefix_is_empty() {
        let registry = registry();
        assert_eq!(registry.section_keys("log"), vec!["log.level"]);
        assert!(registry.section_keys("empty").is_empty());
        assert!(registry.section_keys("nope").is_empty());
    }

    #[test]
    fn superfluous_keys_uses_registry_namespace() {
        let unknown = registry().superfluous_keys(["base.api", "base.fooo-bar", "log.level"]);
        assert_eq!(unknown, vec!["base.fooo-bar"]);
    }
}
