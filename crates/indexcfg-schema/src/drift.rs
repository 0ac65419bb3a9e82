//! Superfluous key detection.
//!
//! Compares the keys an operator actually supplied against the schema's flat
//! key namespace. Matching is exact and case-sensitive on the full dotted
//! path; a key is never accepted because it shares a prefix with a valid one.

use std::collections::BTreeSet;

/// Return the supplied keys that are not in `valid`, sorted and without
/// duplicates.
///
/// The result is advisory. An empty vector means no drift.
pub fn check_superfluous_keys<I, S>(valid: &BTreeSet<String>, supplied: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let unknown: BTreeSet<String> = supplied
        .into_iter()
        .filter(|key| !valid.contains(key.as_ref()))
        .map(|key| key.as_ref().to_string())
        .collect();
    unknown.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BTreeSet<String> {
        ["base.api", "base.start-block", "log.level"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn full_key_set_has_no_drift() {
        let valid = valid();
        assert!(check_superfluous_keys(&valid, valid.iter()).is_empty());
    }

    #[test]
    fn single_unknown_key_is_reported() {
        let supplied = ["base.api", "base.fooo-bar", "log.level"];
        assert_eq!(
            check_superfluous_keys(&valid(), supplied),
            vec!["base.fooo-bar"]
        );
    }

    #[test]
    fn result_does_not_depend_on_input_order() {
        let forward = ["zeta.key", "base.api", "alpha.key", "alpha.key"];
        let mut backward = forward;
        backward.reverse();
        let a = check_superfluous_keys(&valid(), forward);
        let b = check_superfluous_keys(&valid(), backward);
        assert_eq!(a, b);
        assert_eq!(a, vec!["alpha.key", "zeta.key"]);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_eq!(check_superfluous_keys(&valid(), ["Base.API"]), vec!["Base.API"]);
    }

    #[test]
    fn prefixes_do_not_match() {
        let supplied = ["base", "base.api.extra", "base.ap"];
        assert_eq!(
            check_superfluous_keys(&valid(), supplied),
            vec!["base", "base.ap", "base.api.extra"]
        );
    }

    #[test]
    fn nothing_supplied_means_nothing_reported() {
        let supplied: Vec<String> = Vec::new();
        assert!(check_superfluous_keys(&valid(), supplied).is_empty());
    }
}
