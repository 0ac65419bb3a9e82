use indexcfg_config::{index_schema, rules};
use serde::Serialize;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Debug, Serialize)]
struct VersionInfo {
    schema_id: &'static str,
    name: &'static str,
    version: &'static str,
    target: &'static str,
    profile: &'static str,
    git_hash: &'static str,
    sections: Vec<&'static str>,
    key_count: usize,
    validation_rules: Vec<&'static str>,
}

impl VersionInfo {
    fn collect() -> Self {
        let registry = index_schema();
        Self {
            schema_id: "indexcfg/cli/v1/version",
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            target: option_env!("INDEXCFG_BUILD_TARGET").unwrap_or("unknown"),
            profile: option_env!("INDEXCFG_BUILD_PROFILE").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            sections: registry.sections().iter().map(|&(prefix, _)| prefix).collect(),
            key_count: registry.valid_keys().len(),
            validation_rules: rules().iter().map(|rule| rule.name).collect(),
        }
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.to_string()),
            ("version", self.version.to_string()),
            ("target", self.target.to_string()),
            ("profile", self.profile.to_string()),
            ("git_hash", self.git_hash.to_string()),
            ("sections", self.sections.join(",")),
            ("keys", self.key_count.to_string()),
            ("validation_rules", self.validation_rules.join(",")),
        ]
    }
}

pub fn run(args: VersionArgs, format: OutputFormat) -> CliResult<i32> {
    if !args.extended {
        println!("indexcfg {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    let info = VersionInfo::collect();
    match format {
        OutputFormat::Json => print_json(&info),
        OutputFormat::Table => print_table(
            &["FIELD", "VALUE"],
            info.rows()
                .into_iter()
                .map(|(field, value)| vec![field.to_string(), value])
                .collect(),
        ),
        OutputFormat::Pretty | OutputFormat::Raw => {
            for (field, value) in info.rows() {
                println!("{field}: {value}");
            }
        }
    }

    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_info_describes_schema_and_rules() {
        let info = VersionInfo::collect();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            info.sections,
            vec!["database", "log", "probe", "base", "flags"]
        );
        assert_eq!(info.key_count, index_schema().valid_keys().len());
        assert_eq!(info.validation_rules.first(), Some(&"database"));
        assert_eq!(info.validation_rules.last(), Some(&"api-endpoint"));
    }

    #[test]
    fn rows_cover_every_field() {
        let rows = VersionInfo::collect().rows();
        let names: Vec<&str> = rows.iter().map(|(name, _)| *name).collect();
        assert!(names.contains(&"validation_rules"));
        assert!(names.contains(&"profile"));
    }
}
