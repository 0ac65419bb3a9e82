use indexcfg_config::index_schema;
use indexcfg_schema::{flat_key, SchemaRegistry};
use serde::Serialize;

use crate::cmd::KeysArgs;
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Debug, Serialize)]
struct KeyRow {
    key: String,
    kind: &'static str,
    /// Section that declares the field; differs from the prefix for
    /// composed sections.
    section: &'static str,
    help: &'static str,
}

#[derive(Serialize)]
struct KeysOutput {
    schema_id: &'static str,
    keys: Vec<KeyRow>,
}

pub fn run(args: KeysArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = index_schema();
    if let Some(prefix) = args.section.as_deref() {
        if registry.section(prefix).is_none() {
            return Err(CliError::new(USAGE, format!("unknown section: {prefix}")));
        }
    }

    let keys = key_rows(&registry, args.section.as_deref());
    match format {
        OutputFormat::Json => print_json(&KeysOutput {
            schema_id: "indexcfg/cli/v1/keys",
            keys,
        }),
        OutputFormat::Table => {
            let rows = keys
                .into_iter()
                .map(|row| {
                    vec![
                        row.key,
                        row.kind.to_string(),
                        row.section.to_string(),
                        row.help.to_string(),
                    ]
                })
                .collect();
            print_table(&["KEY", "KIND", "SECTION", "DESCRIPTION"], rows);
        }
        OutputFormat::Pretty => {
            for row in keys {
                println!("{:<36} {:<7} {}", row.key, row.kind, row.help);
            }
        }
        OutputFormat::Raw => {
            for row in keys {
                println!("{}", row.key);
            }
        }
    }
    Ok(SUCCESS)
}

fn key_rows(registry: &SchemaRegistry, only: Option<&str>) -> Vec<KeyRow> {
    let mut rows = Vec::new();
    for &(prefix, section) in registry.sections() {
        if only.is_some_and(|wanted| wanted != prefix) {
            continue;
        }
        for field in section.fields {
            rows.push(KeyRow {
                key: flat_key(prefix, field.key),
                kind: field.kind.as_str(),
                section: section.name,
                help: field.help,
            });
        }
        for sub in section.composed {
            for field in sub.all_fields() {
                rows.push(KeyRow {
                    key: flat_key(prefix, field.key),
                    kind: field.kind.as_str(),
                    section: sub.name,
                    help: field.help,
                });
            }
        }
    }
    rows
}
