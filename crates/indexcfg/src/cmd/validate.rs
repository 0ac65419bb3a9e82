use indexcfg_config::{index_schema, rules, IndexConfig};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::cmd::{load_source, ValidateArgs};
use crate::exit::{load_error, validation_error, CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Serialize)]
struct ValidateOutput<'a> {
    schema_id: &'static str,
    valid: bool,
    superfluous_keys: &'a [String],
    config: &'a IndexConfig,
}

pub fn run(args: ValidateArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = index_schema();
    let source = load_source(&args.path, &args.overrides, &registry)?;

    let unknown = registry.superfluous_keys(source.supplied_keys());
    for key in &unknown {
        warn!(key = %key, "ignoring unknown config key");
    }

    let config = source
        .to_config()
        .map_err(|err| load_error("failed to load config", err))?
        .validate()
        .map_err(validation_error)?;
    info!(
        path = %args.path.display(),
        rules = rules().len(),
        "config is valid"
    );

    let shown = config.redacted();
    match format {
        OutputFormat::Json => print_json(&ValidateOutput {
            schema_id: "indexcfg/cli/v1/validate-report",
            valid: true,
            superfluous_keys: &unknown,
            config: &shown,
        }),
        OutputFormat::Table => {
            let rows = config_rows(&shown)
                .into_iter()
                .map(|(key, value)| vec![key, value])
                .collect();
            print_table(&["KEY", "VALUE"], rows);
        }
        OutputFormat::Pretty => {
            println!("{}: valid", args.path.display());
            if !unknown.is_empty() {
                println!("  ignored keys: {}", unknown.join(", "));
            }
            for (key, value) in config_rows(&shown) {
                println!("  {key:<32} {value}");
            }
        }
        OutputFormat::Raw => println!("valid"),
    }
    Ok(SUCCESS)
}

fn config_rows(config: &IndexConfig) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    let Ok(Value::Object(sections)) = serde_json::to_value(config) else {
        return rows;
    };
    for (section, fields) in &sections {
        let Value::Object(fields) = fields else {
            continue;
        };
        for (key, value) in fields {
            let shown = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            rows.push((format!("{section}.{key}"), shown));
        }
    }
    rows
}
