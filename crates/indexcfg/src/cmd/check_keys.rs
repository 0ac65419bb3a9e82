use indexcfg_config::index_schema;
use serde::Serialize;
use tracing::warn;

use crate::cmd::{load_source, CheckKeysArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Debug, Serialize)]
struct DriftOutput {
    schema_id: &'static str,
    source: String,
    supplied: usize,
    superfluous_keys: Vec<String>,
}

// Drift is advisory: unknown keys are reported, never turned into a failure.
pub fn run(args: CheckKeysArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = index_schema();
    let source = load_source(&args.path, &[], &registry)?;
    let supplied = source.supplied_keys();
    let unknown = registry.superfluous_keys(&supplied);
    for key in &unknown {
        warn!(key = %key, "unknown config key");
    }

    let output = DriftOutput {
        schema_id: "indexcfg/cli/v1/drift-report",
        source: args.path.display().to_string(),
        supplied: supplied.len(),
        superfluous_keys: unknown,
    };
    print_drift(&output, format);
    Ok(SUCCESS)
}

fn print_drift(output: &DriftOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table => {
            if output.superfluous_keys.is_empty() {
                println!("no superfluous keys in {}", output.source);
                return;
            }
            let rows = output
                .superfluous_keys
                .iter()
                .map(|key| vec![key.clone()])
                .collect();
            print_table(&["UNKNOWN KEY"], rows);
        }
        OutputFormat::Pretty => {
            println!(
                "{}: {} keys supplied, {} unknown",
                output.source,
                output.supplied,
                output.superfluous_keys.len()
            );
            for key in &output.superfluous_keys {
                println!("  {key}");
            }
        }
        OutputFormat::Raw => {
            for key in &output.superfluous_keys {
                println!("{key}");
            }
        }
    }
}
