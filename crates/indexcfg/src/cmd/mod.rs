use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use indexcfg_config::ConfigSource;
use indexcfg_schema::SchemaRegistry;

use crate::exit::{load_error, CliResult};
use crate::output::OutputFormat;

pub mod check_keys;
pub mod keys;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load, check and normalize an indexer config file.
    Validate(ValidateArgs),
    /// Report keys in a config file that no field recognizes.
    CheckKeys(CheckKeysArgs),
    /// List every valid config key.
    Keys(KeysArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Validate(args) => validate::run(args, format),
        Command::CheckKeys(args) => check_keys::run(args, format),
        Command::Keys(args) => keys::run(args, format),
        Command::Version(args) => version::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON config file.
    pub path: PathBuf,
    /// Override a config key (e.g. base.start-block=100). Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CheckKeysArgs {
    /// JSON config file.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Only list keys under this section prefix.
    #[arg(long)]
    pub section: Option<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn load_source(
    path: &Path,
    overrides: &[String],
    registry: &SchemaRegistry,
) -> CliResult<ConfigSource> {
    let mut source =
        ConfigSource::from_path(path).map_err(|err| load_error("failed to load config", err))?;
    for assignment in overrides {
        source
            .set_override(registry, assignment)
            .map_err(|err| load_error("invalid --set", err))?;
    }
    Ok(source)
}
