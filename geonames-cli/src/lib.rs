//! Command-line interface for loading GeoNames dumps into SQLite.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod load;

pub use error::CliError;
use load::{LoadArgs, run_load};

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_OPTIONS: &str = "options";
pub(crate) const ARG_CHECKPOINT_THRESHOLD: &str = "checkpoint-threshold";
pub(crate) const ARG_DISABLE_SOURCE: &str = "disable-source";
pub(crate) const ARG_DISABLE_SINK: &str = "disable-sink";
pub(crate) const ARG_SKIP_VACUUM: &str = "skip-vacuum";
pub(crate) const ENV_DATABASE: &str = "GEONAMES_CMDS_LOAD_DATABASE";

/// Run the GeoNames CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Load(args) => run_load(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "geonames",
    about = "Load the GeoNames gazetteer dumps into a SQLite database",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run every pipeline against the dumps in a data directory.
    Load(LoadArgs),
}

#[cfg(test)]
mod tests;
