//! Command-line interface for ranking similar catalogue records.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod logging;
mod rank;

pub use error::CliError;

use rank::{RankArgs, run_rank};

const ARG_RANK_REQUEST: &str = "request-path";
const ENV_RANK_REQUEST: &str = "GEOCAT_CMDS_RANK_REQUEST_PATH";

/// Run the geocat CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration layering,
/// request loading, ranking or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logging(cli.verbose)?;
    match cli.command {
        Command::Rank(args) => run_rank(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "geocat",
    about = "Similarity ranking for geospatial catalogue records",
    version
)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank candidate records by similarity to a query record.
    Rank(RankArgs),
}

#[cfg(test)]
mod tests;
