//! Command-line interface for ranking restroom sites from JSON files.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod files;
mod rank;
mod visit;

pub use error::CliError;

use rank::{RankArgs, run_rank};
use visit::{RecordVisitArgs, run_record_visit};

const ARG_RANK_CONTEXT: &str = "context";
const ARG_RANK_DATA_DIR: &str = "data-dir";
const ARG_RANK_SITES: &str = "sites";
const ARG_RANK_HISTORY: &str = "history";
const ARG_RANK_TOP_K: &str = "top-k";
const ARG_RANK_AFFINITY_WEIGHT: &str = "affinity-weight";
const ENV_RANK_CONTEXT: &str = "RESTROOM_CMDS_RANK_CONTEXT_PATH";

const ARG_VISIT_SITE_ID: &str = "site-id";
const ARG_VISIT_HISTORY: &str = "history";
const ENV_VISIT_SITE_ID: &str = "RESTROOM_CMDS_RECORD_VISIT_SITE_ID";
const ENV_VISIT_HISTORY: &str = "RESTROOM_CMDS_RECORD_VISIT_HISTORY";

/// Run the restroom CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, input files or the
/// ranking request are invalid, or when output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => run_rank(args),
        Command::RecordVisit(args) => run_record_visit(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "restroom",
    about = "Rank nearby restrooms and record visits",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank candidate sites against a user context.
    Rank(RankArgs),
    /// Record a visit to a site in the visit history file.
    RecordVisit(RecordVisitArgs),
}

#[cfg(test)]
mod tests;
