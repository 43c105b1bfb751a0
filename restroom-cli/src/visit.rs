//! Record-visit command implementation for the restroom CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{debug, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use restroom_core::{InMemoryVisitHistory, VisitHistory};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_VISIT_HISTORY, ARG_VISIT_SITE_ID, CliError, ENV_VISIT_HISTORY, ENV_VISIT_SITE_ID,
    files::{lock_beside, write_file},
    rank::load_history,
};

/// CLI arguments for the `record-visit` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Increment the visit counter for a site in a JSON history \
                 file mapping site ids to counts. A missing history file is \
                 treated as empty and created on first write.",
    about = "Record a visit to a site"
)]
#[ortho_config(prefix = "RESTROOM")]
pub(crate) struct RecordVisitArgs {
    /// Identifier of the visited site.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) site_id: Option<String>,
    /// Path to the JSON visit history file.
    #[arg(long = ARG_VISIT_HISTORY, value_name = "path")]
    #[serde(default)]
    pub(crate) history: Option<Utf8PathBuf>,
}

impl RecordVisitArgs {
    pub(crate) fn into_config(self) -> Result<RecordVisitConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecordVisitConfig::try_from(merged)
    }
}

/// Resolved `record-visit` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordVisitConfig {
    pub(crate) site_id: String,
    pub(crate) history: Utf8PathBuf,
}

impl TryFrom<RecordVisitArgs> for RecordVisitConfig {
    type Error = CliError;

    fn try_from(args: RecordVisitArgs) -> Result<Self, Self::Error> {
        let site_id = args.site_id.ok_or(CliError::MissingArgument {
            field: ARG_VISIT_SITE_ID,
            env: ENV_VISIT_SITE_ID,
        })?;
        let history = args.history.ok_or(CliError::MissingArgument {
            field: ARG_VISIT_HISTORY,
            env: ENV_VISIT_HISTORY,
        })?;
        Ok(Self { site_id, history })
    }
}

#[derive(Debug, Serialize)]
struct VisitStatus {
    status: &'static str,
}

const OK: VisitStatus = VisitStatus { status: "ok" };

pub(super) fn run_record_visit(args: RecordVisitArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_record_visit_with(args, &mut stdout)
}

pub(super) fn run_record_visit_with(
    args: RecordVisitArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    if config.site_id.trim().is_empty() {
        debug!("ignoring visit with a blank site id");
    } else {
        let count = record_visit(&config.history, &config.site_id)?;
        info!("site {:?} now has {count} recorded visits", config.site_id);
    }
    serde_json::to_writer(&mut *writer, &OK).map_err(CliError::SerializeOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)
}

/// Increment `site_id` in the history file and return its new count.
///
/// The whole read-increment-write cycle runs under the history's lock file.
pub(super) fn record_visit(path: &Utf8Path, site_id: &str) -> Result<u64, CliError> {
    let _lock = lock_beside(path).map_err(|source| CliError::LockHistory {
        path: path.to_path_buf(),
        source,
    })?;
    let history: InMemoryVisitHistory = load_history(path)?;
    let count = history.record_visit(site_id);
    let payload =
        serde_json::to_vec_pretty(&history.snapshot()).map_err(CliError::SerializeOutput)?;
    write_file(path, &payload).map_err(|source| CliError::WriteHistory {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(count)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecordVisitConfig, CliError> {
    let merged = RecordVisitArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecordVisitConfig::try_from(merged)
}
