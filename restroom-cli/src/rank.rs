//! Rank command implementation for the restroom CLI.

use std::{collections::BTreeMap, io::Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{debug, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use restroom_core::{InMemoryVisitHistory, Site, UserContext, VisitHistory};
use restroom_scorer::{DEFAULT_TOP_K, RankingEngine, ScoreWeights};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    ARG_RANK_AFFINITY_WEIGHT, ARG_RANK_CONTEXT, ARG_RANK_DATA_DIR, ARG_RANK_HISTORY,
    ARG_RANK_SITES, ARG_RANK_TOP_K, CliError, ENV_RANK_CONTEXT,
    files::{read_json, read_optional_json, require_file},
};

/// File name looked up inside the data directory when `--sites` is absent.
pub(crate) const DEFAULT_SITES_FILE: &str = "bathrooms.json";

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank candidate sites for a user. The user context is a \
                 JSON object with a [lat, lon] location, an optional HH:MM \
                 time, preferred amenities and optional filters. Sites are \
                 read from a JSON array.",
    about = "Rank candidate sites against a user context"
)]
#[ortho_config(prefix = "RESTROOM")]
pub(crate) struct RankArgs {
    /// Path to a JSON file containing the user context.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) context_path: Option<Utf8PathBuf>,
    /// Directory containing the default sites file.
    #[arg(long = ARG_RANK_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Override the path to the sites file (`bathrooms.json`).
    #[arg(long = ARG_RANK_SITES, value_name = "path")]
    #[serde(default)]
    pub(crate) sites: Option<Utf8PathBuf>,
    /// Visit history used for affinity scoring. A missing file is empty.
    #[arg(long = ARG_RANK_HISTORY, value_name = "path")]
    #[serde(default)]
    pub(crate) history: Option<Utf8PathBuf>,
    /// Maximum number of sites to return.
    #[arg(long = ARG_RANK_TOP_K, value_name = "n")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    /// Score bonus per recorded visit.
    #[arg(long = ARG_RANK_AFFINITY_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) affinity_weight: Option<f64>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    /// Path to the JSON user context.
    pub(crate) context_path: Utf8PathBuf,
    /// Path to the JSON array of sites.
    pub(crate) sites: Utf8PathBuf,
    /// Optional visit history file.
    pub(crate) history: Option<Utf8PathBuf>,
    pub(crate) top_k: usize,
    pub(crate) affinity_weight: f64,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_file(&self.context_path, ARG_RANK_CONTEXT)?;
        require_file(&self.sites, ARG_RANK_SITES)?;
        Ok(())
    }

    fn weights(&self) -> ScoreWeights {
        ScoreWeights::default().with_affinity_per_visit(self.affinity_weight)
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let context_path = args.context_path.ok_or(CliError::MissingArgument {
            field: ARG_RANK_CONTEXT,
            env: ENV_RANK_CONTEXT,
        })?;
        let data_dir = args.data_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let sites = args
            .sites
            .unwrap_or_else(|| data_dir.join(DEFAULT_SITES_FILE));
        Ok(Self {
            context_path,
            sites,
            history: args.history,
            top_k: args.top_k.unwrap_or(DEFAULT_TOP_K),
            affinity_weight: args.affinity_weight.unwrap_or(0.0),
        })
    }
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(super) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let engine = RankingEngine::new(config.weights())?;

    let context: UserContext = read_json(&config.context_path, ARG_RANK_CONTEXT)?;
    let sites = load_sites(&config.sites)?;
    let history = match &config.history {
        Some(path) => Some(load_history(path)?),
        None => None,
    };

    let candidates: Vec<&Site> = match &context.filters {
        Some(filter) => filter.apply(&sites),
        None => sites.iter().collect(),
    };
    debug!(
        "{} of {} sites pass the context filters",
        candidates.len(),
        sites.len()
    );
    let ranked = engine.rank(
        candidates,
        &context,
        history.as_ref().map(|store| store as &dyn VisitHistory),
        config.top_k,
    )?;
    write_json(writer, &ranked)
}

/// Load a JSON array of sites, skipping entries that are not site records.
pub(super) fn load_sites(path: &Utf8Path) -> Result<Vec<Site>, CliError> {
    let records: Vec<Value> = read_json(path, ARG_RANK_SITES)?;
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(site) => Some(site),
            Err(err) => {
                warn!("skipping site record {index} in {path}: {err}");
                None
            }
        })
        .collect())
}

/// Load visit counts keyed by site id. A missing file is an empty history.
pub(super) fn load_history(path: &Utf8Path) -> Result<InMemoryVisitHistory, CliError> {
    let counts: Option<BTreeMap<String, u64>> = read_optional_json(path, ARG_RANK_HISTORY)?;
    Ok(InMemoryVisitHistory::from_counts(
        counts.unwrap_or_default(),
    ))
}

pub(super) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
