//! Rank command implementation for the geocat CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use geocat_core::{CatalogRecord, RankedList, SimilarityWeights, WeightOverrides};
use geocat_scorer::rank_records;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{ARG_RANK_REQUEST, CliError, ENV_RANK_REQUEST};

/// Number of results returned when neither configuration nor the request
/// asks for a count.
pub(crate) const DEFAULT_COUNT: usize = 10;

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank candidate catalogue records by similarity to a query \
                 record. The request is a JSON file holding the query, the \
                 candidates and optional count and weight overrides; counts \
                 and weights can also come from configuration files, \
                 environment variables or flags.",
    about = "Rank similar catalogue records"
)]
#[ortho_config(prefix = "GEOCAT")]
pub(crate) struct RankArgs {
    /// Path to a JSON file containing a rank request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Maximum number of results to return.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) count: Option<usize>,
    /// Weight of extent similarity (0 to 5).
    #[arg(long, value_name = "weight")]
    #[serde(default)]
    pub(crate) extent_weight: Option<f64>,
    /// Weight of datatype similarity (0 to 5).
    #[arg(long, value_name = "weight")]
    #[serde(default)]
    pub(crate) datatype_weight: Option<f64>,
    /// Weight of location similarity (0 to 5).
    #[arg(long, value_name = "weight")]
    #[serde(default)]
    pub(crate) location_weight: Option<f64>,
    /// Weight of geographic sub-scores within each criterion (0 to 5).
    #[arg(long, value_name = "weight")]
    #[serde(default)]
    pub(crate) geographic_weight: Option<f64>,
    /// Weight of temporal sub-scores within each criterion (0 to 5).
    #[arg(long, value_name = "weight")]
    #[serde(default)]
    pub(crate) temporal_weight: Option<f64>,
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
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Count from configuration, if any.
    pub(crate) count: Option<usize>,
    /// Weights from configuration.
    pub(crate) weights: WeightOverrides,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_RANK_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_RANK_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_RANK_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RANK_REQUEST,
            env: ENV_RANK_REQUEST,
        })?;
        Ok(Self {
            request_path,
            count: args.count,
            weights: WeightOverrides {
                extent: args.extent_weight,
                datatype: args.datatype_weight,
                location: args.location_weight,
                geographic: args.geographic_weight,
                temporal: args.temporal_weight,
            },
        })
    }
}

/// JSON payload read by `geocat rank`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RankRequest {
    /// Record to compare against.
    pub(crate) query: CatalogRecord,
    /// Records to rank.
    #[serde(default)]
    pub(crate) candidates: Vec<CatalogRecord>,
    /// Count override taking precedence over configuration.
    #[serde(default)]
    pub(crate) count: Option<usize>,
    /// Weight overrides taking precedence over configuration.
    #[serde(default)]
    pub(crate) weights: WeightOverrides,
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(super) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_rank_config(args)?;
    let ranked = execute_rank(&config)?;
    write_ranked_list(writer, &ranked)
}

fn resolve_rank_config(args: RankArgs) -> Result<RankConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Load the request named by `config` and rank its candidates.
pub(super) fn execute_rank(config: &RankConfig) -> Result<RankedList, CliError> {
    let request = load_rank_request(&config.request_path)?;
    let weights = config
        .weights
        .layered(request.weights)
        .apply_to(&SimilarityWeights::default())
        .map_err(|source| CliError::InvalidWeights { source })?;
    let count = request.count.or(config.count).unwrap_or(DEFAULT_COUNT);
    debug!(
        "ranking {} candidates from {} for the top {count}",
        request.candidates.len(),
        config.request_path
    );
    rank_records(&request.query, &request.candidates, count, &weights).map_err(|source| {
        CliError::Rank {
            path: config.request_path.clone(),
            source,
        }
    })
}

/// Loads a JSON-encoded [`RankRequest`] from disk.
pub(super) fn load_rank_request(path: &Utf8Path) -> Result<RankRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRankRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRankRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_ranked_list(writer: &mut dyn Write, ranked: &RankedList) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(ranked).map_err(CliError::SerialiseRankedList)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteRankOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteRankOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
