//! Error types emitted by the geocat CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use geocat_core::WeightsError;
use geocat_scorer::RankError;
use thiserror::Error;

/// Errors emitted by the geocat CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Path that was not found.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Path that could not be inspected.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the rank request file failed.
    #[error("failed to open rank request at {path:?}: {source}")]
    OpenRankRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Rank request JSON could not be decoded.
    #[error("failed to parse rank request JSON at {path:?}: {source}")]
    ParseRankRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The layered weights failed validation.
    #[error("similarity weights are invalid: {source}")]
    InvalidWeights {
        /// Validation failure.
        #[source]
        source: WeightsError,
    },
    /// The records in the request could not be ranked.
    #[error("failed to rank records from {path:?}: {source}")]
    Rank {
        /// Request path.
        path: Utf8PathBuf,
        /// Ranking failure.
        #[source]
        source: RankError,
    },
    /// Installing the terminal logger failed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] log::SetLoggerError),
    /// Serializing the ranked list failed.
    #[error("failed to serialize ranked list: {0}")]
    SerialiseRankedList(#[source] serde_json::Error),
    /// Writing the rank output failed.
    #[error("failed to write rank output: {0}")]
    WriteRankOutput(#[source] std::io::Error),
}
