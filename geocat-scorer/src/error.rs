//! Error types raised while ranking catalogue records.
#![forbid(unsafe_code)]

use geocat_core::{EntryError, WeightsError};
use thiserror::Error;

/// Errors raised by [`rank_records`](crate::rank_records) and
/// [`rank_records_with_overrides`](crate::rank_records_with_overrides).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// The query record failed validation.
    #[error("query record is invalid")]
    InvalidQuery(#[source] EntryError),
    /// The weight set failed validation.
    #[error("similarity weights are invalid")]
    InvalidWeights(#[from] WeightsError),
    /// A candidate record failed validation.
    #[error("candidate record {index} is invalid")]
    InvalidCandidate {
        /// Position of the record in the candidate list.
        index: usize,
        /// Validation failure.
        #[source]
        source: EntryError,
    },
}
