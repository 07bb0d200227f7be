//! Facade crate for the geocat similarity engine.
//!
//! This crate re-exports the core domain types together with the scorer and
//! top-N selector, so callers can rank catalogue records through one
//! dependency.

#![forbid(unsafe_code)]

pub use geocat_core::{
    BoundingBox, BoundingBoxError, CatalogEntry, CatalogRecord, EntryError, MAX_WEIGHT,
    RankedList, ScoredResult, SimilarityScorer, SimilarityWeights, TemporalError, TimeInterval,
    WeightOverrides, WeightsError, geometry, temporal,
};

#[cfg(feature = "test-support")]
pub use geocat_core::test_support;

pub use geocat_scorer::{
    CompositeScorer, Criterion, DAMPING, DatatypeSimilarity, ExtentSimilarity,
    LocationSimilarity, RankError, ScoreBreakdown, TopN, TopNSelector, datatype_similarity,
    extent_similarity, location_similarity, rank_records, rank_records_with_overrides,
};
