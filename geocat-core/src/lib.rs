//! Core domain types for the geocat similarity engine.
//!
//! Catalogue entries are validated once at the boundary, so the geometry and
//! temporal primitives and everything built on them work with well-formed
//! values only. Constructors return `Result` to surface invalid input early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod bbox;
mod entry;
pub mod geometry;
mod ranking;
mod scorer;
pub mod temporal;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
mod weights;

pub use bbox::{BoundingBox, BoundingBoxError};
pub use entry::{CatalogEntry, CatalogRecord, EntryError};
pub use ranking::{RankedList, ScoredResult};
pub use scorer::SimilarityScorer;
pub use temporal::{TemporalError, TimeInterval};
pub use weights::{MAX_WEIGHT, SimilarityWeights, WeightOverrides, WeightsError};
