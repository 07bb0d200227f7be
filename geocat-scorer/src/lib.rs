//! Similarity scoring and top-N selection for catalogue entries.
//!
//! The crate provides the three criteria (extent, location and datatype), the
//! [`CompositeScorer`] that weights them into one value, and the
//! [`TopNSelector`] that keeps the strongest matches from a candidate slice.
//! [`rank_records`] ties these together for loosely shaped
//! [`CatalogRecord`](geocat_core::CatalogRecord) input.
//!
//! # Examples
//!
//! ```
//! use geocat_core::{CatalogRecord, SimilarityWeights};
//! use geocat_scorer::rank_records;
//!
//! # fn main() -> Result<(), geocat_scorer::RankError> {
//! let record = |id: &str, min_lat: f64| CatalogRecord {
//!     id: Some(id.to_owned()),
//!     bounding_box: Some([min_lat, min_lat + 1.0, 0.0, 1.0]),
//!     vector_shape: Some(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]),
//!     time_interval: Some([
//!         "2020-01-01T00:00:00Z".to_owned(),
//!         "2020-12-31T00:00:00Z".to_owned(),
//!     ]),
//!     is_raster: false,
//! };
//! let query = record("query", 10.0);
//! let candidates = [record("near", 10.0), record("far", 60.0)];
//!
//! let ranked = rank_records(&query, &candidates, 5, &SimilarityWeights::default())?;
//! assert_eq!(ranked.len(), 2);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod composite;
pub mod criteria;
mod error;
mod selector;

pub use composite::{CompositeScorer, DAMPING, ScoreBreakdown};
pub use criteria::{
    Criterion, DatatypeSimilarity, ExtentSimilarity, LocationSimilarity, datatype_similarity,
    extent_similarity, location_similarity,
};
pub use error::RankError;
pub use selector::{TopN, TopNSelector, rank_records, rank_records_with_overrides};
