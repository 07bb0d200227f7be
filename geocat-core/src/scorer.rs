//! Score candidate entries against a query entry.
//!
//! The `SimilarityScorer` trait assigns a similarity score to a candidate
//! [`CatalogEntry`](crate::CatalogEntry) relative to a query entry.

use crate::CatalogEntry;

/// Calculate how similar a candidate is to a query.
///
/// Higher scores indicate a closer match. Implementations must be
/// thread-safe (`Send` + `Sync`) so candidates can be scored across threads.
/// Scores need not be symmetric: swapping `query` and `candidate` may give a
/// different value.
///
/// Selectors treat non-finite scores as the weakest possible match; use
/// [`SimilarityScorer::sanitise`] to apply that guard explicitly.
///
/// # Examples
///
/// ```rust
/// use geocat_core::{CatalogEntry, SimilarityScorer};
///
/// struct UnitScorer;
///
/// impl SimilarityScorer for UnitScorer {
///     fn score(&self, _query: &CatalogEntry, _candidate: &CatalogEntry) -> f64 {
///         1.0
///     }
/// }
///
/// assert_eq!(<UnitScorer as SimilarityScorer>::sanitise(f64::NAN), f64::NEG_INFINITY);
/// ```
pub trait SimilarityScorer: Send + Sync {
    /// Return a score for `candidate` relative to `query`.
    fn score(&self, query: &CatalogEntry, candidate: &CatalogEntry) -> f64;

    /// Map NaN onto negative infinity so it ranks below every real score.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if score.is_nan() {
            return f64::NEG_INFINITY;
        }
        score
    }
}

impl<S: SimilarityScorer + ?Sized> SimilarityScorer for &S {
    fn score(&self, query: &CatalogEntry, candidate: &CatalogEntry) -> f64 {
        (**self).score(query, candidate)
    }
}
