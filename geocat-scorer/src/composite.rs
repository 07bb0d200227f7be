//! Weighted combination of the three criteria.

use geocat_core::{CatalogEntry, SimilarityScorer, SimilarityWeights};

use crate::criteria::{Criterion, DatatypeSimilarity, ExtentSimilarity, LocationSimilarity};

/// Fixed factor applied to every composite score.
pub const DAMPING: f64 = 0.999;

/// Per-criterion scores behind one composite value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Blended extent similarity.
    pub extent: f64,
    /// Blended location similarity.
    pub location: f64,
    /// Blended datatype similarity.
    pub datatype: f64,
}

/// Scores candidates as `0.999 · (e · extent + l · location + d · datatype)`.
///
/// # Examples
/// ```
/// use geocat_core::{SimilarityScorer, SimilarityWeights, test_support::EntryBuilder};
/// use geocat_scorer::CompositeScorer;
///
/// let entry = EntryBuilder::new("a").raster().build();
/// let scorer = CompositeScorer::new(SimilarityWeights::default());
/// assert!(scorer.score(&entry, &entry) > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeScorer {
    weights: SimilarityWeights,
}

impl CompositeScorer {
    /// Create a scorer applying `weights`.
    #[must_use]
    pub const fn new(weights: SimilarityWeights) -> Self {
        Self { weights }
    }

    /// Weights applied by this scorer.
    #[must_use]
    pub const fn weights(&self) -> &SimilarityWeights {
        &self.weights
    }

    /// Compute the three blended criteria without combining them.
    #[must_use]
    pub fn breakdown(&self, query: &CatalogEntry, candidate: &CatalogEntry) -> ScoreBreakdown {
        ScoreBreakdown {
            extent: ExtentSimilarity.score(query, candidate, &self.weights),
            location: LocationSimilarity.score(query, candidate, &self.weights),
            datatype: DatatypeSimilarity.score(query, candidate, &self.weights),
        }
    }
}

impl SimilarityScorer for CompositeScorer {
    #[expect(
        clippy::float_arithmetic,
        reason = "the composite is a damped weighted sum"
    )]
    fn score(&self, query: &CatalogEntry, candidate: &CatalogEntry) -> f64 {
        let parts = self.breakdown(query, candidate);
        let weights = &self.weights;
        DAMPING
            * (weights.extent() * parts.extent
                + weights.location() * parts.location
                + weights.datatype() * parts.datatype)
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests derive expected composite values"
)]
mod tests {
    use super::*;
    use geocat_core::test_support::EntryBuilder;
    use rstest::rstest;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    #[case(1.0, 1.0, 1.0)]
    #[case(2.0, 0.5, 1.5)]
    #[case(0.0, 3.0, 0.0)]
    fn identical_points_score_intersection_terms_only(
        #[case] extent: f64,
        #[case] location: f64,
        #[case] datatype: f64,
    ) {
        let point = EntryBuilder::new("p")
            .bbox(45.0, 45.0, 7.0, 7.0)
            .instant("2019-07-01T00:00:00Z")
            .build();
        let weights =
            SimilarityWeights::new(extent, datatype, location, 2.0, 1.0).expect("valid weights");
        let scorer = CompositeScorer::new(weights);

        let parts = scorer.breakdown(&point, &point);
        assert_close(parts.extent, 1.0);
        assert_close(parts.location, 0.6);
        assert_close(parts.datatype, 1.0);
        assert_close(
            scorer.score(&point, &point),
            DAMPING * (extent + 0.6 * location + datatype),
        );
    }

    #[rstest]
    fn zero_weights_score_zero() {
        let a = EntryBuilder::new("a").build();
        let b = EntryBuilder::new("b").bbox(30.0, 40.0, 30.0, 40.0).build();
        let weights = SimilarityWeights::new(0.0, 0.0, 0.0, 1.0, 0.0).expect("valid weights");
        assert_close(CompositeScorer::new(weights).score(&a, &b), 0.0);
    }

    #[rstest]
    fn composite_combines_breakdown() {
        let a = EntryBuilder::new("a").bbox(0.0, 10.0, 0.0, 10.0).build();
        let b = EntryBuilder::new("b")
            .bbox(5.0, 15.0, 5.0, 15.0)
            .interval("2020-01-10T00:00:00Z", "2020-03-01T00:00:00Z")
            .shape(&[(0.0, 0.0), (1.0, 1.0)])
            .build();
        let weights = SimilarityWeights::new(1.0, 2.0, 3.0, 1.0, 1.0).expect("valid weights");
        let scorer = CompositeScorer::new(weights);
        let parts = scorer.breakdown(&a, &b);
        assert_close(
            scorer.score(&a, &b),
            DAMPING * (parts.extent + 3.0 * parts.location + 2.0 * parts.datatype),
        );
        assert_close(parts.datatype, 0.5 * 0.8 + 0.5);
    }
}
