//! The three similarity criteria.
//!
//! Every criterion compares two entries twice, once geographically and once
//! temporally, and blends the pair with the ratio `g / (g + t)` taken from
//! [`SimilarityWeights`]. Scores are relative to the first entry.

use geocat_core::geometry::{
    HALF_EARTH_CIRCUMFERENCE_M, bbox_center, bbox_diagonal, haversine_distance,
    intersection_fraction,
};
use geocat_core::temporal::{self, SECONDS_PER_MILLENNIUM};
use geocat_core::{CatalogEntry, SimilarityWeights};

/// Share of a location sub-score given to its intersection term.
pub const INTERSECTION_SHARE: f64 = 0.6;
/// Share of a location sub-score given to its centre-distance term.
pub const CENTER_SHARE: f64 = 0.4;
/// Datatype score for two vector shapes with few, unequal point counts.
pub const MISMATCHED_SHAPE_SCORE: f64 = 0.8;

/// One similarity criterion split into geographic and temporal halves.
pub trait Criterion {
    /// Geographic sub-score of `b` relative to `a`.
    fn geographic(&self, a: &CatalogEntry, b: &CatalogEntry) -> f64;

    /// Temporal sub-score of `b` relative to `a`.
    fn temporal(&self, a: &CatalogEntry, b: &CatalogEntry) -> f64;

    /// Blend both sub-scores with the weights' geographic ratio.
    #[expect(
        clippy::float_arithmetic,
        reason = "blending interpolates between the sub-scores"
    )]
    fn score(&self, a: &CatalogEntry, b: &CatalogEntry, weights: &SimilarityWeights) -> f64 {
        let ratio = weights.geographic_ratio();
        ratio * self.geographic(a, b) + (1.0 - ratio) * self.temporal(a, b)
    }
}

/// Compares the size of two extents: box diagonals and interval durations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtentSimilarity;

/// Compares where two entries sit in space and time: how much of the first
/// is covered by the second, and how far apart their centres are.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationSimilarity;

/// Compares the kind of data two entries hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatatypeSimilarity;

#[expect(
    clippy::float_arithmetic,
    reason = "size ratios divide the smaller by the larger value"
)]
fn size_ratio(first: f64, second: f64) -> f64 {
    first.min(second) / first.max(second)
}

/// Interval length in seconds, with instants counted as one second.
fn nonzero_seconds(interval: &geocat_core::TimeInterval) -> f64 {
    let length = temporal::seconds(temporal::duration(interval));
    if length > 0.0 { length } else { 1.0 }
}

impl Criterion for ExtentSimilarity {
    fn geographic(&self, a: &CatalogEntry, b: &CatalogEntry) -> f64 {
        let first = bbox_diagonal(&a.bounding_box);
        let second = bbox_diagonal(&b.bounding_box);
        if first.max(second) <= 0.0 {
            return 1.0;
        }
        size_ratio(first, second)
    }

    fn temporal(&self, a: &CatalogEntry, b: &CatalogEntry) -> f64 {
        size_ratio(
            nonzero_seconds(&a.time_interval),
            nonzero_seconds(&b.time_interval),
        )
    }
}

impl LocationSimilarity {
    /// Share of `a`'s box covered by `b`'s box.
    #[must_use]
    pub fn geographic_intersection(a: &CatalogEntry, b: &CatalogEntry) -> f64 {
        intersection_fraction(&a.bounding_box, &b.bounding_box)
    }

    /// Great-circle distance between the box centres as a fraction of half
    /// the Earth's circumference.
    #[expect(
        clippy::float_arithmetic,
        reason = "the distance is normalised by half the circumference"
    )]
    #[must_use]
    pub fn geographic_center(a: &CatalogEntry, b: &CatalogEntry) -> f64 {
        let first = bbox_center(&a.bounding_box);
        let second = bbox_center(&b.bounding_box);
        haversine_distance(first.y(), first.x(), second.y(), second.x())
            / HALF_EARTH_CIRCUMFERENCE_M
    }

    /// Share of `a`'s interval overlapped by `b`'s.
    ///
    /// An instant scores `1` when it falls inside `b`'s closed interval and
    /// `0` otherwise.
    #[expect(
        clippy::float_arithmetic,
        reason = "coverage divides the overlap by the interval length"
    )]
    #[must_use]
    pub fn temporal_intersection(a: &CatalogEntry, b: &CatalogEntry) -> f64 {
        let interval = &a.time_interval;
        if interval.is_instant() {
            return if b.time_interval.contains(interval.start()) {
                1.0
            } else {
                0.0
            };
        }
        temporal::seconds(temporal::overlap(interval, &b.time_interval))
            / temporal::seconds(temporal::duration(interval))
    }

    /// Signed offset between the interval centres in millennia.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "the offset is expressed in fractional millennia"
    )]
    #[must_use]
    pub fn temporal_center(a: &CatalogEntry, b: &CatalogEntry) -> f64 {
        let offset = temporal::center(&a.time_interval) - temporal::center(&b.time_interval);
        temporal::seconds(offset) / SECONDS_PER_MILLENNIUM as f64
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "location terms are a weighted sum"
)]
fn location_blend(intersection: f64, center: f64) -> f64 {
    INTERSECTION_SHARE * intersection + CENTER_SHARE * center
}

impl Criterion for LocationSimilarity {
    fn geographic(&self, a: &CatalogEntry, b: &CatalogEntry) -> f64 {
        location_blend(
            Self::geographic_intersection(a, b),
            Self::geographic_center(a, b),
        )
    }

    fn temporal(&self, a: &CatalogEntry, b: &CatalogEntry) -> f64 {
        location_blend(
            Self::temporal_intersection(a, b),
            Self::temporal_center(a, b),
        )
    }
}

impl Criterion for DatatypeSimilarity {
    fn geographic(&self, a: &CatalogEntry, b: &CatalogEntry) -> f64 {
        match (a.is_raster, b.is_raster) {
            (true, true) => 1.0,
            (true, false) | (false, true) => 0.0,
            (false, false) => {
                let first = a.vector_shape.len();
                let second = b.vector_shape.len();
                if (first >= 3 && second >= 3) || first == second {
                    1.0
                } else {
                    MISMATCHED_SHAPE_SCORE
                }
            }
        }
    }

    fn temporal(&self, a: &CatalogEntry, b: &CatalogEntry) -> f64 {
        if a.is_instant() == b.is_instant() {
            1.0
        } else {
            0.0
        }
    }
}

/// Blended extent similarity of `b` relative to `a`.
#[must_use]
pub fn extent_similarity(a: &CatalogEntry, b: &CatalogEntry, weights: &SimilarityWeights) -> f64 {
    ExtentSimilarity.score(a, b, weights)
}

/// Blended location similarity of `b` relative to `a`.
///
/// The centre-distance terms grow with distance rather than closeness and
/// are not bounded to `[0, 1]`.
#[must_use]
pub fn location_similarity(
    a: &CatalogEntry,
    b: &CatalogEntry,
    weights: &SimilarityWeights,
) -> f64 {
    LocationSimilarity.score(a, b, weights)
}

/// Blended datatype similarity of `b` relative to `a`.
#[must_use]
pub fn datatype_similarity(
    a: &CatalogEntry,
    b: &CatalogEntry,
    weights: &SimilarityWeights,
) -> f64 {
    DatatypeSimilarity.score(a, b, weights)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    clippy::float_cmp,
    reason = "tests compare computed scores against exact and derived values"
)]
mod tests {
    //! Unit coverage for the individual criteria.

    use super::*;
    use geocat_core::test_support::EntryBuilder;
    use rstest::rstest;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    fn weights(geographic: f64, temporal_weight: f64) -> SimilarityWeights {
        SimilarityWeights::new(1.0, 1.0, 1.0, geographic, temporal_weight).expect("valid weights")
    }

    #[rstest]
    fn extent_compares_diagonals() {
        let a = EntryBuilder::new("a").bbox(0.0, 0.0, 0.0, 10.0).build();
        let b = EntryBuilder::new("b").bbox(0.0, 0.0, 0.0, 5.0).build();
        let ratio = ExtentSimilarity.geographic(&a, &b);
        let expected = bbox_diagonal(&b.bounding_box) / bbox_diagonal(&a.bounding_box);
        assert!(close(ratio, expected), "{ratio} != {expected}");
        assert!(close(ExtentSimilarity.geographic(&b, &a), expected));
    }

    #[rstest]
    fn extent_of_two_points_is_one() {
        let a = EntryBuilder::new("a").bbox(5.0, 5.0, 5.0, 5.0).build();
        let b = EntryBuilder::new("b").bbox(40.0, 40.0, 40.0, 40.0).build();
        assert_eq!(ExtentSimilarity.geographic(&a, &b), 1.0);
    }

    #[rstest]
    fn extent_of_point_against_box_is_zero() {
        let a = EntryBuilder::new("a").bbox(5.0, 5.0, 5.0, 5.0).build();
        let b = EntryBuilder::new("b").build();
        assert_eq!(ExtentSimilarity.geographic(&a, &b), 0.0);
    }

    #[rstest]
    fn extent_of_two_instants_is_one() {
        let a = EntryBuilder::new("a").instant("2001-03-04T05:06:07Z").build();
        let b = EntryBuilder::new("b").instant("2020-01-01T00:00:00Z").build();
        assert_eq!(ExtentSimilarity.temporal(&a, &b), 1.0);
    }

    #[rstest]
    fn extent_treats_instants_as_one_second() {
        let a = EntryBuilder::new("a").instant("2020-01-01T00:00:00Z").build();
        let b = EntryBuilder::new("b")
            .interval("2020-01-01T00:00:00Z", "2020-01-01T00:00:04Z")
            .build();
        assert!(close(ExtentSimilarity.temporal(&a, &b), 0.25));
    }

    #[rstest]
    fn location_of_disjoint_boxes_has_no_intersection() {
        let a = EntryBuilder::new("a").bbox(0.0, 10.0, 0.0, 10.0).build();
        let b = EntryBuilder::new("b").bbox(50.0, 60.0, 50.0, 60.0).build();
        assert_eq!(LocationSimilarity::geographic_intersection(&a, &b), 0.0);
        assert!(LocationSimilarity::geographic_center(&a, &b) > 0.0);
    }

    #[rstest]
    fn location_of_identical_points_scores_intersection_only() {
        let a = EntryBuilder::new("a")
            .bbox(12.0, 12.0, 30.0, 30.0)
            .instant("2021-05-01T12:00:00Z")
            .build();
        assert_eq!(LocationSimilarity.geographic(&a, &a), INTERSECTION_SHARE);
        assert_eq!(LocationSimilarity.temporal(&a, &a), INTERSECTION_SHARE);
    }

    #[rstest]
    #[case("2020-01-15T00:00:00Z", 1.0)]
    #[case("2020-02-01T00:00:00Z", 1.0)]
    #[case("2020-03-01T00:00:00Z", 0.0)]
    fn instant_intersection_checks_containment(#[case] at: &str, #[case] expected: f64) {
        let a = EntryBuilder::new("a").instant(at).build();
        let b = EntryBuilder::new("b").build();
        assert_eq!(LocationSimilarity::temporal_intersection(&a, &b), expected);
    }

    #[rstest]
    fn temporal_intersection_is_relative_to_first_entry() {
        let a = EntryBuilder::new("a")
            .interval("2020-01-01T00:00:00Z", "2020-01-05T00:00:00Z")
            .build();
        let b = EntryBuilder::new("b")
            .interval("2020-01-04T00:00:00Z", "2020-01-10T00:00:00Z")
            .build();
        assert!(close(LocationSimilarity::temporal_intersection(&a, &b), 0.25));
        assert!(close(
            LocationSimilarity::temporal_intersection(&b, &a),
            1.0 / 6.0
        ));
    }

    #[rstest]
    fn temporal_center_is_signed() {
        let early = EntryBuilder::new("early").instant("2000-01-01T00:00:00Z").build();
        let late = EntryBuilder::new("late").instant("2001-01-01T00:00:00Z").build();
        let forward = LocationSimilarity::temporal_center(&early, &late);
        let backward = LocationSimilarity::temporal_center(&late, &early);
        assert!(forward < 0.0);
        assert!(close(forward, -backward));
    }

    #[rstest]
    #[case(true, true, 1.0)]
    #[case(true, false, 0.0)]
    #[case(false, true, 0.0)]
    fn datatype_compares_raster_flags(
        #[case] first_raster: bool,
        #[case] second_raster: bool,
        #[case] expected: f64,
    ) {
        let mut a = EntryBuilder::new("a");
        if first_raster {
            a = a.raster();
        }
        let mut b = EntryBuilder::new("b");
        if second_raster {
            b = b.raster();
        }
        assert_eq!(
            DatatypeSimilarity.geographic(&a.build(), &b.build()),
            expected
        );
    }

    #[rstest]
    #[case(3, 5, 1.0)]
    #[case(2, 2, 1.0)]
    #[case(1, 4, MISMATCHED_SHAPE_SCORE)]
    #[case(0, 2, MISMATCHED_SHAPE_SCORE)]
    fn datatype_compares_vector_shapes(
        #[case] first: u8,
        #[case] second: u8,
        #[case] expected: f64,
    ) {
        let shape = |count: u8| -> Vec<(f64, f64)> {
            (0..count).map(|index| (f64::from(index), 0.0)).collect()
        };
        let a = EntryBuilder::new("a").shape(&shape(first)).build();
        let b = EntryBuilder::new("b").shape(&shape(second)).build();
        assert_eq!(DatatypeSimilarity.geographic(&a, &b), expected);
    }

    #[rstest]
    fn datatype_compares_interval_kinds() {
        let instant = EntryBuilder::new("a").instant("2020-01-01T00:00:00Z").build();
        let interval = EntryBuilder::new("b").build();
        assert_eq!(DatatypeSimilarity.temporal(&instant, &instant), 1.0);
        assert_eq!(DatatypeSimilarity.temporal(&interval, &interval), 1.0);
        assert_eq!(DatatypeSimilarity.temporal(&instant, &interval), 0.0);
    }

    #[rstest]
    #[case(1.0, 0.0, 1.0)]
    #[case(0.0, 1.0, 0.0)]
    #[case(1.0, 1.0, 0.5)]
    #[case(3.0, 1.0, 0.75)]
    fn blend_follows_geographic_ratio(
        #[case] geographic: f64,
        #[case] temporal_weight: f64,
        #[case] expected: f64,
    ) {
        // Matching raster flags with mismatched interval kinds put the whole
        // geographic half at 1 and the whole temporal half at 0.
        let raster = EntryBuilder::new("a").raster().build();
        let raster_instant = EntryBuilder::new("b")
            .raster()
            .instant("2020-01-01T00:00:00Z")
            .build();
        let score = datatype_similarity(
            &raster,
            &raster_instant,
            &weights(geographic, temporal_weight),
        );
        assert!(close(score, expected), "{score} != {expected}");
    }
}
