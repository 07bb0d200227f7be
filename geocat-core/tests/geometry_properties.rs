//! Property-based tests for bounding-box intersection.
//!
//! # Invariants tested
//!
//! - **Disjoint boxes:** the intersection area is zero, whether the boxes
//!   are separated in longitude or only in latitude.
//! - **Containment:** a box inside another intersects it with its own area.

use geocat_core::BoundingBox;
use geocat_core::geometry::{
    OverlapCase, bbox_area, bbox_intersection_area, classify_overlap, intersection_fraction,
};
use proptest::prelude::*;

/// `(min_lat, max_lat, min_lon, max_lon)` with a non-empty extent on both
/// axes, kept clear of the antimeridian so neighbours fit to the east.
fn bounds_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (-60.0_f64..50.0, 0.5_f64..30.0, -170.0_f64..0.0, 0.5_f64..60.0).prop_map(
        |(min_lat, height, min_lon, width)| {
            #[expect(clippy::float_arithmetic, reason = "box extents are offsets")]
            let bounds = (min_lat, min_lat + height, min_lon, min_lon + width);
            bounds
        },
    )
}

#[expect(clippy::expect_used, reason = "strategies only produce valid boxes")]
fn bbox((min_lat, max_lat, min_lon, max_lon): (f64, f64, f64, f64)) -> BoundingBox {
    BoundingBox::new(min_lat, max_lat, min_lon, max_lon).expect("valid generated box")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: boxes separated in longitude share no area.
    #[test]
    fn disjoint_boxes_share_no_area(
        bounds in bounds_strategy(),
        gap in 0.1_f64..50.0,
        width in 0.5_f64..50.0,
    ) {
        let (min_lat, max_lat, _, max_lon) = bounds;
        #[expect(clippy::float_arithmetic, reason = "the neighbour starts past the gap")]
        let neighbour = (min_lat, max_lat, max_lon + gap, max_lon + gap + width);
        let a = bbox(bounds);
        let b = bbox(neighbour);

        prop_assert_eq!(classify_overlap(&a, &b), OverlapCase::Disjoint);
        prop_assert_eq!(bbox_intersection_area(&a, &b), 0.0);
        prop_assert_eq!(intersection_fraction(&a, &b), 0.0);
    }

    /// Property: boxes sharing a longitude range but separated in latitude
    /// share no area.
    #[test]
    fn latitude_separated_boxes_share_no_area(
        bounds in bounds_strategy(),
        gap in 0.1_f64..5.0,
        height in 0.5_f64..4.0,
    ) {
        let (_, max_lat, min_lon, max_lon) = bounds;
        #[expect(clippy::float_arithmetic, reason = "the neighbour starts past the gap")]
        let neighbour = (max_lat + gap, max_lat + gap + height, min_lon, max_lon);
        let a = bbox(bounds);
        let b = bbox(neighbour);

        prop_assert_eq!(classify_overlap(&a, &b), OverlapCase::Disjoint);
        prop_assert_eq!(classify_overlap(&b, &a), OverlapCase::Disjoint);
        prop_assert_eq!(bbox_intersection_area(&a, &b), 0.0);
        prop_assert_eq!(bbox_intersection_area(&b, &a), 0.0);
        prop_assert_eq!(intersection_fraction(&a, &b), 0.0);
    }

    /// Property: a box nested inside another intersects it with its own area.
    #[test]
    fn contained_box_keeps_its_area(
        bounds in bounds_strategy(),
        inset in (0.0_f64..0.25, 0.0_f64..0.25, 0.0_f64..0.25, 0.0_f64..0.25),
    ) {
        let (min_lat, max_lat, min_lon, max_lon) = bounds;
        let (south, north, west, east) = inset;
        #[expect(clippy::float_arithmetic, reason = "insets shrink the outer box")]
        let inner = {
            let height = max_lat - min_lat;
            let width = max_lon - min_lon;
            (
                min_lat + south * height,
                max_lat - north * height,
                min_lon + west * width,
                max_lon - east * width,
            )
        };
        let a = bbox(inner);
        let b = bbox(bounds);

        prop_assert_eq!(classify_overlap(&a, &b), OverlapCase::Contained);
        prop_assert_eq!(bbox_intersection_area(&a, &b), bbox_area(&a));
        prop_assert_eq!(intersection_fraction(&a, &b), 1.0);
    }
}
