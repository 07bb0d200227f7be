//! Spherical approximations over bounding boxes.
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_M`]. Areas use a single-strip approximation. Intersections
//! are computed by corner containment between axis-aligned boxes rather than
//! by polygon clipping; the case structure in [`classify_overlap`] decides
//! which box supplies each edge of the overlap rectangle.

use geo::Point;

use crate::BoundingBox;

/// Mean Earth radius used for distances and areas, in metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Half the Earth's circumference, in metres.
pub const HALF_EARTH_CIRCUMFERENCE_M: f64 = 20_038_000.0;

/// Great-circle distance between two coordinates, in metres.
///
/// Returns exactly `0.0` when both coordinates coincide.
///
/// # Examples
/// ```
/// use geocat_core::geometry::haversine_distance;
///
/// assert_eq!(haversine_distance(10.0, 20.0, 10.0, 20.0), 0.0);
/// let quarter = haversine_distance(0.0, 0.0, 0.0, 90.0);
/// assert!((quarter - 10_018_754.17).abs() < 1.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "haversine distance is floating-point trigonometry"
)]
#[must_use]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();
    if delta_lat == 0.0 && delta_lon == 0.0 {
        return 0.0;
    }
    let half_lat = (delta_lat / 2.0).sin();
    let half_lon = (delta_lon / 2.0).sin();
    let a = half_lat.mul_add(
        half_lat,
        lat1.to_radians().cos() * lat2.to_radians().cos() * half_lon * half_lon,
    );
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Distance between the south-west and north-east corners of a box.
#[must_use]
pub fn bbox_diagonal(bbox: &BoundingBox) -> f64 {
    haversine_distance(bbox.min_lat(), bbox.min_lon(), bbox.max_lat(), bbox.max_lon())
}

/// Planar midpoint of a box, with `x = longitude` and `y = latitude`.
#[must_use]
pub fn bbox_center(bbox: &BoundingBox) -> Point<f64> {
    Point::new(
        f64::midpoint(bbox.min_lon(), bbox.max_lon()),
        f64::midpoint(bbox.min_lat(), bbox.max_lat()),
    )
}

/// Approximate surface area of a box, in square metres.
///
/// Zero for points and lines.
#[expect(
    clippy::float_arithmetic,
    reason = "spherical strip area is floating-point trigonometry"
)]
#[must_use]
pub fn bbox_area(bbox: &BoundingBox) -> f64 {
    if bbox.is_degenerate() {
        return 0.0;
    }
    let delta_lon = (bbox.max_lon() - bbox.min_lon()).to_radians();
    let strip = 2.0 + bbox.min_lat().to_radians().sin() + bbox.max_lat().to_radians().sin();
    (delta_lon * strip * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
}

/// Which corners of one box fall inside another.
///
/// Flags follow the order used by [`BoundingBox::corners`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Corners {
    /// `(min_lon, max_lat)`.
    pub top_left: bool,
    /// `(max_lon, max_lat)`.
    pub top_right: bool,
    /// `(min_lon, min_lat)`.
    pub bottom_left: bool,
    /// `(max_lon, min_lat)`.
    pub bottom_right: bool,
}

impl Corners {
    /// Report whether any corner is contained.
    #[must_use]
    pub const fn any(self) -> bool {
        self.top_left || self.top_right || self.bottom_left || self.bottom_right
    }

    /// Number of contained corners.
    #[must_use]
    pub fn count(self) -> usize {
        self.as_array().iter().filter(|flag| **flag).count()
    }

    /// Flags in corner order.
    #[must_use]
    pub const fn as_array(self) -> [bool; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    const fn has_left(self) -> bool {
        self.top_left || self.bottom_left
    }

    const fn has_right(self) -> bool {
        self.top_right || self.bottom_right
    }

    const fn has_top(self) -> bool {
        self.top_left || self.top_right
    }

    const fn has_bottom(self) -> bool {
        self.bottom_left || self.bottom_right
    }
}

/// Test which of `inner`'s corners lie within `outer`'s closed bounds.
#[must_use]
pub fn corners_in(outer: &BoundingBox, inner: &BoundingBox) -> Corners {
    let [top_left, top_right, bottom_left, bottom_right] =
        inner.corners().map(|corner| outer.contains_coord(corner));
    Corners {
        top_left,
        top_right,
        bottom_left,
        bottom_right,
    }
}

/// How two boxes relate, from the point of view of the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapCase {
    /// The longitude or latitude ranges do not meet.
    Disjoint,
    /// The first box lies entirely within the second.
    Contained,
    /// Some corners of the second box lie within the first.
    OtherCorners(Corners),
    /// None of the second box's corners, but some of the first's, lie within
    /// the other box.
    OwnCorners(Corners),
    /// Neither box holds a corner of the other although both ranges meet:
    /// one box spans the other's latitude, the other spans its longitude.
    Crossing,
}

/// Classify the relationship between `a` and `b`.
#[must_use]
pub fn classify_overlap(a: &BoundingBox, b: &BoundingBox) -> OverlapCase {
    if a.max_lon() < b.min_lon()
        || b.max_lon() < a.min_lon()
        || a.max_lat() < b.min_lat()
        || b.max_lat() < a.min_lat()
    {
        return OverlapCase::Disjoint;
    }
    if a.is_within(b) {
        return OverlapCase::Contained;
    }
    let other = corners_in(a, b);
    if other.any() {
        return OverlapCase::OtherCorners(other);
    }
    let own = corners_in(b, a);
    if own.any() {
        return OverlapCase::OwnCorners(own);
    }
    OverlapCase::Crossing
}

/// Rectangle shared by `a` and `b`, or `None` when they are disjoint.
#[must_use]
pub fn overlap_rect(a: &BoundingBox, b: &BoundingBox) -> Option<BoundingBox> {
    match classify_overlap(a, b) {
        OverlapCase::Disjoint => None,
        OverlapCase::Contained => Some(*a),
        OverlapCase::OtherCorners(corners) => Some(rect_from_corners(a, b, corners)),
        OverlapCase::OwnCorners(corners) => Some(rect_from_corners(b, a, corners)),
        OverlapCase::Crossing => Some(crossing_rect(a, b)),
    }
}

/// Build the overlap from the corners of `inner` found inside `outer`.
///
/// On each axis, when both of `inner`'s edges carry a contained corner the
/// overlap spans `inner`; otherwise the contained edge meets `outer`'s
/// opposite edge.
fn rect_from_corners(outer: &BoundingBox, inner: &BoundingBox, corners: Corners) -> BoundingBox {
    let (min_lon, max_lon) = match (corners.has_left(), corners.has_right()) {
        (true, false) => (inner.min_lon(), outer.max_lon()),
        (false, true) => (outer.min_lon(), inner.max_lon()),
        _ => (inner.min_lon(), inner.max_lon()),
    };
    let (min_lat, max_lat) = match (corners.has_bottom(), corners.has_top()) {
        (true, false) => (inner.min_lat(), outer.max_lat()),
        (false, true) => (outer.min_lat(), inner.max_lat()),
        _ => (inner.min_lat(), inner.max_lat()),
    };
    BoundingBox::from_bounds_unchecked(min_lat, max_lat, min_lon, max_lon)
}

/// Overlap of two boxes forming a cross: the narrower longitude range and
/// the narrower latitude range come from different boxes.
fn crossing_rect(a: &BoundingBox, b: &BoundingBox) -> BoundingBox {
    let (lon_source, lat_source) = if a.min_lon() >= b.min_lon() && a.max_lon() <= b.max_lon() {
        (a, b)
    } else {
        (b, a)
    };
    BoundingBox::from_bounds_unchecked(
        lat_source.min_lat(),
        lat_source.max_lat(),
        lon_source.min_lon(),
        lon_source.max_lon(),
    )
}

/// Area shared by two boxes, in square metres.
///
/// # Examples
/// ```
/// use geocat_core::{BoundingBox, geometry::{bbox_area, bbox_intersection_area}};
///
/// let outer = BoundingBox::new(0.0, 10.0, 0.0, 10.0).expect("outer");
/// let inner = BoundingBox::new(2.0, 4.0, 2.0, 4.0).expect("inner");
/// assert_eq!(bbox_intersection_area(&inner, &outer), bbox_area(&inner));
/// ```
#[must_use]
pub fn bbox_intersection_area(a: &BoundingBox, b: &BoundingBox) -> f64 {
    match classify_overlap(a, b) {
        OverlapCase::Disjoint => 0.0,
        OverlapCase::Contained => bbox_area(a),
        _ => overlap_rect(a, b).map_or(0.0, |rect| bbox_area(&rect)),
    }
}

/// Share of `a` covered by `b`, in `[0, 1]`.
///
/// Degenerate boxes have no area, so when `a` is a point or a line and the
/// shared area is zero, the diagonal of the overlap is compared with `a`'s
/// diagonal instead.
#[expect(
    clippy::float_arithmetic,
    reason = "coverage is a ratio of areas or lengths"
)]
#[must_use]
pub fn intersection_fraction(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let Some(rect) = overlap_rect(a, b) else {
        return 0.0;
    };
    if a.is_within(b) {
        return 1.0;
    }
    let area = bbox_area(a);
    let shared = bbox_intersection_area(a, b);
    if area > 0.0 {
        return shared / area;
    }
    let diagonal = bbox_diagonal(a);
    if diagonal > 0.0 {
        bbox_diagonal(&rect) / diagonal
    } else {
        0.0
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    clippy::float_cmp,
    reason = "tests compare computed areas and fractions"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bbox(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> BoundingBox {
        BoundingBox::new(min_lat, max_lat, min_lon, max_lon).expect("valid box")
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = expected.abs().max(1.0) * 1e-9;
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    fn haversine_is_zero_for_identical_points() {
        assert_eq!(haversine_distance(51.5, -0.12, 51.5, -0.12), 0.0);
    }

    #[rstest]
    fn haversine_spans_half_the_globe() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert_close(distance, std::f64::consts::PI * EARTH_RADIUS_M);
    }

    #[rstest]
    fn haversine_is_symmetric() {
        let there = haversine_distance(10.0, 20.0, -30.0, 40.0);
        let back = haversine_distance(-30.0, 40.0, 10.0, 20.0);
        assert_close(there, back);
    }

    #[rstest]
    fn diagonal_of_point_is_zero() {
        assert_eq!(bbox_diagonal(&bbox(10.0, 10.0, 20.0, 20.0)), 0.0);
    }

    #[rstest]
    fn center_is_midpoint() {
        let center = bbox_center(&bbox(0.0, 10.0, 20.0, 40.0));
        assert_eq!(center, Point::new(30.0, 5.0));
    }

    #[rstest]
    #[case(bbox(0.0, 0.0, 0.0, 10.0))]
    #[case(bbox(0.0, 10.0, 5.0, 5.0))]
    #[case(bbox(3.0, 3.0, 3.0, 3.0))]
    fn degenerate_boxes_have_no_area(#[case] degenerate: BoundingBox) {
        assert_eq!(bbox_area(&degenerate), 0.0);
    }

    #[rstest]
    fn area_follows_strip_formula() {
        let equatorial = bbox(0.0, 10.0, 0.0, 10.0);
        let expected = 10.0_f64.to_radians()
            * (2.0 + 10.0_f64.to_radians().sin())
            * EARTH_RADIUS_M
            * EARTH_RADIUS_M
            / 2.0;
        assert_close(bbox_area(&equatorial), expected);
    }

    #[rstest]
    fn corners_in_reports_each_corner() {
        let a = bbox(0.0, 10.0, 0.0, 10.0);
        let b = bbox(5.0, 15.0, 5.0, 15.0);
        let corners = corners_in(&a, &b);
        assert_eq!(
            corners,
            Corners {
                bottom_left: true,
                ..Corners::default()
            }
        );
        assert_eq!(corners.count(), 1);
    }

    #[rstest]
    fn disjoint_boxes_share_no_area() {
        let a = bbox(0.0, 10.0, 0.0, 10.0);
        let b = bbox(50.0, 60.0, 50.0, 60.0);
        assert_eq!(classify_overlap(&a, &b), OverlapCase::Disjoint);
        assert_eq!(bbox_intersection_area(&a, &b), 0.0);
        assert_eq!(intersection_fraction(&a, &b), 0.0);
    }

    #[rstest]
    fn contained_box_shares_its_whole_area() {
        let a = bbox(2.0, 4.0, 2.0, 4.0);
        let b = bbox(0.0, 10.0, 0.0, 10.0);
        assert_eq!(classify_overlap(&a, &b), OverlapCase::Contained);
        assert_eq!(bbox_intersection_area(&a, &b), bbox_area(&a));
        assert_eq!(intersection_fraction(&a, &b), 1.0);
    }

    #[rstest]
    fn enclosing_box_shares_the_inner_area() {
        let a = bbox(0.0, 10.0, 0.0, 10.0);
        let b = bbox(2.0, 4.0, 2.0, 4.0);
        assert!(matches!(
            classify_overlap(&a, &b),
            OverlapCase::OtherCorners(corners) if corners.count() == 4
        ));
        assert_close(bbox_intersection_area(&a, &b), bbox_area(&b));
    }

    #[rstest]
    #[case(bbox(5.0, 15.0, 5.0, 15.0), bbox(5.0, 10.0, 5.0, 10.0))]
    #[case(bbox(-5.0, 5.0, -5.0, 5.0), bbox(0.0, 5.0, 0.0, 5.0))]
    #[case(bbox(2.0, 8.0, 5.0, 15.0), bbox(2.0, 8.0, 5.0, 10.0))]
    #[case(bbox(-5.0, 3.0, 2.0, 8.0), bbox(0.0, 3.0, 2.0, 8.0))]
    fn corner_cases_clip_to_shared_rectangle(
        #[case] other: BoundingBox,
        #[case] expected: BoundingBox,
    ) {
        let a = bbox(0.0, 10.0, 0.0, 10.0);
        assert_eq!(overlap_rect(&a, &other), Some(expected));
    }

    #[rstest]
    fn own_corners_case_uses_first_box_corners() {
        let a = bbox(8.0, 12.0, -2.0, 2.0);
        let b = bbox(0.0, 10.0, -10.0, 10.0);
        assert!(matches!(
            classify_overlap(&a, &b),
            OverlapCase::OwnCorners(corners) if corners.count() == 2
        ));
        assert_eq!(overlap_rect(&a, &b), Some(bbox(8.0, 10.0, -2.0, 2.0)));
    }

    #[rstest]
    fn crossing_boxes_take_an_axis_from_each() {
        let tall = bbox(-10.0, 10.0, -1.0, 1.0);
        let wide = bbox(-1.0, 1.0, -10.0, 10.0);
        assert_eq!(classify_overlap(&tall, &wide), OverlapCase::Crossing);
        let expected = bbox(-1.0, 1.0, -1.0, 1.0);
        assert_eq!(overlap_rect(&tall, &wide), Some(expected));
        assert_eq!(overlap_rect(&wide, &tall), Some(expected));
    }

    #[rstest]
    fn partial_overlap_fraction_is_area_ratio() {
        let a = bbox(0.0, 10.0, 0.0, 10.0);
        let b = bbox(0.0, 10.0, 5.0, 20.0);
        let fraction = intersection_fraction(&a, &b);
        assert_close(fraction, 0.5);
    }

    #[rstest]
    fn point_inside_box_is_fully_covered() {
        let point = bbox(5.0, 5.0, 5.0, 5.0);
        let area = bbox(0.0, 10.0, 0.0, 10.0);
        assert_eq!(intersection_fraction(&point, &area), 1.0);
    }

    #[rstest]
    fn identical_points_are_fully_covered() {
        let point = bbox(10.0, 10.0, 20.0, 20.0);
        assert_eq!(intersection_fraction(&point, &point), 1.0);
    }

    #[rstest]
    fn line_partially_covered_uses_diagonal_ratio() {
        let line = bbox(0.0, 0.0, 0.0, 10.0);
        let area = bbox(-5.0, 5.0, 5.0, 20.0);
        let expected = bbox_diagonal(&bbox(0.0, 0.0, 5.0, 10.0)) / bbox_diagonal(&line);
        assert_close(intersection_fraction(&line, &area), expected);
        assert!(intersection_fraction(&line, &area) < 1.0);
    }
}
