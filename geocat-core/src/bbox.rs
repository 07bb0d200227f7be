//! Axis-aligned geographic bounding boxes.
//!
//! Boxes are stored as a [`geo::Rect`] with `x = longitude` and
//! `y = latitude`, both in degrees.

use geo::{Coord, Rect};
use thiserror::Error;

/// Errors returned by [`BoundingBox::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BoundingBoxError {
    /// A coordinate was NaN or infinite.
    #[error("bounding box coordinates must be finite")]
    NonFinite,
    /// A minimum exceeded its maximum.
    #[error("bounding box {axis} minimum {min} exceeds maximum {max}")]
    Inverted {
        /// Either `"latitude"` or `"longitude"`.
        axis: &'static str,
        /// Supplied minimum.
        min: f64,
        /// Supplied maximum.
        max: f64,
    },
    /// A coordinate fell outside the WGS84 range for its axis.
    #[error("{axis} {value} is outside the valid range")]
    OutOfRange {
        /// Either `"latitude"` or `"longitude"`.
        axis: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Geographic extent of a catalogue entry.
///
/// A box may degenerate to a point (both coordinate pairs equal) or a line
/// (exactly one pair equal).
///
/// # Examples
/// ```
/// use geocat_core::BoundingBox;
///
/// # fn main() -> Result<(), geocat_core::BoundingBoxError> {
/// let bbox = BoundingBox::new(10.0, 20.0, 30.0, 40.0)?;
/// assert_eq!(bbox.min_lat(), 10.0);
/// assert_eq!(bbox.max_lon(), 40.0);
/// assert!(!bbox.is_degenerate());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    rect: Rect<f64>,
}

impl BoundingBox {
    /// Validate and construct a box from `(min_lat, max_lat, min_lon, max_lon)`.
    ///
    /// # Errors
    /// Returns [`BoundingBoxError`] for non-finite, inverted, or out of range
    /// coordinates.
    pub fn new(
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Result<Self, BoundingBoxError> {
        if ![min_lat, max_lat, min_lon, max_lon]
            .iter()
            .all(|value| value.is_finite())
        {
            return Err(BoundingBoxError::NonFinite);
        }
        check_axis("latitude", min_lat, max_lat, 90.0)?;
        check_axis("longitude", min_lon, max_lon, 180.0)?;
        Ok(Self::from_bounds_unchecked(
            min_lat, max_lat, min_lon, max_lon,
        ))
    }

    /// Build a box from bounds already known to be ordered and in range.
    pub(crate) fn from_bounds_unchecked(
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Self {
        Self {
            rect: Rect::new(
                Coord {
                    x: min_lon,
                    y: min_lat,
                },
                Coord {
                    x: max_lon,
                    y: max_lat,
                },
            ),
        }
    }

    /// Southern edge in degrees.
    #[must_use]
    pub fn min_lat(&self) -> f64 {
        self.rect.min().y
    }

    /// Northern edge in degrees.
    #[must_use]
    pub fn max_lat(&self) -> f64 {
        self.rect.max().y
    }

    /// Western edge in degrees.
    #[must_use]
    pub fn min_lon(&self) -> f64 {
        self.rect.min().x
    }

    /// Eastern edge in degrees.
    #[must_use]
    pub fn max_lon(&self) -> f64 {
        self.rect.max().x
    }

    /// Borrow the underlying rectangle.
    #[must_use]
    pub const fn rect(&self) -> &Rect<f64> {
        &self.rect
    }

    /// Report whether the box collapses to a single point.
    #[expect(
        clippy::float_cmp,
        reason = "degeneracy is defined by exact equality of the supplied bounds"
    )]
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.min_lat() == self.max_lat() && self.min_lon() == self.max_lon()
    }

    /// Report whether the box has zero area, i.e. is a point or a line.
    #[expect(
        clippy::float_cmp,
        reason = "degeneracy is defined by exact equality of the supplied bounds"
    )]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.min_lat() == self.max_lat() || self.min_lon() == self.max_lon()
    }

    /// Report whether `coord` lies within the closed bounds of the box.
    #[must_use]
    pub fn contains_coord(&self, coord: Coord<f64>) -> bool {
        (self.min_lon()..=self.max_lon()).contains(&coord.x)
            && (self.min_lat()..=self.max_lat()).contains(&coord.y)
    }

    /// Report whether this box lies entirely within `other`.
    #[must_use]
    pub fn is_within(&self, other: &Self) -> bool {
        self.min_lat() >= other.min_lat()
            && self.max_lat() <= other.max_lat()
            && self.min_lon() >= other.min_lon()
            && self.max_lon() <= other.max_lon()
    }

    /// Corners in the fixed order top-left, top-right, bottom-left,
    /// bottom-right.
    #[must_use]
    pub fn corners(&self) -> [Coord<f64>; 4] {
        [
            Coord {
                x: self.min_lon(),
                y: self.max_lat(),
            },
            Coord {
                x: self.max_lon(),
                y: self.max_lat(),
            },
            Coord {
                x: self.min_lon(),
                y: self.min_lat(),
            },
            Coord {
                x: self.max_lon(),
                y: self.min_lat(),
            },
        ]
    }
}

fn check_axis(axis: &'static str, min: f64, max: f64, limit: f64) -> Result<(), BoundingBoxError> {
    for value in [min, max] {
        if !(-limit..=limit).contains(&value) {
            return Err(BoundingBoxError::OutOfRange { axis, value });
        }
    }
    if min > max {
        return Err(BoundingBoxError::Inverted { axis, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn accepts_point_box() {
        let bbox = BoundingBox::new(10.0, 10.0, 20.0, 20.0).expect("point box");
        assert!(bbox.is_point());
        assert!(bbox.is_degenerate());
    }

    #[rstest]
    #[case(0.0, 0.0, -5.0, 5.0)]
    #[case(-5.0, 5.0, 3.0, 3.0)]
    fn line_boxes_are_degenerate_but_not_points(
        #[case] min_lat: f64,
        #[case] max_lat: f64,
        #[case] min_lon: f64,
        #[case] max_lon: f64,
    ) {
        let bbox = BoundingBox::new(min_lat, max_lat, min_lon, max_lon).expect("line box");
        assert!(bbox.is_degenerate());
        assert!(!bbox.is_point());
    }

    #[rstest]
    fn rejects_inverted_latitude() {
        let err = BoundingBox::new(20.0, 10.0, 0.0, 1.0).expect_err("inverted");
        assert!(matches!(
            err,
            BoundingBoxError::Inverted {
                axis: "latitude",
                ..
            }
        ));
    }

    #[rstest]
    #[case(-91.0, 0.0, 0.0, 1.0)]
    #[case(0.0, 1.0, 0.0, 181.0)]
    fn rejects_out_of_range(
        #[case] min_lat: f64,
        #[case] max_lat: f64,
        #[case] min_lon: f64,
        #[case] max_lon: f64,
    ) {
        let err = BoundingBox::new(min_lat, max_lat, min_lon, max_lon).expect_err("range");
        assert!(matches!(err, BoundingBoxError::OutOfRange { .. }));
    }

    #[rstest]
    fn rejects_nan() {
        let err = BoundingBox::new(f64::NAN, 1.0, 0.0, 1.0).expect_err("nan");
        assert_eq!(err, BoundingBoxError::NonFinite);
    }

    #[rstest]
    fn corners_follow_fixed_order() {
        let bbox = BoundingBox::new(0.0, 10.0, 20.0, 30.0).expect("box");
        let [top_left, top_right, bottom_left, bottom_right] = bbox.corners();
        assert_eq!(top_left, Coord { x: 20.0, y: 10.0 });
        assert_eq!(top_right, Coord { x: 30.0, y: 10.0 });
        assert_eq!(bottom_left, Coord { x: 20.0, y: 0.0 });
        assert_eq!(bottom_right, Coord { x: 30.0, y: 0.0 });
    }

    #[rstest]
    fn containment_is_closed() {
        let bbox = BoundingBox::new(0.0, 10.0, 0.0, 10.0).expect("box");
        assert!(bbox.contains_coord(Coord { x: 10.0, y: 0.0 }));
        assert!(!bbox.contains_coord(Coord { x: 10.1, y: 0.0 }));
    }
}
