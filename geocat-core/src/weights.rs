//! Weight configuration for the composite similarity score.

use thiserror::Error;

/// Largest accepted value for any single weight.
pub const MAX_WEIGHT: f64 = 5.0;

/// Errors returned by [`SimilarityWeights::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WeightsError {
    /// A weight was non-finite or outside `0.0..=5.0`.
    #[error("{name} weight {value} must be between 0 and {MAX_WEIGHT}")]
    OutOfRange {
        /// Name of the offending weight.
        name: &'static str,
        /// Supplied value.
        value: f64,
    },
    /// Geographic and temporal weights were both zero, leaving the
    /// geographic/temporal blend undefined.
    #[error("geographic and temporal weights must not both be zero")]
    ZeroBlendTotal,
}

/// The five weights steering the composite score.
///
/// `extent`, `datatype` and `location` scale the three criteria; `geographic`
/// and `temporal` set the blend ratio used inside every criterion.
///
/// # Examples
/// ```
/// use geocat_core::SimilarityWeights;
///
/// # fn main() -> Result<(), geocat_core::WeightsError> {
/// let weights = SimilarityWeights::new(1.0, 1.0, 2.0, 3.0, 1.0)?;
/// assert_eq!(weights.geographic_ratio(), 0.75);
/// assert!(SimilarityWeights::new(1.0, 1.0, 1.0, 0.0, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimilarityWeights {
    extent: f64,
    datatype: f64,
    location: f64,
    geographic: f64,
    temporal: f64,
}

impl SimilarityWeights {
    /// Validate and construct a weight set.
    ///
    /// # Errors
    /// Returns [`WeightsError::OutOfRange`] for any weight outside
    /// `0.0..=5.0` and [`WeightsError::ZeroBlendTotal`] when `geographic` and
    /// `temporal` sum to zero.
    #[expect(
        clippy::float_arithmetic,
        reason = "validation sums the blend weights"
    )]
    pub fn new(
        extent: f64,
        datatype: f64,
        location: f64,
        geographic: f64,
        temporal: f64,
    ) -> Result<Self, WeightsError> {
        for (name, value) in [
            ("extent", extent),
            ("datatype", datatype),
            ("location", location),
            ("geographic", geographic),
            ("temporal", temporal),
        ] {
            if !(0.0..=MAX_WEIGHT).contains(&value) {
                return Err(WeightsError::OutOfRange { name, value });
            }
        }
        if geographic + temporal <= 0.0 {
            return Err(WeightsError::ZeroBlendTotal);
        }
        Ok(Self {
            extent,
            datatype,
            location,
            geographic,
            temporal,
        })
    }

    /// Weight applied to extent similarity.
    #[must_use]
    pub const fn extent(&self) -> f64 {
        self.extent
    }

    /// Weight applied to datatype similarity.
    #[must_use]
    pub const fn datatype(&self) -> f64 {
        self.datatype
    }

    /// Weight applied to location similarity.
    #[must_use]
    pub const fn location(&self) -> f64 {
        self.location
    }

    /// Weight of geographic sub-scores within each criterion.
    #[must_use]
    pub const fn geographic(&self) -> f64 {
        self.geographic
    }

    /// Weight of temporal sub-scores within each criterion.
    #[must_use]
    pub const fn temporal(&self) -> f64 {
        self.temporal
    }

    /// Share of each criterion given to its geographic sub-score,
    /// `g / (g + t)`.
    #[expect(
        clippy::float_arithmetic,
        reason = "the blend ratio divides the geographic weight by the total"
    )]
    #[must_use]
    pub fn geographic_ratio(&self) -> f64 {
        self.geographic / (self.geographic + self.temporal)
    }

    /// Largest composite score reachable when every sub-score lies in
    /// `[0, 1]`: `extent + datatype + location`, before damping.
    #[expect(
        clippy::float_arithmetic,
        reason = "the bound sums the criterion weights"
    )]
    #[must_use]
    pub fn criterion_total(&self) -> f64 {
        self.extent + self.datatype + self.location
    }
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            extent: 1.0,
            datatype: 1.0,
            location: 1.0,
            geographic: 1.0,
            temporal: 1.0,
        }
    }
}

/// Partial weight set layered over a base [`SimilarityWeights`].
///
/// Catalogue configuration and request parameters each supply some of the
/// five weights; unset fields fall through to the layer below.
///
/// # Examples
/// ```
/// use geocat_core::{SimilarityWeights, WeightOverrides};
///
/// # fn main() -> Result<(), geocat_core::WeightsError> {
/// let overrides = WeightOverrides {
///     temporal: Some(0.0),
///     ..WeightOverrides::default()
/// };
/// let weights = overrides.apply_to(&SimilarityWeights::default())?;
/// assert_eq!(weights.geographic_ratio(), 1.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct WeightOverrides {
    /// Replacement extent weight.
    pub extent: Option<f64>,
    /// Replacement datatype weight.
    pub datatype: Option<f64>,
    /// Replacement location weight.
    pub location: Option<f64>,
    /// Replacement geographic weight.
    pub geographic: Option<f64>,
    /// Replacement temporal weight.
    pub temporal: Option<f64>,
}

impl WeightOverrides {
    /// Layer `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn layered(self, other: Self) -> Self {
        Self {
            extent: other.extent.or(self.extent),
            datatype: other.datatype.or(self.datatype),
            location: other.location.or(self.location),
            geographic: other.geographic.or(self.geographic),
            temporal: other.temporal.or(self.temporal),
        }
    }

    /// Resolve the overrides against `base` and validate the result.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when the combined weights fail
    /// [`SimilarityWeights::new`].
    pub fn apply_to(&self, base: &SimilarityWeights) -> Result<SimilarityWeights, WeightsError> {
        SimilarityWeights::new(
            self.extent.unwrap_or(base.extent),
            self.datatype.unwrap_or(base.datatype),
            self.location.unwrap_or(base.location),
            self.geographic.unwrap_or(base.geographic),
            self.temporal.unwrap_or(base.temporal),
        )
    }
}
