//! Catalogue entries and their untyped boundary form.
//!
//! Storage and protocol layers hand the engine loosely shaped
//! [`CatalogRecord`] values. They are validated once, when converted into a
//! [`CatalogEntry`], so the scorers never deal with missing fields.

use geo::Coord;
use thiserror::Error;

use crate::{BoundingBox, BoundingBoxError, TemporalError, TimeInterval};

/// A validated catalogue entry.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use geocat_core::{BoundingBox, CatalogEntry, TimeInterval};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let entry = CatalogEntry::new(
///     "urn:example:1",
///     BoundingBox::new(10.0, 20.0, 30.0, 40.0)?,
///     vec![Coord { x: 30.0, y: 10.0 }, Coord { x: 40.0, y: 20.0 }],
///     TimeInterval::parse("2020-01-01T00:00:00Z", "2020-12-31T00:00:00Z")?,
///     false,
/// )?;
/// assert_eq!(entry.id, "urn:example:1");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Unique identifier.
    pub id: String,
    /// Geographic extent.
    pub bounding_box: BoundingBox,
    /// Vector footprint, `x = longitude` and `y = latitude`; empty for rasters.
    pub vector_shape: Vec<Coord<f64>>,
    /// Temporal extent.
    pub time_interval: TimeInterval,
    /// Whether the entry describes raster data.
    pub is_raster: bool,
}

/// Errors raised when validating a catalogue entry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntryError {
    /// The identifier was absent or blank.
    #[error("entry identifier must be present and non-empty")]
    MissingId,
    /// No bounding box was supplied.
    #[error("entry {id:?} has no bounding box")]
    MissingGeometry {
        /// Identifier of the affected entry.
        id: String,
    },
    /// The bounding box was unusable.
    #[error("entry {id:?} has an invalid bounding box")]
    InvalidGeometry {
        /// Identifier of the affected entry.
        id: String,
        /// Validation failure.
        #[source]
        source: BoundingBoxError,
    },
    /// No vector shape was supplied.
    #[error("entry {id:?} has no vector shape")]
    MissingVector {
        /// Identifier of the affected entry.
        id: String,
    },
    /// A vector coordinate was NaN or infinite.
    #[error("entry {id:?} has a non-finite vector coordinate")]
    InvalidVector {
        /// Identifier of the affected entry.
        id: String,
    },
    /// No time interval was supplied.
    #[error("entry {id:?} has no time interval")]
    MissingTimeInterval {
        /// Identifier of the affected entry.
        id: String,
    },
    /// The time interval could not be parsed.
    #[error("entry {id:?} has an invalid time interval")]
    Temporal {
        /// Identifier of the affected entry.
        id: String,
        /// Parsing or ordering failure.
        #[source]
        source: TemporalError,
    },
}

impl CatalogEntry {
    /// Validate and construct an entry from typed parts.
    ///
    /// # Errors
    /// Returns [`EntryError::MissingId`] for a blank identifier and
    /// [`EntryError::InvalidVector`] for non-finite shape coordinates.
    pub fn new(
        id: impl Into<String>,
        bounding_box: BoundingBox,
        vector_shape: Vec<Coord<f64>>,
        time_interval: TimeInterval,
        is_raster: bool,
    ) -> Result<Self, EntryError> {
        let id = require_id(Some(id.into()))?;
        if !vector_shape
            .iter()
            .all(|coord| coord.x.is_finite() && coord.y.is_finite())
        {
            return Err(EntryError::InvalidVector { id });
        }
        Ok(Self {
            id,
            bounding_box,
            vector_shape,
            time_interval,
            is_raster,
        })
    }

    /// Report whether the entry covers a single point in time.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.time_interval.is_instant()
    }
}

fn require_id(id: Option<String>) -> Result<String, EntryError> {
    match id {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(EntryError::MissingId),
    }
}

/// Loosely shaped entry as supplied by storage or request layers.
///
/// Bounding boxes are `[min_lat, max_lat, min_lon, max_lon]`, shape points
/// are `[lon, lat]` and time intervals are `[start, end]` in the fixed
/// instant format.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CatalogRecord {
    /// Unique identifier.
    pub id: Option<String>,
    /// Extent as `[min_lat, max_lat, min_lon, max_lon]`.
    pub bounding_box: Option<[f64; 4]>,
    /// Footprint as `[lon, lat]` pairs.
    pub vector_shape: Option<Vec<[f64; 2]>>,
    /// `[start, end]` instants.
    pub time_interval: Option<[String; 2]>,
    /// Whether the entry describes raster data.
    pub is_raster: bool,
}

impl TryFrom<CatalogRecord> for CatalogEntry {
    type Error = EntryError;

    fn try_from(record: CatalogRecord) -> Result<Self, Self::Error> {
        let id = require_id(record.id)?;
        let Some([min_lat, max_lat, min_lon, max_lon]) = record.bounding_box else {
            return Err(EntryError::MissingGeometry { id });
        };
        let bounding_box = match BoundingBox::new(min_lat, max_lat, min_lon, max_lon) {
            Ok(bbox) => bbox,
            Err(source) => return Err(EntryError::InvalidGeometry { id, source }),
        };
        let Some(points) = record.vector_shape else {
            return Err(EntryError::MissingVector { id });
        };
        let vector_shape = points.into_iter().map(|[x, y]| Coord { x, y }).collect();
        let Some([start, end]) = record.time_interval else {
            return Err(EntryError::MissingTimeInterval { id });
        };
        let time_interval = match TimeInterval::parse(&start, &end) {
            Ok(interval) => interval,
            Err(source) => return Err(EntryError::Temporal { id, source }),
        };
        Self::new(id, bounding_box, vector_shape, time_interval, record.is_raster)
    }
}
