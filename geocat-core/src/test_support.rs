//! Test-only builders and deterministic scorers used by unit, behaviour and
//! benchmark code across the workspace.

use std::collections::HashMap;

use geo::Coord;

use crate::{BoundingBox, CatalogEntry, SimilarityScorer, TimeInterval, temporal::parse_instant};

/// Fluent builder for [`CatalogEntry`] values with sensible defaults.
///
/// Defaults to a one-degree box at the origin, a triangular vector shape and
/// the whole of January 2020.
///
/// # Panics
/// [`EntryBuilder::build`] panics when the configured parts are invalid;
/// the builder is for tests only.
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    id: String,
    bbox: (f64, f64, f64, f64),
    shape: Vec<Coord<f64>>,
    interval: (String, String),
    is_raster: bool,
}

impl EntryBuilder {
    /// Start building an entry with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bbox: (0.0, 1.0, 0.0, 1.0),
            shape: vec![
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 1.0, y: 0.0 },
                Coord { x: 1.0, y: 1.0 },
            ],
            interval: ("2020-01-01T00:00:00Z".into(), "2020-02-01T00:00:00Z".into()),
            is_raster: false,
        }
    }

    /// Set the bounding box as `(min_lat, max_lat, min_lon, max_lon)`.
    #[must_use]
    pub fn bbox(mut self, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        self.bbox = (min_lat, max_lat, min_lon, max_lon);
        self
    }

    /// Set the vector shape from `(lon, lat)` pairs.
    #[must_use]
    pub fn shape(mut self, points: &[(f64, f64)]) -> Self {
        self.shape = points.iter().map(|&(x, y)| Coord { x, y }).collect();
        self
    }

    /// Set the time interval from fixed-format instants.
    #[must_use]
    pub fn interval(mut self, start: &str, end: &str) -> Self {
        self.interval = (start.into(), end.into());
        self
    }

    /// Collapse the time interval to one instant.
    #[must_use]
    pub fn instant(mut self, at: &str) -> Self {
        self.interval = (at.into(), at.into());
        self
    }

    /// Mark the entry as raster data with an empty vector shape.
    #[must_use]
    pub fn raster(mut self) -> Self {
        self.is_raster = true;
        self.shape.clear();
        self
    }

    /// Build the entry.
    ///
    /// # Panics
    /// Panics when the configured parts fail validation.
    #[must_use]
    #[expect(clippy::expect_used, reason = "test builders should fail fast")]
    pub fn build(self) -> CatalogEntry {
        let (min_lat, max_lat, min_lon, max_lon) = self.bbox;
        let bbox =
            BoundingBox::new(min_lat, max_lat, min_lon, max_lon).expect("valid test bounding box");
        let start = parse_instant(&self.interval.0).expect("valid test start");
        let end = parse_instant(&self.interval.1).expect("valid test end");
        let interval = TimeInterval::new(start, end).expect("ordered test interval");
        CatalogEntry::new(self.id, bbox, self.shape, interval, self.is_raster)
            .expect("valid test entry")
    }
}

/// Test `SimilarityScorer` returning a fixed score per candidate id.
///
/// Unknown candidates score `0.0`.
#[derive(Debug, Clone, Default)]
pub struct FixedScorer {
    scores: HashMap<String, f64>,
}

impl FixedScorer {
    /// Build a scorer from `(id, score)` pairs.
    pub fn new<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            scores: scores
                .into_iter()
                .map(|(id, score)| (id.into(), score))
                .collect(),
        }
    }
}

impl SimilarityScorer for FixedScorer {
    fn score(&self, _query: &CatalogEntry, candidate: &CatalogEntry) -> f64 {
        self.scores.get(&candidate.id).copied().unwrap_or(0.0)
    }
}
