//! Bounded top-N selection over a candidate slice.
//!
//! [`TopN`] keeps the `n` strongest candidates seen so far in a min-heap so
//! the weakest retained match is always at the top, ready to be evicted.
//! Every accumulator owns its heap; parallel selection builds one per
//! partition and merges them.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use geocat_core::{
    CatalogEntry, CatalogRecord, EntryError, RankedList, ScoredResult, SimilarityScorer,
    SimilarityWeights, WeightOverrides,
};
use log::{debug, warn};

use crate::{CompositeScorer, RankError};

/// A retained candidate: its score, its position in the input and its id.
#[derive(Debug, Clone)]
struct Retained {
    score: f64,
    seq: usize,
    id: String,
}

impl Retained {
    /// Ordering key shared by `Ord` and `TopN::admits`: higher scores rank
    /// higher and earlier candidates win ties.
    fn rank_against(score: f64, seq: usize, other: &Self) -> Ordering {
        score
            .total_cmp(&other.score)
            .then_with(|| other.seq.cmp(&seq))
    }
}

impl PartialEq for Retained {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Retained {}

impl PartialOrd for Retained {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Retained {
    fn cmp(&self, other: &Self) -> Ordering {
        Self::rank_against(self.score, self.seq, other)
    }
}

/// Accumulator retaining the `capacity` strongest candidates offered.
///
/// # Examples
/// ```
/// use geocat_scorer::TopN;
///
/// let mut top = TopN::new(2);
/// for (seq, score) in [0.1, 0.9, 0.5].into_iter().enumerate() {
///     top.offer(seq, &format!("c{seq}"), score);
/// }
/// let ranked = top.into_ranked();
/// assert_eq!(ranked.ids().collect::<Vec<_>>(), ["c2", "c1"]);
/// ```
#[derive(Debug, Clone)]
pub struct TopN {
    capacity: usize,
    heap: BinaryHeap<Reverse<Retained>>,
}

impl TopN {
    /// Create an empty accumulator holding at most `capacity` candidates.
    ///
    /// Storage for `capacity` entries is reserved up front; callers clamp
    /// the capacity to the candidate count first.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Maximum number of retained candidates.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of candidates currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Report whether nothing is retained yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Weakest retained candidate, the next to be evicted.
    #[must_use]
    pub fn weakest(&self) -> Option<ScoredResult> {
        self.heap
            .peek()
            .map(|Reverse(entry)| ScoredResult::new(entry.id.clone(), entry.score))
    }

    fn admits(&self, score: f64, seq: usize) -> bool {
        if self.heap.len() < self.capacity {
            return true;
        }
        self.heap.peek().is_some_and(|Reverse(weakest)| {
            Retained::rank_against(score, seq, weakest) == Ordering::Greater
        })
    }

    fn insert(&mut self, entry: Retained) {
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(entry));
        } else if let Some(mut weakest) = self.heap.peek_mut() {
            *weakest = Reverse(entry);
        }
    }

    /// Offer the candidate at input position `seq`.
    ///
    /// The candidate is kept while fewer than `capacity` are held; after
    /// that it replaces the weakest only when it ranks strictly higher.
    /// Returns whether the candidate was kept.
    pub fn offer(&mut self, seq: usize, id: &str, score: f64) -> bool {
        if !self.admits(score, seq) {
            return false;
        }
        self.insert(Retained {
            score,
            seq,
            id: id.to_owned(),
        });
        true
    }

    /// Fold `other` into `self`, keeping the strongest of both.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for Reverse(entry) in other.heap.into_vec() {
            if self.admits(entry.score, entry.seq) {
                self.insert(entry);
            }
        }
        self
    }

    /// Consume the accumulator, returning its candidates weakest first.
    #[must_use]
    pub fn into_ranked(self) -> RankedList {
        let mut retained: Vec<Retained> = self
            .heap
            .into_vec()
            .into_iter()
            .map(|Reverse(entry)| entry)
            .collect();
        retained.sort_unstable();
        RankedList::from_sorted(
            retained
                .into_iter()
                .map(|entry| ScoredResult::new(entry.id, entry.score))
                .collect(),
        )
    }
}

/// Ranks candidates with a [`SimilarityScorer`] and keeps the top `n`.
///
/// # Examples
/// ```
/// use geocat_core::test_support::{EntryBuilder, FixedScorer};
/// use geocat_scorer::TopNSelector;
///
/// let query = EntryBuilder::new("query").build();
/// let candidates: Vec<_> = ["a", "b", "c"]
///     .into_iter()
///     .map(|id| EntryBuilder::new(id).build())
///     .collect();
/// let scorer = FixedScorer::new([("a", 0.2), ("b", 0.8), ("c", 0.5)]);
///
/// let ranked = TopNSelector::new(scorer).select(&query, &candidates, 2);
/// assert_eq!(ranked.ids().collect::<Vec<_>>(), ["c", "b"]);
/// ```
#[derive(Debug, Clone)]
pub struct TopNSelector<S> {
    scorer: S,
}

impl<S: SimilarityScorer> TopNSelector<S> {
    /// Create a selector using `scorer`.
    #[must_use]
    pub const fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Scorer applied to each candidate.
    #[must_use]
    pub const fn scorer(&self) -> &S {
        &self.scorer
    }

    fn score_candidate(&self, query: &CatalogEntry, candidate: &CatalogEntry) -> f64 {
        let raw = self.scorer.score(query, candidate);
        if !raw.is_finite() {
            warn!("candidate {} produced non-finite score {raw}", candidate.id);
        }
        S::sanitise(raw)
    }

    /// Return the `n` candidates most similar to `query`, weakest first.
    ///
    /// `n` is clamped to the number of candidates. Every candidate is scored
    /// exactly once.
    #[must_use]
    pub fn select(
        &self,
        query: &CatalogEntry,
        candidates: &[CatalogEntry],
        n: usize,
    ) -> RankedList {
        let count = clamp_count(n, candidates.len());
        let mut top = TopN::new(count);
        for (seq, candidate) in candidates.iter().enumerate() {
            let score = self.score_candidate(query, candidate);
            top.offer(seq, &candidate.id, score);
        }
        let ranked = top.into_ranked();
        log_summary(query, candidates.len(), &ranked);
        ranked
    }

    /// Parallel form of [`TopNSelector::select`] with identical results.
    ///
    /// Each rayon partition fills its own [`TopN`]; partitions are merged
    /// during the reduction.
    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    #[must_use]
    pub fn par_select(
        &self,
        query: &CatalogEntry,
        candidates: &[CatalogEntry],
        n: usize,
    ) -> RankedList {
        use rayon::prelude::*;

        let count = clamp_count(n, candidates.len());
        let ranked = candidates
            .par_iter()
            .enumerate()
            .fold(
                || TopN::new(count),
                |mut top, (seq, candidate)| {
                    let score = self.score_candidate(query, candidate);
                    top.offer(seq, &candidate.id, score);
                    top
                },
            )
            .reduce(|| TopN::new(count), TopN::merge)
            .into_ranked();
        log_summary(query, candidates.len(), &ranked);
        ranked
    }
}

fn clamp_count(n: usize, available: usize) -> usize {
    if n > available {
        debug!("requested {n} results but only {available} candidates are available");
        return available;
    }
    n
}

fn log_summary(query: &CatalogEntry, candidates: usize, ranked: &RankedList) {
    debug!(
        "kept {} of {candidates} candidates for query {}",
        ranked.len(),
        query.id
    );
}

/// Validate boundary records and rank the candidates with a
/// [`CompositeScorer`].
///
/// # Errors
/// Returns [`RankError::InvalidQuery`] when the query record is incomplete,
/// including a non-raster query with an empty vector shape, and
/// [`RankError::InvalidCandidate`] for the first candidate that fails
/// validation; a malformed timestamp anywhere aborts the call.
pub fn rank_records(
    query: &CatalogRecord,
    candidates: &[CatalogRecord],
    n: usize,
    weights: &SimilarityWeights,
) -> Result<RankedList, RankError> {
    let query_entry = validate_query(query)?;
    let entries = candidates
        .iter()
        .enumerate()
        .map(|(index, record)| {
            CatalogEntry::try_from(record.clone())
                .map_err(|source| RankError::InvalidCandidate { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let selector = TopNSelector::new(CompositeScorer::new(*weights));
    Ok(selector.select(&query_entry, &entries, n))
}

fn validate_query(query: &CatalogRecord) -> Result<CatalogEntry, RankError> {
    let entry = CatalogEntry::try_from(query.clone()).map_err(RankError::InvalidQuery)?;
    if entry.vector_shape.is_empty() && !entry.is_raster {
        return Err(RankError::InvalidQuery(EntryError::MissingVector { id: entry.id }));
    }
    Ok(entry)
}

/// Like [`rank_records`], resolving `overrides` against the default weights
/// first.
///
/// # Errors
/// Returns [`RankError::InvalidWeights`] when the resolved weights are out of
/// range, otherwise the errors of [`rank_records`].
pub fn rank_records_with_overrides(
    query: &CatalogRecord,
    candidates: &[CatalogRecord],
    n: usize,
    overrides: &WeightOverrides,
) -> Result<RankedList, RankError> {
    let weights = overrides.apply_to(&SimilarityWeights::default())?;
    rank_records(query, candidates, n, &weights)
}
