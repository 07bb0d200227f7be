//! Ranked output of a similarity search.

/// A candidate identifier paired with its similarity score.
///
/// Scores are not guaranteed to lie in `[0, 1]`: the centre-distance terms of
/// location similarity are unbounded. Non-finite scores, which JSON numbers
/// cannot hold, serialise as the strings `"inf"`, `"-inf"` and `"NaN"`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredResult {
    /// Identifier of the candidate entry.
    pub id: String,
    /// Composite similarity score.
    #[cfg_attr(feature = "serde", serde(with = "score_serde"))]
    pub score: f64,
}

#[cfg(feature = "serde")]
mod score_serde {
    use serde::{Deserialize, Deserializer, Serializer, de};

    const EXPECTED: &str = "a number, \"inf\", \"-inf\" or \"NaN\"";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireScore {
        Number(f64),
        Text(String),
    }

    #[expect(
        clippy::trivially_copy_pass_by_ref,
        reason = "serde's `with` contract passes the field by reference"
    )]
    pub(super) fn serialize<S>(score: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if score.is_finite() {
            serializer.serialize_f64(*score)
        } else if score.is_nan() {
            serializer.serialize_str("NaN")
        } else if score.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match WireScore::deserialize(deserializer)? {
            WireScore::Number(value) => Ok(value),
            WireScore::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &EXPECTED,
                )),
            },
        }
    }
}

impl ScoredResult {
    /// Pair an identifier with its score.
    #[must_use]
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// The strongest matches of a ranking call, weakest first.
///
/// Results are sorted in ascending score order so the first element is the
/// weakest of the retained matches. Consumers rely on this ordering.
///
/// # Examples
/// ```
/// use geocat_core::{RankedList, ScoredResult};
///
/// let list = RankedList::from_sorted(vec![
///     ScoredResult::new("b", 0.5),
///     ScoredResult::new("a", 0.9),
/// ]);
/// assert_eq!(list.best().map(|result| result.id.as_str()), Some("a"));
/// assert_eq!(list.ids().collect::<Vec<_>>(), ["b", "a"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RankedList {
    results: Vec<ScoredResult>,
}

impl RankedList {
    /// Wrap results already sorted in ascending score order.
    #[must_use]
    pub const fn from_sorted(results: Vec<ScoredResult>) -> Self {
        Self { results }
    }

    /// Borrow the results, weakest first.
    #[must_use]
    pub fn results(&self) -> &[ScoredResult] {
        &self.results
    }

    /// Number of retained results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Report whether nothing was retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Strongest retained match.
    #[must_use]
    pub fn best(&self) -> Option<&ScoredResult> {
        self.results.last()
    }

    /// Identifiers in ranked order, weakest first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|result| result.id.as_str())
    }

    /// Scores in ranked order, weakest first.
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.results.iter().map(|result| result.score)
    }

    /// Consume the list and return the underlying results.
    #[must_use]
    pub fn into_inner(self) -> Vec<ScoredResult> {
        self.results
    }
}

impl IntoIterator for RankedList {
    type Item = ScoredResult;
    type IntoIter = std::vec::IntoIter<ScoredResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn finite_scores_serialise_as_numbers() {
        let list = RankedList::from_sorted(vec![ScoredResult::new("a", 0.25)]);

        let json = serde_json::to_string(&list).expect("serialise list");

        assert_eq!(json, r#"[{"id":"a","score":0.25}]"#);
        let decoded: RankedList = serde_json::from_str(&json).expect("decode list");
        assert_eq!(decoded, list);
    }

    #[rstest]
    fn non_finite_scores_round_trip_through_json() {
        let list = RankedList::from_sorted(vec![
            ScoredResult::new("nan", f64::NEG_INFINITY),
            ScoredResult::new("huge", f64::INFINITY),
        ]);

        let json = serde_json::to_string(&list).expect("serialise list");

        assert!(json.contains(r#""score":"-inf""#), "{json}");
        let decoded: RankedList = serde_json::from_str(&json).expect("decode list");
        assert_eq!(decoded, list);
    }

    #[rstest]
    fn nan_text_decodes_to_nan() {
        let decoded: ScoredResult =
            serde_json::from_str(r#"{"id":"x","score":"NaN"}"#).expect("decode result");
        assert!(decoded.score.is_nan());
    }

    #[rstest]
    #[case(r#"{"id":"x","score":"high"}"#)]
    #[case(r#"{"id":"x","score":null}"#)]
    fn unknown_score_text_is_rejected(#[case] json: &str) {
        assert!(serde_json::from_str::<ScoredResult>(json).is_err());
    }
}
