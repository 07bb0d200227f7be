//! Behavioural coverage for ranking similar records.

use std::cell::RefCell;

use geocat_core::test_support::{EntryBuilder, FixedScorer};
use geocat_core::{CatalogEntry, CatalogRecord, RankedList, SimilarityWeights};
use geocat_scorer::{RankError, TopNSelector, rank_records};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Inputs and outcome shared across the steps of one scenario.
#[derive(Default)]
pub struct TestContext {
    scored: RefCell<Option<(Vec<CatalogEntry>, FixedScorer)>>,
    query: RefCell<Option<CatalogRecord>>,
    catalogue: RefCell<Vec<CatalogRecord>>,
    outcome: RefCell<Option<Result<RankedList, RankError>>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext::default()
}

fn alps(id: &str) -> CatalogRecord {
    CatalogRecord {
        id: Some(id.to_owned()),
        bounding_box: Some([44.0, 48.0, 5.0, 16.0]),
        vector_shape: Some(vec![[5.0, 44.0], [16.0, 44.0], [16.0, 48.0], [5.0, 48.0]]),
        time_interval: Some([
            "2020-01-01T00:00:00Z".to_owned(),
            "2020-12-31T23:59:59Z".to_owned(),
        ]),
        is_raster: false,
    }
}

fn ranked(context: &TestContext) -> RankedList {
    context
        .outcome
        .borrow()
        .clone()
        .expect("ranking must have run")
        .expect("ranking should succeed")
}

#[given("five candidates scored 0.1, 0.9, 0.5, 0.2 and 0.7")]
fn five_scored_candidates(context: &TestContext) {
    let ids = ["a", "b", "c", "d", "e"];
    let entries = ids.iter().map(|id| EntryBuilder::new(*id).build()).collect();
    let scorer = FixedScorer::new(ids.into_iter().zip([0.1, 0.9, 0.5, 0.2, 0.7]));
    *context.scored.borrow_mut() = Some((entries, scorer));
}

#[given("a query record without a bounding box")]
fn query_without_box(context: &TestContext) {
    *context.query.borrow_mut() = Some(CatalogRecord {
        bounding_box: None,
        ..alps("query")
    });
}

#[given("a query record covering the Alps in 2020")]
fn query_alps(context: &TestContext) {
    *context.query.borrow_mut() = Some(alps("query"));
}

#[given("a catalogue of two candidate records")]
fn two_candidates(context: &TestContext) {
    let distant = CatalogRecord {
        bounding_box: Some([-40.0, -30.0, 140.0, 150.0]),
        time_interval: Some([
            "1995-06-01T00:00:00Z".to_owned(),
            "1995-06-01T00:00:00Z".to_owned(),
        ]),
        is_raster: true,
        vector_shape: Some(Vec::new()),
        ..alps("distant")
    };
    *context.catalogue.borrow_mut() = vec![distant, alps("alps-copy")];
}

#[when("I select the top {count} candidates")]
fn select_top(context: &TestContext, count: usize) {
    let scored = context.scored.borrow();
    let (entries, scorer) = scored.as_ref().expect("candidates must be scored");
    let query = EntryBuilder::new("query").build();
    let ranked = TopNSelector::new(scorer).select(&query, entries, count);
    *context.outcome.borrow_mut() = Some(Ok(ranked));
}

#[when("I rank the records")]
fn rank(context: &TestContext) {
    let query = context.query.borrow().clone().expect("query must be set");
    let outcome = rank_records(
        &query,
        &context.catalogue.borrow(),
        1,
        &SimilarityWeights::default(),
    );
    *context.outcome.borrow_mut() = Some(outcome);
}

#[then("the scores are 0.5, 0.7 and 0.9 in that order")]
fn scores_ascend(context: &TestContext) {
    let scores: Vec<f64> = ranked(context).scores().collect();
    assert_eq!(scores, [0.5, 0.7, 0.9]);
}

#[then("all five candidates are returned weakest first")]
fn all_candidates_returned(context: &TestContext) {
    let list = ranked(context);
    assert_eq!(list.ids().collect::<Vec<_>>(), ["a", "d", "c", "e", "b"]);
}

#[then("ranking fails because the query is invalid")]
fn query_rejected(context: &TestContext) {
    let outcome = context.outcome.borrow();
    assert!(
        matches!(outcome.as_ref(), Some(Err(RankError::InvalidQuery(_)))),
        "expected an invalid query error, got {outcome:?}"
    );
}

#[then("the identical record is the best match")]
fn identical_record_wins(context: &TestContext) {
    let list = ranked(context);
    assert_eq!(list.best().map(|best| best.id.as_str()), Some("alps-copy"));
}

#[scenario(path = "tests/features/ranking.feature", index = 0)]
fn keeps_strongest_three(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 1)]
fn clamps_to_available_candidates(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 2)]
fn rejects_query_without_geometry(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 3)]
fn prefers_identical_record(context: TestContext) {
    let _ = context;
}
