//! Behaviour-driven step definitions driving the rank CLI scenarios.

use super::helpers::{sample_request, write_utf8};
use super::*;
use crate::rank::run_rank_with;
use camino::Utf8PathBuf;
use geocat_core::{RankedList, WeightsError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct RankWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RankWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("request.json");

        Self {
            _tmp: tmp,
            request_path,
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["geocat".to_string(), "rank".to_string()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_string());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn take_error(&self) -> CliError {
        self.result
            .borrow_mut()
            .take()
            .expect("result recorded")
            .expect_err("expected error")
    }

    fn ranked(&self) -> RankedList {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be a JSON ranked list")
    }
}

#[fixture]
fn world() -> RankWorld {
    RankWorld::new()
}

#[given("a valid rank request exists on disk")]
fn valid_rank_request_exists(#[from(world)] world: &RankWorld) {
    let payload = serde_json::to_string_pretty(&sample_request()).expect("serialize request");
    write_utf8(&world.request_path, payload.as_bytes());
}

#[given("the rank request contains invalid JSON")]
fn rank_request_contains_invalid_json(#[from(world)] world: &RankWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("I omit the rank request path")]
fn omit_rank_request_path(#[from(world)] world: &RankWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("I limit the results to {count}")]
fn limit_results(#[from(world)] world: &RankWorld, count: usize) {
    world
        .cli_args
        .borrow_mut()
        .extend(["--count".to_string(), count.to_string()]);
}

#[given("I set the extent weight to {weight}")]
fn set_extent_weight(#[from(world)] world: &RankWorld, weight: f64) {
    world
        .cli_args
        .borrow_mut()
        .extend(["--extent-weight".to_string(), weight.to_string()]);
}

#[when("I run the rank command")]
fn run_rank_command(#[from(world)] world: &RankWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Rank(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_rank_with(args, &mut *buffer)
        }
    });

    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints the identical record last")]
fn command_prints_identical_record_last(#[from(world)] world: &RankWorld) {
    let ranked = world.ranked();
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked.best().map(|best| best.id.as_str()), Some("same"));
}

#[then("the command prints {count} result")]
fn command_prints_count(#[from(world)] world: &RankWorld, count: usize) {
    assert_eq!(world.ranked().len(), count);
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &RankWorld) {
    match world.take_error() {
        CliError::ParseRankRequest { .. } => {}
        other => panic!("expected ParseRankRequest, found {other:?}"),
    }
}

#[then("the command fails because the weights are invalid")]
fn command_fails_invalid_weights(#[from(world)] world: &RankWorld) {
    match world.take_error() {
        CliError::InvalidWeights { source } => {
            assert!(matches!(
                source,
                WeightsError::OutOfRange {
                    name: "extent",
                    ..
                }
            ));
        }
        other => panic!("expected InvalidWeights, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &RankWorld) {
    match world.take_error() {
        CliError::MissingArgument { field, .. } => assert_eq!(field, ARG_RANK_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_rank_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/rank_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RankWorld) {
            let _ = world;
        }
    };
}

register_rank_scenario!(rank_happy_path, "ranking a request from JSON");
register_rank_scenario!(rank_limits_results, "limiting the number of results");
register_rank_scenario!(rank_invalid_json, "rejecting invalid JSON input");
register_rank_scenario!(rank_invalid_weights, "rejecting out-of-range weights");
register_rank_scenario!(rank_missing_request, "rejecting missing request paths");
