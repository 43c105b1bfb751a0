//! Behaviour-driven step definitions driving the rank CLI scenarios.

use super::helpers::{CONTEXT_JSON, SITES_JSON, write_utf8};
use super::*;
use crate::rank::run_rank_with;
use camino::Utf8PathBuf;
use restroom_core::ContextError;
use restroom_scorer::RankError;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct RankWorld {
    _tmp: TempDir,
    data_dir: Utf8PathBuf,
    context_path: Utf8PathBuf,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RankWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let data_dir =
            Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let context_path = data_dir.join("context.json");
        Self {
            _tmp: tmp,
            data_dir,
            context_path,
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec![
            "restroom".to_owned(),
            "rank".to_owned(),
            self.context_path.as_str().to_owned(),
            format!("--{ARG_RANK_DATA_DIR}"),
            self.data_dir.as_str().to_owned(),
        ];
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn printed_ids(&self) -> Vec<String> {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");

        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        let records: Vec<Value> = serde_json::from_str(&stdout).expect("output should be JSON");
        records
            .iter()
            .map(|record| record["id"].as_str().expect("id string").to_owned())
            .collect()
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |borrowed| {
            borrowed
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> RankWorld {
    RankWorld::new()
}

#[given("a data directory with two sites")]
fn data_directory_with_sites(#[from(world)] world: &RankWorld) {
    write_utf8(&world.data_dir.join("bathrooms.json"), SITES_JSON.as_bytes());
}

#[given("an empty data directory")]
fn empty_data_directory(#[from(world)] world: &RankWorld) {
    let _ = world;
}

#[given("a user context beside the first site")]
fn context_beside_first_site(#[from(world)] world: &RankWorld) {
    write_utf8(&world.context_path, CONTEXT_JSON.as_bytes());
}

#[given("a user context without a location")]
fn context_without_location(#[from(world)] world: &RankWorld) {
    write_utf8(&world.context_path, br#"{"time": "12:00"}"#);
}

#[given("a result limit of one")]
fn result_limit_of_one(#[from(world)] world: &RankWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_RANK_TOP_K}"), "1".to_owned()]);
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
        Command::RecordVisit(_) => panic!("expected rank command"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command prints the sites best first")]
fn prints_sites_best_first(#[from(world)] world: &RankWorld) {
    assert_eq!(world.printed_ids(), ["A", "B"]);
}

#[then("the command prints only the first site")]
fn prints_only_first_site(#[from(world)] world: &RankWorld) {
    assert_eq!(world.printed_ids(), ["A"]);
}

#[then("the command fails because the context has no location")]
fn fails_without_location(#[from(world)] world: &RankWorld) {
    match &*world.error() {
        CliError::Rank(RankError::InvalidContext(ContextError::MissingLocation)) => {}
        other => panic!("expected missing location, found {other:?}"),
    }
}

#[then("the command fails because the sites file is missing")]
fn fails_without_sites(#[from(world)] world: &RankWorld) {
    match &*world.error() {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_RANK_SITES),
        other => panic!("expected MissingSourceFile, found {other:?}"),
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

register_rank_scenario!(rank_happy_path, "ranking sites from JSON files");
register_rank_scenario!(rank_top_k, "limiting the number of results");
register_rank_scenario!(rank_missing_location, "rejecting a context without a location");
register_rank_scenario!(rank_missing_sites, "rejecting a missing sites file");
