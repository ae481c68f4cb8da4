//! Behaviour-driven step definitions driving the load CLI scenarios.

use super::helpers::{count_rows, sample_data_dir, table_exists, workspace, write_utf8};
use super::*;
use crate::load::run_load_with;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct LoadWorld {
    _tmp: TempDir,
    root: Utf8PathBuf,
    database: Utf8PathBuf,
    include_database: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl LoadWorld {
    fn new() -> Self {
        let (tmp, root) = workspace();
        let database = root.join("geonames.sqlite");
        Self {
            _tmp: tmp,
            root,
            database,
            include_database: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn push_flag(&self, flag: &str, value: &str) {
        self.cli_args
            .borrow_mut()
            .extend([format!("--{flag}"), value.to_owned()]);
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["geonames".to_owned(), "load".to_owned()];
        if *self.include_database.borrow() {
            argv.extend([format!("--{ARG_DATABASE}"), self.database.to_string()]);
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }
}

#[fixture]
fn world() -> LoadWorld {
    LoadWorld::new()
}

#[given("the sample dumps are the data directory")]
fn sample_dumps(#[from(world)] world: &LoadWorld) {
    world.push_flag(ARG_DATA_DIR, sample_data_dir().as_str());
}

#[given("I disable the shape source")]
fn disable_shape(#[from(world)] world: &LoadWorld) {
    world.push_flag(ARG_DISABLE_SOURCE, "shape");
}

#[given("an options file disables the user tag sink")]
fn options_disable_user_tag(#[from(world)] world: &LoadWorld) {
    let path = world.root.join("options.json");
    write_utf8(&path, br#"{"sinks": {"user_tag": {"enabled": false}}}"#);
    world.push_flag(ARG_OPTIONS, path.as_str());
}

#[given("I disable a source the catalogue does not define")]
fn disable_unknown_source(#[from(world)] world: &LoadWorld) {
    world.push_flag(ARG_DISABLE_SOURCE, "postcodes");
}

#[given("I omit the database path")]
fn omit_database(#[from(world)] world: &LoadWorld) {
    *world.include_database.borrow_mut() = false;
}

#[when("I run the load command")]
fn run_load_command(#[from(world)] world: &LoadWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Load(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_load_with(args, &mut *buffer)
        }
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints a summary")]
fn command_succeeds(#[from(world)] world: &LoadWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    assert!(
        stdout.starts_with("loaded 13 pipelines into "),
        "unexpected summary {stdout:?}"
    );
}

#[then("the database holds every sample place")]
fn every_place_loaded(#[from(world)] world: &LoadWorld) {
    assert_eq!(count_rows(&world.database, "geoname"), 5);
    assert_eq!(count_rows(&world.database, "boundary"), 1);
}

#[then("the database holds no boundaries")]
fn no_boundaries(#[from(world)] world: &LoadWorld) {
    assert_eq!(count_rows(&world.database, "boundary"), 0);
    assert_eq!(count_rows(&world.database, "geoname"), 5);
}

#[then("the database has no user tag table")]
fn no_user_tag_table(#[from(world)] world: &LoadWorld) {
    assert!(!table_exists(&world.database, "user_tag"));
    assert_eq!(count_rows(&world.database, "geoname"), 5);
}

#[then("the command fails because the source is unknown")]
fn command_fails_unknown_source(#[from(world)] world: &LoadWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::UnknownSource { name, .. } => assert_eq!(name, "postcodes"),
        other => panic!("expected UnknownSource, found {other:?}"),
    }
}

#[then("the command fails because the database path is missing")]
fn command_fails_missing_database(#[from(world)] world: &LoadWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_DATABASE),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_load_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/load_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: LoadWorld) {
            let _ = world;
        }
    };
}

register_load_scenario!(load_sample_dumps, "loading the sample dumps");
register_load_scenario!(load_without_shapes, "skipping a source from the command line");
register_load_scenario!(load_without_user_tags, "skipping a sink from an options file");
register_load_scenario!(load_unknown_source, "rejecting unknown sources");
register_load_scenario!(load_missing_database, "rejecting missing database paths");
