//! Unit tests for pipeline lifecycle and checkpointing.

use super::*;
use crate::params::Params;
use crate::record::{RawRow, RecordError};
use crate::source::ListSource;
use crate::store::StorePragmas;
use crate::table::Table;
use rstest::{fixture, rstest};

#[derive(Debug, Clone)]
struct Place {
    id: i64,
    name: String,
}

impl Record for Place {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        Ok(Self {
            id: row.parse("id")?,
            name: row.required("name")?.to_owned(),
        })
    }
}

const PLACE: Table = Table::new("place", "INSERT INTO place (id, name) VALUES (:id, :name)")
    .with_schema(
        "CREATE TABLE IF NOT EXISTS place (
            id   INTEGER PRIMARY KEY NOT NULL,
            name TEXT    NOT NULL
        )",
    );

#[fixture]
fn store() -> Store {
    let store = Store::open_in_memory().expect("open store");
    store
        .apply_pragmas(&StorePragmas::default())
        .expect("apply pragmas");
    store
}

fn places(count: i64) -> ListSource<Place> {
    let rows = (1..=count)
        .map(|id| {
            let id = id.to_string();
            let name = format!("place {id}");
            RawRow::from_pairs(&[("id", id.as_str()), ("name", name.as_str())])
        })
        .collect();
    ListSource::new("place", rows)
}

fn place_sink(name: &'static str) -> Sink<Place> {
    Sink::record(name, PLACE, |place: &Place| {
        Params::new()
            .with("id", place.id)
            .with("name", place.name.clone())
    })
}

fn threshold(value: u64) -> NonZeroU64 {
    NonZeroU64::new(value).expect("non-zero threshold")
}

fn count(store: &Store) -> i64 {
    store
        .connection()
        .query_row("SELECT COUNT(*) FROM place", [], |row| row.get(0))
        .expect("count rows")
}

#[rstest]
#[case(10, 3, 3)]
#[case(9, 3, 3)]
#[case(2, 5, 0)]
#[case(5, 1, 5)]
fn checkpoints_follow_the_threshold(
    store: Store,
    #[case] rows: i64,
    #[case] every: u64,
    #[case] expected: u64,
) {
    let pipeline = Pipeline::new(places(rows))
        .with_sink(place_sink("place"))
        .with_checkpoint_threshold(threshold(every));

    let report = pipeline
        .run(&store, &PipelineOptions::default())
        .expect("run pipeline");

    assert_eq!(report.sink("place").map(|s| s.checkpoints), Some(expected));
    assert_eq!(report.rows, u64::try_from(rows).expect("positive"));
    assert_eq!(count(&store), rows);
    assert!(!store.in_transaction());
}

#[rstest]
fn options_override_the_pipeline_threshold(store: Store) {
    let pipeline = Pipeline::new(places(4)).with_sink(place_sink("place"));
    let options = PipelineOptions::default().with_checkpoint_threshold(threshold(2));

    let report = pipeline.run(&store, &options).expect("run pipeline");

    assert_eq!(pipeline.checkpoint_threshold(), DEFAULT_CHECKPOINT_THRESHOLD);
    assert_eq!(report.sinks[0].checkpoints, 2);
}

#[rstest]
fn disabled_source_still_sets_up_and_tears_down(store: Store) {
    let pipeline = Pipeline::new(places(3)).with_sink(place_sink("place"));
    let options = PipelineOptions::default().disable_source("place");

    let report = pipeline.run(&store, &options).expect("run pipeline");

    assert_eq!(report.rows, 0);
    assert_eq!(report.written(), 0);
    assert_eq!(count(&store), 0);
}

#[rstest]
fn disabled_sinks_are_reported_and_skipped(store: Store) {
    let pipeline = Pipeline::new(places(2))
        .with_sink(place_sink("place"))
        .with_sink(place_sink("place_copy"));
    let options = PipelineOptions::default().disable_sink("place_copy");

    let report = pipeline.run(&store, &options).expect("run pipeline");

    let copy = report.sink("place_copy").expect("copy report");
    assert!(!copy.enabled);
    assert_eq!(copy.written, 0);
    assert_eq!(report.sink("place").map(|s| s.written), Some(2));
}

#[rstest]
fn sink_failures_stop_the_run_with_context(store: Store) {
    let pipeline = Pipeline::new(places(3))
        .with_sink(place_sink("place"))
        .with_sink(place_sink("place_again"));

    let err = pipeline
        .run(&store, &PipelineOptions::default())
        .expect_err("second sink duplicates the key");

    assert_eq!(err.pipeline(), "place");
    assert_eq!(err.phase(), PipelinePhase::Streaming);
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::Unique));
    assert!(matches!(
        err,
        PipelineError::Sink {
            source: SinkError::Write {
                sink: "place_again",
                row_num: 1,
                ..
            },
            ..
        }
    ));
}

#[rstest]
fn bad_rows_surface_as_source_errors(store: Store) {
    let source = ListSource::<Place>::new(
        "place",
        vec![
            RawRow::from_pairs(&[("id", "1"), ("name", "first")]),
            RawRow::from_pairs(&[("id", "two"), ("name", "second")]),
        ],
    );
    let pipeline = Pipeline::new(source).with_sink(place_sink("place"));

    let err = pipeline
        .run(&store, &PipelineOptions::default())
        .expect_err("second row is invalid");

    assert!(matches!(
        err,
        PipelineError::Source {
            source: SourceError::Record { row_num: 2, .. },
            ..
        }
    ));
    assert_eq!(err.constraint_kind(), None);
}

#[rstest]
fn describe_lists_sinks_in_order() {
    let pipeline = Pipeline::new(places(0))
        .with_sink(place_sink("place"))
        .with_sink(place_sink("place_copy"));

    assert_eq!(pipeline.describe(), "place -> [place, place_copy]");
    assert_eq!(pipeline.sinks().len(), 2);
    assert_eq!(pipeline.source().name(), "place");
}

#[rstest]
fn phases_render_for_messages() {
    assert_eq!(PipelinePhase::TearingDown.to_string(), "tearing down");
    assert_eq!(PipelinePhase::NotStarted.to_string(), "not started");
}
