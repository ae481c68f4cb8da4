//! Ordered execution of heterogeneous pipelines against one store.
//!
//! Order matters: a pipeline whose sinks reference rows loaded by another
//! must come after it, otherwise foreign key checks reject its writes.

use log::info;
use thiserror::Error;

use crate::options::PipelineOptions;
use crate::pipeline::{PipelineError, PipelineReport, RunPipeline};
use crate::store::Store;

/// A pipeline in the graph failed; later pipelines did not run.
#[derive(Debug, Error)]
#[error("pipeline {pipeline} ({position} of {total}) failed")]
pub struct GraphError {
    /// 1-based position of the failing pipeline.
    pub position: usize,
    /// Number of pipelines in the graph.
    pub total: usize,
    /// Name of the failing pipeline.
    pub pipeline: &'static str,
    /// Underlying failure.
    #[source]
    pub source: PipelineError,
}

/// Reports of every pipeline that ran, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphReport {
    /// One entry per pipeline.
    pub pipelines: Vec<PipelineReport>,
}

impl GraphReport {
    /// Report for the pipeline called `name`.
    #[must_use]
    pub fn pipeline(&self, name: &str) -> Option<&PipelineReport> {
        self.pipelines.iter().find(|report| report.pipeline == name)
    }
}

/// Pipelines run strictly one after another, in insertion order.
#[derive(Default)]
pub struct PipelineGraph {
    pipelines: Vec<Box<dyn RunPipeline>>,
}

impl PipelineGraph {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pipeline.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: impl RunPipeline + 'static) -> Self {
        self.push(pipeline);
        self
    }

    /// Append a pipeline in place.
    pub fn push(&mut self, pipeline: impl RunPipeline + 'static) {
        self.pipelines.push(Box::new(pipeline));
    }

    /// Number of pipelines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    /// Whether the graph has no pipelines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Pipeline names in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.pipelines.iter().map(|pipeline| pipeline.name()).collect()
    }

    /// One line per pipeline, in execution order.
    #[must_use]
    pub fn describe(&self) -> String {
        self.pipelines
            .iter()
            .map(|pipeline| pipeline.describe())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Run every pipeline in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] naming the pipeline that failed. Writes made
    /// by earlier pipelines stay committed.
    pub fn run(&self, store: &Store, options: &PipelineOptions) -> Result<GraphReport, GraphError> {
        let total = self.pipelines.len();
        let mut report = GraphReport::default();
        for (index, pipeline) in self.pipelines.iter().enumerate() {
            let position = index + 1;
            info!("pipeline {position}/{total}: {}", pipeline.name());
            let outcome = pipeline.run(store, options).map_err(|source| GraphError {
                position,
                total,
                pipeline: pipeline.name(),
                source,
            })?;
            report.pipelines.push(outcome);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstraintKind;
    use crate::params::Params;
    use crate::pipeline::Pipeline;
    use crate::record::{RawRow, Record, RecordError};
    use crate::sink::Sink;
    use crate::source::ListSource;
    use crate::store::StorePragmas;
    use crate::table::Table;
    use rstest::{fixture, rstest};

    #[derive(Debug)]
    struct Row {
        id: i64,
    }

    impl Record for Row {
        fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
            Ok(Self { id: row.parse("id")? })
        }
    }

    const PARENT: Table = Table::new("parent", "INSERT INTO parent (id) VALUES (:id)")
        .with_schema("CREATE TABLE IF NOT EXISTS parent (id INTEGER PRIMARY KEY NOT NULL)");

    const CHILD: Table = Table::new("child", "INSERT INTO child (parent_id) VALUES (:id)")
        .with_schema(
            "CREATE TABLE IF NOT EXISTS child (
                id        INTEGER PRIMARY KEY NOT NULL,
                parent_id INTEGER NOT NULL REFERENCES parent (id)
            )",
        );

    fn pipeline(name: &'static str, table: Table) -> Pipeline<Row> {
        let source = ListSource::new(name, vec![RawRow::from_pairs(&[("id", "1")])]);
        Pipeline::new(source).with_sink(Sink::record(name, table, |row: &Row| {
            Params::new().with("id", row.id)
        }))
    }

    #[fixture]
    fn store() -> Store {
        let store = Store::open_in_memory().expect("open store");
        store
            .apply_pragmas(&StorePragmas::default())
            .expect("apply pragmas");
        store
    }

    #[rstest]
    fn runs_pipelines_in_insertion_order(store: Store) {
        let graph = PipelineGraph::new()
            .with_pipeline(pipeline("parent", PARENT))
            .with_pipeline(pipeline("child", CHILD));

        let report = graph
            .run(&store, &PipelineOptions::default())
            .expect("run graph");

        assert_eq!(graph.names(), vec!["parent", "child"]);
        assert_eq!(report.pipelines.len(), 2);
        assert_eq!(report.pipeline("child").map(PipelineReport::written), Some(1));
    }

    #[rstest]
    fn stops_at_the_first_failure(store: Store) {
        PARENT.create_schema(&store).expect("create parent table");
        let mut graph = PipelineGraph::new();
        graph.push(pipeline("child", CHILD));
        graph.push(pipeline("parent", PARENT));

        let err = graph
            .run(&store, &PipelineOptions::default())
            .expect_err("child before parent");

        assert_eq!((err.position, err.total, err.pipeline), (1, 2, "child"));
        assert_eq!(err.source.constraint_kind(), Some(ConstraintKind::ForeignKey));
        let parents: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM parent", [], |row| row.get(0))
            .expect("count parents");
        assert_eq!(parents, 0);
    }

    #[rstest]
    fn empty_graph_does_nothing(store: Store) {
        let graph = PipelineGraph::new();

        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert_eq!(graph.describe(), "");
        assert_eq!(
            graph
                .run(&store, &PipelineOptions::default())
                .expect("run graph"),
            GraphReport::default()
        );
    }
}
