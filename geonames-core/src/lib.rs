//! ETL engine for loading gazetteer dumps into SQLite.
//!
//! Data flows from a [`Source`] through a [`Pipeline`] into one or more
//! [`Sink`]s, each writing a single [`Table`] in the shared [`Store`].
//! A [`PipelineGraph`] runs pipelines in dependency order so that foreign
//! keys always point at rows that are already loaded.
//!
//! ```
//! use geonames_core::{
//!     ListSource, Params, Pipeline, PipelineGraph, PipelineOptions, RawRow, Record,
//!     RecordError, Sink, Store, StorePragmas, Table,
//! };
//!
//! struct Continent {
//!     code: String,
//! }
//!
//! impl Record for Continent {
//!     fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
//!         Ok(Self { code: row.required("code")?.to_owned() })
//!     }
//! }
//!
//! const CONTINENT: Table = Table::new("continent", "INSERT INTO continent (code) VALUES (:code)")
//!     .with_schema("CREATE TABLE IF NOT EXISTS continent (code TEXT PRIMARY KEY NOT NULL)");
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ListSource::new("continent", vec![RawRow::from_pairs(&[("code", "EU")])]);
//! let graph = PipelineGraph::new().with_pipeline(Pipeline::new(source).with_sink(
//!     Sink::record("continent", CONTINENT, |c: &Continent| {
//!         Params::new().with("code", c.code.clone())
//!     }),
//! ));
//!
//! let store = Store::open_in_memory()?;
//! store.apply_pragmas(&StorePragmas::default())?;
//! let report = graph.run(&store, &PipelineOptions::default())?;
//! assert_eq!(report.pipelines[0].written(), 1);
//! # Ok(())
//! # }
//! ```

mod error;
mod graph;
mod options;
mod params;
mod pipeline;
mod record;
pub mod recovery;
mod sink;
mod source;
mod store;
mod table;

pub use error::{ConstraintKind, PersistError};
pub use graph::{GraphError, GraphReport, PipelineGraph};
pub use options::{PipelineOptions, SinkOptions, SourceOptions};
pub use params::{Params, Value};
pub use pipeline::{
    DEFAULT_CHECKPOINT_THRESHOLD, Pipeline, PipelineError, PipelinePhase, PipelineReport,
    RunPipeline, SinkReport,
};
pub use record::{Numbered, RawRow, Record, RecordError};
pub use sink::{
    Consumed, ErrorHandler, Flatten, FlattenField, FlattenMode, Predicate, Sink, SinkError,
    SinkKind, Transform,
};
pub use source::{DEFAULT_FIELD_SIZE_LIMIT, FileSource, ListSource, Records, Source, SourceError};
pub use store::{JournalMode, Store, StoreError, StorePragmas, Synchronous};
pub use table::Table;
