//! Facade crate for the GeoNames gazetteer loader.
//!
//! Re-exports the ETL engine from `geonames-core` and, behind the
//! `catalogue` feature, the GeoNames records, tables, sinks and the ordered
//! load graph from `geonames-data`.

#![forbid(unsafe_code)]

pub use geonames_core::{
    ConstraintKind, DEFAULT_CHECKPOINT_THRESHOLD, FileSource, Flatten, FlattenMode, GraphError,
    GraphReport, ListSource, Params, PersistError, Pipeline, PipelineError, PipelineGraph,
    PipelineOptions, PipelineReport, RawRow, Record, RecordError, RunPipeline, Sink, SinkError,
    SinkOptions, SinkReport, Source, SourceError, SourceOptions, Store, StoreError, StorePragmas,
    Table, Value, recovery,
};

#[cfg(feature = "catalogue")]
pub use geonames_data::{
    SINK_NAMES, SOURCE_NAMES, build_graph, default_options, records, sinks, sources, tables,
};
