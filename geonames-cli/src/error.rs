//! Error types emitted by the GeoNames CLI.
//!
//! Engine failures are boxed so `Result<_, CliError>` stays small under
//! `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use geonames_core::{GraphError, StoreError};
use thiserror::Error;

/// Errors emitted by the GeoNames CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The checkpoint threshold must be positive.
    #[error("--{field} must be greater than zero")]
    ZeroCheckpointThreshold { field: &'static str },
    /// A disabled source is not part of the catalogue.
    #[error("unknown source {name:?} passed to --{field}")]
    UnknownSource { field: &'static str, name: String },
    /// A disabled sink is not part of the catalogue.
    #[error("unknown sink {name:?} passed to --{field}")]
    UnknownSink { field: &'static str, name: String },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the pipeline options file failed.
    #[error("failed to open pipeline options at {path:?}")]
    OpenOptions {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Pipeline options JSON could not be decoded.
    #[error("failed to parse pipeline options JSON at {path:?}")]
    ParseOptions {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Opening the database failed.
    #[error("failed to open database {path:?}")]
    OpenStore {
        path: Utf8PathBuf,
        #[source]
        source: Box<StoreError>,
    },
    /// Applying the connection pragmas failed.
    #[error("failed to configure database {path:?}")]
    ConfigureStore {
        path: Utf8PathBuf,
        #[source]
        source: Box<StoreError>,
    },
    /// A pipeline failed; earlier pipelines' rows remain committed.
    #[error("failed to load {path:?}")]
    Load {
        path: Utf8PathBuf,
        #[source]
        source: Box<GraphError>,
    },
    /// Compacting the database after the load failed.
    #[error("failed to vacuum database {path:?}")]
    Vacuum {
        path: Utf8PathBuf,
        #[source]
        source: Box<StoreError>,
    },
    /// Writing the run summary failed.
    #[error("failed to write load summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}
