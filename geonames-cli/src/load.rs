//! Load command implementation for the GeoNames CLI.

use std::io::{BufReader, Write};
use std::num::NonZeroU64;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use geonames_core::{GraphReport, PipelineOptions, PipelineReport, Store, StorePragmas};
use geonames_data::{build_graph, default_options, is_known_sink, is_known_source};
use geonames_fs::open_utf8_file;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CHECKPOINT_THRESHOLD, ARG_DATA_DIR, ARG_DATABASE, ARG_DISABLE_SINK, ARG_DISABLE_SOURCE,
    ARG_OPTIONS, ARG_SKIP_VACUUM, CliError, ENV_DATABASE,
};

/// CLI arguments for the `load` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load every GeoNames dump found under the data directory \
                 into a SQLite database. Paths and switches can come from \
                 CLI flags, configuration files, or environment variables; \
                 per-source paths and per-sink switches can also be given \
                 as a JSON options file.",
    about = "Load the gazetteer dumps into SQLite"
)]
#[ortho_config(prefix = "GEONAMES")]
pub(crate) struct LoadArgs {
    /// SQLite database to create or extend.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Directory holding the dumps under their default names.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// JSON file with per-source and per-sink options.
    #[arg(long = ARG_OPTIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) options: Option<Utf8PathBuf>,
    /// Rows between periodic commits.
    #[arg(long = ARG_CHECKPOINT_THRESHOLD, value_name = "rows")]
    #[serde(default)]
    pub(crate) checkpoint_threshold: Option<u64>,
    /// Skip a source entirely. Repeatable.
    #[arg(long = ARG_DISABLE_SOURCE, value_name = "name")]
    #[serde(default)]
    pub(crate) disable_source: Vec<String>,
    /// Skip a sink entirely. Repeatable.
    #[arg(long = ARG_DISABLE_SINK, value_name = "name")]
    #[serde(default)]
    pub(crate) disable_sink: Vec<String>,
    /// Leave the database uncompacted after loading.
    #[arg(long = ARG_SKIP_VACUUM)]
    #[serde(default)]
    pub(crate) skip_vacuum: bool,
}

impl LoadArgs {
    pub(crate) fn into_config(self) -> Result<LoadConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LoadConfig::try_from(merged)
    }
}

/// Resolved `load` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoadConfig {
    /// SQLite database path.
    pub(crate) database: Utf8PathBuf,
    /// Directory the default dump paths are resolved against.
    pub(crate) data_dir: Utf8PathBuf,
    /// Optional JSON options layered over the defaults.
    pub(crate) options_file: Option<Utf8PathBuf>,
    /// Overrides every pipeline's checkpoint cadence.
    pub(crate) checkpoint_threshold: Option<NonZeroU64>,
    /// Sources switched off from the command line.
    pub(crate) disabled_sources: Vec<String>,
    /// Sinks switched off from the command line.
    pub(crate) disabled_sinks: Vec<String>,
    /// Skip the final `VACUUM`.
    pub(crate) skip_vacuum: bool,
}

impl LoadConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match &self.options_file {
            Some(path) => require_existing(path, ARG_OPTIONS),
            None => Ok(()),
        }
    }

    /// Defaults for the data directory, then the options file, then the
    /// command-line switches.
    pub(crate) fn pipeline_options(&self) -> Result<PipelineOptions, CliError> {
        let mut options = default_options(&self.data_dir);
        if let Some(path) = &self.options_file {
            options = options.overlay(read_options(path)?);
        }
        for name in &self.disabled_sources {
            options = options.disable_source(name.as_str());
        }
        for name in &self.disabled_sinks {
            options = options.disable_sink(name.as_str());
        }
        if let Some(threshold) = self.checkpoint_threshold {
            options = options.with_checkpoint_threshold(threshold);
        }
        Ok(options)
    }
}

impl TryFrom<LoadArgs> for LoadConfig {
    type Error = CliError;

    fn try_from(args: LoadArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_DATABASE,
        })?;
        let data_dir = args.data_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let checkpoint_threshold = args
            .checkpoint_threshold
            .map(|rows| {
                NonZeroU64::new(rows).ok_or(CliError::ZeroCheckpointThreshold {
                    field: ARG_CHECKPOINT_THRESHOLD,
                })
            })
            .transpose()?;

        if let Some(name) = args.disable_source.iter().find(|name| !is_known_source(name)) {
            return Err(CliError::UnknownSource {
                field: ARG_DISABLE_SOURCE,
                name: name.clone(),
            });
        }
        if let Some(name) = args.disable_sink.iter().find(|name| !is_known_sink(name)) {
            return Err(CliError::UnknownSink {
                field: ARG_DISABLE_SINK,
                name: name.clone(),
            });
        }

        Ok(Self {
            database,
            data_dir,
            options_file: args.options,
            checkpoint_threshold,
            disabled_sources: args.disable_source,
            disabled_sinks: args.disable_sink,
            skip_vacuum: args.skip_vacuum,
        })
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match geonames_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_options(path: &Utf8Path) -> Result<PipelineOptions, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenOptions {
        path: path.to_path_buf(),
        source,
    })?;
    let options: PipelineOptions =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CliError::ParseOptions {
                path: path.to_path_buf(),
                source,
            }
        })?;
    for name in options.sources.keys().filter(|name| !is_known_source(name)) {
        warn!("options file {path} configures unknown source {name}; ignoring it");
    }
    for name in options.sinks.keys().filter(|name| !is_known_sink(name)) {
        warn!("options file {path} configures unknown sink {name}; ignoring it");
    }
    Ok(options)
}

pub(super) fn run_load(args: LoadArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_load_with(args, &mut stdout)
}

pub(super) fn run_load_with(args: LoadArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let report = execute_load(&config)?;
    write_summary(writer, &config, &report)
}

pub(super) fn execute_load(config: &LoadConfig) -> Result<GraphReport, CliError> {
    let options = config.pipeline_options()?;
    let store = Store::open(&config.database).map_err(|source| CliError::OpenStore {
        path: config.database.clone(),
        source: Box::new(source),
    })?;
    store
        .apply_pragmas(&StorePragmas::default())
        .map_err(|source| CliError::ConfigureStore {
            path: config.database.clone(),
            source: Box::new(source),
        })?;

    let graph = build_graph();
    info!("loading {} pipelines into {}", graph.len(), config.database);
    let report = graph
        .run(&store, &options)
        .map_err(|source| CliError::Load {
            path: config.database.clone(),
            source: Box::new(source),
        })?;

    if config.skip_vacuum {
        info!("skipping vacuum of {}", config.database);
    } else {
        info!("vacuuming {}", config.database);
        store.vacuum().map_err(|source| CliError::Vacuum {
            path: config.database.clone(),
            source: Box::new(source),
        })?;
    }
    Ok(report)
}

pub(super) fn write_summary(
    writer: &mut dyn Write,
    config: &LoadConfig,
    report: &GraphReport,
) -> Result<(), CliError> {
    for pipeline in &report.pipelines {
        for sink in &pipeline.sinks {
            info!(
                "{}/{}: {} written, {} rejected, {} recovered",
                pipeline.pipeline, sink.sink, sink.written, sink.rejected, sink.recovered
            );
        }
    }
    let rows: u64 = report.pipelines.iter().map(|pipeline| pipeline.rows).sum();
    let written: usize = report.pipelines.iter().map(PipelineReport::written).sum();
    writeln!(
        writer,
        "loaded {} pipelines into {}: {rows} rows read, {written} rows written",
        report.pipelines.len(),
        config.database
    )
    .map_err(CliError::WriteSummary)
}
