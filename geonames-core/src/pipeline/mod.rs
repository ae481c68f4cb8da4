//! Pipelines stream one source into an ordered list of sinks.
//!
//! A run has three phases. Every sink first creates its table and indices,
//! then each record is offered to each sink in declaration order, and
//! finally every sink commits. Sinks commit on a checkpoint whenever the
//! row number is a multiple of the checkpoint threshold.

mod report;

use std::fmt;
use std::num::NonZeroU64;

use log::{debug, info};
use thiserror::Error;

use crate::error::ConstraintKind;
use crate::options::PipelineOptions;
use crate::record::Record;
use crate::sink::{Sink, SinkError};
use crate::source::{Source, SourceError};
use crate::store::Store;

pub use report::{PipelineReport, SinkReport};

/// Rows between checkpoints when neither the pipeline nor the options say
/// otherwise.
pub const DEFAULT_CHECKPOINT_THRESHOLD: NonZeroU64 = match NonZeroU64::new(100_000) {
    Some(threshold) => threshold,
    None => NonZeroU64::MIN,
};

/// Lifecycle position of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    /// Nothing has happened yet.
    NotStarted,
    /// Sinks are creating tables and indices.
    SettingUp,
    /// Records are flowing from the source into the sinks.
    Streaming,
    /// Sinks are committing.
    TearingDown,
    /// The run completed.
    Done,
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotStarted => "not started",
            Self::SettingUp => "setting up",
            Self::Streaming => "streaming",
            Self::TearingDown => "tearing down",
            Self::Done => "done",
        };
        f.write_str(label)
    }
}

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source failed to open or produced a bad row.
    #[error("pipeline {pipeline} failed while {phase}")]
    Source {
        /// Pipeline (source) name.
        pipeline: &'static str,
        /// Phase in progress.
        phase: PipelinePhase,
        /// Source failure.
        #[source]
        source: SourceError,
    },
    /// A sink failed and its handler did not recover.
    #[error("pipeline {pipeline} failed while {phase}")]
    Sink {
        /// Pipeline (source) name.
        pipeline: &'static str,
        /// Phase in progress.
        phase: PipelinePhase,
        /// Sink failure.
        #[source]
        source: SinkError,
    },
}

impl PipelineError {
    /// Name of the failing pipeline.
    #[must_use]
    pub const fn pipeline(&self) -> &'static str {
        match self {
            Self::Source { pipeline, .. } | Self::Sink { pipeline, .. } => pipeline,
        }
    }

    /// Phase in which the failure happened.
    #[must_use]
    pub const fn phase(&self) -> PipelinePhase {
        match self {
            Self::Source { phase, .. } | Self::Sink { phase, .. } => *phase,
        }
    }

    /// Violated constraint category, when a sink hit a constraint.
    #[must_use]
    pub const fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            Self::Source { .. } => None,
            Self::Sink { source, .. } => source.constraint_kind(),
        }
    }
}

/// Object-safe view of a pipeline, independent of its record type.
pub trait RunPipeline {
    /// Pipeline name; the name of its source.
    fn name(&self) -> &'static str;

    /// Human-readable summary of the source and its sinks.
    fn describe(&self) -> String;

    /// Stream the source through every sink.
    ///
    /// # Errors
    ///
    /// Returns the first source or sink failure; the run stops there.
    fn run(&self, store: &Store, options: &PipelineOptions) -> Result<PipelineReport, PipelineError>;
}

/// One source feeding an ordered list of sinks.
pub struct Pipeline<R> {
    source: Source<R>,
    sinks: Vec<Sink<R>>,
    checkpoint_threshold: NonZeroU64,
}

impl<R: Record> Pipeline<R> {
    /// Pipeline over `source` with no sinks yet.
    #[must_use]
    pub fn new(source: impl Into<Source<R>>) -> Self {
        Self {
            source: source.into(),
            sinks: Vec::new(),
            checkpoint_threshold: DEFAULT_CHECKPOINT_THRESHOLD,
        }
    }

    /// Append a sink; sinks consume each record in the order added.
    #[must_use]
    pub fn with_sink(mut self, sink: Sink<R>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Commit every `threshold` rows unless the options override it.
    #[must_use]
    pub fn with_checkpoint_threshold(mut self, threshold: NonZeroU64) -> Self {
        self.checkpoint_threshold = threshold;
        self
    }

    /// Record source.
    #[must_use]
    pub const fn source(&self) -> &Source<R> {
        &self.source
    }

    /// Sinks in consumption order.
    #[must_use]
    pub fn sinks(&self) -> &[Sink<R>] {
        &self.sinks
    }

    /// Threshold used when the options do not override it.
    #[must_use]
    pub const fn checkpoint_threshold(&self) -> NonZeroU64 {
        self.checkpoint_threshold
    }

    fn source_error(&self, phase: PipelinePhase, source: SourceError) -> PipelineError {
        PipelineError::Source {
            pipeline: self.source.name(),
            phase,
            source,
        }
    }

    fn sink_error(&self, phase: PipelinePhase, source: SinkError) -> PipelineError {
        PipelineError::Sink {
            pipeline: self.source.name(),
            phase,
            source,
        }
    }

    fn enter(&self, phase: PipelinePhase) -> PipelinePhase {
        debug!("pipeline {}: {phase}", self.source.name());
        phase
    }
}

impl<R: Record> RunPipeline for Pipeline<R> {
    fn name(&self) -> &'static str {
        self.source.name()
    }

    fn describe(&self) -> String {
        let sinks: Vec<_> = self.sinks.iter().map(Sink::name).collect();
        format!("{} -> [{}]", self.source.name(), sinks.join(", "))
    }

    fn run(&self, store: &Store, options: &PipelineOptions) -> Result<PipelineReport, PipelineError> {
        let threshold = options
            .checkpoint_threshold
            .unwrap_or(self.checkpoint_threshold)
            .get();
        info!("running pipeline {}", self.describe());
        let mut report = PipelineReport::new(self.name(), &self.sinks, options);

        let phase = self.enter(PipelinePhase::SettingUp);
        for sink in &self.sinks {
            sink.pre_consume(store, options)
                .map_err(|source| self.sink_error(phase, source))?;
        }

        let phase = self.enter(PipelinePhase::Streaming);
        let records = self
            .source
            .produce(options.source(self.name()))
            .map_err(|source| self.source_error(phase, source))?;
        for item in records {
            let record = item.map_err(|source| self.source_error(phase, source))?;
            report.rows = record.row_num;
            for (sink, tally) in self.sinks.iter().zip(report.sinks.iter_mut()) {
                let consumed = sink
                    .consume(store, options, &record)
                    .map_err(|source| self.sink_error(phase, source))?;
                tally.count(consumed);
                if record.row_num % threshold == 0
                    && sink
                        .checkpoint(store, options)
                        .map_err(|source| self.sink_error(phase, source))?
                {
                    debug!("sink {} checkpointed at row {}", sink.name(), record.row_num);
                    tally.checkpoints += 1;
                }
            }
        }

        let phase = self.enter(PipelinePhase::TearingDown);
        for sink in &self.sinks {
            sink.post_consume(store, options)
                .map_err(|source| self.sink_error(phase, source))?;
        }

        self.enter(PipelinePhase::Done);
        info!(
            "pipeline {} finished after {} rows",
            self.name(),
            report.rows
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests;
