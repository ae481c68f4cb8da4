//! Per-run tallies returned by [`RunPipeline::run`](super::RunPipeline::run).

use crate::options::PipelineOptions;
use crate::sink::{Consumed, Sink};

/// What one sink did during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkReport {
    /// Sink name.
    pub sink: &'static str,
    /// Whether the sink was enabled for the run.
    pub enabled: bool,
    /// Statements that succeeded.
    pub written: usize,
    /// Records the admission predicate turned away.
    pub rejected: usize,
    /// Failed statements swallowed by the error handler.
    pub recovered: usize,
    /// Checkpoint commits issued while streaming.
    pub checkpoints: u64,
}

impl SinkReport {
    pub(super) fn count(&mut self, consumed: Consumed) {
        match consumed {
            Consumed::Disabled => {}
            Consumed::Rejected => self.rejected += 1,
            Consumed::Applied { written, recovered } => {
                self.written += written;
                self.recovered += recovered;
            }
        }
    }
}

/// What one pipeline did during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Pipeline (source) name.
    pub pipeline: &'static str,
    /// Highest row number produced; zero when the source was empty or
    /// disabled.
    pub rows: u64,
    /// One entry per sink, in consumption order.
    pub sinks: Vec<SinkReport>,
}

impl PipelineReport {
    pub(super) fn new<R>(
        pipeline: &'static str,
        sinks: &[Sink<R>],
        options: &PipelineOptions,
    ) -> Self {
        Self {
            pipeline,
            rows: 0,
            sinks: sinks
                .iter()
                .map(|sink| SinkReport {
                    sink: sink.name(),
                    enabled: options.sink(sink.name()).enabled,
                    ..SinkReport::default()
                })
                .collect(),
        }
    }

    /// Report for the sink called `name`.
    #[must_use]
    pub fn sink(&self, name: &str) -> Option<&SinkReport> {
        self.sinks.iter().find(|report| report.sink == name)
    }

    /// Statements written across every sink.
    #[must_use]
    pub fn written(&self) -> usize {
        self.sinks.iter().map(|report| report.written).sum()
    }
}
