//! Sinks route records into a single table.
//!
//! A sink applies its admission predicate, transforms the record into
//! statement parameters and writes them through its [`Table`]. Persistence
//! failures go to the optional error handler; if the handler declines (or is
//! absent) the failure aborts the run.

mod flatten;

use log::warn;
use thiserror::Error;

use crate::error::{ConstraintKind, PersistError};
use crate::options::PipelineOptions;
use crate::params::Params;
use crate::record::Numbered;
use crate::store::Store;
use crate::table::Table;

pub use flatten::{Flatten, FlattenField, FlattenMode};

/// Admission test over a whole record.
pub type Predicate<R> = Box<dyn Fn(&R) -> bool>;
/// Converts a record into statement parameters.
pub type Transform<R> = Box<dyn Fn(&R) -> Params>;
/// Decides whether a persistence failure may be swallowed.
pub type ErrorHandler<R> = Box<dyn Fn(&Store, &PipelineOptions, &R, &PersistError) -> bool>;

/// What a sink does with each admitted record.
pub enum SinkKind<R> {
    /// One write per record.
    Record(Transform<R>),
    /// Writes drawn from a collection on the record.
    Flatten(Box<dyn FlattenField<R>>),
}

/// Errors raised by a sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Schema setup or a commit failed.
    #[error("sink {sink} failed to {operation}")]
    Lifecycle {
        /// Sink name.
        sink: &'static str,
        /// Lifecycle step.
        operation: &'static str,
        /// Persistence failure.
        #[source]
        source: PersistError,
    },
    /// A write failed and was not recovered.
    #[error("sink {sink} failed to write row {row_num}")]
    Write {
        /// Sink name.
        sink: &'static str,
        /// Row being consumed.
        row_num: u64,
        /// Persistence failure.
        #[source]
        source: PersistError,
    },
}

impl SinkError {
    /// Violated constraint category, when the failure was a constraint.
    #[must_use]
    pub const fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            Self::Lifecycle { source, .. } | Self::Write { source, .. } => source.constraint_kind(),
        }
    }
}

/// Result of offering one record to a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    /// The sink is disabled by configuration.
    Disabled,
    /// The admission predicate rejected the record.
    Rejected,
    /// The record was written.
    Applied {
        /// Statements that succeeded.
        written: usize,
        /// Statements whose failure the handler swallowed.
        recovered: usize,
    },
}

/// Consumes records of type `R` into one table.
pub struct Sink<R> {
    name: &'static str,
    table: Table,
    predicate: Option<Predicate<R>>,
    on_error: Option<ErrorHandler<R>>,
    kind: SinkKind<R>,
}

impl<R: 'static> Sink<R> {
    /// Sink writing one row per record.
    #[must_use]
    pub fn record(
        name: &'static str,
        table: Table,
        transform: impl Fn(&R) -> Params + 'static,
    ) -> Self {
        Self::with_kind(name, table, SinkKind::Record(Box::new(transform)))
    }

    /// Sink writing rows drawn from a collection on each record.
    #[must_use]
    pub fn flatten<E: 'static>(name: &'static str, table: Table, flatten: Flatten<R, E>) -> Self {
        Self::with_kind(name, table, SinkKind::Flatten(Box::new(flatten)))
    }

    fn with_kind(name: &'static str, table: Table, kind: SinkKind<R>) -> Self {
        Self {
            name,
            table,
            predicate: None,
            on_error: None,
            kind,
        }
    }

    /// Only consume records for which `predicate` holds.
    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Fn(&R) -> bool + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Consult `handler` when a write fails; `true` swallows the failure.
    #[must_use]
    pub fn with_error_handler(
        mut self,
        handler: impl Fn(&Store, &PipelineOptions, &R, &PersistError) -> bool + 'static,
    ) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }
}

impl<R> Sink<R> {
    /// Sink name, unique within its pipeline.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Target table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Routing behaviour.
    #[must_use]
    pub const fn kind(&self) -> &SinkKind<R> {
        &self.kind
    }

    fn enabled(&self, options: &PipelineOptions) -> bool {
        options.sink(self.name).enabled
    }

    /// Create the table and its indices. Skipped when disabled.
    pub fn pre_consume(&self, store: &Store, options: &PipelineOptions) -> Result<(), SinkError> {
        if !self.enabled(options) {
            return Ok(());
        }
        self.table
            .create_schema(store)
            .map_err(|source| self.lifecycle("create schema", source))?;
        self.table
            .create_indices(store)
            .map_err(|source| self.lifecycle("create indices", source))
    }

    /// Offer one record to the sink.
    pub fn consume(
        &self,
        store: &Store,
        options: &PipelineOptions,
        record: &Numbered<R>,
    ) -> Result<Consumed, SinkError> {
        if !self.enabled(options) {
            return Ok(Consumed::Disabled);
        }
        if let Some(predicate) = &self.predicate
            && !predicate(&record.record)
        {
            return Ok(Consumed::Rejected);
        }

        let batch = match &self.kind {
            SinkKind::Record(transform) => vec![transform(&record.record)],
            SinkKind::Flatten(flatten) => flatten.params(&record.record),
        };

        let mut written = 0;
        let mut recovered = 0;
        for params in batch {
            match self.table.apply(store, &params) {
                Ok(_) => written += 1,
                Err(error) if self.recover(store, options, record, &error) => recovered += 1,
                Err(source) => {
                    return Err(SinkError::Write {
                        sink: self.name,
                        row_num: record.row_num,
                        source,
                    });
                }
            }
        }
        Ok(Consumed::Applied { written, recovered })
    }

    /// Commit after the last record. Returns whether a commit ran.
    pub fn post_consume(&self, store: &Store, options: &PipelineOptions) -> Result<bool, SinkError> {
        self.commit_if_enabled(store, options, "commit")
    }

    /// Commit periodically during streaming. Returns whether a commit ran.
    pub fn checkpoint(&self, store: &Store, options: &PipelineOptions) -> Result<bool, SinkError> {
        self.commit_if_enabled(store, options, "checkpoint")
    }

    fn commit_if_enabled(
        &self,
        store: &Store,
        options: &PipelineOptions,
        operation: &'static str,
    ) -> Result<bool, SinkError> {
        if !self.enabled(options) {
            return Ok(false);
        }
        self.table
            .commit(store)
            .map_err(|source| self.lifecycle(operation, source))?;
        Ok(true)
    }

    fn recover(
        &self,
        store: &Store,
        options: &PipelineOptions,
        record: &Numbered<R>,
        error: &PersistError,
    ) -> bool {
        let Some(handler) = &self.on_error else {
            return false;
        };
        let handled = handler(store, options, &record.record, error);
        if handled {
            match &self.kind {
                SinkKind::Record(_) => warn!(
                    "sink {} ignored {} at row {}",
                    self.name, error, record.row_num
                ),
                SinkKind::Flatten(flatten) => warn!(
                    "sink {} ignored {} for an element of {} at row {}",
                    self.name,
                    error,
                    flatten.field_name(),
                    record.row_num
                ),
            }
        }
        handled
    }

    fn lifecycle(&self, operation: &'static str, source: PersistError) -> SinkError {
        SinkError::Lifecycle {
            sink: self.name,
            operation,
            source,
        }
    }
}
