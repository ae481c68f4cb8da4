//! Record sources: delimited dump files and in-memory lists.
//!
//! Every call to [`Source::produce`] starts a fresh, lazy sequence numbered
//! from 1. Sources never recover from bad rows; the first malformed row ends
//! the sequence with an error.

mod file;
mod list;

use camino::Utf8PathBuf;
use log::warn;
use thiserror::Error;

use crate::options::SourceOptions;
use crate::record::{Numbered, Record, RecordError};

pub use file::{DEFAULT_FIELD_SIZE_LIMIT, FileSource};
pub use list::ListSource;

/// Lazy stream of numbered records.
pub type Records<'a, R> = Box<dyn Iterator<Item = Result<Numbered<R>, SourceError>> + 'a>;

/// Errors raised while producing records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A file source was enabled without a path.
    #[error("source {source_name} has no path configured")]
    MissingPath {
        /// Source name.
        source_name: &'static str,
    },
    /// The dump file could not be opened.
    #[error("failed to open {path} for source {source_name}")]
    Open {
        /// Source name.
        source_name: &'static str,
        /// Configured path.
        path: Utf8PathBuf,
        /// IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Skipping the header or comment lines failed.
    #[error("failed to skip the preamble of {path} for source {source_name}")]
    Preamble {
        /// Source name.
        source_name: &'static str,
        /// Configured path.
        path: Utf8PathBuf,
        /// IO failure.
        #[source]
        source: std::io::Error,
    },
    /// A line could not be read or decoded.
    #[error("failed to read line {line:?} of source {source_name}")]
    Read {
        /// Source name.
        source_name: &'static str,
        /// Line number within the data section, when known.
        line: Option<u64>,
        /// Parser failure.
        #[source]
        source: csv::Error,
    },
    /// A field exceeded the configured size limit.
    #[error("field {field} on line {line} of source {source_name} exceeds {limit} bytes")]
    FieldTooLarge {
        /// Source name.
        source_name: &'static str,
        /// Line number within the data section.
        line: u64,
        /// Field name.
        field: &'static str,
        /// Configured limit in bytes.
        limit: usize,
    },
    /// A row failed record validation.
    #[error("invalid row {row_num} in source {source_name}")]
    Record {
        /// Source name.
        source_name: &'static str,
        /// 1-based row number.
        row_num: u64,
        /// Validation failure.
        #[source]
        source: RecordError,
    },
}

/// Closed set of record sources.
#[derive(Debug)]
pub enum Source<R> {
    /// Delimited file on disk, optionally bzip2-compressed.
    File(FileSource<R>),
    /// Rows held in memory.
    List(ListSource<R>),
}

impl<R: Record> Source<R> {
    /// Unique source name used to look up its options.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::File(source) => source.name(),
            Self::List(source) => source.name(),
        }
    }

    /// Start a fresh record sequence. A disabled source yields nothing.
    pub fn produce(&self, options: &SourceOptions) -> Result<Records<'_, R>, SourceError> {
        if !options.enabled {
            warn!("source {} is disabled; producing no records", self.name());
            return Ok(Box::new(std::iter::empty()));
        }
        match self {
            Self::File(source) => source.produce(options),
            Self::List(source) => Ok(source.produce()),
        }
    }
}

impl<R> From<FileSource<R>> for Source<R> {
    fn from(source: FileSource<R>) -> Self {
        Self::File(source)
    }
}

impl<R> From<ListSource<R>> for Source<R> {
    fn from(source: ListSource<R>) -> Self {
        Self::List(source)
    }
}
