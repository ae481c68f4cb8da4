//! Persistence errors shared by tables, sinks and recovery policies.
//!
//! SQLite reports constraint failures with extended result codes. They are
//! mapped onto [`ConstraintKind`] here so recovery policies can match on a
//! category rather than on message text.

use std::fmt;

use rusqlite::{ErrorCode, ffi};
use thiserror::Error;

use crate::store::StoreError;

/// Category of a violated SQLite constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// A `FOREIGN KEY` reference did not resolve.
    ForeignKey,
    /// A `UNIQUE` or `PRIMARY KEY` constraint rejected a duplicate.
    Unique,
    /// A `CHECK` expression evaluated to false.
    Check,
    /// A `NOT NULL` column received `NULL`.
    NotNull,
    /// Any other constraint failure (triggers, rowid, datatype).
    Other,
}

impl ConstraintKind {
    /// Classify a raw SQLite error, returning `None` when it is not a
    /// constraint violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use geonames_core::ConstraintKind;
    /// use rusqlite::Connection;
    ///
    /// let conn = Connection::open_in_memory().expect("open in-memory database");
    /// conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT NOT NULL)")
    ///     .expect("create table");
    /// let err = conn
    ///     .execute("INSERT INTO t (id, v) VALUES (1, NULL)", [])
    ///     .expect_err("NULL should be rejected");
    /// assert_eq!(ConstraintKind::classify(&err), Some(ConstraintKind::NotNull));
    /// ```
    #[must_use]
    pub fn classify(error: &rusqlite::Error) -> Option<Self> {
        let rusqlite::Error::SqliteFailure(failure, _) = error else {
            return None;
        };
        if failure.code != ErrorCode::ConstraintViolation {
            return None;
        }
        let kind = match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Self::ForeignKey,
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Self::Unique,
            ffi::SQLITE_CONSTRAINT_CHECK => Self::Check,
            ffi::SQLITE_CONSTRAINT_NOTNULL => Self::NotNull,
            _ => Self::Other,
        };
        Some(kind)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::ForeignKey => "foreign key",
            Self::Unique => "unique",
            Self::Check => "check",
            Self::NotNull => "not null",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by a [`Table`](crate::Table) operation.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The write violated a schema constraint.
    #[error("{kind} constraint violated on table {table}")]
    Constraint {
        /// Table whose statement failed.
        table: &'static str,
        /// Category of the violated constraint.
        kind: ConstraintKind,
        /// Underlying store failure.
        #[source]
        source: StoreError,
    },
    /// Any other failure while talking to the store.
    #[error("failed to {operation} for table {table}")]
    Store {
        /// Table whose statement failed.
        table: &'static str,
        /// Table operation that was running.
        operation: &'static str,
        /// Underlying store failure.
        #[source]
        source: StoreError,
    },
}

impl PersistError {
    /// Wrap a store failure, promoting constraint violations to
    /// [`PersistError::Constraint`].
    pub(crate) fn from_store(
        table: &'static str,
        operation: &'static str,
        source: StoreError,
    ) -> Self {
        match source.constraint_kind() {
            Some(kind) => Self::Constraint {
                table,
                kind,
                source,
            },
            None => Self::Store {
                table,
                operation,
                source,
            },
        }
    }

    /// Return the violated constraint category, if any.
    #[must_use]
    pub const fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            Self::Constraint { kind, .. } => Some(*kind),
            Self::Store { .. } => None,
        }
    }

    /// Name of the table the failing operation targeted.
    #[must_use]
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Constraint { table, .. } | Self::Store { table, .. } => table,
        }
    }
}
