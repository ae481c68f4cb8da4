//! Reusable error handlers for [`Sink::with_error_handler`](crate::Sink::with_error_handler).
//!
//! Each handler swallows persistence failures whose [`ConstraintKind`] is on
//! its allow-list and lets everything else abort the run.

use crate::error::{ConstraintKind, PersistError};
use crate::options::PipelineOptions;
use crate::store::Store;

/// Swallow foreign key violations, e.g. rows referencing places that were
/// never loaded.
pub fn ignore_foreign_key_violation<R>(
    _store: &Store,
    _options: &PipelineOptions,
    _record: &R,
    error: &PersistError,
) -> bool {
    error.constraint_kind() == Some(ConstraintKind::ForeignKey)
}

/// Swallow uniqueness (and primary key) violations, e.g. duplicate rows in
/// overlapping dumps.
pub fn ignore_unique_violation<R>(
    _store: &Store,
    _options: &PipelineOptions,
    _record: &R,
    error: &PersistError,
) -> bool {
    error.constraint_kind() == Some(ConstraintKind::Unique)
}

/// Build a handler that swallows any of `kinds`.
///
/// ```
/// use geonames_core::{ConstraintKind, Params, Sink, Table, recovery};
///
/// const TAG: Table = Table::new("tag", "INSERT INTO tag (name) VALUES (:name)");
///
/// let sink = Sink::record("tag", TAG, |name: &String| Params::new().with("name", name.clone()))
///     .with_error_handler(recovery::tolerate(&[ConstraintKind::Check, ConstraintKind::NotNull]));
/// assert_eq!(sink.name(), "tag");
/// ```
pub fn tolerate<R>(
    kinds: &'static [ConstraintKind],
) -> impl Fn(&Store, &PipelineOptions, &R, &PersistError) -> bool {
    move |_: &Store, _: &PipelineOptions, _: &R, error: &PersistError| {
        error
            .constraint_kind()
            .is_some_and(|kind| kinds.contains(&kind))
    }
}
