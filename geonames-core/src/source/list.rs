//! In-memory sources for small static datasets.

use std::fmt;
use std::marker::PhantomData;

use super::{Records, SourceError};
use crate::record::{Numbered, RawRow, Record};

/// Produces records from rows held in memory.
pub struct ListSource<R> {
    name: &'static str,
    rows: Vec<RawRow>,
    record: PhantomData<fn() -> R>,
}

impl<R> fmt::Debug for ListSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListSource")
            .field("name", &self.name)
            .field("rows", &self.rows.len())
            .finish_non_exhaustive()
    }
}

impl<R> ListSource<R> {
    /// Wrap materialised rows.
    #[must_use]
    pub const fn new(name: &'static str, rows: Vec<RawRow>) -> Self {
        Self {
            name,
            rows,
            record: PhantomData,
        }
    }

    /// Source name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of rows held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the list holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: Record> ListSource<R> {
    pub(super) fn produce(&self) -> Records<'_, R> {
        let source_name = self.name;
        Box::new(self.rows.iter().zip(1_u64..).map(move |(row, row_num)| {
            R::from_raw_row(row)
                .map(|record| Numbered { row_num, record })
                .map_err(|source| SourceError::Record {
                    source_name,
                    row_num,
                    source,
                })
        }))
    }
}
