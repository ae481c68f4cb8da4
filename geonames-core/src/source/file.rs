//! Delimited dump files with optional header and comment preambles.

use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::marker::PhantomData;

use bzip2::read::MultiBzDecoder;
use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord};
use geonames_fs::{is_bz2, open_utf8_file};

use super::{Records, SourceError};
use crate::options::SourceOptions;
use crate::record::{Numbered, RawRow, Record};

/// Largest field accepted unless a source raises its own limit.
pub const DEFAULT_FIELD_SIZE_LIMIT: usize = 131_072;

const COMMENT_MARKER: u8 = b'#';

/// Reads one record per line from a delimited file.
///
/// Quoting is disabled because the dumps are unquoted TSV; a stray `"` is
/// ordinary text. Short lines leave trailing fields absent, surplus columns
/// are ignored and blank lines are skipped.
pub struct FileSource<R> {
    name: &'static str,
    fields: &'static [&'static str],
    delimiter: u8,
    skip_header: bool,
    skip_comments: bool,
    field_size_limit: usize,
    record: PhantomData<fn() -> R>,
}

impl<R> fmt::Debug for FileSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSource")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("skip_header", &self.skip_header)
            .field("skip_comments", &self.skip_comments)
            .field("field_size_limit", &self.field_size_limit)
            .finish_non_exhaustive()
    }
}

impl<R> FileSource<R> {
    /// Define a tab-delimited source with the given column layout.
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            name,
            fields,
            delimiter: b'\t',
            skip_header: false,
            skip_comments: false,
            field_size_limit: DEFAULT_FIELD_SIZE_LIMIT,
            record: PhantomData,
        }
    }

    /// Use a different single-byte delimiter.
    #[must_use]
    pub const fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Discard the first line.
    #[must_use]
    pub const fn skip_header(mut self) -> Self {
        self.skip_header = true;
        self
    }

    /// Discard leading lines starting with `#`.
    #[must_use]
    pub const fn skip_comments(mut self) -> Self {
        self.skip_comments = true;
        self
    }

    /// Raise (or lower) the per-field size limit for this source's reads.
    #[must_use]
    pub const fn field_size_limit(mut self, limit: usize) -> Self {
        self.field_size_limit = limit;
        self
    }

    /// Source name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<R: Record> FileSource<R> {
    pub(super) fn produce(&self, options: &SourceOptions) -> Result<Records<'_, R>, SourceError> {
        let source_name = self.name;
        let path = options
            .path
            .as_deref()
            .ok_or(SourceError::MissingPath { source_name })?;
        let mut reader = self.open(path)?;
        self.skip_preamble(&mut reader)
            .map_err(|source| SourceError::Preamble {
                source_name,
                path: path.to_path_buf(),
                source,
            })?;

        let csv = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);
        let fields = self.fields;
        let limit = self.field_size_limit;
        let mut row_num = 0_u64;

        Ok(Box::new(csv.into_records().map(move |result| {
            let line = result.map_err(|source| SourceError::Read {
                source_name,
                line: source.position().map(csv::Position::line),
                source,
            })?;
            row_num += 1;
            let row = raw_row(source_name, fields, limit, &line)?;
            R::from_raw_row(&row)
                .map(|record| Numbered { row_num, record })
                .map_err(|source| SourceError::Record {
                    source_name,
                    row_num,
                    source,
                })
        })))
    }

    fn open(&self, path: &Utf8Path) -> Result<BufReader<Box<dyn Read>>, SourceError> {
        let file = open_utf8_file(path).map_err(|source| SourceError::Open {
            source_name: self.name,
            path: path.to_path_buf(),
            source,
        })?;
        let inner: Box<dyn Read> = if is_bz2(path) {
            Box::new(MultiBzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(inner))
    }

    fn skip_preamble(&self, reader: &mut impl BufRead) -> std::io::Result<()> {
        let mut discarded = Vec::new();
        if self.skip_header {
            reader.read_until(b'\n', &mut discarded)?;
        }
        if self.skip_comments {
            while reader.fill_buf()?.first() == Some(&COMMENT_MARKER) {
                discarded.clear();
                reader.read_until(b'\n', &mut discarded)?;
            }
        }
        Ok(())
    }
}

fn raw_row(
    source_name: &'static str,
    fields: &'static [&'static str],
    limit: usize,
    line: &StringRecord,
) -> Result<RawRow, SourceError> {
    let mut row = RawRow::new();
    for (&field, value) in fields.iter().zip(line.iter()) {
        if value.len() > limit {
            return Err(SourceError::FieldTooLarge {
                source_name,
                line: line.position().map_or(0, csv::Position::line),
                field,
                limit,
            });
        }
        row.push(field, value);
    }
    Ok(row)
}
