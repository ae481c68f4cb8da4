//! SQLite store handle shared by every sink in a run.
//!
//! Writes run inside an implicit transaction: the first write after a commit
//! opens one, and [`Store::commit`] closes it. Checkpoints therefore bound
//! how much work a failure can discard.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use rusqlite::Connection;
use thiserror::Error;

use crate::error::ConstraintKind;
use crate::params::Params;

const STATEMENT_CACHE_CAPACITY: usize = 64;

/// Errors raised by [`Store`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Creating the database's parent directory failed.
    #[error("failed to create parent directory for {path}")]
    CreateDirectory {
        /// Database path being opened.
        path: Utf8PathBuf,
        /// IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    Open {
        /// Database path being opened.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Applying a pragma failed.
    #[error("failed to set pragma {pragma}")]
    Pragma {
        /// Pragma name.
        pragma: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A statement or script failed.
    #[error("failed to {operation}")]
    Sqlite {
        /// Store operation that was running.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The statement names a placeholder that the parameters do not bind.
    #[error("no value bound for parameter {name}")]
    MissingParameter {
        /// Placeholder name, including its prefix.
        name: String,
    },
    /// The statement uses a positional placeholder.
    #[error("parameter {index} is positional; only named parameters are supported")]
    PositionalParameter {
        /// One-based placeholder index.
        index: usize,
    },
}

impl StoreError {
    /// Return the violated constraint category when the failure came from a
    /// SQLite constraint.
    #[must_use]
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            Self::Sqlite { source, .. } => ConstraintKind::classify(source),
            _ => None,
        }
    }
}

/// SQLite `synchronous` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Synchronous {
    /// Hand data to the OS without syncing.
    Off,
    /// Sync at critical moments.
    Normal,
    /// Sync on every commit.
    Full,
}

impl Synchronous {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Normal => "NORMAL",
            Self::Full => "FULL",
        }
    }
}

/// SQLite `journal_mode` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    /// Rollback journal deleted after each transaction.
    Delete,
    /// Rollback journal kept in memory.
    Memory,
    /// Write-ahead log.
    Wal,
    /// No journal.
    Off,
}

impl JournalMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Memory => "MEMORY",
            Self::Wal => "WAL",
            Self::Off => "OFF",
        }
    }
}

/// Connection tuning applied before a bulk load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePragmas {
    /// Enforce foreign key constraints.
    pub foreign_keys: bool,
    /// Durability level.
    pub synchronous: Synchronous,
    /// Journal placement.
    pub journal_mode: JournalMode,
    /// Database page size in bytes.
    pub page_size: u32,
}

impl Default for StorePragmas {
    fn default() -> Self {
        Self {
            foreign_keys: true,
            synchronous: Synchronous::Off,
            journal_mode: JournalMode::Memory,
            page_size: 4096,
        }
    }
}

/// Single SQLite connection with implicit transaction handling.
#[derive(Debug)]
pub struct Store {
    connection: Connection,
    location: Option<Utf8PathBuf>,
}

impl Store {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open(path: &Utf8Path) -> Result<Self, StoreError> {
        geonames_fs::ensure_parent_dir(path).map_err(|source| StoreError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })?;
        let connection = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut store = Self::from_connection(connection);
        store.location = Some(path.to_path_buf());
        Ok(store)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let connection = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: Utf8PathBuf::from(":memory:"),
            source,
        })?;
        Ok(Self::from_connection(connection))
    }

    /// Wrap an existing connection.
    #[must_use]
    pub fn from_connection(connection: Connection) -> Self {
        connection.set_prepared_statement_cache_capacity(STATEMENT_CACHE_CAPACITY);
        Self {
            connection,
            location: None,
        }
    }

    /// Path of the database file, or `None` for in-memory stores.
    #[must_use]
    pub fn location(&self) -> Option<&Utf8Path> {
        self.location.as_deref()
    }

    /// Borrow the underlying connection for read-side queries.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Whether an implicit transaction is currently open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.connection.is_autocommit()
    }

    /// Apply connection pragmas. Any open transaction is committed first
    /// because SQLite ignores `foreign_keys` inside a transaction.
    pub fn apply_pragmas(&self, pragmas: &StorePragmas) -> Result<(), StoreError> {
        self.commit()?;
        self.connection
            .pragma_update(None, "foreign_keys", pragmas.foreign_keys)
            .map_err(|source| StoreError::Pragma {
                pragma: "foreign_keys",
                source,
            })?;
        self.connection
            .pragma_update(None, "synchronous", pragmas.synchronous.as_str())
            .map_err(|source| StoreError::Pragma {
                pragma: "synchronous",
                source,
            })?;
        let journal_mode: String = self
            .connection
            .pragma_update_and_check(None, "journal_mode", pragmas.journal_mode.as_str(), |row| {
                row.get(0)
            })
            .map_err(|source| StoreError::Pragma {
                pragma: "journal_mode",
                source,
            })?;
        self.connection
            .pragma_update(None, "page_size", i64::from(pragmas.page_size))
            .map_err(|source| StoreError::Pragma {
                pragma: "page_size",
                source,
            })?;
        debug!(
            "store pragmas applied (foreign_keys={}, synchronous={}, journal_mode={journal_mode}, page_size={})",
            pragmas.foreign_keys,
            pragmas.synchronous.as_str(),
            pragmas.page_size
        );
        Ok(())
    }

    /// Run a DDL script of one or more statements.
    pub fn execute_script(&self, script: &str) -> Result<(), StoreError> {
        self.connection
            .execute_batch(script)
            .map_err(|source| StoreError::Sqlite {
                operation: "execute script",
                source,
            })
    }

    /// Execute a single write statement, binding only the placeholders it
    /// names. Opens the implicit transaction if none is active.
    pub fn execute_write(&self, sql: &str, params: &Params) -> Result<usize, StoreError> {
        self.begin_if_idle()?;
        let mut statement =
            self.connection
                .prepare_cached(sql)
                .map_err(|source| StoreError::Sqlite {
                    operation: "prepare statement",
                    source,
                })?;
        for index in 1..=statement.parameter_count() {
            let Some(name) = statement.parameter_name(index) else {
                return Err(StoreError::PositionalParameter { index });
            };
            let value = params
                .get(name)
                .ok_or_else(|| StoreError::MissingParameter {
                    name: name.to_owned(),
                })?;
            statement
                .raw_bind_parameter(index, value)
                .map_err(|source| StoreError::Sqlite {
                    operation: "bind parameter",
                    source,
                })?;
        }
        statement.raw_execute().map_err(|source| StoreError::Sqlite {
            operation: "execute statement",
            source,
        })
    }

    /// Commit the implicit transaction, if one is open.
    pub fn commit(&self) -> Result<(), StoreError> {
        if self.in_transaction() {
            self.connection
                .execute_batch("COMMIT")
                .map_err(|source| StoreError::Sqlite {
                    operation: "commit transaction",
                    source,
                })?;
        }
        Ok(())
    }

    /// Commit outstanding work and compact the database file.
    pub fn vacuum(&self) -> Result<(), StoreError> {
        self.commit()?;
        self.connection
            .execute_batch("VACUUM")
            .map_err(|source| StoreError::Sqlite {
                operation: "vacuum database",
                source,
            })
    }

    fn begin_if_idle(&self) -> Result<(), StoreError> {
        if self.connection.is_autocommit() {
            self.connection
                .execute_batch("BEGIN")
                .map_err(|source| StoreError::Sqlite {
                    operation: "begin transaction",
                    source,
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn store() -> Store {
        let store = Store::open_in_memory().expect("open in-memory store");
        store
            .apply_pragmas(&StorePragmas::default())
            .expect("apply pragmas");
        store
            .execute_script("CREATE TABLE item (id INTEGER PRIMARY KEY, code TEXT NOT NULL)")
            .expect("create table");
        store
    }

    fn count(store: &Store) -> i64 {
        store
            .connection()
            .query_row("SELECT COUNT(*) FROM item", [], |row| row.get(0))
            .expect("count rows")
    }

    #[rstest]
    fn write_opens_transaction_and_commit_closes_it(store: Store) {
        assert!(!store.in_transaction());
        let params = Params::new().with("id", 1_i64).with("code", "AF".to_owned());

        let written = store
            .execute_write("INSERT INTO item (id, code) VALUES (:id, :code)", &params)
            .expect("insert row");

        assert_eq!(written, 1);
        assert!(store.in_transaction());
        store.commit().expect("commit");
        assert!(!store.in_transaction());
        assert_eq!(count(&store), 1);
    }

    #[rstest]
    fn unused_parameters_are_ignored(store: Store) {
        let params = Params::new()
            .with("id", 7_i64)
            .with("code", "EU".to_owned())
            .with("extra", "unused".to_owned());

        store
            .execute_write("INSERT INTO item (id, code) VALUES (:id, :code)", &params)
            .expect("insert row");

        assert_eq!(count(&store), 1);
    }

    #[rstest]
    fn unbound_placeholder_is_reported(store: Store) {
        let params = Params::new().with("id", 7_i64);

        let err = store
            .execute_write("INSERT INTO item (id, code) VALUES (:id, :code)", &params)
            .expect_err("missing :code should fail");

        assert!(matches!(err, StoreError::MissingParameter { ref name } if name == ":code"));
    }

    #[rstest]
    fn constraint_failures_are_classified(store: Store) {
        let params = Params::new().with("id", 1_i64).with("code", None::<String>);

        let err = store
            .execute_write("INSERT INTO item (id, code) VALUES (:id, :code)", &params)
            .expect_err("NULL code should fail");

        assert_eq!(err.constraint_kind(), Some(ConstraintKind::NotNull));
    }

    #[rstest]
    fn pragmas_enable_foreign_keys(store: Store) {
        let enabled: i64 = store
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .expect("read pragma");
        assert_eq!(enabled, 1);
    }

    #[rstest]
    fn open_creates_parent_directories_and_vacuums() {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        let path = root.join("nested/geonames.sqlite");

        let opened = Store::open(&path).expect("open store");
        opened
            .execute_script("CREATE TABLE item (id INTEGER PRIMARY KEY)")
            .expect("create table");
        opened
            .execute_write("INSERT INTO item (id) VALUES (:id)", &Params::new().with("id", 1_i64))
            .expect("insert row");
        opened.vacuum().expect("vacuum");

        assert_eq!(opened.location(), Some(path.as_path()));
        assert!(!opened.in_transaction());
        assert!(path.is_file());
    }
}
