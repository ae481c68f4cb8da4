//! Target tables: optional DDL plus exactly one parameterised write.

use log::debug;

use crate::error::PersistError;
use crate::params::Params;
use crate::store::Store;

/// A relational target written by one or more sinks.
///
/// Schema and index scripts must be idempotent (`IF NOT EXISTS`) because
/// several sinks may share a table and every enabled sink sets it up.
///
/// # Examples
///
/// ```
/// use geonames_core::{Params, Store, Table};
///
/// const CONTINENT: Table = Table::new(
///     "continent",
///     "INSERT INTO continent (id, code) VALUES (:id, :code)",
/// )
/// .with_schema("CREATE TABLE IF NOT EXISTS continent (id INTEGER PRIMARY KEY, code TEXT NOT NULL UNIQUE)");
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Store::open_in_memory()?;
/// CONTINENT.create_schema(&store)?;
/// CONTINENT.apply(&store, &Params::new().with("id", 6_255_148_i64).with("code", "EU".to_owned()))?;
/// CONTINENT.commit(&store)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    name: &'static str,
    schema: Option<&'static str>,
    indices: Option<&'static str>,
    modify: &'static str,
}

impl Table {
    /// Define a table by name and its single write statement.
    #[must_use]
    pub const fn new(name: &'static str, modify: &'static str) -> Self {
        Self {
            name,
            schema: None,
            indices: None,
            modify,
        }
    }

    /// Attach the `CREATE TABLE` script.
    #[must_use]
    pub const fn with_schema(self, schema: &'static str) -> Self {
        Self {
            schema: Some(schema),
            ..self
        }
    }

    /// Attach the `CREATE INDEX` script.
    #[must_use]
    pub const fn with_indices(self, indices: &'static str) -> Self {
        Self {
            indices: Some(indices),
            ..self
        }
    }

    /// Table name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The parameterised write statement.
    #[must_use]
    pub const fn modify(&self) -> &'static str {
        self.modify
    }

    /// Create the table. No-op without a schema script.
    pub fn create_schema(&self, store: &Store) -> Result<(), PersistError> {
        let Some(schema) = self.schema else {
            return Ok(());
        };
        debug!("creating schema for table {}", self.name);
        store
            .execute_script(schema)
            .map_err(|source| PersistError::from_store(self.name, "create schema", source))
    }

    /// Create the table's indices. No-op without an index script.
    pub fn create_indices(&self, store: &Store) -> Result<(), PersistError> {
        let Some(indices) = self.indices else {
            return Ok(());
        };
        debug!("creating indices for table {}", self.name);
        store
            .execute_script(indices)
            .map_err(|source| PersistError::from_store(self.name, "create indices", source))
    }

    /// Execute the write statement with `params`, returning affected rows.
    pub fn apply(&self, store: &Store, params: &Params) -> Result<usize, PersistError> {
        store
            .execute_write(self.modify, params)
            .map_err(|source| PersistError::from_store(self.name, "apply write", source))
    }

    /// Commit everything written on the shared handle so far.
    pub fn commit(&self, store: &Store) -> Result<(), PersistError> {
        store
            .commit()
            .map_err(|source| PersistError::from_store(self.name, "commit", source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstraintKind;
    use crate::store::StorePragmas;
    use rstest::{fixture, rstest};

    const PARENT: Table = Table::new("parent", "INSERT INTO parent (id) VALUES (:id)")
        .with_schema("CREATE TABLE IF NOT EXISTS parent (id INTEGER PRIMARY KEY NOT NULL)");

    const CHILD: Table = Table::new(
        "child",
        "INSERT INTO child (parent_id, label) VALUES (:parent_id, :label)",
    )
    .with_schema(
        "CREATE TABLE IF NOT EXISTS child (
            id        INTEGER PRIMARY KEY NOT NULL,
            parent_id INTEGER NOT NULL,
            label     TEXT    NOT NULL CHECK (label != ''),
            FOREIGN KEY (parent_id) REFERENCES parent (id)
        )",
    )
    .with_indices("CREATE INDEX IF NOT EXISTS child_parent_id_idx ON child (parent_id)");

    const UPDATE_ONLY: Table = Table::new("parent", "UPDATE parent SET id = :id WHERE id = :id");

    #[fixture]
    fn store() -> Store {
        let store = Store::open_in_memory().expect("open store");
        store
            .apply_pragmas(&StorePragmas::default())
            .expect("apply pragmas");
        store
    }

    fn child_params(parent_id: i64, label: &str) -> Params {
        Params::new()
            .with("parent_id", parent_id)
            .with("label", label.to_owned())
    }

    #[rstest]
    fn setup_is_idempotent(store: Store) {
        for _ in 0..2 {
            PARENT.create_schema(&store).expect("parent schema");
            CHILD.create_schema(&store).expect("child schema");
            CHILD.create_indices(&store).expect("child indices");
        }
    }

    #[rstest]
    fn tables_without_scripts_skip_setup(store: Store) {
        UPDATE_ONLY.create_schema(&store).expect("no-op schema");
        UPDATE_ONLY.create_indices(&store).expect("no-op indices");
        let tables: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get(0))
            .expect("count objects");
        assert_eq!(tables, 0);
    }

    #[rstest]
    #[case(child_params(42, "orphan"), ConstraintKind::ForeignKey)]
    #[case(child_params(1, ""), ConstraintKind::Check)]
    fn apply_surfaces_typed_constraint_errors(
        store: Store,
        #[case] params: Params,
        #[case] expected: ConstraintKind,
    ) {
        PARENT.create_schema(&store).expect("parent schema");
        CHILD.create_schema(&store).expect("child schema");
        PARENT
            .apply(&store, &Params::new().with("id", 1_i64))
            .expect("insert parent");

        let err = CHILD.apply(&store, &params).expect_err("write should fail");

        assert_eq!(err.constraint_kind(), Some(expected));
        assert_eq!(err.table(), "child");
    }

    #[rstest]
    fn commit_persists_writes(store: Store) {
        PARENT.create_schema(&store).expect("parent schema");
        PARENT
            .apply(&store, &Params::new().with("id", 3_i64))
            .expect("insert parent");
        assert!(store.in_transaction());

        PARENT.commit(&store).expect("commit");

        assert!(!store.in_transaction());
    }
}
