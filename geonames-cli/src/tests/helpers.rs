//! Test helpers for building load workspaces and inspecting loaded databases.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Dumps shared with the catalogue's own behavioural tests.
pub(super) fn sample_data_dir() -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR")).join("../geonames-data/tests/fixtures")
}

/// Fresh temporary directory addressed by a UTF-8 path.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

pub(super) fn count_rows(database: &Utf8Path, table: &str) -> i64 {
    let connection = rusqlite::Connection::open(database.as_std_path()).expect("open database");
    connection
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .expect("count rows")
}

pub(super) fn table_exists(database: &Utf8Path, table: &str) -> bool {
    let connection = rusqlite::Connection::open(database.as_std_path()).expect("open database");
    connection
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get::<_, i64>(0),
        )
        .expect("inspect schema")
        == 1
}
