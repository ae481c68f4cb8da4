//! Filesystem helpers for the gazetteer loader, built on `cap-std` and `camino`.
//!
//! Dump files and the target database are addressed by UTF-8 paths supplied on
//! the command line, so every helper resolves an ambient directory first and
//! performs the actual IO through a capability handle.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Extension marking a bzip2-compressed dump.
const BZ2_EXTENSION: &str = "bz2";

/// Open a dump file for reading using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Report whether `path` names a bzip2-compressed dump (case-insensitive).
#[must_use]
pub fn is_bz2(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case(BZ2_EXTENSION))
}

/// Return whether a path exists and is a regular file.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(file_name).map(|meta| meta.is_file())
}

/// Create the parent directory of a database path if it does not exist yet.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Split a parent path into an ambient base directory and the relative rest.
///
/// `cap-std` refuses absolute paths inside a directory handle, so absolute
/// parents are re-rooted at the filesystem root (or Windows prefix).
pub fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();

    let (base, relative) = match std_parent.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (base, relative)
        }
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;

    Ok((dir, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::io::Read;
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        (dir, root)
    }

    #[rstest]
    #[case("allCountries.txt.bz2", true)]
    #[case("allCountries.txt.BZ2", true)]
    #[case("allCountries.txt", false)]
    #[case("bz2", false)]
    fn detects_bz2_extension(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_bz2(Utf8Path::new(name)), expected, "is_bz2({name})");
    }

    #[rstest]
    fn creates_nested_parent_directories(workspace: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workspace;
        let target = root.join("nested/deeper/geonames.sqlite");

        ensure_parent_dir(&target).expect("create parents");

        assert!(root.join("nested/deeper").is_dir());
    }

    #[rstest]
    fn file_is_file_distinguishes_directories(workspace: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workspace;
        let file = root.join("hierarchy.txt");
        std::fs::write(&file, b"1\t2\tADM\n").expect("write file");

        assert!(file_is_file(&file).expect("inspect file"));
        assert!(!file_is_file(&root).expect("inspect directory"));
    }

    #[rstest]
    fn opens_files_for_reading(workspace: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workspace;
        let file = root.join("userTags.txt");
        std::fs::write(&file, b"1\ttag\n").expect("write file");

        let mut contents = String::new();
        open_utf8_file(&file)
            .expect("open file")
            .read_to_string(&mut contents)
            .expect("read file");

        assert_eq!(contents, "1\ttag\n");
    }
}
