//! Capability-based filesystem helpers for survey outputs.
//!
//! Paths arrive as ambient UTF-8 paths from configuration. Each helper
//! anchors the path at an ambient directory handle and performs the
//! operation relative to it.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Split `path` into an ambient anchor directory and the remainder below it.
///
/// Absolute paths anchor at the filesystem root (or drive prefix on Windows);
/// relative paths anchor at the current directory.
pub fn anchor(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let (root, rest) = match std_path.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let root = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let rest = std_path
                .strip_prefix(root.as_std_path())
                .or_else(|_| std_path.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("cannot strip drive prefix"))?
                .to_path_buf();
            (root, rest)
        }
        Some(Component::RootDir) => {
            let root = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let rest = std_path
                .strip_prefix(root.as_std_path())
                .map_err(|_| io::Error::other("cannot strip filesystem root"))?
                .to_path_buf();
            (root, rest)
        }
        _ => (Utf8PathBuf::from("."), std_path.to_path_buf()),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&root, ambient_authority())?;
    let rest = Utf8PathBuf::from_path_buf(rest).map_err(|_| io::Error::other("non-UTF-8 path"))?;
    Ok((dir, rest))
}

/// Create `path` and any missing ancestors.
pub fn ensure_dir(path: &Utf8Path) -> io::Result<()> {
    let (root, rest) = anchor(path)?;
    if rest.as_str().is_empty() {
        return Ok(());
    }
    root.create_dir_all(&rest)
}

/// Create the directory that will hold `path`.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Open the directory containing `path` and return it with the file name.
pub fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path has no file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Create (or truncate) `path` for writing, creating parent directories first.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent(path)?;
    dir.create(name.as_str())
}

/// Open `path` for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Whether `path` exists and is a directory. Missing paths yield `false`.
pub fn dir_exists(path: &Utf8Path) -> bool {
    fs_utf8::Dir::open_ambient_dir(path, ambient_authority()).is_ok()
}

/// Whether `path` exists and is a regular file.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent(path)?;
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Copy `from` to `to`, replacing any existing file. Returns bytes copied.
pub fn copy_file(from: &Utf8Path, to: &Utf8Path) -> io::Result<u64> {
    let mut source = open_utf8_file(from)?;
    let mut target = create_utf8_file(to)?;
    io::copy(&mut source, &mut target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::io::{Read, Write};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        (dir, root)
    }

    #[rstest]
    fn create_file_makes_parents(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let path = root.join("outputs/images/47.5000_-122.4000_0.jpg");
        let mut file = create_utf8_file(&path).expect("create file");
        file.write_all(b"jpeg").expect("write bytes");
        assert!(file_is_file(&path).expect("stat file"));
        assert!(dir_exists(&root.join("outputs/images")));
    }

    #[rstest]
    fn copy_replaces_target(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let from = root.join("report.csv");
        let to = root.join("public/StreetViewScore.csv");
        create_utf8_file(&from)
            .and_then(|mut file| file.write_all(b"latitude\n"))
            .expect("write source");
        create_utf8_file(&to)
            .and_then(|mut file| file.write_all(b"stale contents\n"))
            .expect("write stale target");
        assert_eq!(copy_file(&from, &to).expect("copy"), 9);
        let mut copied = String::new();
        open_utf8_file(&to)
            .and_then(|mut file| file.read_to_string(&mut copied))
            .expect("read copy");
        assert_eq!(copied, "latitude\n");
    }

    #[rstest]
    fn missing_paths_are_reported_absent(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        assert!(!dir_exists(&root.join("nowhere")));
        assert!(!file_is_file(&root.join("absent.csv")).expect("stat parent"));
    }

    #[rstest]
    fn ensure_dir_accepts_existing(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        ensure_dir(&root).expect("existing dir");
        ensure_dir(&root.join("a/b")).expect("nested dir");
        assert!(dir_exists(&root.join("a/b")));
    }
}
