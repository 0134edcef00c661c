//! Locked, atomic access to the backing file.
//!
//! Writes are staged into a temporary file in the destination directory,
//! flushed, synced, then renamed over the target, so a crash mid-write
//! never leaves a half-serialized store behind. Advisory locks guard
//! against another process of the same program touching the file at the
//! same moment.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

pub(crate) struct AtomicFile {
    path: PathBuf,
}

impl AtomicFile {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the whole file under a shared lock. `None` when the file
    /// (or any parent directory) does not exist yet.
    pub(crate) fn read(&self) -> io::Result<Option<String>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        file.lock_shared()?;
        let mut contents = String::new();
        (&file).read_to_string(&mut contents)?;
        Ok(Some(contents))
    }

    /// Replaces the file contents atomically under an exclusive lock.
    pub(crate) fn write(&self, contents: &str) -> io::Result<()> {
        let lock = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)?;
        lock.lock_exclusive()?;

        let dir = self.path.parent().unwrap_or(Path::new("."));
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(contents.as_bytes())?;
        staged.flush()?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|err| err.error)?;

        // lock handle points at the replaced inode; released on drop
        drop(lock);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_of_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let file = AtomicFile::new(dir.path().join("absent.properties"));
        assert_eq!(file.read().expect("read should not fail"), None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let file = AtomicFile::new(dir.path().join("config.properties"));
        file.write("token=abc\n").expect("write should succeed");
        assert_eq!(
            file.read().expect("read should succeed"),
            Some("token=abc\n".to_string())
        );
    }

    #[test]
    fn write_leaves_no_staging_files_behind() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let file = AtomicFile::new(dir.path().join("config.properties"));
        file.write("a=1\n").expect("write should succeed");
        file.write("a=2\n").expect("write should succeed");

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .expect("Failed to read dir")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["config.properties".to_string()]);
    }
}
