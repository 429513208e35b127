//! Local filesystem record store
//!
//! One JSON file per record under a dedicated directory. Writes go through
//! a temp file plus rename so a concurrent reader never observes a partial
//! record; an advisory lock serializes writers on the same directory.

use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::ports::{BackendDescriptor, BackendKind, StorageError, StorageResult};

use super::RecordStore;

/// Record store over a local directory
pub struct LocalRecordStore {
    dir: PathBuf,
}

impl LocalRecordStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn lock_path(&self) -> PathBuf {
        self.dir.join(".lock")
    }

    fn with_write_lock<T>(&self, f: impl FnOnce() -> StorageResult<T>) -> StorageResult<T> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        let lock_file = fs::File::create(self.lock_path())
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        let result = f();

        let _ = fs2::FileExt::unlock(&lock_file);
        result
    }
}

impl RecordStore for LocalRecordStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Unavailable(e.to_string())),
        }
    }

    fn put(&self, key: &str, body: &str) -> StorageResult<()> {
        self.with_write_lock(|| {
            let path = self.path_for(key);
            let tmp = tempfile::NamedTempFile::new_in(&self.dir)
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            fs::write(tmp.path(), body).map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            tmp.persist(&path)
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            Ok(())
        })
    }

    fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Unavailable(e.to_string())),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::Unavailable(e.to_string()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == ".lock" {
                continue;
            }
            if name.starts_with(prefix) {
                keys.push(name);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::WriteFailed(e.to_string())),
        }
    }

    fn describe(&self) -> BackendDescriptor {
        BackendDescriptor {
            kind: BackendKind::Local,
            location: self.dir.display().to_string(),
        }
    }
}
