//! A single JSON document guarded by its own lock file

use super::atomic::atomic_write;
use super::lock::FileLock;
use crate::config::LockConfig;
use crate::errors::{corrupt_document, io_error, serialization_error, Result};
use scoreline_core::errors::ExErrorKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
    lock_path: PathBuf,
    lock: LockConfig,
}

impl JsonDocument {
    pub fn new(path: impl Into<PathBuf>, lock: LockConfig) -> Self {
        let path = path.into();
        let lock_path = sibling_with_suffix(&path, ".lock");
        Self {
            path,
            lock_path,
            lock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Acquire this document's exclusive lock
    ///
    /// # Errors
    ///
    /// `Concurrency` when the retry budget runs out, `Io` when the lock file
    /// cannot be opened.
    pub fn lock(&self) -> Result<FileLock> {
        FileLock::acquire(&self.lock_path, &self.lock)
    }

    /// Read and decode under the lock; `None` when the file does not exist
    ///
    /// A missing parent directory also yields `None`, without taking the lock.
    ///
    /// # Errors
    ///
    /// Lock failures, I/O failures, and `Serialization` for unparseable content.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        // Nothing was ever written; locking would create the directory
        if !self.dir_exists() {
            return Ok(None);
        }
        let _guard = self.lock()?;
        self.read_locked()
    }

    /// Encode and atomically replace under the lock
    ///
    /// # Errors
    ///
    /// Lock failures, encoding failures, and I/O failures.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        let _guard = self.lock()?;
        self.write_locked(value)
    }

    /// Read-modify-write with the lock held throughout
    ///
    /// A missing file starts from `T::default()`. A file that exists but does
    /// not decode is moved aside to `<file>.corrupt` and also starts from the
    /// default. Nothing is written when `f` fails.
    ///
    /// # Errors
    ///
    /// Lock and I/O failures, or whatever `f` returns.
    pub fn update<T, R, F>(&self, f: F) -> Result<R>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T) -> Result<R>,
    {
        let _guard = self.lock()?;

        let mut value = match self.read_locked::<T>() {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(err) if err.kind() == ExErrorKind::Serialization => {
                self.quarantine(&err)?;
                T::default()
            }
            Err(err) => return Err(err),
        };

        let out = f(&mut value)?;
        self.write_locked(&value)?;
        Ok(out)
    }

    fn dir_exists(&self) -> bool {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.is_dir(),
            _ => true,
        }
    }

    /// Caller must hold the lock
    fn read_locked<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read_document", &self.path, e)),
        };
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "document read");
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| corrupt_document(&self.path, e))
    }

    /// Caller must hold the lock
    fn write_locked<T: Serialize>(&self, value: &T) -> Result<()> {
        let mut bytes =
            serde_json::to_vec_pretty(value).map_err(|e| serialization_error(&self.path, e))?;
        bytes.push(b'\n');
        atomic_write(&self.path, &bytes)?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "document written");
        Ok(())
    }

    fn quarantine(&self, cause: &scoreline_core::errors::ExError) -> Result<()> {
        let aside = sibling_with_suffix(&self.path, ".corrupt");
        tracing::error!(
            path = %self.path.display(),
            moved_to = %aside.display(),
            err = %cause,
            "unreadable document moved aside, starting empty"
        );
        fs::rename(&self.path, &aside).map_err(|e| io_error("quarantine_document", &self.path, e))
    }
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
