//! Named exclusive file locks
//!
//! Each guarded document has a sidecar `<file>.lock`. The lock is an OS
//! advisory lock on that file's handle, so it excludes other processes and
//! other handles in this process alike. Acquisition makes at most
//! `max_attempts` non-blocking tries with capped exponential backoff.

use crate::config::LockConfig;
use crate::errors::{io_error, lock_exhausted, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;

/// Held lock; released on drop whatever the guarded body did
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// # Errors
    ///
    /// - `Io` if the lock file cannot be opened
    /// - `Concurrency` if every attempt found the lock held
    pub fn acquire(lock_path: &Path, config: &LockConfig) -> Result<FileLock> {
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| io_error("create_lock_dir", parent, e))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(lock_path)
            .map_err(|e| io_error("open_lock", lock_path, e))?;

        let attempts = config.max_attempts.max(1);
        for attempt in 1..=attempts {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    tracing::debug!(path = %lock_path.display(), attempt, "lock acquired");
                    return Ok(FileLock {
                        file,
                        path: lock_path.to_path_buf(),
                    });
                }
                Err(err) if is_contended(&err) => {
                    tracing::debug!(path = %lock_path.display(), attempt, "lock busy");
                    if attempt < attempts {
                        thread::sleep(config.delay_for(attempt));
                    }
                }
                Err(err) => return Err(io_error("lock_acquire", lock_path, err)),
            }
        }

        Err(lock_exhausted(lock_path, attempts))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(err) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %err, "lock release failed");
        }
    }
}

fn is_contended(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
