//! Atomic write primitives
//!
//! Uses temp→fsync→rename so readers only ever see a complete snapshot

use crate::errors::{io_error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace `target_path` with `content`
///
/// The temp file lives next to the target so the rename never crosses a
/// filesystem. Callers serialize writers with the document's lock; the temp
/// name is fixed per target.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_data_dir", parent, e))?;
        }
    }

    let temp_path = temp_path_for(target_path);

    let write_result = (|| {
        let mut file =
            File::create(&temp_path).map_err(|e| io_error("create_temp", &temp_path, e))?;
        file.write_all(content)
            .map_err(|e| io_error("write_temp", &temp_path, e))?;
        file.sync_all()
            .map_err(|e| io_error("sync_temp", &temp_path, e))
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    fs::rename(&temp_path, target_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        io_error("rename_temp", target_path, e)
    })
}

fn temp_path_for(target_path: &Path) -> PathBuf {
    let mut name = target_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target_path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("leaderboard.json");

        atomic_write(&target, b"{\"A\":1}").unwrap();
        atomic_write(&target, b"{\"A\":2}").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"{\"A\":2}");
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested").join("board.json");

        atomic_write(&target, b"{}").unwrap();

        assert!(target.exists());
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("conversation.json");

        atomic_write(&target, b"[]").unwrap();

        let leftovers = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let p = temp_path_for(Path::new("/data/leaderboard.json"));
        assert_eq!(p, PathBuf::from("/data/leaderboard.json.tmp"));
    }
}
