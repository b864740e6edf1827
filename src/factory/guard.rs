//! RAII guard for the per-directory coordination lock.

use super::holder::HolderInfo;
use crate::error::{FileError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Exclusive hold on a directory's coordination lock file.
///
/// Acquiring the guard opens (creating if absent) the lock file and takes a
/// blocking exclusive flock on it, then records holder metadata. The lock
/// file itself is tiny and reused across allocations; it is never deleted,
/// only re-locked.
///
/// Dropping the guard releases the flock. If release fails, a warning is
/// printed but the program does not crash (the descriptor going away
/// releases the flock regardless).
#[derive(Debug)]
pub struct DirLock {
    /// Path to the lock file.
    path: PathBuf,

    /// The locked descriptor. `None` once released manually.
    file: Option<File>,
}

impl DirLock {
    /// Acquire the coordination lock at `path`, blocking until granted.
    pub fn acquire(path: &Path) -> Result<Self> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .open(path)
            .map_err(|e| {
                FileError::Lock(format!(
                    "open coordination lock '{}' failed: {}",
                    path.display(),
                    e
                ))
            })?;

        file.lock_exclusive().map_err(|e| {
            FileError::Lock(format!(
                "exclusive lock on '{}' failed: {}",
                path.display(),
                e
            ))
        })?;

        // Best-effort diagnostics for whoever is stuck waiting behind us.
        let info = HolderInfo::current().to_json();
        let _ = file.set_len(0);
        let _ = file.seek(SeekFrom::Start(0));
        let _ = file.write_all(info.as_bytes());

        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
        })
    }

    /// Path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Manually release the lock, surfacing any failure.
    pub fn release(mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            file.unlock().map_err(|e| {
                FileError::Lock(format!(
                    "release coordination lock '{}' failed: {}",
                    self.path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take()
            && let Err(e) = file.unlock()
        {
            eprintln!(
                "Warning: failed to release coordination lock '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}
