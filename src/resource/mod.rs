//! The managed file resource.
//!
//! A [`FileResource`] owns at most one OS file descriptor for a fixed path
//! and tracks everything that descriptor is allowed to do:
//! - open/close lifecycle (close is idempotent)
//! - positioned read/write, gated by the open mode
//! - advisory shared/exclusive locks (cooperative flocks)
//! - permission management
//! - optional delete-on-close
//!
//! # State machine
//!
//! `Closed → open → Open{Unlocked} → lock → Open{Shared|Exclusive}
//! → unlock → Open{Unlocked} → close → Closed`
//!
//! Every transition from `Open` back to `Closed` passes through an implicit
//! unlock. Reopening an open resource releases the previous descriptor
//! first.
//!
//! # Capability no-ops
//!
//! Reading through a handle that is not open in a readable mode returns an
//! empty result with no error; writing through a non-writable handle does
//! nothing. This is deliberate: "wrong capability" is distinct from "I/O
//! failure" and is not reported through the error channel.
//!
//! # Last error
//!
//! Every failing operation records a `(kind, message)` pair on the resource
//! before returning the error. The record is cleared only by an explicit
//! [`FileResource::clear_error`] call.

mod lock;
mod mode;


pub use lock::{LockFlag, LockState};
pub use mode::OpenMode;

use crate::error::{FileError, LastError, Result};
use crate::perms::Perms;
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// An owned file handle with open/lock/error state.
///
/// Not internally synchronized: a single instance must not be shared
/// across threads without external serialization. Cross-process exclusion
/// is advisory only.
#[derive(Debug)]
pub struct FileResource {
    /// Filesystem path, fixed after creation.
    path: PathBuf,

    /// Permission mask requested at open time.
    perms: Perms,

    /// The descriptor; present iff the resource is open.
    file: Option<File>,

    /// Mode the descriptor was opened with.
    mode: OpenMode,

    /// Advisory lock currently held on the descriptor.
    lock_state: LockState,

    /// Remove the backing file when the resource transitions to closed.
    delete_on_close: bool,

    /// Last recorded failure, cleared explicitly.
    last_error: Option<LastError>,
}

impl FileResource {
    /// Create a closed resource bound to `path`. Nothing touches the
    /// filesystem until [`open`](Self::open) is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            perms: Perms::default(),
            file: None,
            mode: OpenMode::default(),
            lock_state: LockState::Unlocked,
            delete_on_close: false,
            last_error: None,
        }
    }

    /// The path this resource is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the resource currently owns a descriptor.
    pub fn opened(&self) -> bool {
        self.file.is_some()
    }

    /// The mode the descriptor was opened with. Meaningless while closed.
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// The advisory lock currently held.
    pub fn lock_state(&self) -> LockState {
        self.lock_state
    }

    /// Whether any advisory lock is held.
    pub fn is_locked(&self) -> bool {
        self.lock_state != LockState::Unlocked
    }

    /// Whether the backing file exists as a regular file.
    pub fn exists(&self) -> bool {
        fs::metadata(&self.path).map(|m| m.is_file()).unwrap_or(false)
    }

    /// Open for reading: the resource is open in a readable mode.
    pub fn is_readable(&self) -> bool {
        self.opened() && self.mode.readable()
    }

    /// Open for writing: the resource is open in a writable mode.
    pub fn is_writable(&self) -> bool {
        self.opened() && self.mode.writable()
    }

    /// Open for both reading and writing.
    pub fn is_read_write(&self) -> bool {
        self.is_readable() && self.is_writable()
    }

    /// The last recorded failure, if any.
    pub fn last_error(&self) -> Option<&LastError> {
        self.last_error.as_ref()
    }

    /// Clear the last recorded failure.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Record a failure on the resource and hand the error back.
    fn record(&mut self, err: FileError) -> FileError {
        self.last_error = Some(LastError::from(&err));
        err
    }

    /// Open (or create, per `mode`) the backing file.
    ///
    /// An already-open resource is closed first, releasing the previous
    /// descriptor. On failure the resource remains closed.
    pub fn open(&mut self, mode: OpenMode, perms: Perms) -> Result<()> {
        if self.opened() {
            self.close()?;
        }
        match mode.open_options(perms).open(&self.path) {
            Ok(file) => {
                self.file = Some(file);
                self.mode = mode;
                self.perms = perms;
                self.lock_state = LockState::Unlocked;
                Ok(())
            }
            Err(e) => {
                let err = FileError::Creation(format!(
                    "open '{}' ({}) failed: {}",
                    self.path.display(),
                    mode.as_str(),
                    e
                ));
                Err(self.record(err))
            }
        }
    }

    /// Close the resource. No-op if already closed.
    ///
    /// Any held lock is released before the descriptor. If delete-on-close
    /// is set, the backing file is removed after release; a removal failure
    /// is reported as `Io` but the resource stays closed.
    pub fn close(&mut self) -> Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };
        if self.lock_state != LockState::Unlocked {
            // The descriptor is about to go away, which releases the flock
            // regardless; an explicit release failure is not actionable.
            let _ = lock::release(&file);
        }
        self.lock_state = LockState::Unlocked;
        drop(file);

        if self.delete_on_close
            && let Err(e) = fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            let err = FileError::Io(format!(
                "remove '{}' on close failed: {}",
                self.path.display(),
                e
            ));
            return Err(self.record(err));
        }
        Ok(())
    }

    /// Mark the backing file for removal at close time.
    pub fn set_delete_on_close(&mut self, delete: bool) {
        self.delete_on_close = delete;
    }

    /// Whether the backing file will be removed at close time.
    pub fn delete_on_close(&self) -> bool {
        self.delete_on_close
    }

    /// Remove the backing file and close the resource.
    ///
    /// Equivalent to `set_delete_on_close(true)` followed by `close()`;
    /// the file is removed exactly once, at the close transition.
    pub fn delete(&mut self) -> Result<()> {
        self.delete_on_close = true;
        self.close()
    }

    /// Size of the backing file in bytes.
    pub fn size(&mut self) -> Result<u64> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len()),
            Err(e) => {
                let err = FileError::Io(format!(
                    "stat '{}' failed: {}",
                    self.path.display(),
                    e
                ));
                Err(self.record(err))
            }
        }
    }

    /// Read up to `length` bytes starting at byte offset `start`.
    ///
    /// Returns an empty Vec with no error when the resource is not open in
    /// a readable mode. `start` past the end of the file is clamped to the
    /// final byte, while `start` exactly at end-of-file reads nothing.
    /// `length == 0` means "the rest of the file", and a
    /// `length` reaching past the end is recomputed to the remaining byte
    /// count, so the result always holds exactly the computed length. An
    /// empty file reads empty.
    pub fn read(&mut self, start: u64, length: u64) -> Result<Vec<u8>> {
        if !self.is_readable() {
            return Ok(Vec::new());
        }
        let size = self.size()?;
        if size == 0 {
            return Ok(Vec::new());
        }
        // Only a start strictly past the end clamps to the final byte;
        // start == size is a valid position with zero bytes remaining.
        let start = if start > size { size - 1 } else { start };
        // start <= size here, so size - start cannot underflow; comparing
        // against the remainder avoids overflow for huge length values.
        let length = if length == 0 || length > size - start {
            size - start
        } else {
            length
        };
        if length == 0 {
            return Ok(Vec::new());
        }

        let Some(file) = self.file.as_mut() else {
            return Ok(Vec::new());
        };
        if let Err(e) = file.seek(SeekFrom::Start(start)) {
            let err = FileError::Io(format!(
                "read '{}': seek to {} failed: {}",
                self.path.display(),
                start,
                e
            ));
            return Err(self.record(err));
        }
        let mut buf = vec![0u8; length as usize];
        if let Err(e) = file.read_exact(&mut buf) {
            let err = FileError::Io(format!(
                "read '{}': reading {} bytes at {} failed: {}",
                self.path.display(),
                length,
                start,
                e
            ));
            return Err(self.record(err));
        }
        Ok(buf)
    }

    /// Write all of `data` starting at byte offset `start`.
    ///
    /// Does nothing (successfully) when the resource is not open in a
    /// writable mode. Existing content is overwritten in place; nothing
    /// beyond the written range is truncated. In `Append` mode the OS
    /// places every write at end-of-file regardless of `start`.
    pub fn write(&mut self, data: &[u8], start: u64) -> Result<()> {
        if !self.is_writable() {
            return Ok(());
        }
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        if let Err(e) = file.seek(SeekFrom::Start(start)) {
            let err = FileError::Io(format!(
                "write '{}': seek to {} failed: {}",
                self.path.display(),
                start,
                e
            ));
            return Err(self.record(err));
        }
        if let Err(e) = file.write_all(data) {
            let err = FileError::Io(format!(
                "write '{}': writing {} bytes at {} failed: {}",
                self.path.display(),
                data.len(),
                start,
                e
            ));
            return Err(self.record(err));
        }
        Ok(())
    }

    /// Read under a shared lock: acquire, read once, release.
    ///
    /// Two `read_locked` calls are independent critical sections; another
    /// lock holder may modify the file between them.
    pub fn read_locked(&mut self, start: u64, length: u64) -> Result<Vec<u8>> {
        self.lock_shared()?;
        let result = self.read(start, length);
        self.unlock()?;
        result
    }

    /// Write under an exclusive lock: acquire, write once, release.
    pub fn write_locked(&mut self, data: &[u8], start: u64) -> Result<()> {
        self.lock_exclusive()?;
        let result = self.write(data, start);
        self.unlock()?;
        result
    }

    /// Acquire the requested advisory lock, blocking until granted.
    ///
    /// A lock already held is released first; locks never stack. No-op
    /// when the resource is not open. On failure the state is `Unlocked`.
    pub fn lock(&mut self, flag: LockFlag) -> Result<()> {
        if self.lock_state != LockState::Unlocked {
            self.unlock()?;
        }
        let Some(file) = self.file.as_ref() else {
            return Ok(());
        };
        match lock::acquire(file, flag) {
            Ok(()) => {
                self.lock_state = flag.into();
                Ok(())
            }
            Err(e) => {
                self.lock_state = LockState::Unlocked;
                let err = FileError::Lock(format!(
                    "lock '{}' ({}) failed: {}",
                    self.path.display(),
                    flag.as_str(),
                    e
                ));
                Err(self.record(err))
            }
        }
    }

    /// Release the held advisory lock. No-op when neither locked nor open.
    pub fn unlock(&mut self) -> Result<()> {
        if self.lock_state == LockState::Unlocked && !self.opened() {
            return Ok(());
        }
        let Some(file) = self.file.as_ref() else {
            self.lock_state = LockState::Unlocked;
            return Ok(());
        };
        match lock::release(file) {
            Ok(()) => {
                self.lock_state = LockState::Unlocked;
                Ok(())
            }
            Err(e) => {
                let err = FileError::Lock(format!(
                    "unlock '{}' failed: {}",
                    self.path.display(),
                    e
                ));
                Err(self.record(err))
            }
        }
    }

    /// Acquire an exclusive (writer) lock, but only if the resource is
    /// writable; otherwise a no-op.
    pub fn lock_exclusive(&mut self) -> Result<()> {
        if self.is_writable() {
            self.lock(LockFlag::Exclusive)
        } else {
            Ok(())
        }
    }

    /// Acquire a shared (reader) lock, but only if the resource is
    /// readable; otherwise a no-op.
    pub fn lock_shared(&mut self) -> Result<()> {
        if self.is_readable() {
            self.lock(LockFlag::Shared)
        } else {
            Ok(())
        }
    }

    /// OS-reported permission bits of the backing file.
    ///
    /// Returns the "unknown" value (all zero) when the file does not exist
    /// or its metadata cannot be read; neither case is an error.
    pub fn perms(&self) -> Perms {
        if !self.exists() {
            return Perms::unknown();
        }
        match fs::metadata(&self.path) {
            #[cfg(unix)]
            Ok(meta) => {
                use std::os::unix::fs::PermissionsExt;
                Perms::from(meta.permissions().mode())
            }
            #[cfg(not(unix))]
            Ok(_) => Perms::unknown(),
            Err(_) => Perms::unknown(),
        }
    }

    /// Apply `perms` to the backing file.
    pub fn chmod(&mut self, perms: Perms) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) =
                fs::set_permissions(&self.path, fs::Permissions::from_mode(perms.bits()))
            {
                let err = FileError::Permission(format!(
                    "chmod '{}' to {} failed: {}",
                    self.path.display(),
                    perms,
                    e
                ));
                return Err(self.record(err));
            }
            self.perms = perms;
            Ok(())
        }
        #[cfg(not(unix))]
        {
            self.perms = perms;
            Ok(())
        }
    }
}

impl Drop for FileResource {
    fn drop(&mut self) {
        if self.opened()
            && let Err(e) = self.close()
        {
            eprintln!(
                "Warning: failed to close '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}
