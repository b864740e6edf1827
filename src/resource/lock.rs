//! Advisory lock flags and state.
//!
//! Locks are plain flocks: cooperative, single-host, and invisible to
//! processes that never check them. Acquisition blocks until the OS grants
//! the lock.

use fs2::FileExt;
use std::fs::File;
use std::io;

/// A lock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockFlag {
    /// Shared (reader) lock; coexists with other shared holders.
    Shared,
    /// Exclusive (writer) lock; excludes all other holders.
    Exclusive,
}

impl LockFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockFlag::Shared => "shared",
            LockFlag::Exclusive => "exclusive",
        }
    }
}

/// The lock currently held on a resource, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Unlocked,
    Shared,
    Exclusive,
}

impl From<LockFlag> for LockState {
    fn from(flag: LockFlag) -> Self {
        match flag {
            LockFlag::Shared => LockState::Shared,
            LockFlag::Exclusive => LockState::Exclusive,
        }
    }
}

/// Blocking acquire of the requested flock on an open descriptor.
pub(super) fn acquire(file: &File, flag: LockFlag) -> io::Result<()> {
    match flag {
        LockFlag::Shared => file.lock_shared(),
        LockFlag::Exclusive => file.lock_exclusive(),
    }
}

/// Release whatever flock the descriptor holds.
pub(super) fn release(file: &File) -> io::Result<()> {
    file.unlock()
}
