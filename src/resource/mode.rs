//! Open mode definitions.

use crate::perms::Perms;
use std::fs::OpenOptions;

/// How a resource is opened, and which operations are legal on it.
///
/// The enumeration is closed: every mode maps to one fixed combination of
/// OS open flags. None of the modes truncate an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Read-only; the file must already exist.
    Read,
    /// Write-only; the file is created if missing.
    Write,
    /// Read/write; the file is created if missing. The default, safest mode.
    #[default]
    ReadWrite,
    /// Append-only; the file is created if missing. Every write lands at
    /// end-of-file regardless of the requested position.
    Append,
    /// Read/write; the file must not already exist.
    CreateNew,
}

impl OpenMode {
    /// Whether this mode permits reads.
    pub fn readable(&self) -> bool {
        matches!(self, OpenMode::Read | OpenMode::ReadWrite | OpenMode::CreateNew)
    }

    /// Whether this mode permits writes.
    pub fn writable(&self) -> bool {
        !matches!(self, OpenMode::Read)
    }

    /// Whether opening in this mode can create the file.
    pub fn creates(&self) -> bool {
        !matches!(self, OpenMode::Read)
    }

    /// Short name for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenMode::Read => "read",
            OpenMode::Write => "write",
            OpenMode::ReadWrite => "read-write",
            OpenMode::Append => "append",
            OpenMode::CreateNew => "create-new",
        }
    }

    /// Build the `OpenOptions` for this mode. On Unix, `perms` is applied
    /// at create time; it has no effect on a pre-existing file.
    pub fn open_options(&self, perms: Perms) -> OpenOptions {
        let mut opts = OpenOptions::new();
        match self {
            OpenMode::Read => {
                opts.read(true);
            }
            OpenMode::Write => {
                opts.write(true).create(true);
            }
            OpenMode::ReadWrite => {
                opts.read(true).write(true).create(true);
            }
            OpenMode::Append => {
                opts.append(true).create(true);
            }
            OpenMode::CreateNew => {
                opts.read(true).write(true).create_new(true);
            }
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            if self.creates() {
                opts.mode(perms.bits());
            }
        }
        #[cfg(not(unix))]
        {
            let _ = perms;
        }
        opts
    }
}
