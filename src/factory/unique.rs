//! Unique-name allocation inside a shared directory.

use super::guard::DirLock;
use crate::error::{FileError, Result};
use crate::perms::Perms;
use crate::random;
use crate::resource::{FileResource, OpenMode};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Default strftime format for the timestamp prefix, e.g.
/// `29_08_2026__14_03_27__`.
pub const DEFAULT_TIME_FORMAT: &str = "%d_%m_%Y__%H_%M_%S__";

/// Default name of the per-directory coordination lock file.
pub const DEFAULT_LOCK_NAME: &str = "lock";

/// Options for [`allocate_unique`].
///
/// The generated filename is
/// `[<formatted-timestamp>][<prefix>]<random-alnum(random_len)>[.<ext>]`.
#[derive(Debug, Clone)]
pub struct UniqueOptions {
    /// Mode the allocated file is opened in.
    pub mode: OpenMode,

    /// Permission bits applied to the allocated file.
    pub perms: Perms,

    /// Extension appended as `.<ext>`; `None` for no extension.
    pub ext: Option<String>,

    /// Fixed prefix placed before the random component.
    pub prefix: String,

    /// strftime format for the timestamp component; `None` disables it.
    /// The timestamp may repeat across calls within the same second; the
    /// random component alone carries the uniqueness.
    pub time_format: Option<String>,

    /// Length of the random alphanumeric component.
    pub random_len: usize,

    /// Name of the coordination lock file inside the directory.
    pub lock_name: String,
}

impl Default for UniqueOptions {
    fn default() -> Self {
        Self {
            mode: OpenMode::default(),
            perms: Perms::default(),
            ext: None,
            prefix: String::new(),
            time_format: Some(DEFAULT_TIME_FORMAT.to_string()),
            random_len: 10,
            lock_name: DEFAULT_LOCK_NAME.to_string(),
        }
    }
}

/// Allocate a file with a previously-unused generated name inside `dir`.
///
/// The directory is created if absent (`PathConflict` if the path exists
/// as a regular file). Name generation and file creation happen under an
/// exclusive flock on the directory's coordination lock file, so
/// concurrent callers against the same directory cannot settle on the same
/// candidate and race to create it. The flock spans only this critical
/// section; it is not the lock on the returned resource.
///
/// Returns an open [`FileResource`] bound to the new path, with `perms`
/// applied.
pub fn allocate_unique(dir: impl AsRef<Path>, opts: &UniqueOptions) -> Result<FileResource> {
    let dir = dir.as_ref();

    if dir.exists() {
        if !dir.is_dir() {
            return Err(FileError::PathConflict(format!(
                "'{}' exists but is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| {
            FileError::Creation(format!(
                "create directory '{}' failed: {}",
                dir.display(),
                e
            ))
        })?;
    }

    let guard = DirLock::acquire(&dir.join(&opts.lock_name))?;

    // Serialized by the guard: no sibling process settles on the same
    // still-nonexistent candidate between the existence check and the open.
    let mut candidate = compose_candidate(dir, opts);
    while candidate.exists() {
        candidate = compose_candidate(dir, opts);
    }

    let mut resource = FileResource::new(&candidate);
    resource.open(opts.mode, opts.perms)?;
    resource.chmod(opts.perms)?;

    guard.release()?;
    Ok(resource)
}

/// Compose one candidate path from the configured components.
fn compose_candidate(dir: &Path, opts: &UniqueOptions) -> PathBuf {
    let timestamp = match &opts.time_format {
        Some(format) if !format.is_empty() => Local::now().format(format).to_string(),
        _ => String::new(),
    };
    let suffix = random::alnum_string(opts.random_len);
    let ext = match &opts.ext {
        Some(ext) => format!(".{}", ext),
        None => String::new(),
    };
    dir.join(format!("{}{}{}{}", timestamp, opts.prefix, suffix, ext))
}
