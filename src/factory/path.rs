//! Open a resource at a caller-specified path.

use crate::error::{FileError, Result};
use crate::perms::Perms;
use crate::resource::{FileResource, OpenMode};
use std::fs;
use std::path::Path;

/// Open (creating if needed) a [`FileResource`] at `path`.
///
/// Missing parent directories are created recursively with the given
/// permission bits. Fails with `PathConflict` when the parent exists as a
/// regular file, or when `path` itself is a directory; nothing is created
/// in either case. The returned resource is open in `mode` with `perms`
/// applied.
pub fn open_at_path(path: impl AsRef<Path>, mode: OpenMode, perms: Perms) -> Result<FileResource> {
    let path = path.as_ref();

    if path.is_dir() {
        return Err(FileError::PathConflict(format!(
            "'{}' is a directory, expected a file path",
            path.display()
        )));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        if parent.exists() {
            if !parent.is_dir() {
                return Err(FileError::PathConflict(format!(
                    "parent '{}' exists but is not a directory",
                    parent.display()
                )));
            }
        } else {
            create_dirs_with_mode(parent, perms)?;
        }
    }

    let mut resource = FileResource::new(path);
    resource.open(mode, perms)?;
    resource.chmod(perms)?;
    Ok(resource)
}

/// Recursively create `dir` with `perms` applied to each created level.
fn create_dirs_with_mode(dir: &Path, perms: Perms) -> Result<()> {
    let builder = {
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            let mut b = fs::DirBuilder::new();
            b.recursive(true).mode(perms.bits());
            b
        }
        #[cfg(not(unix))]
        {
            let _ = perms;
            let mut b = fs::DirBuilder::new();
            b.recursive(true);
            b
        }
    };
    builder.create(dir).map_err(|e| {
        FileError::Creation(format!(
            "create directory '{}' failed: {}",
            dir.display(),
            e
        ))
    })
}
