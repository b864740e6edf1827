//! Error types for filehold.
//!
//! Uses thiserror for derive macros. Every failure message carries the
//! failing operation name and the underlying OS error text.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for filehold operations.
///
/// Each variant maps to a specific exit code when surfaced through the CLI.
#[derive(Error, Debug)]
pub enum FileError {
    /// A file or directory could not be created or opened.
    #[error("{0}")]
    Creation(String),

    /// A seek, read, write, or remove failed on an open resource.
    #[error("{0}")]
    Io(String),

    /// An advisory lock could not be acquired or released.
    #[error("{0}")]
    Lock(String),

    /// A permission change failed, or a permission string was malformed.
    #[error("{0}")]
    Permission(String),

    /// A path was expected to be a file (or directory) but is the other.
    #[error("{0}")]
    PathConflict(String),
}

impl FileError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FileError::Creation(_) => exit_codes::CREATION_FAILURE,
            FileError::Io(_) => exit_codes::IO_FAILURE,
            FileError::Lock(_) => exit_codes::LOCK_FAILURE,
            FileError::Permission(_) => exit_codes::PERMISSION_FAILURE,
            FileError::PathConflict(_) => exit_codes::PATH_CONFLICT,
        }
    }

    /// Returns the taxonomy kind for this error, independent of the message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FileError::Creation(_) => ErrorKind::Creation,
            FileError::Io(_) => ErrorKind::Io,
            FileError::Lock(_) => ErrorKind::Lock,
            FileError::Permission(_) => ErrorKind::Permission,
            FileError::PathConflict(_) => ErrorKind::PathConflict,
        }
    }
}

/// Error taxonomy, used for last-error tracking on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Creation,
    Io,
    Lock,
    Permission,
    PathConflict,
}

impl ErrorKind {
    /// Short name for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Creation => "creation",
            ErrorKind::Io => "io",
            ErrorKind::Lock => "lock",
            ErrorKind::Permission => "permission",
            ErrorKind::PathConflict => "path-conflict",
        }
    }
}

/// The last failure recorded on a resource: kind plus full message.
///
/// Cleared only by an explicit `FileResource::clear_error` call.
#[derive(Debug, Clone)]
pub struct LastError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&FileError> for LastError {
    fn from(err: &FileError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for filehold operations.
pub type Result<T> = std::result::Result<T, FileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_error_has_correct_exit_code() {
        let err = FileError::Creation("open 'x' failed".to_string());
        assert_eq!(err.exit_code(), exit_codes::CREATION_FAILURE);
    }

    #[test]
    fn io_error_has_correct_exit_code() {
        let err = FileError::Io("read failed".to_string());
        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
    }

    #[test]
    fn lock_error_has_correct_exit_code() {
        let err = FileError::Lock("flock failed".to_string());
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
    }

    #[test]
    fn permission_error_has_correct_exit_code() {
        let err = FileError::Permission("chmod failed".to_string());
        assert_eq!(err.exit_code(), exit_codes::PERMISSION_FAILURE);
    }

    #[test]
    fn path_conflict_error_has_correct_exit_code() {
        let err = FileError::PathConflict("'/tmp/x' is a directory".to_string());
        assert_eq!(err.exit_code(), exit_codes::PATH_CONFLICT);
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            FileError::Creation(String::new()).kind(),
            ErrorKind::Creation
        );
        assert_eq!(FileError::Lock(String::new()).kind(), ErrorKind::Lock);
        assert_eq!(
            FileError::PathConflict(String::new()).kind(),
            ErrorKind::PathConflict
        );
    }

    #[test]
    fn last_error_captures_kind_and_message() {
        let err = FileError::Io("seek to 42 failed: bad descriptor".to_string());
        let last = LastError::from(&err);
        assert_eq!(last.kind, ErrorKind::Io);
        assert!(last.message.contains("seek to 42"));
    }
}
