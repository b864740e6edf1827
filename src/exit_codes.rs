//! Exit code constants for the filehold CLI.
//!
//! Each error kind in the taxonomy gets a distinct code:
//! - 0: Success
//! - 1: Creation failure (file or directory could not be created/opened)
//! - 2: I/O failure (seek/read/write/remove)
//! - 3: Lock failure (advisory lock acquire/release)
//! - 4: Permission failure (chmod or malformed permission string)
//! - 5: Path conflict (file where a directory was expected, or vice versa)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// A file or directory could not be created or opened.
pub const CREATION_FAILURE: i32 = 1;

/// A seek, read, write, or remove failed.
pub const IO_FAILURE: i32 = 2;

/// An advisory lock could not be acquired or released.
pub const LOCK_FAILURE: i32 = 3;

/// A permission change failed or a permission string was malformed.
pub const PERMISSION_FAILURE: i32 = 4;

/// A path had the wrong filesystem type for the requested operation.
pub const PATH_CONFLICT: i32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            CREATION_FAILURE,
            IO_FAILURE,
            LOCK_FAILURE,
            PERMISSION_FAILURE,
            PATH_CONFLICT,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
