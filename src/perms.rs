//! Typed POSIX permission masks.
//!
//! Permission bits travel through the API as an explicit [`Perms`] value
//! rather than bare integers or process-wide defaults. A `Perms` can be
//! built from a numeric mask or parsed from the conventional octal-string
//! form (`"0644"`).

use crate::error::{FileError, Result};
use std::fmt;
use std::str::FromStr;

/// A POSIX permission mask (the low 12 mode bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perms(u32);

impl Perms {
    /// Mask covering the permission bits of an `st_mode`, including
    /// setuid/setgid/sticky.
    pub const MODE_MASK: u32 = 0o7777;

    /// Construct from a numeric mask. Bits above the mode mask are dropped.
    pub fn new(bits: u32) -> Self {
        Self(bits & Self::MODE_MASK)
    }

    /// The numeric mask.
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// "Unknown" permissions, reported for files that do not exist or
    /// whose metadata cannot be read.
    pub fn unknown() -> Self {
        Self(0)
    }
}

impl Default for Perms {
    /// Owner read/write only, the conservative default the factories use.
    fn default() -> Self {
        Self(0o600)
    }
}

impl From<u32> for Perms {
    fn from(bits: u32) -> Self {
        Self::new(bits)
    }
}

impl FromStr for Perms {
    type Err = FileError;

    /// Parse the octal-string form: a leading `0` followed by octal digits,
    /// e.g. `"0644"`. Anything else is a `Permission` error.
    fn from_str(s: &str) -> Result<Self> {
        let valid = s.starts_with('0') && s.bytes().all(|b| (b'0'..=b'7').contains(&b));
        if !valid {
            return Err(FileError::Permission(format!(
                "invalid permission string '{}': expected octal form like \"0644\"",
                s
            )));
        }
        let bits = u32::from_str_radix(s, 8).map_err(|e| {
            FileError::Permission(format!("invalid permission string '{}': {}", s, e))
        })?;
        Ok(Self::new(bits))
    }
}

impl fmt::Display for Perms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0{:o}", self.0)
    }
}
