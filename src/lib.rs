//! filehold: managed file handles with advisory locking, positioned I/O,
//! and unique-name allocation.
//!
//! The core type is [`resource::FileResource`]: an owned file handle
//! tracking open/lock/error state. Resources come from two factories:
//! - [`factory::open_at_path`] opens a file at a fixed path, creating
//!   parent directories as needed;
//! - [`factory::allocate_unique`] creates a file with a collision-free
//!   generated name inside a directory shared by concurrent callers,
//!   serialized through a per-directory coordination flock.
//!
//! Locking is strictly single-host, advisory, and cooperative: processes
//! that never take the lock are not excluded by it.

pub mod error;
pub mod exit_codes;
pub mod factory;
pub mod perms;
pub mod random;
pub mod resource;

pub use error::{ErrorKind, FileError, LastError, Result};
pub use factory::{allocate_unique, open_at_path, UniqueOptions};
pub use perms::Perms;
pub use resource::{FileResource, LockFlag, LockState, OpenMode};
