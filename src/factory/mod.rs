//! Factories producing opened [`FileResource`](crate::resource::FileResource)s.
//!
//! Two allocation strategies:
//! - [`open_at_path`] — a caller-specified path, parent directories created
//!   as needed.
//! - [`allocate_unique`] — a collision-free generated name inside a
//!   directory shared by concurrent callers, serialized by a per-directory
//!   coordination flock ([`DirLock`]).
//!
//! The coordination lock is a narrow critical section around name
//! generation and file creation; it is released before the factory
//! returns and is unrelated to any lock later taken on the allocated
//! file itself.

mod guard;
mod holder;
mod path;
mod unique;

#[cfg(test)]
mod tests;

pub use guard::DirLock;
pub use holder::HolderInfo;
pub use path::open_at_path;
pub use unique::{allocate_unique, UniqueOptions, DEFAULT_LOCK_NAME, DEFAULT_TIME_FORMAT};
