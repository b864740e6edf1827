//! Random alphanumeric string generation for unique filenames.
//!
//! Suffixes are drawn from the OS entropy source so that concurrent
//! allocators on the same directory cannot be steered into collisions by a
//! predictable PRNG seed.

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Generate a random alphanumeric string of `len` characters.
///
/// Characters are sampled uniformly from `[a-zA-Z0-9]` (62 symbols) using
/// the operating system's CSPRNG. A `len` of zero is bumped to one so the
/// generated component is never empty.
pub fn alnum_string(len: usize) -> String {
    let len = len.max(1);
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
