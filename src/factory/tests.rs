//! Tests for the path and unique-name factories.

use super::*;
use crate::error::ErrorKind;
use crate::perms::Perms;
use crate::resource::OpenMode;
use std::collections::HashSet;
use tempfile::TempDir;

fn unique_opts_no_timestamp() -> UniqueOptions {
    UniqueOptions {
        time_format: None,
        ..UniqueOptions::default()
    }
}

#[test]
fn open_at_path_creates_nested_parents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("test.txt");

    let mut res = open_at_path(&path, OpenMode::ReadWrite, Perms::from(0o644)).unwrap();

    assert!(res.opened());
    assert!(path.is_file());
    assert!(path.parent().unwrap().is_dir());

    res.write_locked(b"hello", 0).unwrap();
    assert_eq!(res.read_locked(0, 0).unwrap(), b"hello");
}

#[cfg(unix)]
#[test]
fn open_at_path_applies_perms() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x").join("test.txt");

    let res = open_at_path(&path, OpenMode::ReadWrite, Perms::from(0o644)).unwrap();

    let mode = std::fs::metadata(res.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o7777, 0o644);
    assert_eq!(res.perms().bits(), 0o644);
}

#[test]
fn open_at_path_rejects_file_as_parent() {
    let dir = TempDir::new().unwrap();
    let parent = dir.path().join("not-a-dir");
    std::fs::write(&parent, b"regular file").unwrap();

    let target = parent.join("test.txt");
    let err = open_at_path(&target, OpenMode::ReadWrite, Perms::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PathConflict);
    assert!(!target.exists());
}

#[test]
fn open_at_path_rejects_directory_target() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("im-a-dir");
    std::fs::create_dir(&target).unwrap();

    let err = open_at_path(&target, OpenMode::ReadWrite, Perms::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PathConflict);
}

#[test]
fn open_at_path_reuses_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("existing.txt");
    std::fs::write(&path, b"previous content").unwrap();

    let mut res = open_at_path(&path, OpenMode::ReadWrite, Perms::default()).unwrap();

    // No truncation in the default mode.
    assert_eq!(res.read(0, 0).unwrap(), b"previous content");
}

#[test]
fn allocate_unique_creates_open_empty_file() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");

    let opts = UniqueOptions {
        ext: Some("txt".to_string()),
        ..unique_opts_no_timestamp()
    };
    let mut res = allocate_unique(&data_dir, &opts).unwrap();

    assert!(res.opened());
    assert!(res.is_read_write());
    assert!(res.exists());
    assert_eq!(res.size().unwrap(), 0);
    assert!(res.path().starts_with(&data_dir));
}

#[test]
fn allocated_name_matches_pattern() {
    let dir = TempDir::new().unwrap();

    let opts = UniqueOptions {
        prefix: "job_".to_string(),
        ext: Some("txt".to_string()),
        random_len: 10,
        ..unique_opts_no_timestamp()
    };
    let res = allocate_unique(dir.path(), &opts).unwrap();

    let name = res.path().file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("job_"));
    assert!(name.ends_with(".txt"));

    let random_part = &name["job_".len()..name.len() - ".txt".len()];
    assert_eq!(random_part.len(), 10);
    assert!(random_part.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn allocated_name_carries_timestamp_prefix() {
    let dir = TempDir::new().unwrap();

    let opts = UniqueOptions {
        time_format: Some("%Y__".to_string()),
        random_len: 6,
        ..UniqueOptions::default()
    };
    let res = allocate_unique(dir.path(), &opts).unwrap();

    let name = res.path().file_name().unwrap().to_str().unwrap();
    let year = chrono::Local::now().format("%Y__").to_string();
    assert!(name.starts_with(&year));
    assert_eq!(name.len(), year.len() + 6);
}

#[test]
fn allocate_unique_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("fresh").join("deeper");

    let res = allocate_unique(&data_dir, &unique_opts_no_timestamp()).unwrap();

    assert!(data_dir.is_dir());
    assert!(res.exists());
}

#[test]
fn allocate_unique_rejects_file_as_directory() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file, not dir").unwrap();

    let err = allocate_unique(&blocker, &unique_opts_no_timestamp()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PathConflict);
}

#[test]
fn allocate_unique_leaves_reusable_lock_file() {
    let dir = TempDir::new().unwrap();
    let opts = unique_opts_no_timestamp();

    allocate_unique(dir.path(), &opts).unwrap();

    let lock_path = dir.path().join(DEFAULT_LOCK_NAME);
    assert!(lock_path.is_file());

    // The released lock file holds the last holder's metadata.
    let content = std::fs::read_to_string(&lock_path).unwrap();
    let holder: HolderInfo = serde_json::from_str(&content).unwrap();
    assert_eq!(holder.pid, std::process::id());
}

#[test]
fn sequential_allocations_are_distinct() {
    let dir = TempDir::new().unwrap();
    let opts = UniqueOptions {
        ext: Some("dat".to_string()),
        // Same-second timestamps collide by construction; the random
        // component must keep the names apart.
        time_format: Some("%d_%m_%Y__%H_%M_%S__".to_string()),
        ..UniqueOptions::default()
    };

    let mut seen = HashSet::new();
    for _ in 0..20 {
        let res = allocate_unique(dir.path(), &opts).unwrap();
        assert!(res.exists());
        assert!(seen.insert(res.path().to_path_buf()), "name collision");
    }
}

#[test]
fn concurrent_allocations_are_distinct() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().to_path_buf();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let base = base.clone();
            std::thread::spawn(move || {
                let mut paths = Vec::new();
                for _ in 0..5 {
                    let res = allocate_unique(&base, &unique_opts_no_timestamp()).unwrap();
                    paths.push(res.path().to_path_buf());
                }
                paths
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for path in handle.join().unwrap() {
            assert!(path.is_file());
            assert!(seen.insert(path), "concurrent name collision");
        }
    }
    assert_eq!(seen.len(), 40);
}

#[test]
fn dir_lock_excludes_second_holder() {
    let dir = TempDir::new().unwrap();
    let lock_path = dir.path().join("lock");

    let guard = DirLock::acquire(&lock_path).unwrap();

    let probe = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .open(&lock_path)
        .unwrap();
    assert!(fs2::FileExt::try_lock_exclusive(&probe).is_err());

    guard.release().unwrap();
    fs2::FileExt::try_lock_exclusive(&probe).unwrap();
}

#[test]
fn dir_lock_released_on_drop() {
    let dir = TempDir::new().unwrap();
    let lock_path = dir.path().join("lock");

    {
        let _guard = DirLock::acquire(&lock_path).unwrap();
    }

    let probe = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .open(&lock_path)
        .unwrap();
    fs2::FileExt::try_lock_exclusive(&probe).unwrap();
}

#[cfg(unix)]
#[test]
fn allocate_unique_applies_perms() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let opts = UniqueOptions {
        perms: Perms::from(0o640),
        ..unique_opts_no_timestamp()
    };

    let res = allocate_unique(dir.path(), &opts).unwrap();

    let mode = std::fs::metadata(res.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o7777, 0o640);
}
