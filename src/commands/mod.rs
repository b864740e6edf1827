//! Command implementations for filehold.
//!
//! Thin wrappers over the library factories and resource operations;
//! no file-handling decision logic lives here.

use crate::cli::{AllocArgs, ChmodArgs, Command, ReadArgs, RmArgs, WriteArgs};
use filehold::error::Result;
use filehold::factory::{allocate_unique, open_at_path, UniqueOptions};
use filehold::perms::Perms;
use filehold::resource::{FileResource, OpenMode};
use std::io::Write;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Alloc(args) => cmd_alloc(args),
        Command::Write(args) => cmd_write(args),
        Command::Read(args) => cmd_read(args),
        Command::Chmod(args) => cmd_chmod(args),
        Command::Rm(args) => cmd_rm(args),
    }
}

fn cmd_alloc(args: AllocArgs) -> Result<()> {
    let opts = UniqueOptions {
        mode: args.mode.into(),
        perms: args.perms.parse()?,
        ext: args.ext,
        prefix: args.prefix,
        time_format: if args.no_timestamp {
            None
        } else {
            UniqueOptions::default().time_format
        },
        random_len: args.random_len,
        ..UniqueOptions::default()
    };

    let mut resource = allocate_unique(&args.dir, &opts)?;
    println!("{}", resource.path().display());
    resource.close()
}

fn cmd_write(args: WriteArgs) -> Result<()> {
    let perms: Perms = args.perms.parse()?;
    let mut resource = open_at_path(&args.path, OpenMode::ReadWrite, perms)?;

    match args.hold {
        None => resource.write_locked(args.data.as_bytes(), args.at)?,
        Some(secs) => {
            // Hold the exclusive lock across the sleep so concurrent
            // readers and writers can observe the cooperative blocking.
            resource.lock_exclusive()?;
            resource.write(args.data.as_bytes(), args.at)?;
            std::thread::sleep(std::time::Duration::from_secs(secs));
            resource.unlock()?;
        }
    }
    resource.close()
}

fn cmd_read(args: ReadArgs) -> Result<()> {
    let mut resource = FileResource::new(&args.path);
    resource.open(OpenMode::Read, Perms::default())?;

    let data = resource.read_locked(args.start, args.length)?;
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(&data);
    let _ = stdout.flush();

    resource.close()
}

fn cmd_chmod(args: ChmodArgs) -> Result<()> {
    let perms: Perms = args.perms.parse()?;
    let mut resource = FileResource::new(&args.path);
    resource.open(OpenMode::Read, Perms::default())?;
    resource.chmod(perms)?;
    resource.close()
}

fn cmd_rm(args: RmArgs) -> Result<()> {
    let mut resource = FileResource::new(&args.path);
    resource.open(OpenMode::Read, Perms::default())?;
    resource.delete()
}
