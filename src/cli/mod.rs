//! CLI argument parsing for filehold.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand, ValueEnum};
use filehold::resource::OpenMode;
use std::path::PathBuf;

/// Managed file handles with advisory locking and unique-name allocation.
///
/// Every subcommand acquires the appropriate advisory lock around its file
/// operation, so concurrent invocations against the same file cooperate:
/// writers exclude everyone, readers exclude writers only.
#[derive(Parser, Debug)]
#[command(name = "filehold")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for filehold.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Allocate a file with a unique generated name inside a directory.
    ///
    /// Serializes name generation against sibling processes through the
    /// directory's coordination lock file, then prints the allocated path.
    Alloc(AllocArgs),

    /// Write data to a file under an exclusive lock.
    ///
    /// Creates the file (and parent directories) if missing. With --hold,
    /// keeps the exclusive lock for the given number of seconds after
    /// writing, to demonstrate cooperative blocking.
    Write(WriteArgs),

    /// Read a byte range from a file under a shared lock.
    ///
    /// Prints the bytes to stdout.
    Read(ReadArgs),

    /// Change the permission bits of a file.
    Chmod(ChmodArgs),

    /// Delete a file through its resource (delete-on-close).
    Rm(RmArgs),
}

/// Open mode selection on the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    /// Read-only; the file must exist.
    Read,
    /// Write-only; created if missing.
    Write,
    /// Read/write; created if missing.
    ReadWrite,
    /// Append-only; created if missing.
    Append,
    /// Read/write; must not already exist.
    CreateNew,
}

impl From<ModeArg> for OpenMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Read => OpenMode::Read,
            ModeArg::Write => OpenMode::Write,
            ModeArg::ReadWrite => OpenMode::ReadWrite,
            ModeArg::Append => OpenMode::Append,
            ModeArg::CreateNew => OpenMode::CreateNew,
        }
    }
}

/// Arguments for the alloc command.
#[derive(clap::Args, Debug)]
pub struct AllocArgs {
    /// Directory to allocate in (created if missing).
    pub dir: PathBuf,

    /// Extension for the allocated file, without the dot.
    #[arg(long)]
    pub ext: Option<String>,

    /// Fixed prefix placed before the random component.
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Length of the random alphanumeric component.
    #[arg(long, default_value_t = 10)]
    pub random_len: usize,

    /// Skip the timestamp component of the generated name.
    #[arg(long)]
    pub no_timestamp: bool,

    /// Permission bits for the allocated file, octal string form.
    #[arg(long, default_value = "0600")]
    pub perms: String,

    /// Open mode for the allocated file.
    #[arg(long, value_enum, default_value_t = ModeArg::ReadWrite)]
    pub mode: ModeArg,
}

/// Arguments for the write command.
#[derive(clap::Args, Debug)]
pub struct WriteArgs {
    /// Target file path.
    pub path: PathBuf,

    /// Data to write.
    pub data: String,

    /// Byte offset to write at.
    #[arg(long, default_value_t = 0)]
    pub at: u64,

    /// Keep the exclusive lock for this many seconds after writing.
    #[arg(long)]
    pub hold: Option<u64>,

    /// Permission bits for a newly created file, octal string form.
    #[arg(long, default_value = "0600")]
    pub perms: String,
}

/// Arguments for the read command.
#[derive(clap::Args, Debug)]
pub struct ReadArgs {
    /// Target file path.
    pub path: PathBuf,

    /// Byte offset to start reading at.
    #[arg(long, default_value_t = 0)]
    pub start: u64,

    /// Number of bytes to read; 0 reads to end of file.
    #[arg(long, default_value_t = 0)]
    pub length: u64,
}

/// Arguments for the chmod command.
#[derive(clap::Args, Debug)]
pub struct ChmodArgs {
    /// Target file path.
    pub path: PathBuf,

    /// Permission bits, octal string form (e.g. "0644").
    pub perms: String,
}

/// Arguments for the rm command.
#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Target file path.
    pub path: PathBuf,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
