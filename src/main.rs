//! filehold: managed file handles with advisory locking and unique-name
//! allocation.
//!
//! This is the main entry point for the `filehold` CLI. It parses
//! arguments, dispatches to the appropriate command handler, and maps
//! errors to exit codes by kind.

mod cli;
mod commands;

use cli::Cli;
use filehold::exit_codes;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
