//! Binary entry point for the `mam` command-line tool.
//!
//! # Control flow
//!
//! 1. [`Cli::parse`] reads the command line.
//! 2. `-v` / `-q` adjust the process-wide display level.
//! 3. The selected subcommand runs; failures print one `mam: ...` line with
//!    their context chain and turn into a non-zero exit code.

use std::process::ExitCode;

use clap::Parser;

use mam::cli::args::{Cli, Command};
use mam::cli::commands;
use mam::cli::constants::{adjust_display_level, PROGRAM_NAME};

fn run(cli: Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Command::Compress(a) => commands::compress(a).map(|()| true),
        Command::Decompress(a) => commands::decompress(a).map(|()| true),
        Command::Info(a) => commands::info(a).map(|()| true),
        Command::Batch(a) => commands::batch(a).map(|()| true),
        Command::Verify(a) => commands::run_verify(a).map(|r| r.passed),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    adjust_display_level(cli.verbose, cli.quiet);

    mam::displaylevel!(
        3,
        "*** {} v{} {}-bit ***\n",
        PROGRAM_NAME,
        mam::version_string(),
        std::mem::size_of::<*const ()>() * 8
    );

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            mam::displaylevel!(1, "{}: {:#}\n", PROGRAM_NAME, e);
            ExitCode::FAILURE
        }
    }
}
