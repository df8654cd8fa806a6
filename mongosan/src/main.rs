// mongosan/src/main.rs
//! Mongosan entry point.
//!
//! Parses the command line, installs the logger and dispatches to the
//! selected command. Exit codes: 0 on success, 1 when `scan --fail-on-match`
//! found something, 2 on any error.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use mongosan::cli::{Cli, Commands};
use mongosan::commands::{self, error_msg};
use mongosan::logger;

fn run(args: &Cli) -> Result<ExitCode> {
    match &args.command {
        Commands::Sanitize(cmd) => commands::sanitize::run_sanitize(cmd, args.quiet)?,
        Commands::Scan(cmd) => {
            if commands::scan::run_scan(cmd)? {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Request(cmd) => commands::request::run_request(cmd, args.quiet)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error_msg(format!("{:#}", e));
            ExitCode::from(2)
        }
    }
}
