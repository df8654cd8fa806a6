//! This file defines the command-line interface (CLI) for the mongosan application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use mongosan_core::{RequestField, SanitizeOptions};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "mongosan",
    author = "Mongosan Contributors",
    version = env!("CARGO_PKG_VERSION"),
    about = "Neutralize query operators in untrusted JSON",
    long_about = "Mongosan rewrites the `$` and `.` characters found in keys and string \
                  values of a JSON document, so data taken from request bodies, query \
                  strings, route parameters or headers can no longer inject operators \
                  into a document query built from it.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(
        long,
        short = 'q',
        global = true,
        help = "Suppress all informational and debug messages.",
    )]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `mongosan` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes a JSON document read from a file or stdin.
    #[command(about = "Sanitizes a JSON document read from a file or stdin.")]
    Sanitize(SanitizeCommand),

    /// Lists every key and string value that would be rewritten, without rewriting.
    #[command(
        about = "Lists every key and string value that would be rewritten, without rewriting.",
    )]
    Scan(ScanCommand),

    /// Sanitizes the body, query, params and headers of a JSON request envelope.
    #[command(about = "Sanitizes the body, query, params and headers of a JSON request envelope.")]
    Request(RequestCommand),
}

/// Policy settings shared by every command. Flags override the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct PolicyArgs {
    /// Path to a YAML or JSON options file.
    #[arg(long = "config", value_name = "FILE", help = "Path to a YAML or JSON options file.")]
    pub config: Option<PathBuf>,

    /// Replacement for each forbidden character.
    #[arg(
        long = "replace-with",
        value_name = "STRING",
        help = "Replacement for each forbidden character (default '_').",
    )]
    pub replace_with: Option<String>,

    /// Only treat `$` as forbidden.
    #[arg(long = "allow-dots", help = "Leave '.' alone and only neutralize '$'.")]
    pub allow_dots: bool,

    /// Detect without rewriting.
    #[arg(
        long = "dry-run",
        help = "Report whether sanitization is needed without rewriting anything.",
    )]
    pub dry_run: bool,

    /// Reject input nested deeper than N containers.
    #[arg(
        long = "max-depth",
        value_name = "N",
        help = "Reject input nested deeper than N containers.",
    )]
    pub max_depth: Option<usize>,
}

impl PolicyArgs {
    /// Loads `--config` (if any) and applies the command-line overrides on top.
    pub fn resolve(&self) -> Result<SanitizeOptions> {
        let mut options = match &self.config {
            Some(path) => SanitizeOptions::load_from_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?,
            None => SanitizeOptions::default(),
        };
        if let Some(replace_with) = &self.replace_with {
            options.replace_with = replace_with.clone();
        }
        if self.allow_dots {
            options.allow_dots = true;
        }
        if self.dry_run {
            options.dry_run = true;
        }
        if self.max_depth.is_some() {
            options.max_depth = self.max_depth;
        }
        Ok(options)
    }
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(
        long,
        short = 'i',
        value_name = "FILE",
        help = "Read input from a specified file instead of stdin.",
    )]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(
        long,
        short = 'o',
        value_name = "FILE",
        help = "Write output to a specified file instead of stdout.",
    )]
    pub output: Option<PathBuf>,

    /// Show a unified diff to highlight the changes made.
    #[arg(long, short = 'D', help = "Show a unified diff to highlight the changes made.")]
    pub diff: bool,

    /// Print the document on a single line.
    #[arg(
        long,
        short = 'c',
        help = "Print the document on a single line instead of pretty-printing it.",
    )]
    pub compact: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(
        long,
        short = 'i',
        value_name = "FILE",
        help = "Read input from a specified file instead of stdin.",
    )]
    pub input_file: Option<PathBuf>,

    /// Print the matches and summary as JSON.
    #[arg(long = "json-stdout", help = "Print the matches and summary to stdout as JSON.")]
    pub json_stdout: bool,

    /// Exit with code 1 when anything matched.
    #[arg(
        long = "fail-on-match",
        help = "Exit with a non-zero code if anything would be sanitized.",
    )]
    pub fail_on_match: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Arguments for the `request` command.
#[derive(Parser, Debug)]
pub struct RequestCommand {
    /// Path to a request envelope (reads from stdin if not provided).
    #[arg(
        long,
        short = 'i',
        value_name = "FILE",
        help = "Read the request envelope from a file instead of stdin.",
    )]
    pub input_file: Option<PathBuf>,

    /// Write the processed envelope to this file instead of stdout.
    #[arg(
        long,
        short = 'o',
        value_name = "FILE",
        help = "Write output to a specified file instead of stdout.",
    )]
    pub output: Option<PathBuf>,

    /// Only process these fields (comma-separated).
    #[arg(
        long = "fields",
        value_delimiter = ',',
        value_parser = parse_request_field,
        help = "Only process these fields (comma-separated: body, query, params, headers)."
    )]
    pub fields: Vec<RequestField>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

fn parse_request_field(s: &str) -> Result<RequestField, String> {
    serde_json::from_value(serde_json::Value::String(s.trim().to_lowercase()))
        .map_err(|_| {
            format!(
                "unknown request field '{}'; expected body, query, params or headers",
                s
            )
        })
}
