//! `mongosan request`: run the request adapter over a JSON envelope.
//!
//! The envelope has the shape of [`JsonRequest`]: optional `body`, `query`,
//! `params` and `headers`. The output repeats them untouched and adds the
//! `sanitized_*` copies.

use anyhow::{Context, Result};
use log::info;

use mongosan_core::{JsonRequest, MongosanError, RequestSanitizer};

use super::{info_msg, read_input, render_json, warn_msg, write_output};
use crate::cli::RequestCommand;

pub fn run_request(cmd: &RequestCommand, quiet: bool) -> Result<()> {
    info!("Starting mongosan request operation.");
    let mut options = cmd.policy.resolve()?;
    if !cmd.fields.is_empty() {
        options.fields = cmd.fields.clone();
    }
    if options.replace_with.is_empty() && !quiet {
        warn_msg(
            "Empty replacement: keys that differ only by '$' or '.' will collide \
             and the later one wins.",
        );
    }

    let input = read_input(cmd.input_file.as_deref())?;
    let mut request: JsonRequest = serde_json::from_str(&input)
        .map_err(MongosanError::InvalidJson)
        .context("Failed to read request envelope")?;

    let dry_run = options.dry_run;
    let sanitizer = RequestSanitizer::new(&options).on_sanitize(move |field| {
        if quiet {
            return;
        }
        if dry_run {
            info_msg(format!("Request field '{}' would be sanitized.", field));
        } else {
            info_msg(format!("Sanitized request field '{}'.", field));
        }
    });

    let modified = sanitizer.sanitize_request(&mut request)?;
    info!("Request processed; {} field(s) modified.", modified.len());

    let rendered = render_json(&serde_json::to_value(&request)?, false)?;
    write_output(cmd.output.as_deref(), &rendered)?;
    Ok(())
}
