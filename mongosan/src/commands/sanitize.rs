//! `mongosan sanitize`: rewrite one JSON document.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};

use mongosan_core::sanitize_checked;

use super::{info_msg, parse_json, read_input, render_json, success_msg, warn_msg, write_output};
use crate::cli::SanitizeCommand;
use crate::ui::diff_viewer;

pub fn run_sanitize(cmd: &SanitizeCommand, quiet: bool) -> Result<()> {
    info!("Starting mongosan sanitize operation.");
    let options = cmd.policy.resolve()?;
    if options.replace_with.is_empty() && !quiet {
        warn_msg(
            "Empty replacement: keys that differ only by '$' or '.' will collide \
             and the later one wins.",
        );
    }
    let input = read_input(cmd.input_file.as_deref())?;
    let value = parse_json(&input)?;

    let result = sanitize_checked(&value, &options).context("Sanitization failed")?;
    debug!("Document sanitized (modified: {}).", result.modified);

    let sanitized = render_json(&result.value, cmd.compact)?;
    if cmd.diff {
        let original = render_json(&value, cmd.compact)?;
        write_diff(cmd, &original, &sanitized)?;
    } else {
        write_output(cmd.output.as_deref(), &sanitized)?;
    }

    if !quiet {
        match (result.modified, options.dry_run) {
            (true, true) => info_msg(
                "Dry run: the input contains operator characters and would be modified.",
            ),
            (true, false) => success_msg("Operator characters were neutralized."),
            (false, _) => info_msg("Nothing to sanitize."),
        }
    }

    info!("Mongosan sanitize operation completed.");
    Ok(())
}

fn write_diff(cmd: &SanitizeCommand, original: &str, sanitized: &str) -> Result<()> {
    // Both renderings end with a newline so the last line diffs cleanly.
    let original = format!("{}\n", original);
    let sanitized = format!("{}\n", sanitized);
    match &cmd.output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            diff_viewer::print_diff(&original, &sanitized, &mut file, false)?;
        }
        None => {
            let stdout = io::stdout();
            let supports_color = stdout.is_terminal();
            let mut writer = stdout.lock();
            diff_viewer::print_diff(&original, &sanitized, &mut writer, supports_color)?;
            writer.flush()?;
        }
    }
    Ok(())
}
