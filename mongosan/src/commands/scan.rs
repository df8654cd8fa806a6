//! `mongosan scan`: report what would be rewritten without rewriting it.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::info;
use serde::Serialize;
use std::io;

use mongosan_core::{
    ensure_max_depth, summarize_matches, MatchSummary, OperatorEngine, OperatorMatch,
    SanitizationEngine,
};

use super::{parse_json, read_input};
use crate::cli::ScanCommand;
use crate::ui::match_report;

#[derive(Debug, Serialize)]
struct ScanReport<'a> {
    matches: &'a [OperatorMatch],
    summary: MatchSummary,
}

/// Returns `true` when `--fail-on-match` is set and something matched.
pub fn run_scan(cmd: &ScanCommand) -> Result<bool> {
    info!("Starting mongosan scan operation.");
    let options = cmd.policy.resolve()?;
    let input = read_input(cmd.input_file.as_deref())?;
    let value = parse_json(&input)?;
    if let Some(limit) = options.max_depth {
        ensure_max_depth(&value, limit)?;
    }

    let engine = OperatorEngine::new(options.to_policy());
    let matches = engine.find_matches(&value);
    let summary = summarize_matches(&matches);

    if cmd.json_stdout {
        let report = ScanReport {
            matches: &matches,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        match_report::print_matches(&matches, &summary, &mut stdout.lock(), supports_color)?;
    }

    info!("Mongosan scan operation completed with {} match(es).", matches.len());
    Ok(cmd.fail_on_match && !summary.is_empty())
}
