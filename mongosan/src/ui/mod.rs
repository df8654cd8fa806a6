//! Terminal output for the mongosan CLI.

pub mod diff_viewer;
pub mod match_report;
pub mod output_format;
