//! Markdown summary generation
//!
//! This module writes a small human-readable record of one check run.

use crate::output::report::CheckReport;
use crate::output::traits::OutputResult;
use crate::state::Transition;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of a check run
///
/// # Arguments
///
/// * `report` - The classified check results
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn write_markdown_summary(report: &CheckReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(report, Utc::now());

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a check report as markdown
pub fn format_markdown_summary(report: &CheckReport, finished_at: DateTime<Utc>) -> String {
    let mut md = String::new();

    md.push_str("# Sitewatch Check Summary\n\n");
    md.push_str(&format!(
        "- **Finished**: {}\n",
        finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("- **Sites checked**: {}\n\n", report.checked));

    if report.is_empty() {
        md.push_str("No changes detected.\n");
        return md;
    }

    for transition in Transition::ALL {
        let names = report.list(transition);
        if names.is_empty() {
            continue;
        }

        md.push_str(&format!("## {} ({})\n\n", transition.heading(), names.len()));
        for name in names {
            md.push_str(&format!("- {}\n", name));
        }
        md.push('\n');
    }

    md
}
