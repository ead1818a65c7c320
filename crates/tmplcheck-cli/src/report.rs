//! # Report Rendering
//!
//! Writes a [`ValidationReport`] for a human (`text`) or a machine (`json`).

use std::io::{self, Write};

use clap::ValueEnum;
use tmplcheck_core::{Severity, ValidationReport};

/// Output format for the findings report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per finding followed by a result line.
    #[default]
    Text,
    /// The full report as a JSON object.
    Json,
}

/// Render `report` to `out` in the requested format.
pub fn render(
    report: &ValidationReport,
    format: OutputFormat,
    out: &mut dyn Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_text(report, out),
        OutputFormat::Json => render_json(report, out),
    }
}

fn render_text(report: &ValidationReport, out: &mut dyn Write) -> io::Result<()> {
    for finding in report.findings() {
        let label = match finding.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        };
        writeln!(
            out,
            "{label:<5}  {}: {}: {}",
            finding.path, finding.kind, finding.detail
        )?;
    }

    let verdict = if report.is_valid() { "valid" } else { "invalid" };
    writeln!(
        out,
        "configuration is {verdict} ({} error(s), {} warning(s))",
        report.error_count(),
        report.warning_count()
    )
}

fn render_json(report: &ValidationReport, out: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
