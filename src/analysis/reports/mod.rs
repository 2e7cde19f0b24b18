//! Report rendering
//!
//! Markdown is only produced here, at the boundary with the notifier; the
//! analyzer itself works on plain values.

use std::str::FromStr;

use crate::analysis::signals::{SignalLine, SignalReport};
use crate::errors::{AppError, AppResult};
use crate::utils::currency::format_usd;

/// Output format options for signal reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bot message with inline-code tickers
    #[default]
    Markdown,
    /// `TICKER: $amount (signal)` lines for terminals and logs
    Plain,
    /// Structured JSON for programmatic use
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "plain" | "text" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::Config(format!("Unknown output format: {}", other))),
        }
    }
}

/// Render a report in the requested format
///
/// An empty report renders as an empty string in the text formats.
pub fn render(report: &SignalReport, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Markdown => Ok(render_with(report, markdown_line)),
        OutputFormat::Plain => Ok(render_with(report, |line| line.to_string())),
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| AppError::InvalidData(format!("JSON export failed: {}", e))),
    }
}

/// Markdown line: ticker in inline code, left-aligned to five characters
pub fn markdown_line(line: &SignalLine) -> String {
    format!(
        "  `{:<5}`: {} ({})",
        line.ticker,
        format_usd(line.amount_usd),
        line.signal
    )
}

fn render_with<F>(report: &SignalReport, format_line: F) -> String
where
    F: Fn(&SignalLine) -> String,
{
    let mut out: Vec<String> = Vec::new();
    for (section, lines) in &report.sections {
        out.push(format!("{}:", section.header()));
        out.extend(lines.iter().map(&format_line));
    }
    out.join("\n")
}
