//! One-shot run: fetch, classify, analyze, notify
//!
//! Stages run strictly in sequence. Feed errors are reported to the log
//! destination but do not stop the run while any transactions were gathered.

use tracing::{error, info, warn};

use crate::analysis::{render, OutputFormat, SignalAnalyzer};
use crate::config::AppConfig;
use crate::database::record_best_effort;
use crate::errors::AppResult;
use crate::feed::{FeedClient, PageSource, TimeWindow};
use crate::notify::{Destination, Notifier};
use crate::processor::summarize;
use crate::utils::time::format_timestamp;

/// Per-run switches from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Upsert wallets into the reputation database when one is configured
    pub record_wallets: bool,
    pub format: OutputFormat,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            record_wallets: true,
            format: OutputFormat::Markdown,
        }
    }
}

/// What a run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub transactions: usize,
    pub feed_error: Option<String>,
    pub wallets_recorded: usize,
    pub unhandled: usize,
    pub sections: usize,
    pub report_sent: bool,
}

/// Execute one full run over `window`
pub async fn run_once<S, N>(
    feed: &FeedClient<S>,
    notifier: &N,
    config: &AppConfig,
    window: TimeWindow,
    options: &RunOptions,
) -> AppResult<RunReport>
where
    S: PageSource,
    N: Notifier,
{
    let mut report = RunReport::default();
    info!(
        "Fetching whale transactions from {} to {}",
        format_timestamp(window.start),
        format_timestamp(window.end)
    );

    let outcome = feed.fetch(window).await;
    if let Some(e) = &outcome.error {
        error!(
            "Feed error at {}: {}",
            outcome.location_hint.as_deref().unwrap_or("<no request>"),
            e
        );
        report.feed_error = Some(e.to_string());
        notify_best_effort(notifier, Destination::Log, &e.to_string()).await;
    }

    let transactions = outcome.transactions;
    report.transactions = transactions.len();
    if transactions.is_empty() {
        info!("No transactions in window, nothing to report");
        return Ok(report);
    }

    if options.record_wallets {
        if let Some(path) = &config.log_db_path {
            report.wallets_recorded = record_best_effort(path, &transactions);
        }
    }

    let summary = summarize(&transactions, &config.remap_table());
    report.unhandled = summary.unhandled.len();
    if !summary.unhandled.is_empty() {
        let text = format!("unhandled:\n{}", summary.unhandled.join("\n"));
        notify_best_effort(notifier, Destination::Log, &text).await;
    }

    let analyzer = SignalAnalyzer::new(
        config.analysis.significance_floor_usd,
        config.stablecoins(),
    );
    let signals = analyzer.analyze_summary(&summary);
    report.sections = signals.sections.len();
    if signals.is_empty() {
        info!(
            "No asset moved more than ${} in this window",
            analyzer.significance_floor_usd()
        );
        return Ok(report);
    }

    let text = render(&signals, options.format)?;
    report.report_sent = notify_best_effort(notifier, Destination::Primary, &text).await;

    info!(
        "Run complete: {} transaction(s), {} signal line(s), {} unhandled",
        report.transactions,
        signals.line_count(),
        report.unhandled
    );
    Ok(report)
}

/// Send and log failures; there is nowhere further to escalate them
async fn notify_best_effort<N: Notifier>(notifier: &N, destination: Destination, text: &str) -> bool {
    match notifier.send(destination, text).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to notify {} destination: {}", destination, e);
            false
        }
    }
}
