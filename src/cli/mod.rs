use crate::analysis::OutputFormat;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::feed::{FeedClient, TimeWindow};
use crate::notify::{StdoutNotifier, TelegramNotifier};
use crate::pipeline::{run_once, RunOptions, RunReport};
use crate::utils::time::{now_unix, resolve_window, DEFAULT_INTERVAL_MINUTES};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// Whale transaction flow signals
#[derive(Parser, Debug)]
#[command(name = "whale-flow-signals")]
#[command(about = "Summarise whale mints, burns and exchange flows into bull/bear signals")]
#[command(version)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'c', long = "config", default_value = "config.json")]
    pub config: PathBuf,

    /// Minutes between start and end when they are not given
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MINUTES)]
    pub interval: i64,

    /// Window start in unix seconds (default: now truncated to the minute, minus interval)
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<i64>,

    /// Inclusive window end in unix seconds (default: start + interval - 1s)
    #[arg(long, allow_hyphen_values = true)]
    pub end: Option<i64>,

    /// Print the report and diagnostics instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Do not write wallets to the reputation database
    #[arg(long)]
    pub no_record: bool,

    /// Report format: markdown, plain or json (default: markdown, plain with --dry-run)
    #[arg(long)]
    pub format: Option<String>,
}

impl Cli {
    /// Resolve the fetch window against the current time
    pub fn window(&self, now: i64) -> AppResult<TimeWindow> {
        if self.interval <= 0 {
            return Err(AppError::Config(format!(
                "interval must be positive, got {}",
                self.interval
            )));
        }
        let window =
            resolve_window(now, self.interval, self.start, self.end).ok_or_else(|| {
                AppError::Config(format!(
                    "window out of range (interval {} min, start {:?}, end {:?})",
                    self.interval, self.start, self.end
                ))
            })?;
        if !window.is_valid() {
            return Err(AppError::Config(format!(
                "start ({}) is after end ({})",
                window.start, window.end
            )));
        }
        Ok(window)
    }

    pub fn run_options(&self) -> AppResult<RunOptions> {
        let format = match &self.format {
            Some(name) => name.parse::<OutputFormat>()?,
            None if self.dry_run => OutputFormat::Plain,
            None => OutputFormat::Markdown,
        };
        Ok(RunOptions {
            record_wallets: !self.no_record,
            format,
        })
    }
}

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "whale_flow_signals=info";

pub async fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to info for this crate only)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .try_init();

    let cli = Cli::parse();
    execute(&cli).await.map(|report| {
        debug!("{:?}", report);
    })
}

/// Load configuration and run once with the given arguments
pub async fn execute(cli: &Cli) -> AppResult<RunReport> {
    let config = AppConfig::load(&cli.config)?;
    let window = cli.window(now_unix())?;
    let feed = FeedClient::from_config(&config.whale_alert)?;
    let options = cli.run_options()?;

    if cli.dry_run {
        info!("Dry run: messages go to stdout");
        run_once(&feed, &StdoutNotifier, &config, window, &options).await
    } else {
        let notifier = TelegramNotifier::new(&config.telegram)?;
        run_once(&feed, &notifier, &config, window, &options).await
    }
}
