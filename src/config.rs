use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::types::{RemapTable, StablecoinSet};

/// Environment variable prefix for overrides, e.g. `WHALE_FLOW_WHALE_ALERT__API_KEY`
pub const ENV_PREFIX: &str = "WHALE_FLOW";

/// Application configuration loaded from a JSON file and environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub whale_alert: WhaleAlertConfig,
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub stable_coins: Vec<String>,
    #[serde(default)]
    pub remap: HashMap<String, String>,
    /// SQLite database for wallet reputation records, disabled when unset
    #[serde(default)]
    pub log_db_path: Option<PathBuf>,
}

/// Bot credentials and the two notification destinations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_id: String,
    /// Receives the rendered signal report
    pub recipient_id: String,
    /// Receives feed errors and unhandled-transaction diagnostics
    pub log_id: String,
    pub api_base: String,
    pub timeout_seconds: u64,
}

/// Transaction feed settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhaleAlertConfig {
    pub api_key: String,
    /// Minimum USD value of a transaction, passed through as `min_value`
    pub min: String,
    /// Page size
    pub limit: usize,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Absolute USD total below which an asset is left out of the report
    pub significance_floor_usd: f64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_id: String::new(),
            recipient_id: String::new(),
            log_id: String::new(),
            api_base: "https://api.telegram.org".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for WhaleAlertConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            min: "500000".to_string(),
            limit: 100,
            endpoint: "https://api.whale-alert.io/v1/transactions".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            significance_floor_usd: 1_000_000.0,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig::default(),
            whale_alert: WhaleAlertConfig::default(),
            analysis: AnalysisConfig::default(),
            stable_coins: Vec::new(),
            remap: HashMap::new(),
            log_db_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file, then apply environment overrides
    ///
    /// A missing file or malformed JSON is an error. An empty file is treated
    /// as "no settings" and yields the defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Cannot open configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&contents)
            .map_err(|e| AppError::Config(format!("Cannot load {}: {}", path.display(), e)))
    }

    /// Build configuration from JSON text plus environment overrides
    pub fn from_json_str(contents: &str) -> AppResult<Self> {
        let defaults = AppConfig::default();
        let mut builder = Config::builder()
            // Telegram defaults
            .set_default("telegram.bot_id", defaults.telegram.bot_id)?
            .set_default("telegram.recipient_id", defaults.telegram.recipient_id)?
            .set_default("telegram.log_id", defaults.telegram.log_id)?
            .set_default("telegram.api_base", defaults.telegram.api_base)?
            .set_default("telegram.timeout_seconds", defaults.telegram.timeout_seconds)?
            // Feed defaults
            .set_default("whale_alert.api_key", defaults.whale_alert.api_key)?
            .set_default("whale_alert.min", defaults.whale_alert.min)?
            .set_default("whale_alert.limit", defaults.whale_alert.limit as i64)?
            .set_default("whale_alert.endpoint", defaults.whale_alert.endpoint)?
            .set_default(
                "whale_alert.timeout_seconds",
                defaults.whale_alert.timeout_seconds,
            )?
            .set_default(
                "analysis.significance_floor_usd",
                defaults.analysis.significance_floor_usd,
            )?;

        if !contents.trim().is_empty() {
            builder = builder.add_source(File::from_str(contents, FileFormat::Json));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject settings that would make the feed loop or the report meaningless
    pub fn validate(&self) -> AppResult<()> {
        if self.whale_alert.limit == 0 {
            return Err(AppError::Config(
                "whale_alert.limit must be greater than zero".to_string(),
            ));
        }
        if !self.analysis.significance_floor_usd.is_finite()
            || self.analysis.significance_floor_usd < 0.0
        {
            return Err(AppError::Config(
                "analysis.significance_floor_usd must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn remap_table(&self) -> RemapTable {
        RemapTable::from(&self.remap)
    }

    pub fn stablecoins(&self) -> StablecoinSet {
        StablecoinSet::new(&self.stable_coins)
    }
}
