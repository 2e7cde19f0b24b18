//! Signal analysis
//!
//! Converts per-asset supply and exchange-flow totals into bull/bear
//! annotations and renders them as report text.
//!
//! ## Usage
//!
//! ```rust
//! use whale_flow_signals::analysis::{render_report, OutputFormat};
//! use whale_flow_signals::types::{AggregateMap, StablecoinSet};
//!
//! let mut supply = AggregateMap::new();
//! supply.add("xyz", 2_000_000.0);
//! let text = render_report(
//!     &supply,
//!     &AggregateMap::new(),
//!     &StablecoinSet::default(),
//!     1_000_000.0,
//!     OutputFormat::Plain,
//! )
//! .unwrap();
//! assert_eq!(text, "Mints:\nXYZ: $2,000,000 (bear)");
//! ```

pub mod reports;
pub mod signals;

pub use reports::{render, OutputFormat};
pub use signals::{
    signal_for, AggregateKind, Section, Signal, SignalAnalyzer, SignalLine, SignalReport,
    DEFAULT_SIGNIFICANCE_FLOOR_USD,
};

use crate::errors::AppResult;
use crate::types::{AggregateMap, StablecoinSet};

/// Analyze both aggregates and render the report in one call
pub fn render_report(
    supply: &AggregateMap,
    flow: &AggregateMap,
    stablecoins: &StablecoinSet,
    significance_floor_usd: f64,
    format: OutputFormat,
) -> AppResult<String> {
    let analyzer = SignalAnalyzer::new(significance_floor_usd, stablecoins.clone());
    render(&analyzer.analyze(supply, flow), format)
}
