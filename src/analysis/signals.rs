//! Directional signals from aggregate totals
//!
//! | Map    | Sign         | Stablecoin | Signal |
//! |--------|--------------|------------|--------|
//! | supply | + (mint)     | yes        | bull   |
//! | supply | + (mint)     | no         | bear   |
//! | supply | - (burn)     | yes        | bear   |
//! | supply | - (burn)     | no         | bull   |
//! | flow   | + (inflow)   | yes        | bull   |
//! | flow   | + (inflow)   | no         | bear   |
//! | flow   | - (outflow)  | yes        | bear   |
//! | flow   | - (outflow)  | no         | bull   |

use serde::Serialize;
use std::fmt;

use crate::types::{normalise_symbol, AggregateMap, StablecoinSet, Summary};
use crate::utils::currency::format_usd;

/// Default significance floor in USD
pub const DEFAULT_SIGNIFICANCE_FLOOR_USD: f64 = 1_000_000.0;

/// Which aggregate a total came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    Supply,
    Flow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Bull,
    Bear,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Bull => "bull",
            Signal::Bear => "bear",
        }
    }

    fn flipped(self) -> Self {
        match self {
            Signal::Bull => Signal::Bear,
            Signal::Bear => Signal::Bull,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report sections in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Mints,
    Burns,
    ExchangeInflow,
    ExchangeOutflow,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Mints,
        Section::Burns,
        Section::ExchangeInflow,
        Section::ExchangeOutflow,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Section::Mints => "Mints",
            Section::Burns => "Burns",
            Section::ExchangeInflow => "Exchange Inflow",
            Section::ExchangeOutflow => "Exchange Outflow",
        }
    }

    /// Section for a non-zero total of the given aggregate
    pub fn for_total(kind: AggregateKind, total: f64) -> Self {
        match (kind, total > 0.0) {
            (AggregateKind::Supply, true) => Section::Mints,
            (AggregateKind::Supply, false) => Section::Burns,
            (AggregateKind::Flow, true) => Section::ExchangeInflow,
            (AggregateKind::Flow, false) => Section::ExchangeOutflow,
        }
    }
}

/// Signal for a non-zero total
///
/// A positive total of a non-stablecoin is bearish in both maps (dilution,
/// selling intent); a stablecoin flips the reading, and so does a negative
/// total.
pub fn signal_for(total: f64, is_stablecoin: bool) -> Signal {
    let base = if total > 0.0 { Signal::Bear } else { Signal::Bull };
    if is_stablecoin {
        base.flipped()
    } else {
        base
    }
}

/// One asset line of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalLine {
    /// Uppercase ticker
    pub ticker: String,
    /// Absolute USD total
    pub amount_usd: f64,
    pub signal: Signal,
}

impl fmt::Display for SignalLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.ticker,
            format_usd(self.amount_usd),
            self.signal
        )
    }
}

/// Signal lines grouped by section; only non-empty sections, in output order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignalReport {
    pub sections: Vec<(Section, Vec<SignalLine>)>,
}

impl SignalReport {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, section: Section) -> Option<&[SignalLine]> {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, lines)| lines.as_slice())
    }

    pub fn line_count(&self) -> usize {
        self.sections.iter().map(|(_, lines)| lines.len()).sum()
    }
}

/// Turns supply and flow totals into a [`SignalReport`]
#[derive(Debug, Clone)]
pub struct SignalAnalyzer {
    significance_floor_usd: f64,
    stablecoins: StablecoinSet,
}

impl SignalAnalyzer {
    pub fn new(significance_floor_usd: f64, stablecoins: StablecoinSet) -> Self {
        Self {
            significance_floor_usd,
            stablecoins,
        }
    }

    pub fn significance_floor_usd(&self) -> f64 {
        self.significance_floor_usd
    }

    /// Whether a total is large enough to report
    ///
    /// `abs(total) < floor` is noise. Exact zero has no direction and is
    /// never reported.
    pub fn is_significant(&self, total: f64) -> bool {
        let abs = total.abs();
        abs > 0.0 && abs >= self.significance_floor_usd
    }

    /// Lines for one aggregate, tagged with their section
    pub fn lines(&self, kind: AggregateKind, totals: &AggregateMap) -> Vec<(Section, SignalLine)> {
        totals
            .iter()
            .filter(|(_, total)| self.is_significant(*total))
            .map(|(symbol, total)| {
                let line = SignalLine {
                    ticker: normalise_symbol(symbol),
                    amount_usd: total.abs(),
                    signal: signal_for(total, self.stablecoins.contains(symbol)),
                };
                (Section::for_total(kind, total), line)
            })
            .collect()
    }

    pub fn analyze(&self, supply: &AggregateMap, flow: &AggregateMap) -> SignalReport {
        let mut tagged = self.lines(AggregateKind::Supply, supply);
        tagged.extend(self.lines(AggregateKind::Flow, flow));

        let sections = Section::ALL
            .iter()
            .filter_map(|section| {
                let mut lines: Vec<SignalLine> = tagged
                    .iter()
                    .filter(|(s, _)| s == section)
                    .map(|(_, line)| line.clone())
                    .collect();
                if lines.is_empty() {
                    return None;
                }
                lines.sort_by(|a, b| a.ticker.cmp(&b.ticker));
                Some((*section, lines))
            })
            .collect();

        SignalReport { sections }
    }

    pub fn analyze_summary(&self, summary: &Summary) -> SignalReport {
        self.analyze(&summary.supply, &summary.flow)
    }
}
