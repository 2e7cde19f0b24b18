//! Aggregation types produced by the classifier pass

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Normalise an asset symbol to its map key
///
/// Symbols are compared case-insensitively and displayed uppercase, so the
/// uppercase form doubles as the key.
pub fn normalise_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Signed USD totals per asset symbol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateMap {
    totals: BTreeMap<String, f64>,
}

impl AggregateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a signed delta to the symbol's running total
    pub fn add(&mut self, symbol: &str, delta: f64) {
        *self.totals.entry(normalise_symbol(symbol)).or_insert(0.0) += delta;
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.totals.get(&normalise_symbol(symbol)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(symbol, total)| (symbol.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl FromIterator<(String, f64)> for AggregateMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut map = AggregateMap::new();
        for (symbol, delta) in iter {
            map.add(&symbol, delta);
        }
        map
    }
}

/// Raw symbol to canonical symbol table
///
/// Lets near-duplicate tickers (e.g. PAX and USDP) accumulate in one bucket.
/// Lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapTable {
    entries: HashMap<String, String>,
}

impl RemapTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, raw: &str, canonical: &str) {
        self.entries
            .insert(raw.trim().to_lowercase(), canonical.trim().to_string());
    }

    /// Canonical symbol for `raw`, or `raw` unchanged when there is no entry
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.entries
            .get(&raw.trim().to_lowercase())
            .map(String::as_str)
            .unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&HashMap<String, String>> for RemapTable {
    fn from(map: &HashMap<String, String>) -> Self {
        let mut table = RemapTable::new();
        for (raw, canonical) in map {
            table.insert(raw, canonical);
        }
        table
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RemapTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut table = RemapTable::new();
        for (raw, canonical) in iter {
            table.insert(raw, canonical);
        }
        table
    }
}

/// Tickers treated as stablecoins by the signal heuristic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StablecoinSet {
    tickers: HashSet<String>,
}

impl StablecoinSet {
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tickers: tickers
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// Case-insensitive exact match; unknown tickers are not stablecoins
    pub fn contains(&self, symbol: &str) -> bool {
        self.tickers.contains(&symbol.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

/// Output of one classification pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Positive = net minted, negative = net burned
    pub supply: AggregateMap,
    /// Positive = net inflow to exchanges, negative = net outflow
    pub flow: AggregateMap,
    /// Diagnostic lines for transaction kinds the classifier does not know
    pub unhandled: Vec<String>,
}
