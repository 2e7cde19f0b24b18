use tracing::debug;

use crate::processor::classifier::{classify, describe_unhandled, Classification};
use crate::types::{RemapTable, Summary, Transaction};

/// Running aggregation over a stream of transactions
///
/// Built fresh for every run; nothing carries over between runs.
#[derive(Debug, Default)]
pub struct Aggregator<'a> {
    remap: Option<&'a RemapTable>,
    summary: Summary,
}

impl<'a> Aggregator<'a> {
    pub fn new(remap: &'a RemapTable) -> Self {
        Self {
            remap: Some(remap),
            summary: Summary::default(),
        }
    }

    /// Classify one transaction and fold it into the totals
    pub fn record(&mut self, transaction: &Transaction) -> Classification {
        let symbol = match self.remap {
            Some(remap) => remap.resolve(&transaction.symbol),
            None => transaction.symbol.as_str(),
        };
        let amount = transaction.amount_usd;
        let classification = classify(transaction);

        match &classification {
            Classification::Mint => self.summary.supply.add(symbol, amount),
            Classification::Burn => self.summary.supply.add(symbol, -amount),
            Classification::ExchangeInflow => self.summary.flow.add(symbol, amount),
            Classification::ExchangeOutflow => self.summary.flow.add(symbol, -amount),
            Classification::Unhandled => {
                self.summary.unhandled.push(describe_unhandled(transaction))
            }
            Classification::Ignored(reason) => {
                debug!("Ignoring {} {} ({:?})", symbol, transaction.id, reason)
            }
        }

        classification
    }

    pub fn finish(self) -> Summary {
        self.summary
    }
}

/// Classify and aggregate `transactions` in a single pass
pub fn summarize(transactions: &[Transaction], remap: &RemapTable) -> Summary {
    let mut aggregator = Aggregator::new(remap);
    for transaction in transactions {
        aggregator.record(transaction);
    }
    let summary = aggregator.finish();

    debug!(
        "Summarised {} transaction(s): {} supply asset(s), {} flow asset(s), {} unhandled",
        transactions.len(),
        summary.supply.len(),
        summary.flow.len(),
        summary.unhandled.len()
    );
    summary
}
