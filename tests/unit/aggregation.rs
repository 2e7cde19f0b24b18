//! Classifier and aggregator properties

use crate::common::TxBuilder;
use whale_flow_signals::processor::{classify, summarize, Aggregator, Classification, IgnoreReason};
use whale_flow_signals::types::{RemapTable, Transaction};

const CATEGORIES: [&str; 5] = ["exchange", "unknown", "other", "miner", ""];

fn no_remap() -> RemapTable {
    RemapTable::new()
}

#[test]
fn test_mint_increases_and_burn_decreases_supply() {
    let remap = no_remap();
    let mut aggregator = Aggregator::new(&remap);

    aggregator.record(&TxBuilder::mint("usdc", 7_250_000.5).build());
    aggregator.record(&TxBuilder::burn("usdc", 1_000_000.25).build());
    aggregator.record(&TxBuilder::burn("wbtc", 3_000_000.0).build());
    let summary = aggregator.finish();

    assert_eq!(summary.supply.get("USDC"), Some(6_250_000.25));
    assert_eq!(summary.supply.get("WBTC"), Some(-3_000_000.0));
    assert!(summary.flow.is_empty());
}

#[test]
fn test_equal_categories_never_touch_aggregates() {
    let transactions: Vec<Transaction> = CATEGORIES
        .iter()
        .map(|c| TxBuilder::transfer("eth", c, c, 50_000_000.0).build())
        .collect();

    for tx in &transactions {
        assert_eq!(classify(tx), Classification::Ignored(IgnoreReason::Internal));
    }

    let summary = summarize(&transactions, &no_remap());
    assert!(summary.supply.is_empty());
    assert!(summary.flow.is_empty());
    assert!(summary.unhandled.is_empty());
}

#[test]
fn test_exchange_side_sets_flow_sign() {
    for other in CATEGORIES.iter().filter(|c| **c != "exchange") {
        let outflow = TxBuilder::transfer("btc", "exchange", other, 4_000_000.0).build();
        let inflow = TxBuilder::transfer("btc", other, "exchange", 4_000_000.0).build();

        let out_summary = summarize(&[outflow], &no_remap());
        assert_eq!(out_summary.flow.get("btc"), Some(-4_000_000.0), "from exchange to {:?}", other);

        let in_summary = summarize(&[inflow], &no_remap());
        assert_eq!(in_summary.flow.get("btc"), Some(4_000_000.0), "from {:?} to exchange", other);
    }
}

#[test]
fn test_non_exchange_pairs_are_dropped_silently() {
    let non_exchange: Vec<&str> = CATEGORIES.iter().copied().filter(|c| *c != "exchange").collect();
    let mut transactions = Vec::new();
    for from in &non_exchange {
        for to in &non_exchange {
            if from != to {
                transactions.push(TxBuilder::transfer("eth", from, to, 8_000_000.0).build());
            }
        }
    }
    assert!(!transactions.is_empty());

    let summary = summarize(&transactions, &no_remap());
    assert!(summary.flow.is_empty());
    assert!(summary.supply.is_empty());
    assert!(summary.unhandled.is_empty());
}

#[test]
fn test_only_unknown_kinds_are_unhandled() {
    let transactions = vec![
        TxBuilder::new("lock", "usdt", 2_000_000.0)
            .categories("unknown", "exchange")
            .owners("", "bitfinex")
            .build(),
        TxBuilder::mint("usdt", 1.0).build(),
        TxBuilder::transfer("usdt", "unknown", "other", 1.0).build(),
    ];

    let summary = summarize(&transactions, &no_remap());

    assert_eq!(
        summary.unhandled,
        vec!["  lock:  unknown () -> exchange (bitfinex)".to_string()]
    );
    assert_eq!(summary.flow.get("usdt"), None);
}

#[test]
fn test_remap_combines_two_symbols() {
    let remap: RemapTable = [("pax", "usdp")].into_iter().collect();
    let pax = TxBuilder::transfer("pax", "unknown", "exchange", 2_000_000.0).build();
    let usdp = TxBuilder::transfer("usdp", "unknown", "exchange", 3_500_000.0).build();

    let separate_pax = summarize(&[pax.clone()], &no_remap()).flow.get("pax").unwrap();
    let separate_usdp = summarize(&[usdp.clone()], &no_remap()).flow.get("usdp").unwrap();

    let merged = summarize(&[pax, usdp], &remap);
    assert_eq!(merged.flow.len(), 1);
    assert_eq!(merged.flow.get("USDP"), Some(separate_pax + separate_usdp));
}

#[test]
fn test_order_independent() {
    let mut transactions = vec![
        TxBuilder::mint("usdt", 1_000_000.0).build(),
        TxBuilder::burn("usdt", 250_000.0).build(),
        TxBuilder::transfer("eth", "exchange", "unknown", 3_000_000.0).build(),
        TxBuilder::transfer("eth", "unknown", "exchange", 1_000_000.0).build(),
    ];
    let forward = summarize(&transactions, &no_remap());
    transactions.reverse();
    let backward = summarize(&transactions, &no_remap());

    assert_eq!(forward.supply, backward.supply);
    assert_eq!(forward.flow, backward.flow);
}

#[test]
fn test_each_run_starts_empty() {
    let transactions = vec![TxBuilder::mint("usdt", 5_000_000.0).build()];
    let first = summarize(&transactions, &no_remap());
    let second = summarize(&transactions, &no_remap());
    assert_eq!(first.supply.get("usdt"), Some(5_000_000.0));
    assert_eq!(second.supply.get("usdt"), Some(5_000_000.0));
}
