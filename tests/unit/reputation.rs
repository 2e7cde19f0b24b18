//! Reputation sink tests against throwaway SQLite files

use crate::common::TxBuilder;
use tempfile::TempDir;
use whale_flow_signals::database::{record_best_effort, ReputationStore};
use whale_flow_signals::errors::AppResult;

#[test]
fn test_records_both_wallets() -> AppResult<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("whales.db");
    let transactions = vec![
        TxBuilder::transfer("btc", "exchange", "unknown", 5e6)
            .blockchain("bitcoin")
            .addresses("1exchange", "1cold")
            .owners("binance", "")
            .build(),
        TxBuilder::mint("usdt", 5e6)
            .blockchain("tron")
            .addresses("", "Ttreasury")
            .owners("", "tether treasury")
            .build(),
    ];

    let written = record_best_effort(&path, &transactions);
    assert_eq!(written, 3);

    let store = ReputationStore::open(&path)?;
    assert_eq!(store.count()?, 3);

    let exchange = store.get("bitcoin", "1exchange")?.unwrap();
    assert_eq!(exchange.owner.as_deref(), Some("binance"));
    assert_eq!(exchange.owner_type, "exchange");

    let cold = store.get("bitcoin", "1cold")?.unwrap();
    assert_eq!(cold.owner, None);

    assert!(store.get("tron", "")?.is_none());
    Ok(())
}

#[test]
fn test_rerun_updates_existing_rows() -> AppResult<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("whales.db");

    let first = vec![TxBuilder::transfer("eth", "unknown", "other", 1.0)
        .addresses("0xa", "0xb")
        .build()];
    let second = vec![TxBuilder::transfer("eth", "exchange", "other", 1.0)
        .addresses("0xa", "0xb")
        .owners("coinbase", "")
        .build()];

    record_best_effort(&path, &first);
    record_best_effort(&path, &second);

    let store = ReputationStore::open(&path)?;
    assert_eq!(store.count()?, 2);
    let updated = store.get("ethereum", "0xa")?.unwrap();
    assert_eq!(updated.owner.as_deref(), Some("coinbase"));
    assert_eq!(updated.owner_type, "exchange");
    Ok(())
}

#[test]
fn test_unwritable_path_is_swallowed() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be opened as a database file
    let written = record_best_effort(dir.path(), &[TxBuilder::mint("usdt", 1.0).build()]);
    assert_eq!(written, 0);
}
